use crate::attr::catalog::{WellKnownStruct, well_known};
use crate::attr::diag::{DiagSink, Severity};
use crate::attr::error::{AttrError, Result};
use crate::attr::host::{ArrayShape, Container, HostModel, PropertyKind, Scalar};
use crate::attr::resolve::ResolvedProperty;
use crate::attr::value::{AttrValue, StorageKind, parse_double_prefix, parse_int_prefix};

/// Write `attr`'s element `element_index` into a resolved property.
///
/// Handles scalar-like properties (numeric, bool, string, name), well-known
/// structs, and object references, across plain, fixed-array, and
/// dynamic-array shapes. Change notifications are batched: one
/// property-changed per top-level property, then one edit-finished on the
/// owning object (and on its outer actor, if any), all after the last
/// component write.
pub fn write_property<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	attr: &AttrValue,
	element_index: usize,
) -> Result<()> {
	let property = &resolved.property;
	let base = element_index * attr.tuple_size;

	let modified = match &property.kind {
		PropertyKind::Numeric { .. } | PropertyKind::Bool | PropertyKind::Str | PropertyKind::Name => {
			write_scalars(host, sink, resolved, attr, base)?
		}
		PropertyKind::Struct { type_name } => {
			let Some(entry) = well_known(type_name) else {
				sink.message(
					Severity::Warning,
					&format!("unsupported struct property type {type_name} for attribute {}", attr.name),
				);
				return Err(AttrError::UnsupportedStructType {
					name: attr.name.clone(),
					type_name: type_name.clone(),
				});
			};
			write_well_known(host, sink, resolved, entry, attr, base)?
		}
		PropertyKind::Object { class_name } => write_object_ref(host, sink, resolved, class_name, attr, base)?,
		PropertyKind::Opaque { class_name } => {
			sink.message(
				Severity::Warning,
				&format!("unsupported property category {class_name} for attribute {}", attr.name),
			);
			return Err(AttrError::UnsupportedType {
				name: attr.name.clone(),
				category: class_name.clone(),
			});
		}
	};

	if modified {
		host.notify_property_changed(resolved.owner, &property.ident);
		host.notify_edit_finished(resolved.owner);
		if let Some(outer) = host.object_outer(resolved.owner) {
			// Property changes on a component may be handled in the actor's
			// own edit callbacks, so the outer actor is notified as well.
			if host.object_kind(outer).is_actor() {
				host.notify_edit_finished(outer);
			}
		}
	}

	Ok(())
}

/// Read a resolved property back into `attr` at `element_index`.
///
/// Mirror of [`write_property`] (native to attribute); fires no
/// notifications and tolerates arrays or fixed dimensions shorter than the
/// tuple by reading only what exists.
pub fn read_property<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	attr: &mut AttrValue,
	element_index: usize,
) -> Result<()> {
	let property = &resolved.property;
	let base = element_index * attr.tuple_size;

	match &property.kind {
		PropertyKind::Numeric { .. } | PropertyKind::Bool | PropertyKind::Str | PropertyKind::Name => {
			read_scalars(host, sink, resolved, attr, base)
		}
		PropertyKind::Struct { type_name } => {
			let Some(entry) = well_known(type_name) else {
				sink.message(
					Severity::Warning,
					&format!("unsupported struct property type {type_name} for attribute {}", attr.name),
				);
				return Err(AttrError::UnsupportedStructType {
					name: attr.name.clone(),
					type_name: type_name.clone(),
				});
			};
			read_well_known(host, sink, resolved, entry, attr, base)
		}
		PropertyKind::Object { .. } => read_object_ref(host, sink, resolved, attr, base),
		PropertyKind::Opaque { class_name } => {
			sink.message(
				Severity::Warning,
				&format!("unsupported property category {class_name} for attribute {}", attr.name),
			);
			Err(AttrError::UnsupportedType {
				name: attr.name.clone(),
				category: class_name.clone(),
			})
		}
	}
}

/// Answer the tuple size and storage kind an attribute needs to carry the
/// resolved property's value, for export-side attribute manufacturing.
pub fn infer_shape(sink: &mut dyn DiagSink, resolved: &ResolvedProperty) -> Result<(usize, StorageKind)> {
	match &resolved.property.kind {
		PropertyKind::Numeric { floating } => Ok((1, if *floating { StorageKind::Float } else { StorageKind::Int })),
		PropertyKind::Bool => Ok((1, StorageKind::Int)),
		PropertyKind::Str | PropertyKind::Name => Ok((1, StorageKind::String)),
		PropertyKind::Object { .. } => Ok((1, StorageKind::String)),
		PropertyKind::Struct { type_name } => match well_known(type_name) {
			Some(entry) => Ok((entry.arity(), entry.kind)),
			None => {
				sink.message(
					Severity::Warning,
					&format!("unsupported struct property type {type_name} on {}", resolved.property.ident),
				);
				Err(AttrError::UnsupportedStructType {
					name: resolved.property.ident.clone(),
					type_name: type_name.clone(),
				})
			}
		},
		PropertyKind::Opaque { class_name } => {
			sink.message(
				Severity::Warning,
				&format!("unsupported property category {class_name} on {}", resolved.property.ident),
			);
			Err(AttrError::UnsupportedType {
				name: resolved.property.ident.clone(),
				category: class_name.clone(),
			})
		}
	}
}

/// Pick the scalar to write for tuple component `t`, with core-side coercion.
///
/// A string attribute driving a numeric slot is parsed here, locale
/// independent; numeric slots otherwise receive float or int per the slot's
/// own floating-ness.
fn scalar_for_slot(kind: &PropertyKind, attr: &AttrValue, flat: usize) -> Scalar {
	match kind {
		PropertyKind::Numeric { floating } => {
			if attr.storage.is_string() {
				let text = attr.string(flat);
				if *floating {
					Scalar::F64(parse_double_prefix(&text))
				} else {
					Scalar::I64(parse_int_prefix(&text))
				}
			} else if *floating {
				Scalar::F64(attr.double(flat))
			} else {
				Scalar::I64(attr.int(flat))
			}
		}
		PropertyKind::Bool => Scalar::Bool(attr.boolean(flat)),
		PropertyKind::Str => Scalar::Str(attr.string(flat)),
		// Name slots get the string value wrapped as a name.
		_ => Scalar::Name(attr.string(flat)),
	}
}

fn write_scalars<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	attr: &AttrValue,
	base: usize,
) -> Result<bool> {
	let property = &resolved.property;
	let container = &resolved.container;
	let tuple_size = attr.tuple_size;

	// A tuple can span a dynamic array on the host side (a 3-float attribute
	// driving an array of floats), so make room for the whole tuple first.
	if property.shape == ArrayShape::Dynamic {
		host.array_grow(container, &property.ident, tuple_size);
	}

	let mut modified = false;
	for t in 0..tuple_size {
		if let ArrayShape::Fixed(dim) = property.shape {
			// Components past a fixed dimension are silently dropped.
			if t >= dim {
				break;
			}
		}

		let value = scalar_for_slot(&property.kind, attr, base + t);
		if host.write_scalar(container, &property.ident, t, value) {
			modified = true;
		} else {
			sink.message(
				Severity::Warning,
				&format!("no value slot for attribute {} at tuple component {t}", attr.name),
			);
			if t == 0 {
				return Err(AttrError::MissingSlot {
					name: attr.name.clone(),
					component: 0,
				});
			}
			break;
		}
	}

	Ok(modified)
}

fn read_scalars<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	attr: &mut AttrValue,
	base: usize,
) -> Result<()> {
	let property = &resolved.property;
	let container = &resolved.container;

	for t in 0..attr.tuple_size {
		match property.shape {
			ArrayShape::Dynamic => {
				if t >= host.array_len(container, &property.ident) {
					break;
				}
			}
			ArrayShape::Fixed(dim) => {
				if t >= dim {
					break;
				}
			}
		}

		let Some(value) = host.read_scalar(container, &property.ident, t) else {
			sink.message(
				Severity::Warning,
				&format!("no value slot for attribute {} at tuple component {t}", attr.name),
			);
			if t == 0 {
				return Err(AttrError::MissingSlot {
					name: attr.name.clone(),
					component: 0,
				});
			}
			break;
		};

		store_scalar(attr, value, base + t);
	}

	Ok(())
}

fn store_scalar(attr: &mut AttrValue, value: Scalar, flat: usize) {
	match value {
		Scalar::F64(v) => attr.set_double(v, flat),
		Scalar::I64(v) => attr.set_int(v, flat),
		Scalar::Bool(v) => attr.set_bool(v, flat),
		Scalar::Str(v) | Scalar::Name(v) => attr.set_string(&v, flat),
	}
}

/// Container of the single struct instance a struct-typed property holds.
///
/// Dynamic arrays target element 0 (grown on write); plain and fixed-array
/// properties target the struct at fixed index 0.
fn struct_instance<H: HostModel + ?Sized>(host: &mut H, resolved: &ResolvedProperty, grow: bool) -> Option<Container> {
	let property = &resolved.property;
	let container = &resolved.container;
	if property.shape == ArrayShape::Dynamic {
		if grow {
			host.array_grow(container, &property.ident, 1);
		} else if host.array_len(container, &property.ident) == 0 {
			return None;
		}
		Some(container.clone().into_array_elem(&property.ident, 0))
	} else {
		Some(container.clone().into_struct(&property.ident))
	}
}

fn write_well_known<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	entry: &'static WellKnownStruct,
	attr: &AttrValue,
	base: usize,
) -> Result<bool> {
	let Some(target) = struct_instance(host, resolved, true) else {
		sink.message(Severity::Warning, &format!("no value slot for attribute {}", attr.name));
		return Err(AttrError::MissingSlot {
			name: attr.name.clone(),
			component: 0,
		});
	};

	// Start from the shape's default (identity for transforms, zero
	// otherwise) and overwrite only the fields the tuple covers.
	for (k, field) in entry.fields.iter().enumerate() {
		let value = if entry.kind.is_int() {
			let raw = if k < attr.tuple_size { attr.int(base + k) } else { field.default as i64 };
			Scalar::I64(raw)
		} else {
			let raw = if k < attr.tuple_size { attr.double(base + k) } else { field.default };
			Scalar::F64(raw)
		};

		if !host.write_scalar(&target, field.ident, 0, value) {
			sink.message(
				Severity::Warning,
				&format!("no value slot for attribute {} at struct field {}", attr.name, field.ident),
			);
			return Err(AttrError::MissingSlot {
				name: attr.name.clone(),
				component: k,
			});
		}
	}

	Ok(true)
}

fn read_well_known<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	entry: &'static WellKnownStruct,
	attr: &mut AttrValue,
	base: usize,
) -> Result<()> {
	let Some(target) = struct_instance(host, resolved, false) else {
		sink.message(Severity::Warning, &format!("no value slot for attribute {}", attr.name));
		return Err(AttrError::MissingSlot {
			name: attr.name.clone(),
			component: 0,
		});
	};

	for (k, field) in entry.fields.iter().enumerate() {
		if k >= attr.tuple_size {
			break;
		}
		let Some(value) = host.read_scalar(&target, field.ident, 0) else {
			break;
		};
		match value {
			Scalar::F64(v) => attr.set_double(v, base + k),
			Scalar::I64(v) => attr.set_int(v, base + k),
			Scalar::Bool(v) => attr.set_bool(v, base + k),
			Scalar::Str(v) | Scalar::Name(v) => attr.set_string(&v, base + k),
		}
	}

	Ok(())
}

fn write_object_ref<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	class_name: &str,
	attr: &AttrValue,
	base: usize,
) -> Result<bool> {
	let property = &resolved.property;
	let container = &resolved.container;
	if property.shape == ArrayShape::Dynamic {
		host.array_grow(container, &property.ident, 1);
	}

	let path = attr.string(base);
	let loaded = host.load_object(&path);
	if let Some(object) = loaded
		&& !host.object_is_a(object, class_name)
	{
		let got = host.object_class_name(object);
		sink.message(
			Severity::Warning,
			&format!("attribute {}: property wants class {class_name}, path {path} loaded {got}", attr.name),
		);
		return Err(AttrError::ObjectClassMismatch {
			name: attr.name.clone(),
			expected: class_name.to_owned(),
			got,
		});
	}

	if !host.write_object_ref(container, &property.ident, 0, loaded) {
		sink.message(Severity::Warning, &format!("no value slot for attribute {}", attr.name));
		return Err(AttrError::MissingSlot {
			name: attr.name.clone(),
			component: 0,
		});
	}

	Ok(true)
}

fn read_object_ref<H: HostModel + ?Sized>(
	host: &mut H,
	sink: &mut dyn DiagSink,
	resolved: &ResolvedProperty,
	attr: &mut AttrValue,
	base: usize,
) -> Result<()> {
	let property = &resolved.property;
	let container = &resolved.container;
	if property.shape == ArrayShape::Dynamic && host.array_len(container, &property.ident) == 0 {
		sink.message(Severity::Warning, &format!("no value slot for attribute {}", attr.name));
		return Err(AttrError::MissingSlot {
			name: attr.name.clone(),
			component: 0,
		});
	}

	let path = match host.read_object_ref(container, &property.ident, 0) {
		Some(object) => host.object_path(object),
		None => String::new(),
	};
	attr.set_string(&path, base);
	Ok(())
}
