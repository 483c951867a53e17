use crate::attr::diag::{DiagSink, Severity};
use crate::attr::error::{AttrError, Result};
use crate::attr::host::{CollisionMode, HostModel, ObjectId, ObjectKind};
use crate::attr::marshal::{read_property, write_property};
use crate::attr::resolve::{ResolvedProperty, find_in_container, find_property};
use crate::attr::value::AttrValue;

/// How a special rule matches an attribute name.
enum NameMatch {
	/// Case-insensitive equality with any of the listed aliases.
	Exact(&'static [&'static str]),
	/// Substring containment.
	Contains(&'static str),
}

type RuleHandler = fn(&mut dyn HostModel, &mut dyn DiagSink, ObjectId, &AttrValue, usize) -> Result<()>;

struct SpecialRule {
	matcher: NameMatch,
	handler: RuleHandler,
}

impl SpecialRule {
	fn matches(&self, name: &str) -> bool {
		match self.matcher {
			NameMatch::Exact(aliases) => aliases.iter().any(|alias| name.eq_ignore_ascii_case(alias)),
			NameMatch::Contains(needle) => name.contains(needle),
		}
	}
}

/// Hard-coded property names that need bespoke side effects instead of (or in
/// addition to) a plain reflective write. First matching entry wins.
static SPECIAL_RULES: &[SpecialRule] = &[
	SpecialRule {
		matcher: NameMatch::Exact(&["CollisionProfileName"]),
		handler: apply_collision_profile,
	},
	SpecialRule {
		matcher: NameMatch::Exact(&["CollisionEnabled"]),
		handler: apply_collision_enabled,
	},
	SpecialRule {
		matcher: NameMatch::Exact(&["CastShadow"]),
		handler: apply_cast_shadow,
	},
	SpecialRule {
		matcher: NameMatch::Contains("Tags"),
		handler: apply_tag,
	},
	SpecialRule {
		matcher: NameMatch::Exact(&["EnableEditLayers", "bCanHaveLayersContent"]),
		handler: apply_edit_layers,
	},
];

/// Apply one attribute element to `object`.
///
/// Checks the special-rule table first, then rewrites attribute names that
/// match a composed-asset parameter label to the parameter's canonical name,
/// searches a mesh's indexed build-source entry when `element_index` targets
/// one, and finally falls back to the generic resolver + write adapter.
///
/// A [`AttrError::NotFound`] result is benign: the attribute does not target
/// any property of this object. Every other error is advisory too; callers
/// should continue with their next element or attribute.
pub fn apply_attribute(
	host: &mut dyn HostModel,
	sink: &mut dyn DiagSink,
	object: ObjectId,
	attr: &AttrValue,
	element_index: usize,
) -> Result<()> {
	if !host.object_valid(object) {
		return Err(AttrError::InvalidObject);
	}

	let mut name = attr.name.clone();
	if name.is_empty() {
		return Err(AttrError::EmptyAttributeName);
	}

	for rule in SPECIAL_RULES {
		if rule.matches(&name) {
			return (rule.handler)(host, sink, object, attr, element_index);
		}
	}

	// Attributes may be named after a user-facing parameter label of a
	// composed asset; rewrite to the canonical name before resolving.
	if host.object_kind(object).is_actor()
		&& let Some(asset) = host.asset_component(object)
		&& host.object_valid(asset)
		&& let Some(canonical) = host.parameter_canonical_name(asset, &name)
	{
		name = canonical;
	}

	let mut resolved: Option<ResolvedProperty> = None;
	if host.object_kind(object) == ObjectKind::Mesh
		&& element_index < host.source_model_count(object)
		&& let Some(container) = host.source_model_container(object, element_index)
	{
		resolved = find_in_container(host, &container, object, &name);
	}

	let resolved = match resolved {
		Some(found) => found,
		None => find_property(host, object, &name).ok_or_else(|| AttrError::NotFound { name: name.clone() })?,
	};

	write_property(host, sink, &resolved, attr, element_index)
}

/// Read the property matching `name` on `object` back into `attr`.
///
/// Dual of [`apply_attribute`] (object to attribute); no special rules
/// apply and nothing is notified.
pub fn fetch_attribute(
	host: &mut dyn HostModel,
	sink: &mut dyn DiagSink,
	object: ObjectId,
	name: &str,
	attr: &mut AttrValue,
	element_index: usize,
) -> Result<()> {
	if !host.object_valid(object) {
		return Err(AttrError::InvalidObject);
	}
	let resolved = find_property(host, object, name).ok_or_else(|| AttrError::NotFound { name: name.to_owned() })?;
	read_property(host, sink, &resolved, attr, element_index)
}

fn apply_collision_profile(host: &mut dyn HostModel, _sink: &mut dyn DiagSink, object: ObjectId, attr: &AttrValue, element_index: usize) -> Result<()> {
	if !host.object_kind(object).is_primitive() {
		return Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "primitive-like",
		});
	}

	let profile = attr.string(element_index);
	if !host.set_collision_profile(object, &profile) {
		return Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "primitive-like",
		});
	}

	// Keep the composed asset's stored default body instance in sync so the
	// profile survives mesh rebuilds.
	if let Some(asset) = host.composed_asset(object) {
		host.set_default_body_profile(asset, &profile);
	}

	Ok(())
}

fn apply_collision_enabled(host: &mut dyn HostModel, sink: &mut dyn DiagSink, object: ObjectId, attr: &AttrValue, element_index: usize) -> Result<()> {
	if !host.object_kind(object).is_primitive() {
		return Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "primitive-like",
		});
	}

	let token = attr.string(element_index);
	let Some(mode) = CollisionMode::parse(&token) else {
		sink.message(Severity::Warning, &format!("unrecognized collision-enabled token: {token}"));
		return Err(AttrError::UnknownCollisionToken { token });
	};

	if host.set_collision_mode(object, mode) {
		Ok(())
	} else {
		Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "primitive-like",
		})
	}
}

fn apply_cast_shadow(host: &mut dyn HostModel, _sink: &mut dyn DiagSink, object: ObjectId, attr: &AttrValue, element_index: usize) -> Result<()> {
	if !host.object_kind(object).is_primitive() {
		return Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "primitive-like",
		});
	}

	if host.set_cast_shadow(object, attr.boolean(element_index)) {
		Ok(())
	} else {
		Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "primitive-like",
		})
	}
}

fn apply_tag(host: &mut dyn HostModel, _sink: &mut dyn DiagSink, object: ObjectId, attr: &AttrValue, element_index: usize) -> Result<()> {
	if !host.object_kind(object).is_component() {
		return Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "component-like",
		});
	}

	// Only the value at this element is added, never the whole tuple.
	let tag = attr.string(element_index);
	if !host.has_tag(object, &tag) {
		host.add_tag(object, &tag);
	}

	Ok(())
}

fn apply_edit_layers(host: &mut dyn HostModel, _sink: &mut dyn DiagSink, object: ObjectId, attr: &AttrValue, element_index: usize) -> Result<()> {
	if host.object_kind(object) != ObjectKind::Terrain {
		return Err(AttrError::WrongObjectKind {
			name: attr.name.clone(),
			expected: "terrain-like",
		});
	}

	// The host only exposes a state flip, so toggle when the desired state
	// differs from the current one.
	if attr.boolean(element_index) != host.layers_content_enabled(object) {
		host.toggle_layers_content(object);
	}

	Ok(())
}
