//! In-memory reference implementation of the host capability surface.
//!
//! Serves two purposes: a deterministic fixture for the crate's tests and a
//! worked example of how to adapt a real reflective object model. Classes
//! carry single inheritance, objects live in an arena addressed by
//! [`ObjectId`], and every notification is recorded in [`MemHost::events`]
//! so tests can assert on batching.

use std::collections::BTreeMap;

use crate::attr::catalog::well_known;
use crate::attr::host::{
	ArrayShape, CollisionMode, Container, ContainerStep, HostModel, ObjectId, ObjectKind, PropertyInfo, PropertyKind, Scalar, SubObjectSlot,
};

/// Index into the host's class registry.
pub type ClassId = usize;

/// Property definition used when registering classes and structs.
#[derive(Debug, Clone)]
pub struct PropDef {
	/// Descriptor handed to the marshalling core.
	pub info: PropertyInfo,
}

impl PropDef {
	fn new(ident: &str, kind: PropertyKind) -> Self {
		Self {
			info: PropertyInfo {
				ident: ident.to_owned(),
				display_name: ident.to_owned(),
				kind,
				shape: ArrayShape::Fixed(1),
			},
		}
	}

	/// Floating-point scalar property.
	pub fn float(ident: &str) -> Self {
		Self::new(ident, PropertyKind::Numeric { floating: true })
	}

	/// Integer scalar property.
	pub fn int(ident: &str) -> Self {
		Self::new(ident, PropertyKind::Numeric { floating: false })
	}

	/// Boolean property.
	pub fn boolean(ident: &str) -> Self {
		Self::new(ident, PropertyKind::Bool)
	}

	/// String property.
	pub fn string(ident: &str) -> Self {
		Self::new(ident, PropertyKind::Str)
	}

	/// Name (interned string) property.
	pub fn name(ident: &str) -> Self {
		Self::new(ident, PropertyKind::Name)
	}

	/// Struct-typed property of the given registered or well-known type.
	pub fn struct_(ident: &str, type_name: &str) -> Self {
		Self::new(
			ident,
			PropertyKind::Struct {
				type_name: type_name.to_owned(),
			},
		)
	}

	/// Object-reference property declared to hold `class_name`.
	pub fn object(ident: &str, class_name: &str) -> Self {
		Self::new(
			ident,
			PropertyKind::Object {
				class_name: class_name.to_owned(),
			},
		)
	}

	/// Property of a category the marshalling core cannot convert.
	pub fn opaque(ident: &str, class_name: &str) -> Self {
		Self::new(
			ident,
			PropertyKind::Opaque {
				class_name: class_name.to_owned(),
			},
		)
	}

	/// Override the human-readable display name.
	pub fn display(mut self, display_name: &str) -> Self {
		self.info.display_name = display_name.to_owned();
		self
	}

	/// Make this a fixed array of `dim` elements.
	pub fn fixed(mut self, dim: usize) -> Self {
		self.info.shape = ArrayShape::Fixed(dim);
		self
	}

	/// Make this a growable dynamic array.
	pub fn dynamic(mut self) -> Self {
		self.info.shape = ArrayShape::Dynamic;
		self
	}
}

/// One registered class.
#[derive(Debug, Clone)]
struct ClassDef {
	name: String,
	parent: Option<ClassId>,
	kind: ObjectKind,
	props: Vec<PropDef>,
}

/// One registered plain (non-well-known) struct type.
#[derive(Debug, Clone)]
struct StructDef {
	name: String,
	fields: Vec<PropDef>,
}

type FieldMap = BTreeMap<String, Slot>;

/// Backing storage of one property; fixed arrays are preallocated to their
/// dimension, dynamic arrays start empty and grow.
#[derive(Debug, Clone)]
enum Slot {
	F64(Vec<f64>),
	I64(Vec<i64>),
	Bool(Vec<bool>),
	Str(Vec<String>),
	Name(Vec<String>),
	Struct(Vec<FieldMap>),
	Obj(Vec<Option<ObjectId>>),
}

impl Slot {
	fn len(&self) -> usize {
		match self {
			Self::F64(v) => v.len(),
			Self::I64(v) => v.len(),
			Self::Bool(v) => v.len(),
			Self::Str(v) => v.len(),
			Self::Name(v) => v.len(),
			Self::Struct(v) => v.len(),
			Self::Obj(v) => v.len(),
		}
	}
}

#[derive(Debug, Clone)]
struct ObjectData {
	class: ClassId,
	path: String,
	valid: bool,
	outer: Option<ObjectId>,
	fields: FieldMap,
	sub_objects: Vec<(SubObjectSlot, ObjectId)>,
	components: Vec<ObjectId>,
	tags: Vec<String>,
	collision_profile: Option<String>,
	collision_mode: Option<CollisionMode>,
	cast_shadow: bool,
	layers_content: bool,
	default_body_profile: Option<String>,
	parameters: Vec<(String, String)>,
}

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
	/// Property-changed notification on `owner` for `ident`.
	PropertyChanged {
		/// Object the notification was invoked on.
		owner: ObjectId,
		/// Identifier of the changed property.
		ident: String,
	},
	/// Whole-object edit-finished notification.
	EditFinished {
		/// Object the notification was invoked on.
		object: ObjectId,
	},
}

/// In-memory host model.
#[derive(Debug, Default)]
pub struct MemHost {
	classes: Vec<ClassDef>,
	structs: Vec<StructDef>,
	objects: Vec<ObjectData>,
	/// Recorded notifications in firing order.
	pub events: Vec<HostEvent>,
}

impl MemHost {
	/// Empty host with no classes or objects.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a class; `parent` properties are inherited.
	pub fn add_class(&mut self, name: &str, kind: ObjectKind, parent: Option<ClassId>, props: Vec<PropDef>) -> ClassId {
		self.classes.push(ClassDef {
			name: name.to_owned(),
			parent,
			kind,
			props,
		});
		self.classes.len() - 1
	}

	/// Register a plain struct type by name.
	pub fn add_struct(&mut self, name: &str, fields: Vec<PropDef>) {
		self.structs.push(StructDef {
			name: name.to_owned(),
			fields,
		});
	}

	/// Create an object of `class` addressable by `path`, with every
	/// property initialized to its default.
	pub fn spawn(&mut self, class: ClassId, path: &str) -> ObjectId {
		let mut fields = FieldMap::new();
		for prop in self.class_chain_props(class) {
			fields.insert(prop.info.ident.clone(), self.default_slot(&prop.info));
		}
		self.objects.push(ObjectData {
			class,
			path: path.to_owned(),
			valid: true,
			outer: None,
			fields,
			sub_objects: Vec::new(),
			components: Vec::new(),
			tags: Vec::new(),
			collision_profile: None,
			collision_mode: None,
			cast_shadow: false,
			layers_content: false,
			default_body_profile: None,
			parameters: Vec::new(),
		});
		ObjectId(self.objects.len() as u32 - 1)
	}

	/// Attach `component` to `actor` (sets the outer link too).
	pub fn attach_component(&mut self, actor: ObjectId, component: ObjectId) {
		self.objects[component.0 as usize].outer = Some(actor);
		self.objects[actor.0 as usize].components.push(component);
	}

	/// Install an owned sub-object in the given slot.
	pub fn set_sub_object(&mut self, object: ObjectId, slot: SubObjectSlot, sub: ObjectId) {
		self.objects[sub.0 as usize].outer = Some(object);
		self.objects[object.0 as usize].sub_objects.push((slot, sub));
	}

	/// Register a user-facing parameter label with its canonical name.
	pub fn add_parameter(&mut self, object: ObjectId, label: &str, canonical: &str) {
		self.objects[object.0 as usize].parameters.push((label.to_owned(), canonical.to_owned()));
	}

	/// Mark an object as pending deletion.
	pub fn invalidate(&mut self, object: ObjectId) {
		self.objects[object.0 as usize].valid = false;
	}

	// State accessors for assertions ---------------------------------------

	/// Collision profile last set through the special rule.
	pub fn collision_profile(&self, object: ObjectId) -> Option<&str> {
		self.objects[object.0 as usize].collision_profile.as_deref()
	}

	/// Collision mode last set through the special rule.
	pub fn collision_mode(&self, object: ObjectId) -> Option<CollisionMode> {
		self.objects[object.0 as usize].collision_mode
	}

	/// Shadow-casting flag.
	pub fn cast_shadow(&self, object: ObjectId) -> bool {
		self.objects[object.0 as usize].cast_shadow
	}

	/// Tag set in insertion order.
	pub fn tags(&self, object: ObjectId) -> &[String] {
		&self.objects[object.0 as usize].tags
	}

	/// Stored default-body-instance profile of a composed asset.
	pub fn default_body_profile(&self, object: ObjectId) -> Option<&str> {
		self.objects[object.0 as usize].default_body_profile.as_deref()
	}

	/// Write a slot directly, bypassing the marshalling core (fixture setup).
	pub fn write_field(&mut self, container: &Container, ident: &str, slot: usize, value: Scalar) -> bool {
		self.write_scalar(container, ident, slot, value)
	}

	// Internals -------------------------------------------------------------

	fn class_chain_props(&self, class: ClassId) -> Vec<PropDef> {
		let mut props = Vec::new();
		let mut current = Some(class);
		while let Some(id) = current {
			let def = &self.classes[id];
			props.extend(def.props.iter().cloned());
			current = def.parent;
		}
		props
	}

	fn struct_fields(&self, type_name: &str) -> Vec<PropDef> {
		if let Some(def) = self.structs.iter().find(|def| def.name == type_name) {
			return def.fields.clone();
		}
		if let Some(entry) = well_known(type_name) {
			return entry
				.fields
				.iter()
				.map(|field| {
					if entry.kind.is_int() {
						PropDef::int(field.ident)
					} else {
						PropDef::float(field.ident)
					}
				})
				.collect();
		}
		Vec::new()
	}

	fn default_slot(&self, info: &PropertyInfo) -> Slot {
		let dim = match info.shape {
			ArrayShape::Fixed(dim) => dim,
			ArrayShape::Dynamic => 0,
		};
		match &info.kind {
			PropertyKind::Numeric { floating: true } => Slot::F64(vec![0.0; dim]),
			PropertyKind::Numeric { floating: false } => Slot::I64(vec![0; dim]),
			PropertyKind::Bool => Slot::Bool(vec![false; dim]),
			PropertyKind::Str => Slot::Str(vec![String::new(); dim]),
			PropertyKind::Name => Slot::Name(vec![String::new(); dim]),
			PropertyKind::Object { .. } => Slot::Obj(vec![None; dim]),
			PropertyKind::Struct { type_name } => {
				let instance = self.new_struct_instance(type_name);
				Slot::Struct(vec![instance; dim])
			}
			PropertyKind::Opaque { .. } => Slot::Str(vec![String::new(); dim]),
		}
	}

	fn new_struct_instance(&self, type_name: &str) -> FieldMap {
		let mut map = FieldMap::new();
		let entry = well_known(type_name);
		for field_def in self.struct_fields(type_name) {
			let mut slot = self.default_slot(&field_def.info);
			// Well-known shapes start at their catalog default (identity for
			// transforms and quaternions).
			if let Some(entry) = entry
				&& let Some(field) = entry.fields.iter().find(|f| f.ident == field_def.info.ident)
			{
				slot = match slot {
					Slot::F64(_) => Slot::F64(vec![field.default]),
					Slot::I64(_) => Slot::I64(vec![field.default as i64]),
					other => other,
				};
			}
			map.insert(field_def.info.ident.clone(), slot);
		}
		map
	}

	fn object(&self, object: ObjectId) -> Option<&ObjectData> {
		self.objects.get(object.0 as usize)
	}

	/// Property descriptors of the field set `container` refers to.
	fn container_props(&self, container: &Container) -> Vec<PropDef> {
		let Some(data) = self.object(container.object) else {
			return Vec::new();
		};
		let mut props = self.class_chain_props(data.class);
		for step in &container.path {
			let ident = match step {
				ContainerStep::Struct { ident } => ident,
				ContainerStep::ArrayElem { ident, .. } => ident,
			};
			let Some(PropertyKind::Struct { type_name }) = props.iter().find(|p| &p.info.ident == ident).map(|p| p.info.kind.clone()) else {
				return Vec::new();
			};
			props = self.struct_fields(&type_name);
		}
		props
	}

	fn container_fields(&self, container: &Container) -> Option<&FieldMap> {
		let mut map = &self.object(container.object)?.fields;
		for step in &container.path {
			let (ident, index) = match step {
				ContainerStep::Struct { ident } => (ident, 0),
				ContainerStep::ArrayElem { ident, index } => (ident, *index),
			};
			map = match map.get(ident)? {
				Slot::Struct(instances) => instances.get(index)?,
				_ => return None,
			};
		}
		Some(map)
	}

	fn container_fields_mut(&mut self, container: &Container) -> Option<&mut FieldMap> {
		let mut map = &mut self.objects.get_mut(container.object.0 as usize)?.fields;
		for step in &container.path {
			let (ident, index) = match step {
				ContainerStep::Struct { ident } => (ident, 0),
				ContainerStep::ArrayElem { ident, index } => (ident, *index),
			};
			map = match map.get_mut(ident)? {
				Slot::Struct(instances) => instances.get_mut(index)?,
				_ => return None,
			};
		}
		Some(map)
	}
}

impl HostModel for MemHost {
	fn object_valid(&self, object: ObjectId) -> bool {
		self.object(object).is_some_and(|data| data.valid)
	}

	fn object_kind(&self, object: ObjectId) -> ObjectKind {
		self.object(object).map(|data| self.classes[data.class].kind).unwrap_or(ObjectKind::Other)
	}

	fn object_outer(&self, object: ObjectId) -> Option<ObjectId> {
		self.object(object)?.outer
	}

	fn object_path(&self, object: ObjectId) -> String {
		self.object(object).map(|data| data.path.clone()).unwrap_or_default()
	}

	fn object_is_a(&self, object: ObjectId, class_name: &str) -> bool {
		let Some(data) = self.object(object) else {
			return false;
		};
		let mut current = Some(data.class);
		while let Some(id) = current {
			if self.classes[id].name == class_name {
				return true;
			}
			current = self.classes[id].parent;
		}
		false
	}

	fn object_class_name(&self, object: ObjectId) -> String {
		self.object(object).map(|data| self.classes[data.class].name.clone()).unwrap_or_default()
	}

	fn properties(&self, container: &Container) -> Vec<PropertyInfo> {
		self.container_props(container).into_iter().map(|prop| prop.info).collect()
	}

	fn find_field(&self, object: ObjectId, ident: &str) -> Option<PropertyInfo> {
		let data = self.object(object)?;
		self.class_chain_props(data.class).into_iter().map(|prop| prop.info).find(|info| info.ident == ident)
	}

	fn find_class_property(&self, object: ObjectId, name: &str) -> Option<PropertyInfo> {
		let data = self.object(object)?;
		self.class_chain_props(data.class)
			.into_iter()
			.map(|prop| prop.info)
			.find(|info| info.ident == name || info.display_name == name)
	}

	fn read_scalar(&self, container: &Container, ident: &str, slot: usize) -> Option<Scalar> {
		match self.container_fields(container)?.get(ident)? {
			Slot::F64(values) => values.get(slot).map(|v| Scalar::F64(*v)),
			Slot::I64(values) => values.get(slot).map(|v| Scalar::I64(*v)),
			Slot::Bool(values) => values.get(slot).map(|v| Scalar::Bool(*v)),
			Slot::Str(values) => values.get(slot).map(|v| Scalar::Str(v.clone())),
			Slot::Name(values) => values.get(slot).map(|v| Scalar::Name(v.clone())),
			Slot::Struct(_) | Slot::Obj(_) => None,
		}
	}

	fn write_scalar(&mut self, container: &Container, ident: &str, slot: usize, value: Scalar) -> bool {
		let Some(fields) = self.container_fields_mut(container) else {
			return false;
		};
		let Some(storage) = fields.get_mut(ident) else {
			return false;
		};
		match (storage, value) {
			(Slot::F64(values), Scalar::F64(v)) => write_at(values, slot, v),
			(Slot::F64(values), Scalar::I64(v)) => write_at(values, slot, v as f64),
			(Slot::I64(values), Scalar::I64(v)) => write_at(values, slot, v),
			(Slot::I64(values), Scalar::F64(v)) => write_at(values, slot, v as i64),
			(Slot::Bool(values), Scalar::Bool(v)) => write_at(values, slot, v),
			(Slot::Str(values), Scalar::Str(v) | Scalar::Name(v)) => write_at(values, slot, v),
			(Slot::Name(values), Scalar::Name(v) | Scalar::Str(v)) => write_at(values, slot, v),
			_ => false,
		}
	}

	fn array_len(&self, container: &Container, ident: &str) -> usize {
		self.container_fields(container).and_then(|fields| fields.get(ident)).map(Slot::len).unwrap_or(0)
	}

	fn array_grow(&mut self, container: &Container, ident: &str, min_len: usize) -> bool {
		// Struct growth needs the element type, so look it up first.
		let struct_type = self.container_props(container).into_iter().find(|prop| prop.info.ident == ident).and_then(|prop| {
			if let PropertyKind::Struct { type_name } = prop.info.kind {
				Some(self.new_struct_instance(&type_name))
			} else {
				None
			}
		});

		let Some(fields) = self.container_fields_mut(container) else {
			return false;
		};
		let Some(storage) = fields.get_mut(ident) else {
			return false;
		};
		match storage {
			Slot::F64(values) => grow_to(values, min_len, 0.0),
			Slot::I64(values) => grow_to(values, min_len, 0),
			Slot::Bool(values) => grow_to(values, min_len, false),
			Slot::Str(values) => grow_to(values, min_len, String::new()),
			Slot::Name(values) => grow_to(values, min_len, String::new()),
			Slot::Obj(values) => grow_to(values, min_len, None),
			Slot::Struct(values) => {
				let Some(instance) = struct_type else {
					return false;
				};
				grow_to(values, min_len, instance)
			}
		}
		true
	}

	fn load_object(&mut self, path: &str) -> Option<ObjectId> {
		if path.is_empty() {
			return None;
		}
		self.objects
			.iter()
			.position(|data| data.valid && data.path == path)
			.map(|index| ObjectId(index as u32))
	}

	fn read_object_ref(&self, container: &Container, ident: &str, slot: usize) -> Option<ObjectId> {
		match self.container_fields(container)?.get(ident)? {
			Slot::Obj(values) => values.get(slot).copied().flatten(),
			_ => None,
		}
	}

	fn write_object_ref(&mut self, container: &Container, ident: &str, slot: usize, value: Option<ObjectId>) -> bool {
		let Some(fields) = self.container_fields_mut(container) else {
			return false;
		};
		match fields.get_mut(ident) {
			Some(Slot::Obj(values)) => write_at(values, slot, value),
			_ => false,
		}
	}

	fn sub_object(&self, object: ObjectId, slot: SubObjectSlot) -> Option<ObjectId> {
		self.object(object)?.sub_objects.iter().find(|(s, _)| *s == slot).map(|(_, id)| *id)
	}

	fn components(&self, object: ObjectId) -> Vec<ObjectId> {
		let Some(data) = self.object(object) else {
			return Vec::new();
		};
		let mut out = Vec::new();
		for component in &data.components {
			out.push(*component);
			out.extend(self.components(*component));
		}
		out
	}

	fn notify_property_changed(&mut self, owner: ObjectId, ident: &str) {
		self.events.push(HostEvent::PropertyChanged {
			owner,
			ident: ident.to_owned(),
		});
	}

	fn notify_edit_finished(&mut self, object: ObjectId) {
		self.events.push(HostEvent::EditFinished { object });
	}

	fn set_collision_profile(&mut self, object: ObjectId, profile: &str) -> bool {
		if !self.object_kind(object).is_primitive() {
			return false;
		}
		self.objects[object.0 as usize].collision_profile = Some(profile.to_owned());
		true
	}

	fn set_collision_mode(&mut self, object: ObjectId, mode: CollisionMode) -> bool {
		if !self.object_kind(object).is_primitive() {
			return false;
		}
		self.objects[object.0 as usize].collision_mode = Some(mode);
		true
	}

	fn set_cast_shadow(&mut self, object: ObjectId, value: bool) -> bool {
		if !self.object_kind(object).is_primitive() {
			return false;
		}
		self.objects[object.0 as usize].cast_shadow = value;
		true
	}

	fn has_tag(&self, object: ObjectId, tag: &str) -> bool {
		self.object(object).is_some_and(|data| data.tags.iter().any(|t| t == tag))
	}

	fn add_tag(&mut self, object: ObjectId, tag: &str) {
		self.objects[object.0 as usize].tags.push(tag.to_owned());
	}

	fn layers_content_enabled(&self, object: ObjectId) -> bool {
		self.object(object).is_some_and(|data| data.layers_content)
	}

	fn toggle_layers_content(&mut self, object: ObjectId) {
		let data = &mut self.objects[object.0 as usize];
		data.layers_content = !data.layers_content;
	}

	fn composed_asset(&self, object: ObjectId) -> Option<ObjectId> {
		if self.object_kind(object) == ObjectKind::AssetComponent {
			return Some(object);
		}
		self.object(object)?
			.components
			.iter()
			.copied()
			.find(|component| self.object_kind(*component) == ObjectKind::AssetComponent)
	}

	fn set_default_body_profile(&mut self, asset: ObjectId, profile: &str) {
		self.objects[asset.0 as usize].default_body_profile = Some(profile.to_owned());
	}

	fn asset_component(&self, actor: ObjectId) -> Option<ObjectId> {
		self.object(actor)?
			.components
			.iter()
			.copied()
			.find(|component| self.object_kind(*component) == ObjectKind::AssetComponent)
	}

	fn parameter_canonical_name(&self, asset: ObjectId, label: &str) -> Option<String> {
		self.object(asset)?
			.parameters
			.iter()
			.find(|(l, _)| l == label)
			.map(|(_, canonical)| canonical.clone())
	}

	fn source_model_count(&self, object: ObjectId) -> usize {
		match self.object(object).and_then(|data| data.fields.get(SOURCE_MODELS)) {
			Some(Slot::Struct(instances)) => instances.len(),
			_ => 0,
		}
	}

	fn source_model_container(&self, object: ObjectId, index: usize) -> Option<Container> {
		if index >= self.source_model_count(object) {
			return None;
		}
		Some(Container::root(object).into_array_elem(SOURCE_MODELS, index))
	}
}

/// Property holding a mesh's build-source entries, when the class defines it
/// as a dynamic struct array.
pub const SOURCE_MODELS: &str = "SourceModels";

fn write_at<T>(values: &mut [T], slot: usize, value: T) -> bool {
	match values.get_mut(slot) {
		Some(target) => {
			*target = value;
			true
		}
		None => false,
	}
}

fn grow_to<T: Clone>(values: &mut Vec<T>, min_len: usize, fill: T) {
	if values.len() < min_len {
		values.resize(min_len, fill);
	}
}
