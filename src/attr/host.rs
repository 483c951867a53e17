use serde::Serialize;

/// Copyable handle to one host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectId(pub u32);

/// One step descending from an object toward a nested value container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ContainerStep {
	/// Descend into a struct-typed property's own field set.
	Struct {
		/// Identifier of the struct-typed property.
		ident: String,
	},
	/// Descend into one element of an array-typed property.
	ArrayElem {
		/// Identifier of the array-typed property.
		ident: String,
		/// Zero-based element index.
		index: usize,
	},
}

/// Non-owning view of the memory block holding a property's value.
///
/// A container couples the owning object with the field path leading to the
/// block, so it stays valid only for the resolver+adapter invocation that
/// produced it. It must never be stored past that call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Container {
	/// Object the path is rooted at.
	pub object: ObjectId,
	/// Struct/array descent from the object to the block.
	pub path: Vec<ContainerStep>,
}

impl Container {
	/// Container for the object's own top-level field set.
	pub fn root(object: ObjectId) -> Self {
		Self {
			object,
			path: Vec::new(),
		}
	}

	/// Container descended one struct level through `ident`.
	pub fn into_struct(mut self, ident: &str) -> Self {
		self.path.push(ContainerStep::Struct { ident: ident.to_owned() });
		self
	}

	/// Container descended into array element `index` of `ident`.
	pub fn into_array_elem(mut self, ident: &str, index: usize) -> Self {
		self.path.push(ContainerStep::ArrayElem {
			ident: ident.to_owned(),
			index,
		});
		self
	}
}

/// Declared category of a reflective property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PropertyKind {
	/// Numeric scalar; `floating` separates float-like from integer-like.
	Numeric {
		/// Whether the native slot is floating point.
		floating: bool,
	},
	/// Boolean scalar.
	Bool,
	/// Plain string.
	Str,
	/// Interned name string.
	Name,
	/// Nested struct value.
	Struct {
		/// Host type name of the struct, matched against the catalog.
		type_name: String,
	},
	/// Reference to another host object.
	Object {
		/// Class the reference is declared to hold.
		class_name: String,
	},
	/// Category with no conversion rule (delegates, maps, sets, ...).
	Opaque {
		/// Host-reported category name, used for diagnostics.
		class_name: String,
	},
}

impl PropertyKind {
	/// Human-readable category name for diagnostics.
	pub fn describe(&self) -> &str {
		match self {
			Self::Numeric { .. } => "numeric",
			Self::Bool => "bool",
			Self::Str => "string",
			Self::Name => "name",
			Self::Struct { type_name } => type_name,
			Self::Object { class_name } => class_name,
			Self::Opaque { class_name } => class_name,
		}
	}
}

/// Array shape of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrayShape {
	/// Fixed dimension baked into the type; plain properties are `Fixed(1)`.
	Fixed(usize),
	/// Growable dynamic array.
	Dynamic,
}

/// One reflective property descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyInfo {
	/// Raw identifier.
	pub ident: String,
	/// Human-readable display name; may contain spaces.
	pub display_name: String,
	/// Declared category of the (element) type.
	pub kind: PropertyKind,
	/// Fixed-dimension or dynamic-array shape.
	pub shape: ArrayShape,
}

/// Typed value moved through one scalar slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
	/// Floating-point payload; the host narrows to the slot's native width.
	F64(f64),
	/// Integer payload; the host narrows to the slot's native width.
	I64(i64),
	/// Boolean payload.
	Bool(bool),
	/// String payload.
	Str(String),
	/// Name payload (interned string).
	Name(String),
}

/// Broad kind of a host object, used for special-case gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ObjectKind {
	/// Mesh-like asset with build-source entries and owned sub-objects.
	Mesh,
	/// Actor-like object owning attached components.
	Actor,
	/// Terrain-like actor with layered-content support.
	Terrain,
	/// Component that renders/collides (primitive-like).
	PrimitiveComponent,
	/// Composed-asset component; primitive-like and parameter-bearing.
	AssetComponent,
	/// Plain attached component.
	Component,
	/// Anything else.
	Other,
}

impl ObjectKind {
	/// Primitive-like objects accept collision and shadow special rules.
	pub fn is_primitive(self) -> bool {
		matches!(self, Self::PrimitiveComponent | Self::AssetComponent)
	}

	/// Component-like objects carry tag sets.
	pub fn is_component(self) -> bool {
		self.is_primitive() || matches!(self, Self::Component)
	}

	/// Actor-like objects own attached components.
	pub fn is_actor(self) -> bool {
		matches!(self, Self::Actor | Self::Terrain)
	}
}

/// Well-known owned sub-objects probed on mesh-like containers, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SubObjectSlot {
	/// Physics-body setup sub-object.
	PhysicsBody,
	/// Import-metadata sub-object.
	ImportMetadata,
	/// Navigation-collision sub-object.
	NavCollision,
}

/// Collision-enabled mode set by the collision special rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionMode {
	/// No collision at all.
	NoCollision,
	/// Query-only collision (no physics).
	QueryOnly,
	/// Physics-only collision (no queries).
	PhysicsOnly,
	/// Full query and physics collision.
	QueryAndPhysics,
}

impl CollisionMode {
	/// Parse one of the four accepted literal tokens, case-insensitively.
	pub fn parse(token: &str) -> Option<Self> {
		if token.eq_ignore_ascii_case("NoCollision") {
			Some(Self::NoCollision)
		} else if token.eq_ignore_ascii_case("QueryOnly") {
			Some(Self::QueryOnly)
		} else if token.eq_ignore_ascii_case("PhysicsOnly") {
			Some(Self::PhysicsOnly)
		} else if token.eq_ignore_ascii_case("QueryAndPhysics") {
			Some(Self::QueryAndPhysics)
		} else {
			None
		}
	}
}

/// Reflective capability surface the marshalling core consumes.
///
/// Implementations adapt whatever reflection facility the target host offers;
/// the core treats every primitive here as already correct and performs no
/// validation beyond null/pending-deletion checks. All calls are synchronous,
/// including [`HostModel::load_object`].
pub trait HostModel {
	// Object identity -------------------------------------------------------

	/// Whether `object` is live and safe to touch.
	fn object_valid(&self, object: ObjectId) -> bool;

	/// Broad kind of `object`.
	fn object_kind(&self, object: ObjectId) -> ObjectKind;

	/// Enclosing outer object, if any (a component's actor, for example).
	fn object_outer(&self, object: ObjectId) -> Option<ObjectId>;

	/// Stable path string identifying `object` for reference export.
	fn object_path(&self, object: ObjectId) -> String;

	/// Whether `object` is (a subclass of) `class_name`.
	fn object_is_a(&self, object: ObjectId, class_name: &str) -> bool;

	/// Name of `object`'s class, for diagnostics.
	fn object_class_name(&self, object: ObjectId) -> String;

	// Reflection ------------------------------------------------------------

	/// Enumerate the properties of `container`'s field set, inherited included.
	fn properties(&self, container: &Container) -> Vec<PropertyInfo>;

	/// Direct field lookup by exact identifier against class metadata.
	fn find_field(&self, object: ObjectId, ident: &str) -> Option<PropertyInfo>;

	/// By-name lookup through the class's property table.
	fn find_class_property(&self, object: ObjectId, name: &str) -> Option<PropertyInfo>;

	// Slots -----------------------------------------------------------------

	/// Read the scalar at `slot` of `ident` inside `container`.
	fn read_scalar(&self, container: &Container, ident: &str, slot: usize) -> Option<Scalar>;

	/// Write the scalar at `slot` of `ident` inside `container`.
	fn write_scalar(&mut self, container: &Container, ident: &str, slot: usize, value: Scalar) -> bool;

	/// Current element count of a dynamic-array property.
	fn array_len(&self, container: &Container, ident: &str) -> usize;

	/// Grow a dynamic-array property to at least `min_len` elements.
	fn array_grow(&mut self, container: &Container, ident: &str, min_len: usize) -> bool;

	// Object references -----------------------------------------------------

	/// Synchronously resolve/load the object a path string refers to.
	fn load_object(&mut self, path: &str) -> Option<ObjectId>;

	/// Read an object-reference slot.
	fn read_object_ref(&self, container: &Container, ident: &str, slot: usize) -> Option<ObjectId>;

	/// Write an object-reference slot.
	fn write_object_ref(&mut self, container: &Container, ident: &str, slot: usize, value: Option<ObjectId>) -> bool;

	// Structure -------------------------------------------------------------

	/// Owned sub-object in the given slot, for mesh-like containers.
	fn sub_object(&self, object: ObjectId, slot: SubObjectSlot) -> Option<ObjectId>;

	/// Attached components of an actor-like object, depth first.
	fn components(&self, object: ObjectId) -> Vec<ObjectId>;

	// Notifications ---------------------------------------------------------

	/// Fire a property-changed notification on `owner` for `ident`.
	fn notify_property_changed(&mut self, owner: ObjectId, ident: &str);

	/// Fire a whole-object edit-finished notification.
	fn notify_edit_finished(&mut self, object: ObjectId);

	// Special-rule services -------------------------------------------------
	//
	// Conservative defaults let simple hosts opt out: a default answer of
	// false/None makes the corresponding orchestrator rule fail or fall
	// through without touching anything.

	/// Set the collision profile name on a primitive-like object.
	fn set_collision_profile(&mut self, _object: ObjectId, _profile: &str) -> bool {
		false
	}

	/// Set the collision-enabled mode on a primitive-like object.
	fn set_collision_mode(&mut self, _object: ObjectId, _mode: CollisionMode) -> bool {
		false
	}

	/// Set the shadow-casting flag on a primitive-like object.
	fn set_cast_shadow(&mut self, _object: ObjectId, _value: bool) -> bool {
		false
	}

	/// Whether a component-like object already carries `tag`.
	fn has_tag(&self, _object: ObjectId, _tag: &str) -> bool {
		false
	}

	/// Add `tag` to a component-like object's tag set.
	fn add_tag(&mut self, _object: ObjectId, _tag: &str) {}

	/// Current layered-content flag of a terrain-like object.
	fn layers_content_enabled(&self, _object: ObjectId) -> bool {
		false
	}

	/// Flip the layered-content flag of a terrain-like object.
	fn toggle_layers_content(&mut self, _object: ObjectId) {}

	/// The composed-asset object `object` is, or owns, if any.
	fn composed_asset(&self, _object: ObjectId) -> Option<ObjectId> {
		None
	}

	/// Update the stored default-body-instance collision profile of an asset.
	fn set_default_body_profile(&mut self, _asset: ObjectId, _profile: &str) {}

	/// Composed-asset component wrapped by an actor-like object.
	fn asset_component(&self, _actor: ObjectId) -> Option<ObjectId> {
		None
	}

	/// Canonical name of an asset parameter matching a user-facing label.
	fn parameter_canonical_name(&self, _asset: ObjectId, _label: &str) -> Option<String> {
		None
	}

	/// Number of indexable build-source entries on a mesh-like object.
	fn source_model_count(&self, _object: ObjectId) -> usize {
		0
	}

	/// Container of build-source entry `index`'s own field set.
	fn source_model_container(&self, _object: ObjectId, _index: usize) -> Option<Container> {
		None
	}
}
