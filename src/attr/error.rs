use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, AttrError>;

/// Errors produced while resolving properties and marshalling attribute values.
///
/// Every failure is local to one `(object, attribute, element index)` call;
/// callers are expected to keep going with the next element. [`AttrError::NotFound`]
/// in particular is benign and only signals that an attribute does not target
/// a property on this object.
#[derive(Debug, Error)]
pub enum AttrError {
	/// Target object handle is null, stale, or pending deletion.
	#[error("invalid or pending-deletion object")]
	InvalidObject,
	/// Attribute carries an empty name.
	#[error("attribute has an empty name")]
	EmptyAttributeName,
	/// Name resolved to no property anywhere in the search graph.
	#[error("no property matches attribute {name}")]
	NotFound {
		/// Attribute name that missed.
		name: String,
	},
	/// Property exists but its category has no conversion rule.
	#[error("unsupported property category {category} for attribute {name}")]
	UnsupportedType {
		/// Attribute name being applied.
		name: String,
		/// Host-reported property category.
		category: String,
	},
	/// Struct-typed property is outside the well-known catalog.
	#[error("unsupported struct type {type_name} for attribute {name}")]
	UnsupportedStructType {
		/// Attribute name being applied.
		name: String,
		/// Struct type name reported by the host.
		type_name: String,
	},
	/// No writable value slot at tuple component 0.
	#[error("no value slot for attribute {name} at component {component}")]
	MissingSlot {
		/// Attribute name being applied.
		name: String,
		/// Tuple component that had no slot.
		component: usize,
	},
	/// Loaded object's class does not match the reference property's class.
	#[error("object class mismatch for attribute {name}: property wants {expected}, loaded {got}")]
	ObjectClassMismatch {
		/// Attribute name being applied.
		name: String,
		/// Class declared by the reference property.
		expected: String,
		/// Class of the object the path resolved to.
		got: String,
	},
	/// Collision-enabled token is not one of the four accepted literals.
	#[error("unrecognized collision-enabled token: {token}")]
	UnknownCollisionToken {
		/// Offending token text.
		token: String,
	},
	/// A special-cased attribute landed on an object of the wrong kind.
	#[error("attribute {name} requires a {expected} object")]
	WrongObjectKind {
		/// Attribute name being applied.
		name: String,
		/// Required object kind, human readable.
		expected: &'static str,
	},
}
