use crate::attr::StorageKind;

/// One field of a well-known struct: identifier plus default value.
///
/// Defaults are stored as doubles; integer-kind structs truncate them.
#[derive(Debug, Clone, Copy)]
pub struct WellKnownField {
	/// Field identifier hosts must expose for this struct type.
	pub ident: &'static str,
	/// Value written when the attribute tuple does not cover this field.
	pub default: f64,
}

/// Catalog entry describing one well-known struct shape.
#[derive(Debug, Clone, Copy)]
pub struct WellKnownStruct {
	/// Host type name this entry matches.
	pub type_name: &'static str,
	/// Storage kind an attribute targeting this struct should carry.
	pub kind: StorageKind,
	/// Ordered fields; tuple component `k` drives field `k`.
	pub fields: &'static [WellKnownField],
}

impl WellKnownStruct {
	/// Tuple arity of this struct shape.
	pub fn arity(&self) -> usize {
		self.fields.len()
	}
}

const fn field(ident: &'static str, default: f64) -> WellKnownField {
	WellKnownField { ident, default }
}

/// Closed catalog of struct shapes the adapter understands natively.
///
/// A partial write initializes every field to its default first, so a short
/// tuple leaves the remainder at identity (a 2-float tuple on a Transform
/// sets only the first two translation components).
pub static WELL_KNOWN_STRUCTS: &[WellKnownStruct] = &[
	WellKnownStruct {
		type_name: "Vector",
		kind: StorageKind::Float,
		fields: &[field("x", 0.0), field("y", 0.0), field("z", 0.0)],
	},
	WellKnownStruct {
		type_name: "Vector2D",
		kind: StorageKind::Float,
		fields: &[field("x", 0.0), field("y", 0.0)],
	},
	WellKnownStruct {
		type_name: "Vector4",
		kind: StorageKind::Float,
		fields: &[field("x", 0.0), field("y", 0.0), field("z", 0.0), field("w", 0.0)],
	},
	WellKnownStruct {
		type_name: "Quat",
		kind: StorageKind::Float,
		fields: &[field("x", 0.0), field("y", 0.0), field("z", 0.0), field("w", 1.0)],
	},
	WellKnownStruct {
		type_name: "Rotator",
		kind: StorageKind::Float,
		fields: &[field("pitch", 0.0), field("yaw", 0.0), field("roll", 0.0)],
	},
	WellKnownStruct {
		type_name: "Transform",
		kind: StorageKind::Float,
		fields: &[
			field("translation_x", 0.0),
			field("translation_y", 0.0),
			field("translation_z", 0.0),
			field("rotation_w", 1.0),
			field("rotation_x", 0.0),
			field("rotation_y", 0.0),
			field("rotation_z", 0.0),
			field("scale_x", 1.0),
			field("scale_y", 1.0),
			field("scale_z", 1.0),
		],
	},
	WellKnownStruct {
		type_name: "Color",
		kind: StorageKind::Int,
		fields: &[field("r", 0.0), field("g", 0.0), field("b", 0.0), field("a", 0.0)],
	},
	WellKnownStruct {
		type_name: "LinearColor",
		kind: StorageKind::Float,
		fields: &[field("r", 0.0), field("g", 0.0), field("b", 0.0), field("a", 0.0)],
	},
	WellKnownStruct {
		type_name: "Int32Interval",
		kind: StorageKind::Int,
		fields: &[field("min", 0.0), field("max", 0.0)],
	},
	WellKnownStruct {
		type_name: "FloatInterval",
		kind: StorageKind::Float,
		fields: &[field("min", 0.0), field("max", 0.0)],
	},
];

/// Look up a catalog entry by host struct type name.
pub fn well_known(type_name: &str) -> Option<&'static WellKnownStruct> {
	WELL_KNOWN_STRUCTS.iter().find(|entry| entry.type_name == type_name)
}
