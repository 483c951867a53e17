#![allow(missing_docs)]

use procattr::attr::{ArrayShape, AttrValue, Container, ObjectId, PropertyInfo, PropertyKind, StorageKind};
use serde_json::json;

#[test]
fn attribute_values_serialize_with_their_flat_backing() {
	let mut attr = AttrValue::new("pscale", StorageKind::Float, 1);
	attr.set_double(0.5, 0);
	attr.set_double(1.5, 1);

	let value = serde_json::to_value(&attr).expect("attribute serializes");
	assert_eq!(
		value,
		json!({
			"name": "pscale",
			"storage": "Float",
			"tuple_size": 1,
			"data": { "Float": [0.5, 1.5] },
		})
	);
}

#[test]
fn containers_serialize_their_descent_path() {
	let container = Container::root(ObjectId(7)).into_struct("LightSettings").into_array_elem("Samples", 2);

	let value = serde_json::to_value(&container).expect("container serializes");
	assert_eq!(
		value,
		json!({
			"object": 7,
			"path": [
				{ "Struct": { "ident": "LightSettings" } },
				{ "ArrayElem": { "ident": "Samples", "index": 2 } },
			],
		})
	);
}

#[test]
fn property_descriptors_serialize_for_inspection_dumps() {
	let info = PropertyInfo {
		ident: "RelativeLocation".to_owned(),
		display_name: "Relative Location".to_owned(),
		kind: PropertyKind::Struct {
			type_name: "Vector".to_owned(),
		},
		shape: ArrayShape::Fixed(1),
	};

	let value = serde_json::to_value(&info).expect("descriptor serializes");
	assert_eq!(value["ident"], "RelativeLocation");
	assert_eq!(value["kind"], json!({ "Struct": { "type_name": "Vector" } }));
	assert_eq!(value["shape"], json!({ "Fixed": 1 }));
}
