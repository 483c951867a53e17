#![allow(missing_docs)]

use procattr::attr::memhost::{HostEvent, MemHost, PropDef};
use procattr::attr::{
	AttrError, AttrValue, Container, HostModel, NullSink, ObjectKind, Scalar, StorageKind, VecSink, fetch_attribute, find_property, infer_shape,
	write_property,
};

fn float_attr(name: &str, tuple_size: usize, values: &[f64]) -> AttrValue {
	let mut attr = AttrValue::new(name, StorageKind::Float, tuple_size);
	for (i, v) in values.iter().enumerate() {
		attr.set_double(*v, i);
	}
	attr
}

fn string_attr(name: &str, values: &[&str]) -> AttrValue {
	let mut attr = AttrValue::new(name, StorageKind::String, 1);
	for (i, v) in values.iter().enumerate() {
		attr.set_string(v, i);
	}
	attr
}

#[test]
fn float_attribute_writes_a_float_property() {
	let mut host = MemHost::new();
	let class = host.add_class("LightComponent", ObjectKind::PrimitiveComponent, None, vec![PropDef::float("Intensity")]);
	let light = host.spawn(class, "/light");

	let attr = float_attr("Intensity", 1, &[2.5]);
	let resolved = find_property(&host, light, "Intensity").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");

	assert_eq!(host.read_scalar(&Container::root(light), "Intensity", 0), Some(Scalar::F64(2.5)));
}

#[test]
fn string_attribute_driving_a_numeric_slot_is_parsed() {
	let mut host = MemHost::new();
	let class = host.add_class(
		"LightComponent",
		ObjectKind::PrimitiveComponent,
		None,
		vec![PropDef::float("Radius"), PropDef::int("Samples")],
	);
	let light = host.spawn(class, "/light");

	let attr = string_attr("Radius", &["12.5cm"]);
	let resolved = find_property(&host, light, "Radius").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");
	assert_eq!(host.read_scalar(&Container::root(light), "Radius", 0), Some(Scalar::F64(12.5)));

	let attr = string_attr("Samples", &["64 rays"]);
	let resolved = find_property(&host, light, "Samples").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");
	assert_eq!(host.read_scalar(&Container::root(light), "Samples", 0), Some(Scalar::I64(64)));
}

#[test]
fn short_tuple_on_a_transform_leaves_identity_defaults() {
	let mut host = MemHost::new();
	let class = host.add_class("SceneComponent", ObjectKind::Component, None, vec![PropDef::struct_("RelativeTransform", "Transform")]);
	let comp = host.spawn(class, "/comp");

	let attr = float_attr("RelativeTransform", 2, &[5.0, 6.0]);
	let resolved = find_property(&host, comp, "RelativeTransform").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");

	let mut out = AttrValue::new("RelativeTransform", StorageKind::Float, 10);
	fetch_attribute(&mut host, &mut NullSink, comp, "RelativeTransform", &mut out, 0).expect("read succeeds");
	assert_eq!(out.double_tuple(0), vec![5.0, 6.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
}

#[test]
fn writes_two_struct_levels_deep_leave_siblings_untouched() {
	let mut host = MemHost::new();
	host.add_struct("AttenuationData", vec![PropDef::float("Falloff"), PropDef::float("Radius")]);
	host.add_struct("LightSettingsData", vec![PropDef::struct_("Attenuation", "AttenuationData"), PropDef::float("Exposure")]);
	let class = host.add_class(
		"LightComponent",
		ObjectKind::PrimitiveComponent,
		None,
		vec![PropDef::struct_("LightSettings", "LightSettingsData"), PropDef::float("Falloff")],
	);
	let light = host.spawn(class, "/light");
	let settings = Container::root(light).into_struct("LightSettings");
	let attenuation = settings.clone().into_struct("Attenuation");
	assert!(host.write_scalar(&attenuation, "Radius", 0, Scalar::F64(7.0)));

	// The descent scans LightSettings.Attenuation.Falloff before the
	// top-level Falloff and hits it exactly, two struct levels deep.
	let attr = float_attr("Falloff", 1, &[2.0]);
	let resolved = find_property(&host, light, "Falloff").expect("property resolves");
	assert_eq!(resolved.container, attenuation);
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");

	assert_eq!(host.read_scalar(&attenuation, "Falloff", 0), Some(Scalar::F64(2.0)));
	assert_eq!(host.read_scalar(&attenuation, "Radius", 0), Some(Scalar::F64(7.0)));
	assert_eq!(host.read_scalar(&settings, "Exposure", 0), Some(Scalar::F64(0.0)));
	assert_eq!(host.read_scalar(&Container::root(light), "Falloff", 0), Some(Scalar::F64(0.0)));
}

#[test]
fn components_past_a_fixed_dimension_are_dropped_silently() {
	let mut host = MemHost::new();
	let class = host.add_class("Thing", ObjectKind::Other, None, vec![PropDef::float("Extents").fixed(2)]);
	let thing = host.spawn(class, "/thing");

	let attr = float_attr("Extents", 4, &[1.0, 2.0, 3.0, 4.0]);
	let resolved = find_property(&host, thing, "Extents").expect("property resolves");
	let mut sink = VecSink::default();
	write_property(&mut host, &mut sink, &resolved, &attr, 0).expect("write succeeds");

	assert!(sink.messages.is_empty());
	assert_eq!(host.read_scalar(&Container::root(thing), "Extents", 0), Some(Scalar::F64(1.0)));
	assert_eq!(host.read_scalar(&Container::root(thing), "Extents", 1), Some(Scalar::F64(2.0)));
	assert_eq!(host.read_scalar(&Container::root(thing), "Extents", 2), None);
}

#[test]
fn dynamic_arrays_grow_to_hold_the_whole_tuple() {
	let mut host = MemHost::new();
	let class = host.add_class("Thing", ObjectKind::Other, None, vec![PropDef::float("Weights").dynamic()]);
	let thing = host.spawn(class, "/thing");

	let attr = float_attr("Weights", 3, &[0.1, 0.2, 0.3]);
	let resolved = find_property(&host, thing, "Weights").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");

	assert_eq!(host.array_len(&Container::root(thing), "Weights"), 3);
	assert_eq!(host.read_scalar(&Container::root(thing), "Weights", 2), Some(Scalar::F64(0.3)));
}

#[test]
fn object_reference_of_the_wrong_class_is_rejected_untouched() {
	let mut host = MemHost::new();
	host.add_class("Material", ObjectKind::Other, None, vec![]);
	let texture_class = host.add_class("Texture", ObjectKind::Other, None, vec![]);
	let holder_class = host.add_class("MeshComponent", ObjectKind::PrimitiveComponent, None, vec![PropDef::object("OverrideMaterial", "Material")]);
	host.spawn(texture_class, "/game/tex");
	let holder = host.spawn(holder_class, "/comp");

	let attr = string_attr("OverrideMaterial", &["/game/tex"]);
	let resolved = find_property(&host, holder, "OverrideMaterial").expect("property resolves");
	let err = write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect_err("class mismatch fails");
	assert!(matches!(err, AttrError::ObjectClassMismatch { .. }));
	assert_eq!(host.read_object_ref(&Container::root(holder), "OverrideMaterial", 0), None);
}

#[test]
fn object_reference_round_trips_through_its_path() {
	let mut host = MemHost::new();
	let material_class = host.add_class("Material", ObjectKind::Other, None, vec![]);
	let holder_class = host.add_class("MeshComponent", ObjectKind::PrimitiveComponent, None, vec![PropDef::object("OverrideMaterial", "Material")]);
	let material = host.spawn(material_class, "/game/mat");
	let holder = host.spawn(holder_class, "/comp");

	let attr = string_attr("OverrideMaterial", &["/game/mat"]);
	let resolved = find_property(&host, holder, "OverrideMaterial").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");
	assert_eq!(host.read_object_ref(&Container::root(holder), "OverrideMaterial", 0), Some(material));

	let mut out = AttrValue::new("OverrideMaterial", StorageKind::String, 1);
	fetch_attribute(&mut host, &mut NullSink, holder, "OverrideMaterial", &mut out, 0).expect("read succeeds");
	assert_eq!(out.string(0), "/game/mat");
}

#[test]
fn notifications_fire_once_per_property_after_all_components() {
	let mut host = MemHost::new();
	let actor_class = host.add_class("Actor", ObjectKind::Actor, None, vec![]);
	let comp_class = host.add_class("SceneComponent", ObjectKind::Component, None, vec![PropDef::struct_("RelativeLocation", "Vector")]);
	let actor = host.spawn(actor_class, "/actor");
	let comp = host.spawn(comp_class, "/actor.root");
	host.attach_component(actor, comp);

	let attr = float_attr("RelativeLocation", 3, &[1.0, 2.0, 3.0]);
	let resolved = find_property(&host, comp, "RelativeLocation").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect("write succeeds");

	assert_eq!(
		host.events,
		vec![
			HostEvent::PropertyChanged {
				owner: comp,
				ident: "RelativeLocation".to_owned()
			},
			HostEvent::EditFinished { object: comp },
			HostEvent::EditFinished { object: actor },
		]
	);
}

#[test]
fn failed_writes_notify_nothing() {
	let mut host = MemHost::new();
	let class = host.add_class("Thing", ObjectKind::Other, None, vec![PropDef::opaque("Callback", "delegate")]);
	let thing = host.spawn(class, "/thing");

	let attr = float_attr("Callback", 1, &[1.0]);
	let resolved = find_property(&host, thing, "Callback").expect("property resolves");
	let err = write_property(&mut host, &mut NullSink, &resolved, &attr, 0).expect_err("opaque category fails");
	assert!(matches!(err, AttrError::UnsupportedType { .. }));
	assert!(host.events.is_empty());
}

#[test]
fn inferred_shapes_follow_the_property_category() {
	let mut host = MemHost::new();
	let class = host.add_class(
		"Thing",
		ObjectKind::Other,
		None,
		vec![
			PropDef::struct_("Location", "Vector"),
			PropDef::boolean("bVisible"),
			PropDef::string("Label"),
			PropDef::opaque("Callback", "delegate"),
		],
	);
	let thing = host.spawn(class, "/thing");

	let location = find_property(&host, thing, "Location").expect("property resolves");
	assert_eq!(infer_shape(&mut NullSink, &location).expect("shape inferred"), (3, StorageKind::Float));

	let visible = find_property(&host, thing, "bVisible").expect("property resolves");
	assert_eq!(infer_shape(&mut NullSink, &visible).expect("shape inferred"), (1, StorageKind::Int));

	let label = find_property(&host, thing, "Label").expect("property resolves");
	assert_eq!(infer_shape(&mut NullSink, &label).expect("shape inferred"), (1, StorageKind::String));

	let callback = find_property(&host, thing, "Callback").expect("property resolves");
	assert!(infer_shape(&mut NullSink, &callback).is_err());
}

#[test]
fn vector_attribute_round_trips_per_element() {
	let mut host = MemHost::new();
	let class = host.add_class("SceneComponent", ObjectKind::Component, None, vec![PropDef::struct_("RelativeLocation", "Vector")]);
	let comp = host.spawn(class, "/comp");

	// Element 1 of a two-element attribute drives the write; element 0 is
	// someone else's data and must be ignored.
	let attr = float_attr("RelativeLocation", 3, &[9.0, 9.0, 9.0, 1.0, 2.0, 3.0]);
	let resolved = find_property(&host, comp, "RelativeLocation").expect("property resolves");
	write_property(&mut host, &mut NullSink, &resolved, &attr, 1).expect("write succeeds");

	let mut out = AttrValue::new("RelativeLocation", StorageKind::Float, 3);
	fetch_attribute(&mut host, &mut NullSink, comp, "RelativeLocation", &mut out, 0).expect("read succeeds");
	assert_eq!(out.double_tuple(0), vec![1.0, 2.0, 3.0]);
}
