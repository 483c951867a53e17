#![allow(missing_docs)]

use procattr::attr::memhost::{MemHost, PropDef};
use procattr::attr::{
	AttrError, AttrValue, CollisionMode, Container, HostModel, NullSink, ObjectKind, Scalar, Severity, StorageKind, VecSink, apply_attribute,
};

fn string_attr(name: &str, values: &[&str]) -> AttrValue {
	let mut attr = AttrValue::new(name, StorageKind::String, 1);
	for (i, v) in values.iter().enumerate() {
		attr.set_string(v, i);
	}
	attr
}

fn int_attr(name: &str, values: &[i64]) -> AttrValue {
	let mut attr = AttrValue::new(name, StorageKind::Int, 1);
	for (i, v) in values.iter().enumerate() {
		attr.set_int(*v, i);
	}
	attr
}

#[test]
fn collision_profile_sets_the_profile_and_syncs_the_composed_asset() {
	let mut host = MemHost::new();
	let class = host.add_class("AssetComponent", ObjectKind::AssetComponent, None, vec![]);
	let asset = host.spawn(class, "/asset");

	let attr = string_attr("CollisionProfileName", &["BlockAll"]);
	apply_attribute(&mut host, &mut NullSink, asset, &attr, 0).expect("rule applies");

	assert_eq!(host.collision_profile(asset), Some("BlockAll"));
	assert_eq!(host.default_body_profile(asset), Some("BlockAll"));
}

#[test]
fn collision_profile_rejects_non_primitive_objects() {
	let mut host = MemHost::new();
	let class = host.add_class("Actor", ObjectKind::Actor, None, vec![]);
	let actor = host.spawn(class, "/actor");

	let attr = string_attr("CollisionProfileName", &["BlockAll"]);
	let err = apply_attribute(&mut host, &mut NullSink, actor, &attr, 0).expect_err("wrong kind fails");
	assert!(matches!(err, AttrError::WrongObjectKind { .. }));
	assert_eq!(host.collision_profile(actor), None);
}

#[test]
fn collision_enabled_parses_its_token_case_insensitively() {
	let mut host = MemHost::new();
	let class = host.add_class("MeshComponent", ObjectKind::PrimitiveComponent, None, vec![]);
	let comp = host.spawn(class, "/comp");

	let attr = string_attr("CollisionEnabled", &["querYonly"]);
	apply_attribute(&mut host, &mut NullSink, comp, &attr, 0).expect("rule applies");
	assert_eq!(host.collision_mode(comp), Some(CollisionMode::QueryOnly));
}

#[test]
fn collision_enabled_warns_and_fails_on_an_unknown_token() {
	let mut host = MemHost::new();
	let class = host.add_class("MeshComponent", ObjectKind::PrimitiveComponent, None, vec![]);
	let comp = host.spawn(class, "/comp");

	let attr = string_attr("CollisionEnabled", &["SolidAndHeavy"]);
	let mut sink = VecSink::default();
	let err = apply_attribute(&mut host, &mut sink, comp, &attr, 0).expect_err("unknown token fails");
	assert!(matches!(err, AttrError::UnknownCollisionToken { .. }));
	assert_eq!(host.collision_mode(comp), None);
	assert!(sink.messages.iter().any(|(severity, _)| *severity == Severity::Warning));
}

#[test]
fn cast_shadow_coerces_its_value_to_bool() {
	let mut host = MemHost::new();
	let class = host.add_class("MeshComponent", ObjectKind::PrimitiveComponent, None, vec![]);
	let comp = host.spawn(class, "/comp");

	apply_attribute(&mut host, &mut NullSink, comp, &int_attr("CastShadow", &[1]), 0).expect("rule applies");
	assert!(host.cast_shadow(comp));

	apply_attribute(&mut host, &mut NullSink, comp, &int_attr("CastShadow", &[0]), 0).expect("rule applies");
	assert!(!host.cast_shadow(comp));
}

#[test]
fn cast_shadow_rejects_non_primitive_objects() {
	let mut host = MemHost::new();
	let class = host.add_class("Actor", ObjectKind::Actor, None, vec![]);
	let actor = host.spawn(class, "/actor");

	let err = apply_attribute(&mut host, &mut NullSink, actor, &int_attr("CastShadow", &[1]), 0).expect_err("wrong kind fails");
	assert!(matches!(err, AttrError::WrongObjectKind { .. }));
}

#[test]
fn tags_add_only_the_indexed_element_without_duplicates() {
	let mut host = MemHost::new();
	let class = host.add_class("SceneComponent", ObjectKind::Component, None, vec![]);
	let comp = host.spawn(class, "/comp");

	let attr = string_attr("ActorTags", &["foliage", "interactive"]);
	apply_attribute(&mut host, &mut NullSink, comp, &attr, 1).expect("rule applies");
	assert_eq!(host.tags(comp), ["interactive"]);

	apply_attribute(&mut host, &mut NullSink, comp, &attr, 1).expect("rule applies");
	assert_eq!(host.tags(comp), ["interactive"]);
}

#[test]
fn tags_reject_non_component_objects() {
	let mut host = MemHost::new();
	let class = host.add_class("Actor", ObjectKind::Actor, None, vec![]);
	let actor = host.spawn(class, "/actor");

	let attr = string_attr("Tags", &["foliage"]);
	let err = apply_attribute(&mut host, &mut NullSink, actor, &attr, 0).expect_err("wrong kind fails");
	assert!(matches!(err, AttrError::WrongObjectKind { .. }));
}

#[test]
fn edit_layers_toggles_only_when_the_state_differs() {
	let mut host = MemHost::new();
	let class = host.add_class("Terrain", ObjectKind::Terrain, None, vec![]);
	let terrain = host.spawn(class, "/terrain");

	apply_attribute(&mut host, &mut NullSink, terrain, &int_attr("EnableEditLayers", &[1]), 0).expect("rule applies");
	assert!(host.layers_content_enabled(terrain));

	apply_attribute(&mut host, &mut NullSink, terrain, &int_attr("bCanHaveLayersContent", &[1]), 0).expect("rule applies");
	assert!(host.layers_content_enabled(terrain));

	apply_attribute(&mut host, &mut NullSink, terrain, &int_attr("EnableEditLayers", &[0]), 0).expect("rule applies");
	assert!(!host.layers_content_enabled(terrain));
}

#[test]
fn asset_parameter_labels_rewrite_to_their_canonical_name() {
	let mut host = MemHost::new();
	let actor_class = host.add_class("Actor", ObjectKind::Actor, None, vec![]);
	let asset_class = host.add_class("AssetComponent", ObjectKind::AssetComponent, None, vec![PropDef::float("base_color_intensity")]);
	let actor = host.spawn(actor_class, "/actor");
	let asset = host.spawn(asset_class, "/actor.asset");
	host.attach_component(actor, asset);
	host.add_parameter(asset, "Base Color Intensity", "base_color_intensity");

	let mut attr = AttrValue::new("Base Color Intensity", StorageKind::Float, 1);
	attr.set_double(0.25, 0);
	apply_attribute(&mut host, &mut NullSink, actor, &attr, 0).expect("parameter applies");

	assert_eq!(host.read_scalar(&Container::root(asset), "base_color_intensity", 0), Some(Scalar::F64(0.25)));
}

#[test]
fn mesh_attributes_target_the_indexed_build_source_entry() {
	let mut host = MemHost::new();
	host.add_struct("SourceModel", vec![PropDef::float("ScreenSize")]);
	let mesh_class = host.add_class("Mesh", ObjectKind::Mesh, None, vec![PropDef::struct_("SourceModels", "SourceModel").dynamic()]);
	let mesh = host.spawn(mesh_class, "/mesh");
	assert!(host.array_grow(&Container::root(mesh), "SourceModels", 2));

	let mut attr = AttrValue::new("ScreenSize", StorageKind::Float, 1);
	attr.set_double(0.5, 0);
	attr.set_double(0.1, 1);
	apply_attribute(&mut host, &mut NullSink, mesh, &attr, 1).expect("entry write applies");

	let entry0 = host.source_model_container(mesh, 0).expect("entry 0 exists");
	let entry1 = host.source_model_container(mesh, 1).expect("entry 1 exists");
	assert_eq!(host.read_scalar(&entry0, "ScreenSize", 0), Some(Scalar::F64(0.0)));
	assert_eq!(host.read_scalar(&entry1, "ScreenSize", 0), Some(Scalar::F64(0.1)));
}

#[test]
fn invalid_objects_and_empty_names_fail_up_front() {
	let mut host = MemHost::new();
	let class = host.add_class("Actor", ObjectKind::Actor, None, vec![]);
	let actor = host.spawn(class, "/actor");

	let unnamed = AttrValue::new("", StorageKind::Float, 1);
	let err = apply_attribute(&mut host, &mut NullSink, actor, &unnamed, 0).expect_err("empty name fails");
	assert!(matches!(err, AttrError::EmptyAttributeName));

	host.invalidate(actor);
	let attr = int_attr("CastShadow", &[1]);
	let err = apply_attribute(&mut host, &mut NullSink, actor, &attr, 0).expect_err("invalid object fails");
	assert!(matches!(err, AttrError::InvalidObject));
}

#[test]
fn unmatched_attributes_report_not_found() {
	let mut host = MemHost::new();
	let class = host.add_class("Actor", ObjectKind::Actor, None, vec![]);
	let actor = host.spawn(class, "/actor");

	let attr = int_attr("NoSuchProperty", &[1]);
	let err = apply_attribute(&mut host, &mut NullSink, actor, &attr, 0).expect_err("miss fails");
	assert!(matches!(err, AttrError::NotFound { .. }));
}
