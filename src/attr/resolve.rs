use crate::attr::host::{ArrayShape, Container, HostModel, ObjectId, ObjectKind, PropertyInfo, PropertyKind, SubObjectSlot};

/// Mesh-like sub-object probe order.
const MESH_SUB_OBJECTS: [SubObjectSlot; 3] = [SubObjectSlot::PhysicsBody, SubObjectSlot::ImportMetadata, SubObjectSlot::NavCollision];

/// Outcome of a successful property search.
///
/// The container is a transient view into the object found; it must be used
/// within the call chain that produced it and never stored.
#[derive(Debug, Clone)]
pub struct ResolvedProperty {
	/// Descriptor of the matched property.
	pub property: PropertyInfo,
	/// Field set holding the property's value.
	pub container: Container,
	/// Object change notifications are invoked on.
	pub owner: ObjectId,
}

/// Find a property matching `name` anywhere in `object`'s field graph.
///
/// The search order is: recursive scan of the object's own properties
/// (structs included), the two class-metadata probes, then the well-known
/// owned sub-objects of mesh-like objects and the attached components of
/// actor-like objects. A miss is not an error; it signals that the name does
/// not target a property here.
///
/// Name matching: a candidate's identifier or whitespace-stripped display
/// name *containing* `name` registers it (last candidate scanned wins); an
/// exact match on either terminates the scan immediately.
pub fn find_property<H: HostModel + ?Sized>(host: &H, object: ObjectId, name: &str) -> Option<ResolvedProperty> {
	if !host.object_valid(object) || name.is_empty() {
		return None;
	}

	if let Some(found) = find_in_container(host, &Container::root(object), object, name) {
		return Some(found);
	}

	if let Some(property) = host.find_field(object, name) {
		return Some(ResolvedProperty {
			property,
			container: Container::root(object),
			owner: object,
		});
	}

	if let Some(property) = host.find_class_property(object, name) {
		return Some(ResolvedProperty {
			property,
			container: Container::root(object),
			owner: object,
		});
	}

	let kind = host.object_kind(object);
	if kind == ObjectKind::Mesh {
		for slot in MESH_SUB_OBJECTS {
			let Some(sub) = host.sub_object(object, slot) else {
				continue;
			};
			if let Some(found) = find_property(host, sub, name) {
				return Some(found);
			}
		}
	}

	if kind.is_actor() {
		for component in host.components(object) {
			if !host.object_valid(component) {
				continue;
			}
			if let Some(found) = find_property(host, component, name) {
				return Some(found);
			}
		}
	}

	None
}

/// Scan one field set (and nested structs) for a property matching `name`.
///
/// `owner` is the object reported for change notifications when a match is
/// found inside this container. Used directly by the orchestrator to search a
/// mesh's build-source entry before the regular object-wide search.
pub fn find_in_container<H: HostModel + ?Sized>(host: &H, container: &Container, owner: ObjectId, name: &str) -> Option<ResolvedProperty> {
	let mut best: Option<(PropertyInfo, Container)> = None;
	scan(host, container, name, &mut best);
	best.map(|(property, container)| ResolvedProperty {
		property,
		container,
		owner,
	})
}

/// Returns true when an exact match ended the scan.
fn scan<H: HostModel + ?Sized>(host: &H, container: &Container, name: &str, best: &mut Option<(PropertyInfo, Container)>) -> bool {
	for property in host.properties(container) {
		let display: String = property.display_name.chars().filter(|c| !c.is_whitespace()).collect();

		if property.ident.contains(name) || display.contains(name) {
			let exact = property.ident == name || display == name;
			*best = Some((property.clone(), container.clone()));
			if exact {
				return true;
			}
		}

		// Struct graphs are acyclic by construction, so no depth limit.
		// Dynamic struct arrays are not descended into; only their elements
		// hold field sets and element 0 may not exist yet.
		if matches!(property.kind, PropertyKind::Struct { .. }) && property.shape != ArrayShape::Dynamic {
			let nested = container.clone().into_struct(&property.ident);
			if scan(host, &nested, name, best) {
				return true;
			}
		}
	}

	false
}
