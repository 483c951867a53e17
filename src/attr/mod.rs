mod apply;
mod catalog;
mod diag;
mod error;
mod host;
mod marshal;
pub mod memhost;
mod resolve;
mod value;

/// Attribute-to-object orchestration entry points.
pub use apply::{apply_attribute, fetch_attribute};
/// Well-known struct catalog.
pub use catalog::{WELL_KNOWN_STRUCTS, WellKnownField, WellKnownStruct, well_known};
/// Diagnostic sinks.
pub use diag::{DiagSink, NullSink, Severity, TracingSink, VecSink};
/// Error and result aliases.
pub use error::{AttrError, Result};
/// Host capability surface and its supporting types.
pub use host::{ArrayShape, CollisionMode, Container, ContainerStep, HostModel, ObjectId, ObjectKind, PropertyInfo, PropertyKind, Scalar, SubObjectSlot};
/// Property read/write adapter and shape inference.
pub use marshal::{infer_shape, read_property, write_property};
/// Reflective property search.
pub use resolve::{ResolvedProperty, find_in_container, find_property};
/// Attribute value container types.
pub use value::{AttrData, AttrValue, StorageKind};
