//! Marshals flat, tuple-shaped attribute data from a procedural-generation
//! engine onto strongly-typed properties of a reflective host object model.

/// Attribute containers, property resolution, and value marshalling.
pub mod attr;
