//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two value
/// objects with the same attribute values are the same value. To "modify"
/// one, construct a new one. `Amount` is the canonical example in this
/// workspace; a journal entry, which keeps its identity while its lines
/// change, is an entity instead.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
