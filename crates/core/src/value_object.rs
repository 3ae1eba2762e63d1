//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values; two
/// with the same values are the same value. `Money { 19.94 }` is a value
/// object, `Customer { id, .. }` is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
