//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: they are defined entirely by their
//! attribute values. A product priced at 10 with 8% tax named "Kefir" is the
//! same thing wherever it appears.

/// Marker trait for value objects.
///
/// Implementors are **immutable** once constructed (validation happens in the
/// constructor, fields are private, there are no setters) and are compared by
/// their attribute values.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Rate(Decimal);
///
/// impl ValueObject for Rate {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
