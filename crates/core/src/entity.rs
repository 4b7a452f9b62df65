//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// An invoice is an entity: two invoices holding the same lines are still
/// different invoices because their numbers differ.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
