//! Aggregate root trait for mutable domain models.

use crate::entity::Entity;

/// Aggregate root marker + minimal interface.
///
/// An aggregate is the consistency boundary: every mutation goes through it and
/// either succeeds completely or leaves it untouched.
pub trait AggregateRoot: Entity {
    /// Number of successful mutations applied since creation.
    ///
    /// Starts at 0 and grows by exactly 1 per accepted mutation; rejected
    /// mutations never advance it.
    fn version(&self) -> u64;
}
