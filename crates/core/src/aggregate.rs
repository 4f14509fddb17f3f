//! Aggregate root marker.

use crate::entity::Entity;

/// An entity that is a consistency boundary, loaded and stored as a whole
/// through a [`Repository`](crate::persistence::Repository).
///
/// This is intentionally empty so modules can decide how they model state
/// transitions without bringing in any infrastructure concerns.
pub trait AggregateRoot: Entity {}
