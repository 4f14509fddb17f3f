//! `keel-core` — domain-modeling building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identity-compared entities, structurally compared value objects, join
//! collections for many-to-many relationships, and the persistence contracts
//! storage adapters implement.

pub mod aggregate;
pub mod attribute;
pub mod entity;
pub mod error;
pub mod id;
pub mod join;
pub mod joined;
pub mod persistence;
pub mod value_object;

pub use aggregate::AggregateRoot;
pub use attribute::{Attribute, Attributes, attribute, optional};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use join::{Entities, JoinCollectionFacade, JoinEntity, JoinRecords, join_records};
pub use joined::{JoinedEntity, JoinedEntityState};
pub use persistence::{
    PersistenceError, PersistenceResult, Repository, Transaction, UnitOfWork,
};
pub use value_object::ValueObject;
