//! Persistence boundary: repositories, units of work, transactions.
//!
//! These are contracts only. Storage adapters implement them; domain code
//! receives them as injected collaborators. Storage mechanics and transaction
//! management live entirely in the implementations.
//!
//! ## Async operations
//!
//! Every blocking operation has an async twin. Cancelling an async operation
//! means dropping its future; implementations must leave their state
//! consistent when that happens (typically: the work is simply not done).
//!
//! ## Absent arguments
//!
//! Aggregates are passed by value or by reference, so "absent aggregate" can
//! not be expressed. Adapters that receive optional input from elsewhere
//! report it as [`DomainError::MissingArgument`] wrapped in
//! [`PersistenceError::Domain`].

use std::sync::Arc;

use thiserror::Error;

use crate::aggregate::AggregateRoot;
use crate::error::DomainError;

/// Result type used across the persistence boundary.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Persistence operation error.
///
/// These are **infrastructure errors** (lifecycle, storage, concurrency) as
/// opposed to domain errors (validation, invariants), which pass through as
/// [`PersistenceError::Domain`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// The operation is not valid at this point of the lifecycle
    /// (e.g. committing a transaction twice).
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A unit of atomic work against a store.
///
/// A transaction is committed or rolled back exactly once. Any further
/// `commit`/`rollback` fails with [`PersistenceError::InvalidState`].
/// Implementations release their resources on `Drop`; dropping a transaction
/// that was neither committed nor rolled back should roll it back.
#[async_trait::async_trait]
pub trait Transaction: Send {
    /// Makes every change done within the transaction permanent.
    fn commit(&mut self) -> PersistenceResult<()>;

    async fn commit_async(&mut self) -> PersistenceResult<()> {
        self.commit()
    }

    /// Reverts every change done within the transaction.
    fn rollback(&mut self) -> PersistenceResult<()>;

    async fn rollback_async(&mut self) -> PersistenceResult<()> {
        self.rollback()
    }
}

impl<T> Transaction for Box<T>
where
    T: Transaction + ?Sized,
{
    fn commit(&mut self) -> PersistenceResult<()> {
        (**self).commit()
    }

    fn rollback(&mut self) -> PersistenceResult<()> {
        (**self).rollback()
    }
}

/// Tracks changes made through repositories and writes them out together.
#[async_trait::async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Starts a transaction scoped to this unit of work.
    fn begin_transaction(&self) -> PersistenceResult<Box<dyn Transaction>>;

    /// Persists every tracked change.
    fn save(&self) -> PersistenceResult<()>;

    async fn save_async(&self) -> PersistenceResult<()> {
        self.save()
    }
}

impl<U> UnitOfWork for Arc<U>
where
    U: UnitOfWork + ?Sized,
{
    fn begin_transaction(&self) -> PersistenceResult<Box<dyn Transaction>> {
        (**self).begin_transaction()
    }

    fn save(&self) -> PersistenceResult<()> {
        (**self).save()
    }
}

/// Collection-like access to the aggregates of one type.
///
/// Changes are tracked, and become durable through the owning
/// [`UnitOfWork`]'s `save`.
pub trait Repository<A: AggregateRoot>: Send + Sync {
    /// Queryable view of the stored aggregates.
    ///
    /// Callers narrow it down with ordinary iterator adapters. A store that
    /// can not be read reports an error rather than an empty view.
    fn entities(&self) -> PersistenceResult<Box<dyn Iterator<Item = A> + '_>>;

    fn add(&self, aggregate: A) -> PersistenceResult<()>;

    fn update(&self, aggregate: A) -> PersistenceResult<()>;

    fn delete(&self, aggregate: &A) -> PersistenceResult<()>;
}

impl<A, R> Repository<A> for Arc<R>
where
    A: AggregateRoot,
    R: Repository<A> + ?Sized,
{
    fn entities(&self) -> PersistenceResult<Box<dyn Iterator<Item = A> + '_>> {
        (**self).entities()
    }

    fn add(&self, aggregate: A) -> PersistenceResult<()> {
        (**self).add(aggregate)
    }

    fn update(&self, aggregate: A) -> PersistenceResult<()> {
        (**self).update(aggregate)
    }

    fn delete(&self, aggregate: &A) -> PersistenceResult<()> {
        (**self).delete(aggregate)
    }
}
