//! Many-to-many relationships through explicit join records.
//!
//! A many-to-many relationship is physically stored as a list of join records
//! (the link can carry its own data, and most persistence mappings need an
//! explicit link entity). [`JoinCollectionFacade`] lets callers work with the
//! related entities directly, hiding the join-record indirection.
//!
//! ## Join records
//!
//! A join record implements [`JoinEntity`] once per side of the relationship:
//!
//! ```ignore
//! #[derive(Debug, Default)]
//! struct Enrollment {
//!     course: Option<Rc<Course>>,
//!     student: Option<Weak<Student>>,
//! }
//!
//! impl JoinEntity<Rc<Course>> for Enrollment {
//!     fn navigation(&self) -> Option<&Rc<Course>> {
//!         self.course.as_ref()
//!     }
//!
//!     fn set_navigation(&mut self, value: Rc<Course>) {
//!         self.course = Some(value);
//!     }
//! }
//!
//! impl JoinEntity<Weak<Student>> for Enrollment { /* same, for `student` */ }
//! ```
//!
//! ## Sharing
//!
//! The backing collection is shared with its owner as [`JoinRecords`]
//! (`Rc<RefCell<Vec<_>>>`): the facade is a live view, every change made
//! through it is visible to whoever else holds the records and vice versa.
//! This is single-threaded by construction (`Rc` is neither `Send` nor `Sync`).

use core::cell::{Ref, RefCell, RefMut};
use core::fmt;
use core::marker::PhantomData;
use std::rc::Rc;

use tracing::trace;

use crate::error::{DomainError, DomainResult};

/// A single mutable navigation slot of type `T` on a join record.
///
/// Implemented twice by a join record, once for each related side.
pub trait JoinEntity<T> {
    /// The related value, `None` until the slot has been set.
    fn navigation(&self) -> Option<&T>;

    /// Points the slot at `value`, replacing any previous value.
    fn set_navigation(&mut self, value: T);
}

/// Shared, ordered backing collection of join records.
pub type JoinRecords<J> = Rc<RefCell<Vec<J>>>;

/// Creates an empty [`JoinRecords`] collection.
pub fn join_records<J>() -> JoinRecords<J> {
    Rc::new(RefCell::new(Vec::new()))
}

/// Collection view of the related entities `E` behind join records `J`,
/// owned by `O`.
///
/// - `add` creates a join record pointing at both the entity and the owner.
/// - `remove`, `contains` compare the related-side navigation with `E`'s
///   `PartialEq` (identity equality for entities).
/// - `len` is the number of join records: one record, one related entity.
///   Enumeration yields exactly one item per record, `None` for a record whose
///   related side was never set.
///
/// Mutations fail with [`DomainError::InvalidState`] while an enumeration
/// ([`JoinCollectionFacade::iter`]) of the same records is alive.
///
/// # Panics
///
/// Read operations (`len`, `contains`, `iter`, `join_records`) panic if the
/// shared [`JoinRecords`] are mutably borrowed elsewhere at the time of the
/// call, as `RefCell::borrow` does.
pub struct JoinCollectionFacade<E, O, J> {
    owner: O,
    records: JoinRecords<J>,
    _related: PhantomData<fn() -> E>,
}

impl<E, O, J> JoinCollectionFacade<E, O, J>
where
    J: JoinEntity<E> + JoinEntity<O> + Default,
    E: Clone + PartialEq,
    O: Clone,
{
    /// Creates a facade for `owner` over `records`.
    pub fn new(owner: O, records: JoinRecords<J>) -> Self {
        Self {
            owner,
            records,
            _related: PhantomData,
        }
    }

    /// Creates a facade from parts that may be absent.
    ///
    /// Fails with [`DomainError::MissingArgument`] naming the first absent part.
    pub fn try_new(owner: Option<O>, records: Option<JoinRecords<J>>) -> DomainResult<Self> {
        let owner = owner.ok_or(DomainError::missing_argument("owner_entity"))?;
        let records = records.ok_or(DomainError::missing_argument("collection"))?;
        Ok(Self::new(owner, records))
    }

    /// The owner captured at construction.
    pub fn owner(&self) -> &O {
        &self.owner
    }

    /// Links `entity` to the owner through a new join record.
    pub fn add(&self, entity: E) -> DomainResult<()> {
        let mut record = J::default();
        JoinEntity::<E>::set_navigation(&mut record, entity);
        JoinEntity::<O>::set_navigation(&mut record, self.owner.clone());

        let mut records = self.records_mut()?;
        records.push(record);
        trace!(count = records.len(), "join record added");
        Ok(())
    }

    /// Removes the first join record pointing at `entity`.
    ///
    /// Returns `false` (and changes nothing) when no record points at it.
    pub fn remove(&self, entity: &E) -> DomainResult<bool> {
        let Some(index) = self.position(entity) else {
            return Ok(false);
        };

        let mut records = self.records_mut()?;
        records.remove(index);
        trace!(index, count = records.len(), "join record removed");
        Ok(true)
    }

    pub fn contains(&self, entity: &E) -> bool {
        self.position(entity).is_some()
    }

    /// Removes every join record.
    pub fn clear(&self) -> DomainResult<()> {
        let mut records = self.records_mut()?;
        let removed = records.len();
        records.clear();
        trace!(removed, "join records cleared");
        Ok(())
    }

    /// Number of join records.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Always `false`: the facade writes through to its records.
    pub fn is_read_only(&self) -> bool {
        false
    }

    /// Lazily enumerates the related side of every record, in record order.
    ///
    /// Each call starts over from the current state of the records.
    pub fn iter(&self) -> Entities<'_, E, J> {
        Entities {
            records: self.records.borrow(),
            index: 0,
            _related: PhantomData,
        }
    }

    /// The related side of every record, collected.
    pub fn entities(&self) -> Vec<Option<E>> {
        self.iter().collect()
    }

    /// Copies the related side of every record into `buffer` starting at
    /// `offset`, one slot per record.
    ///
    /// Fails with [`DomainError::OutOfRange`], leaving `buffer` untouched, when
    /// the records do not fit.
    pub fn copy_to(&self, buffer: &mut [Option<E>], offset: usize) -> DomainResult<()> {
        let entities = self.entities();
        let available = buffer.len().checked_sub(offset).ok_or_else(|| {
            DomainError::out_of_range(format!(
                "offset {offset} exceeds buffer length {}",
                buffer.len()
            ))
        })?;
        if entities.len() > available {
            return Err(DomainError::out_of_range(format!(
                "{} entities do not fit in {available} remaining slots",
                entities.len()
            )));
        }

        for (slot, entity) in buffer[offset..].iter_mut().zip(entities) {
            *slot = entity;
        }
        Ok(())
    }

    /// Read access to the underlying join records.
    pub fn join_records(&self) -> Ref<'_, [J]> {
        Ref::map(self.records.borrow(), Vec::as_slice)
    }

    fn position(&self, entity: &E) -> Option<usize> {
        self.records
            .borrow()
            .iter()
            .position(|record| JoinEntity::<E>::navigation(record) == Some(entity))
    }

    fn records_mut(&self) -> DomainResult<RefMut<'_, Vec<J>>> {
        self.records.try_borrow_mut().map_err(|_| {
            DomainError::invalid_state("join records are borrowed (enumeration in progress)")
        })
    }
}

impl<E, O: fmt::Debug, J> fmt::Debug for JoinCollectionFacade<E, O, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("JoinCollectionFacade");
        debug.field("owner", &self.owner);
        match self.records.try_borrow() {
            Ok(records) => debug.field("len", &records.len()),
            Err(_) => debug.field("len", &"<borrowed>"),
        };
        debug.finish()
    }
}

impl<'a, E, O, J> IntoIterator for &'a JoinCollectionFacade<E, O, J>
where
    J: JoinEntity<E> + JoinEntity<O> + Default,
    E: Clone + PartialEq,
    O: Clone,
{
    type Item = Option<E>;
    type IntoIter = Entities<'a, E, J>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the related side of a [`JoinCollectionFacade`]'s records.
///
/// Holds a shared borrow of the join records until dropped. Yields one item
/// per record: `None` when the record's related slot was never set.
pub struct Entities<'a, E, J> {
    records: Ref<'a, Vec<J>>,
    index: usize,
    _related: PhantomData<fn() -> E>,
}

impl<E, J> Iterator for Entities<'_, E, J>
where
    J: JoinEntity<E>,
    E: Clone,
{
    type Item = Option<E>;

    fn next(&mut self) -> Option<Option<E>> {
        let record = self.records.get(self.index)?;
        self.index += 1;
        Some(record.navigation().cloned())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.records.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<E, J> ExactSizeIterator for Entities<'_, E, J>
where
    J: JoinEntity<E>,
    E: Clone,
{
}

impl<E, J> fmt::Debug for Entities<'_, E, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entities")
            .field("index", &self.index)
            .field("remaining", &self.records.len().saturating_sub(self.index))
            .finish()
    }
}
