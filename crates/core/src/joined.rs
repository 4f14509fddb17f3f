//! Entities that own one side of a many-to-many relationship.

use core::cell::OnceCell;
use core::fmt;

use crate::entity::Entity;
use crate::join::{JoinCollectionFacade, JoinEntity, JoinRecords, join_records};

/// Join records held by a [`JoinedEntity`], plus its lazily built facade.
///
/// The records start out empty. The facade is created on first access and
/// cached for the lifetime of the state; it is never rebuilt. `OnceCell` makes
/// this state `!Sync`, so first access can not race.
pub struct JoinedEntityState<E, O, J> {
    records: JoinRecords<J>,
    facade: OnceCell<JoinCollectionFacade<E, O, J>>,
}

impl<E, O, J> JoinedEntityState<E, O, J>
where
    J: JoinEntity<E> + JoinEntity<O> + Default,
    E: Clone + PartialEq,
    O: Clone,
{
    pub fn new() -> Self {
        Self {
            records: join_records(),
            facade: OnceCell::new(),
        }
    }

    /// Returns the facade, building it with `owner` on first call.
    ///
    /// `owner` must not access this state again (re-entrant initialization panics).
    pub fn facade_or_init(&self, owner: impl FnOnce() -> O) -> &JoinCollectionFacade<E, O, J> {
        self.facade
            .get_or_init(|| JoinCollectionFacade::new(owner(), self.records.clone()))
    }

    /// Whether the facade has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.facade.get().is_some()
    }
}

impl<E, O, J> Default for JoinedEntityState<E, O, J>
where
    J: JoinEntity<E> + JoinEntity<O> + Default,
    E: Clone + PartialEq,
    O: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E, O, J> fmt::Debug for JoinedEntityState<E, O, J> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JoinedEntityState")
            .field("records", &self.records.try_borrow().map(|r| r.len()).ok())
            .field("initialized", &self.facade.get().is_some())
            .finish()
    }
}

/// An entity exposing a many-to-many relationship through a
/// [`JoinCollectionFacade`] over its own join records.
///
/// `Self` is the owner type. [`JoinedEntity::owner_ref`] supplies what the
/// owner-side navigation of each new join record points at: usually a
/// `Weak<Self>` captured with `Rc::new_cyclic`, or the owner's identifier.
///
/// ```ignore
/// struct Student {
///     id: u64,
///     me: Weak<Student>,
///     courses: JoinedEntityState<Rc<Course>, Weak<Student>, Enrollment>,
/// }
///
/// impl JoinedEntity for Student {
///     type Related = Rc<Course>;
///     type OwnerRef = Weak<Student>;
///     type Link = Enrollment;
///
///     fn join_state(&self) -> &JoinedEntityState<Rc<Course>, Weak<Student>, Enrollment> {
///         &self.courses
///     }
///
///     fn owner_ref(&self) -> Weak<Student> {
///         self.me.clone()
///     }
/// }
/// ```
pub trait JoinedEntity: Entity + Sized {
    /// The entities on the other side of the relationship.
    type Related: Clone + PartialEq;

    /// Owner-side navigation value stored in each join record.
    type OwnerRef: Clone;

    /// The join record type.
    type Link: JoinEntity<Self::Related> + JoinEntity<Self::OwnerRef> + Default;

    fn join_state(&self) -> &JoinedEntityState<Self::Related, Self::OwnerRef, Self::Link>;

    fn owner_ref(&self) -> Self::OwnerRef;

    /// The relationship facade, built on first access and cached.
    fn collection_facade(&self) -> &JoinCollectionFacade<Self::Related, Self::OwnerRef, Self::Link> {
        self.join_state().facade_or_init(|| self.owner_ref())
    }
}
