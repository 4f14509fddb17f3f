//! Entity trait: identity + continuity across state changes.
//!
//! Entities are compared by **identifier**, never by content. An entity whose
//! identifier still holds `Id::default()` has not been assigned a durable
//! identity yet (typically: not persisted) and is called *new*.
//!
//! ## Equality rules
//!
//! Two entities are equal iff
//! - they are the same instance (same address), or
//! - neither of them is new and their identifiers are equal.
//!
//! Two distinct new entities are never equal, even though both hold the
//! default identifier. Hashing only looks at the identifier, so two new
//! entities collide in hash while comparing unequal (which is allowed).
//!
//! Because of that rule, entity equality is only `PartialEq`: a new entity is
//! equal to itself but not to a clone of itself.
//!
//! ## Usage Pattern
//!
//! ```ignore
//! #[derive(Debug, Clone)]
//! struct Customer {
//!     id: u64,
//!     name: String,
//! }
//!
//! impl Entity for Customer {
//!     type Id = u64;
//!
//!     fn id(&self) -> &u64 {
//!         &self.id
//!     }
//! }
//!
//! keel_core::impl_entity_equality!(Customer);
//! ```

use core::hash::{Hash, Hasher};

/// Entity marker + identity semantics.
pub trait Entity {
    /// Strongly-typed entity identifier.
    ///
    /// `Default` is the "not yet assigned" value. Identifiers are compared by
    /// value (`Eq`), never by reference.
    type Id: Clone + Eq + Hash + core::fmt::Debug + Default;

    /// Returns the entity identifier.
    ///
    /// The identifier is fixed at construction; there is deliberately no setter.
    fn id(&self) -> &Self::Id;

    /// Whether the entity still holds the default (unassigned) identifier.
    fn is_new(&self) -> bool {
        *self.id() == Self::Id::default()
    }

    /// Identity-based equality (see module docs).
    fn identity_eq(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        core::ptr::eq(self, other)
            || (!(self.is_new() && other.is_new()) && self.id() == other.id())
    }

    /// Feeds the identifier, and only the identifier, into `state`.
    fn identity_hash<H: Hasher>(&self, state: &mut H)
    where
        Self: Sized,
    {
        self.id().hash(state);
    }
}

/// Implements `PartialEq` and `Hash` for an [`Entity`] through
/// [`Entity::identity_eq`] and [`Entity::identity_hash`].
///
/// Comparing possibly absent entities goes through `Option<&T>`, which then
/// treats absent-vs-absent as equal and absent-vs-present as unequal.
#[macro_export]
macro_rules! impl_entity_equality {
    ($t:ty) => {
        impl ::core::cmp::PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                $crate::entity::Entity::identity_eq(self, other)
            }
        }

        impl ::core::hash::Hash for $t {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                $crate::entity::Entity::identity_hash(self, state)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;

    #[derive(Debug, Clone, Default)]
    struct FakeEntity {
        id: u32,
    }

    impl FakeEntity {
        fn new() -> Self {
            Self::default()
        }

        fn with_id(id: u32) -> Self {
            Self { id }
        }
    }

    impl Entity for FakeEntity {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    crate::impl_entity_equality!(FakeEntity);

    #[derive(Debug)]
    struct NamedEntity {
        name: String,
    }

    impl Entity for NamedEntity {
        type Id = String;

        fn id(&self) -> &String {
            &self.name
        }
    }

    crate::impl_entity_equality!(NamedEntity);

    fn hash_of<T: Hash + ?Sized>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn entities_with_same_assigned_id_are_equal() {
        assert_eq!(FakeEntity::with_id(1), FakeEntity::with_id(1));
        assert!(FakeEntity::with_id(1).identity_eq(&FakeEntity::with_id(1)));
    }

    #[test]
    fn entities_with_different_ids_are_not_equal() {
        assert_ne!(FakeEntity::with_id(1), FakeEntity::with_id(2));
    }

    #[test]
    fn two_new_entities_are_never_equal() {
        let a = FakeEntity::new();
        let b = FakeEntity::new();
        assert!(a.is_new());
        assert!(b.is_new());
        assert_ne!(a, b);
        assert_ne!(a, a.clone());
    }

    #[test]
    fn new_entity_is_equal_to_itself() {
        let a = FakeEntity::new();
        let same = &a;
        assert!(*same == a);
        assert!(a.identity_eq(same));
    }

    #[test]
    fn new_entity_is_not_equal_to_persisted_entity() {
        assert_ne!(FakeEntity::new(), FakeEntity::with_id(1));
        assert_ne!(FakeEntity::with_id(1), FakeEntity::new());
    }

    #[test]
    fn explicitly_assigned_default_id_is_new() {
        assert!(FakeEntity::with_id(0).is_new());
        assert!(!FakeEntity::with_id(7).is_new());
    }

    #[test]
    fn reference_typed_ids_compare_by_value() {
        let a = NamedEntity {
            name: String::from("acme"),
        };
        let b = NamedEntity {
            name: "acme".to_string(),
        };
        assert_eq!(a, b);

        let empty_a = NamedEntity {
            name: String::new(),
        };
        let empty_b = NamedEntity {
            name: String::new(),
        };
        assert!(empty_a.is_new());
        assert_ne!(empty_a, empty_b);
    }

    #[test]
    fn hash_depends_on_id_only() {
        assert_eq!(hash_of(&FakeEntity::with_id(1)), hash_of(&1u32));
        assert_eq!(hash_of(&FakeEntity::new()), hash_of(&FakeEntity::new()));
    }

    #[test]
    fn optional_operands_follow_absent_rules() {
        let a = FakeEntity::with_id(3);
        let b = FakeEntity::with_id(3);
        let none: Option<&FakeEntity> = None;

        assert!(Some(&a) == Some(&b));
        assert!(none == None);
        assert!(Some(&a) != none);
        assert!(none != Some(&b));
        assert!(Some(&FakeEntity::new()) != Some(&FakeEntity::new()));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: assigned ids decide equality, and equal entities hash alike.
        #[test]
        fn equality_follows_assigned_ids(a in 1u32..=u32::MAX, b in 1u32..=u32::MAX) {
            let left = FakeEntity::with_id(a);
            let right = FakeEntity::with_id(b);

            prop_assert_eq!(left == right, a == b);
            if left == right {
                prop_assert_eq!(hash_of(&left), hash_of(&right));
            }
            prop_assert_eq!(hash_of(&left), hash_of(&a));
        }
    }
}
