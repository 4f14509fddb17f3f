//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

use core::any::Any;

use crate::attribute::{self, Attributes};

/// Structural equality for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by value**.
/// They represent concepts where identity doesn't matter - only the values matter.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: No identity (two value objects with same values are equal)
/// - **Entity**: Has identity (two entities with same ID are the same entity)
///
/// ## Equality
///
/// Every value object lists the attributes that take part in equality, in a
/// fixed order, through [`ValueObject::equality_attributes`]. Two value
/// objects are equal iff they have the same concrete type and their attribute
/// lists are element-wise equal. The list must not change between calls on the
/// same instance.
///
/// The hash code is an order-sensitive fold over the attribute list
/// (seed 17, multiplier 31, absent attributes contribute 0), so for the
/// attributes `[10, None]` it is `(17 * 31 + 10) * 31`.
///
/// ## Usage Pattern
///
/// ```ignore
/// #[derive(Debug, Clone)]
/// struct Money {
///     amount: i64,
///     currency: String,
/// }
///
/// impl ValueObject for Money {
///     fn equality_attributes(&self) -> Attributes<'_> {
///         vec![attribute(&self.amount), attribute(&self.currency)]
///     }
/// }
///
/// keel_core::impl_value_object_equality!(Money);
///
/// // Two Money objects with same values are equal
/// let m1 = Money { amount: 100, currency: "USD".to_string() };
/// let m2 = Money { amount: 100, currency: "USD".to_string() };
/// assert_eq!(m1, m2);  // Equal by value, not identity
/// ```
pub trait ValueObject: Any + core::fmt::Debug {
    /// Attributes included in the equality check, in order.
    fn equality_attributes(&self) -> Attributes<'_>;

    /// Structural equality against a value of the same type.
    fn value_eq(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        core::ptr::eq(self, other)
            || attribute::sequence_eq(&self.equality_attributes(), &other.equality_attributes())
    }

    /// Structural equality against an arbitrary, possibly absent value.
    ///
    /// Only a value of exactly the same concrete type can be equal.
    fn value_eq_any(&self, other: Option<&dyn Any>) -> bool
    where
        Self: Sized,
    {
        other
            .and_then(|other| other.downcast_ref::<Self>())
            .is_some_and(|other| self.value_eq(other))
    }

    /// Order-sensitive hash over [`ValueObject::equality_attributes`].
    fn value_hash(&self) -> i32 {
        attribute::fold_hash(&self.equality_attributes())
    }
}

/// Implements `PartialEq`, `Eq`, `Hash` and [`Attribute`](crate::attribute::Attribute)
/// for a [`ValueObject`], so it can be compared, used as a map key and nested
/// inside other value objects.
#[macro_export]
macro_rules! impl_value_object_equality {
    ($t:ty) => {
        impl ::core::cmp::PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                $crate::value_object::ValueObject::value_eq(self, other)
            }
        }

        impl ::core::cmp::Eq for $t {}

        impl ::core::hash::Hash for $t {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                state.write_i32($crate::value_object::ValueObject::value_hash(self));
            }
        }

        impl $crate::attribute::Attribute for $t {
            fn attribute_eq(&self, other: &dyn $crate::attribute::Attribute) -> bool {
                $crate::value_object::ValueObject::value_eq_any(self, Some(other.as_any()))
            }

            fn attribute_hash(&self) -> i32 {
                $crate::value_object::ValueObject::value_hash(self)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    };
}
