//! Strongly-typed UUID identifiers for entities.
//!
//! Declare the newtype yourself (so it carries your derives), then let
//! [`impl_uuid_id!`](crate::impl_uuid_id) fill in the rest:
//!
//! ```ignore
//! #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
//! #[serde(transparent)]
//! pub struct OrderId(Uuid);
//!
//! keel_core::impl_uuid_id!(OrderId, "OrderId");
//! ```
//!
//! The nil UUID is the `Default`, which makes an entity carrying it *new*.

/// Implements the identifier surface for a `struct Name(Uuid)` newtype.
#[macro_export]
macro_rules! impl_uuid_id {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create a fresh identifier.
            ///
            /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
            /// for determinism.
            pub fn generate() -> Self {
                Self(::uuid::Uuid::now_v7())
            }

            /// The unassigned identifier.
            pub fn nil() -> Self {
                Self(::uuid::Uuid::nil())
            }

            pub fn from_uuid(uuid: ::uuid::Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &::uuid::Uuid {
                &self.0
            }
        }

        impl ::core::default::Default for $t {
            fn default() -> Self {
                Self::nil()
            }
        }

        impl ::core::fmt::Display for $t {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::convert::From<::uuid::Uuid> for $t {
            fn from(value: ::uuid::Uuid) -> Self {
                Self(value)
            }
        }

        impl ::core::convert::From<$t> for ::uuid::Uuid {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl ::core::str::FromStr for $t {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                let uuid = <::uuid::Uuid as ::core::str::FromStr>::from_str(s).map_err(|e| {
                    $crate::error::DomainError::invalid_id(format!("{}: {}", $name, e))
                })?;
                Ok(Self(uuid))
            }
        }

        impl $crate::attribute::Attribute for $t {
            fn attribute_eq(&self, other: &dyn $crate::attribute::Attribute) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$t>()
                    .is_some_and(|other| self.0 == other.0)
            }

            fn attribute_hash(&self) -> i32 {
                $crate::attribute::Attribute::attribute_hash(&self.0)
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::attribute::Attribute;
    use crate::entity::Entity;
    use crate::error::DomainError;

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    struct OrderId(Uuid);

    crate::impl_uuid_id!(OrderId, "OrderId");

    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    struct CustomerId(Uuid);

    crate::impl_uuid_id!(CustomerId, "CustomerId");

    #[derive(Debug)]
    struct Order {
        id: OrderId,
    }

    impl Entity for Order {
        type Id = OrderId;

        fn id(&self) -> &OrderId {
            &self.id
        }
    }

    #[test]
    fn default_id_is_nil_and_marks_entity_new() {
        assert_eq!(OrderId::default().as_uuid(), &Uuid::nil());
        assert!(Order { id: OrderId::default() }.is_new());
        assert!(!Order { id: OrderId::generate() }.is_new());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(OrderId::generate(), OrderId::generate());
    }

    #[test]
    fn parse_reports_the_id_type() {
        let id = OrderId::generate();
        assert_eq!(OrderId::from_str(&id.to_string()).unwrap(), id);

        match OrderId::from_str("not-a-uuid") {
            Err(DomainError::InvalidId(msg)) => assert!(msg.starts_with("OrderId: ")),
            other => panic!("Expected InvalidId, got {other:?}"),
        }
    }

    #[test]
    fn serializes_as_plain_uuid_string() {
        let uuid = Uuid::from_u128(42);
        let json = serde_json::to_string(&OrderId::from(uuid)).unwrap();
        assert_eq!(json, format!("\"{uuid}\""));
    }

    #[test]
    fn ids_of_different_types_are_different_attributes() {
        let uuid = Uuid::from_u128(7);
        assert!(OrderId::from(uuid).attribute_eq(&OrderId::from(uuid)));
        assert!(!OrderId::from(uuid).attribute_eq(&CustomerId::from(uuid)));
        assert_eq!(OrderId::from(uuid).attribute_hash(), uuid.attribute_hash());
    }
}
