//! Attributes: the values a value object exposes to its equality check.
//!
//! Structural equality works over a heterogeneous, ordered list of attribute
//! values, so each attribute is handled as a `&dyn Attribute`. An absent
//! attribute (an unset optional field) is represented by `None` in the list.
//!
//! Hash codes are 32-bit and deterministic across processes, which keeps the
//! value-object hash fold reproducible:
//!
//! | type | hash code |
//! |---|---|
//! | `bool` | `1` / `0` |
//! | `i8`, `i16`, `i32`, `u8`, `u16`, `char` | the value |
//! | `u32` | the bits, reinterpreted |
//! | `i64`, `u64`, `isize`, `usize` | low 32 bits xor high 32 bits |
//! | `f32`, `f64` | hash of the bit pattern (`-0.0` and every NaN normalized) |
//! | `String`, `&'static str` | `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 units |
//! | `Uuid` | xor of the four 32-bit words |
//! | `DateTime<Utc>` | the 64-bit rule over the nanosecond timestamp |
//! | `NaiveDate` | days since the common era |
//!
//! Attribute equality requires the same concrete type: `1i32` and `1i64` are
//! different attributes.

use core::any::Any;
use core::fmt;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

/// A value that can take part in a structural equality check.
pub trait Attribute: Any + fmt::Debug {
    /// Equality against another attribute; `false` when the concrete types differ.
    fn attribute_eq(&self, other: &dyn Attribute) -> bool;

    /// Deterministic 32-bit hash code.
    fn attribute_hash(&self) -> i32;

    /// The attribute as `Any`, for exact-type downcasts in `attribute_eq`.
    fn as_any(&self) -> &dyn Any;
}

/// Ordered attribute list of a value object (`None` = absent attribute).
pub type Attributes<'a> = Vec<Option<&'a dyn Attribute>>;

/// Wraps a present attribute for an [`Attributes`] list.
pub fn attribute<T: Attribute>(value: &T) -> Option<&dyn Attribute> {
    Some(value)
}

/// Wraps an optional field for an [`Attributes`] list.
pub fn optional<T: Attribute>(value: &Option<T>) -> Option<&dyn Attribute> {
    value.as_ref().map(|v| v as &dyn Attribute)
}

/// Element-wise comparison; different lengths are unequal.
pub fn sequence_eq(left: &[Option<&dyn Attribute>], right: &[Option<&dyn Attribute>]) -> bool {
    left.len() == right.len()
        && left.iter().zip(right).all(|pair| match pair {
            (None, None) => true,
            (Some(l), Some(r)) => l.attribute_eq(*r),
            _ => false,
        })
}

/// Order-sensitive hash fold: seed 17, `h = h * 31 + hash(attribute)`,
/// absent attributes contribute 0. Arithmetic wraps.
pub fn fold_hash(attributes: &[Option<&dyn Attribute>]) -> i32 {
    attributes.iter().fold(17i32, |hash, attribute| {
        hash.wrapping_mul(31)
            .wrapping_add(attribute.map_or(0, |a| a.attribute_hash()))
    })
}

pub(crate) fn hash_u64(value: u64) -> i32 {
    (value as u32 ^ (value >> 32) as u32) as i32
}

pub(crate) fn hash_str(value: &str) -> i32 {
    value
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

fn hash_f64(value: f64) -> i32 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        hash_u64(f64::NAN.to_bits())
    } else {
        hash_u64(value.to_bits())
    }
}

fn hash_f32(value: f32) -> i32 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f32::NAN.to_bits() as i32
    } else {
        value.to_bits() as i32
    }
}

macro_rules! impl_attribute {
    ($($t:ty => |$v:ident| $hash:expr;)*) => {
        $(
            impl Attribute for $t {
                fn attribute_eq(&self, other: &dyn Attribute) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<$t>()
                        .is_some_and(|other| self == other)
                }

                fn attribute_hash(&self) -> i32 {
                    let $v = self;
                    $hash
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

impl_attribute! {
    bool => |v| i32::from(*v);
    char => |v| *v as i32;
    i8 => |v| i32::from(*v);
    i16 => |v| i32::from(*v);
    i32 => |v| *v;
    u8 => |v| i32::from(*v);
    u16 => |v| i32::from(*v);
    u32 => |v| *v as i32;
    i64 => |v| hash_u64(*v as u64);
    u64 => |v| hash_u64(*v);
    isize => |v| hash_u64(*v as u64);
    usize => |v| hash_u64(*v as u64);
    String => |v| hash_str(v);
    &'static str => |v| hash_str(v);
    Uuid => |v| {
        let bits = v.as_u128();
        ((bits >> 96) as u32 ^ (bits >> 64) as u32 ^ (bits >> 32) as u32 ^ bits as u32) as i32
    };
    DateTime<Utc> => |v| hash_u64(v.timestamp_nanos_opt().unwrap_or_else(|| v.timestamp_micros()) as u64);
    NaiveDate => |v| v.num_days_from_ce();
}

// Floats: NaN equals NaN so that equal attributes always hash alike.
macro_rules! impl_float_attribute {
    ($($t:ty => $hash:ident;)*) => {
        $(
            impl Attribute for $t {
                fn attribute_eq(&self, other: &dyn Attribute) -> bool {
                    other
                        .as_any()
                        .downcast_ref::<$t>()
                        .is_some_and(|other| self == other || (self.is_nan() && other.is_nan()))
                }

                fn attribute_hash(&self) -> i32 {
                    $hash(*self)
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

impl_float_attribute! {
    f32 => hash_f32;
    f64 => hash_f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_integers_hash_to_their_value() {
        assert_eq!(10i32.attribute_hash(), 10);
        assert_eq!((-3i8).attribute_hash(), -3);
        assert_eq!(7u16.attribute_hash(), 7);
        assert_eq!('a'.attribute_hash(), 97);
        assert_eq!(true.attribute_hash(), 1);
        assert_eq!(false.attribute_hash(), 0);
    }

    #[test]
    fn wide_integers_fold_both_halves() {
        assert_eq!(5i64.attribute_hash(), 5);
        assert_eq!((1u64 << 32).attribute_hash(), 1);
        assert_eq!(((1u64 << 32) | 1).attribute_hash(), 0);
        assert_eq!((-1i64).attribute_hash(), 0);
    }

    #[test]
    fn strings_use_polynomial_hash() {
        assert_eq!(String::new().attribute_hash(), 0);
        assert_eq!("a".to_string().attribute_hash(), 97);
        assert_eq!("ab".to_string().attribute_hash(), 97 * 31 + 98);
        assert_eq!("ab".attribute_hash(), "ab".to_string().attribute_hash());
    }

    #[test]
    fn attributes_of_different_types_are_not_equal() {
        assert!(!1i32.attribute_eq(&1i64));
        assert!(!"a".to_string().attribute_eq(&"a"));
        assert!(1i32.attribute_eq(&1i32));
        assert!("a".to_string().attribute_eq(&"a".to_string()));
    }

    #[test]
    fn float_nan_and_signed_zero_are_consistent() {
        assert!(f64::NAN.attribute_eq(&f64::NAN));
        assert_eq!(f64::NAN.attribute_hash(), (-f64::NAN).attribute_hash());
        assert!(0.0f64.attribute_eq(&-0.0f64));
        assert_eq!(0.0f64.attribute_hash(), (-0.0f64).attribute_hash());
        assert!(!1.5f32.attribute_eq(&1.5f64));
    }

    #[test]
    fn uuid_hash_xors_words() {
        let id = Uuid::from_u128(0x0000_0001_0000_0002_0000_0004_0000_0008);
        assert_eq!(id.attribute_hash(), 1 ^ 2 ^ 4 ^ 8);
        assert_eq!(Uuid::nil().attribute_hash(), 0);
    }

    #[test]
    fn dates_hash_deterministically() {
        let date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(date.attribute_hash(), 1);

        let instant = DateTime::<Utc>::from_timestamp(1, 0).unwrap();
        assert_eq!(instant.attribute_hash(), 1_000_000_000);
    }

    #[test]
    fn sequence_eq_is_order_and_length_sensitive() {
        let one = 1i32;
        let two = 2i32;
        assert!(sequence_eq(&[attribute(&one), None], &[attribute(&one), None]));
        assert!(!sequence_eq(&[attribute(&one), attribute(&two)], &[attribute(&two), attribute(&one)]));
        assert!(!sequence_eq(&[attribute(&one)], &[attribute(&one), None]));
        assert!(!sequence_eq(&[None], &[attribute(&one)]));
        assert!(sequence_eq(&[], &[]));
    }

    #[test]
    fn fold_hash_reproduces_literal_values() {
        let ten = 10i32;
        assert_eq!(fold_hash(&[]), 17);
        assert_eq!(fold_hash(&[attribute(&ten), None]), (17 * 31 + 10) * 31);
        assert_eq!(fold_hash(&[None, attribute(&ten)]), (17 * 31) * 31 + 10);
    }

    #[test]
    fn optional_maps_absent_fields_to_none() {
        let present = Some(3u8);
        let absent: Option<u8> = None;
        assert!(optional(&present).is_some());
        assert!(optional(&absent).is_none());
    }
}
