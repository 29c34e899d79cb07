//! Core value abstractions shared by stages and reducers
//!
//! - [`ToNumeric`]: coercion of element types into `f64` for statistics
//! - [`FloatKey`]: structural hashing and equality for `f64` values

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Conversion of an element into the `f64` domain used by statistics.
///
/// Returns `None` when the value has no numeric reading; strict reducers turn
/// that into a type conversion error.
pub trait ToNumeric {
    fn to_numeric(&self) -> Option<f64>;
}

macro_rules! lossless_numeric {
    ($($t:ty),*) => {
        $(
            impl ToNumeric for $t {
                fn to_numeric(&self) -> Option<f64> {
                    Some(f64::from(*self))
                }
            }
        )*
    };
}

lossless_numeric!(f64, f32, i8, i16, i32, u8, u16, u32);

macro_rules! wide_numeric {
    ($($t:ty),*) => {
        $(
            impl ToNumeric for $t {
                fn to_numeric(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

wide_numeric!(i64, u64, isize, usize);

impl ToNumeric for bool {
    fn to_numeric(&self) -> Option<f64> {
        Some(if *self { 1.0 } else { 0.0 })
    }
}

impl ToNumeric for str {
    fn to_numeric(&self) -> Option<f64> {
        self.trim().parse::<f64>().ok()
    }
}

impl ToNumeric for String {
    fn to_numeric(&self) -> Option<f64> {
        self.as_str().to_numeric()
    }
}

impl<T: ToNumeric + ?Sized> ToNumeric for &T {
    fn to_numeric(&self) -> Option<f64> {
        (**self).to_numeric()
    }
}

impl<T: ToNumeric> ToNumeric for Option<T> {
    fn to_numeric(&self) -> Option<f64> {
        self.as_ref().and_then(ToNumeric::to_numeric)
    }
}

/// An `f64` with structural equality and hashing.
///
/// `-0.0` and `0.0` are the same key and every NaN is the same key, so the
/// type can be used with `distinct`, `distinct_by` and frequency maps.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        if value == 0.0 {
            FloatKey(0.0)
        } else if value.is_nan() {
            FloatKey(f64::NAN)
        } else {
            FloatKey(value)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for FloatKey {
    fn from(value: f64) -> Self {
        FloatKey::new(value)
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
