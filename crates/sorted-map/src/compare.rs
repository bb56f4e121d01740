//! Key ordering.
//!
//! Every key comparison made by a [`SortedMap`](crate::SortedMap) goes
//! through one [`Comparator`]. A comparator may fail, in which case the map
//! operation that asked for the comparison is aborted.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

use crate::error::ComparisonError;

/// Three-way ordering over keys of type `K`.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, ComparisonError>;
}

/// The keys' own order: `a < b` is tested first, then `a > b`, and keys for
/// which neither holds compare equal.
///
/// Keys without a total order follow the same rule, so a float `NaN` is
/// equal to every other float.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<K: PartialOrd + ?Sized> Comparator<K> for Natural {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, ComparisonError> {
        Ok(natural_order(a, b))
    }
}

#[inline]
pub fn natural_order<K: PartialOrd + ?Sized>(a: &K, b: &K) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a > b {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Flips another comparator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse<C = Natural>(pub C);

impl<K: ?Sized, C: Comparator<K>> Comparator<K> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, ComparisonError> {
        self.0.compare(a, b).map(Ordering::reverse)
    }
}

/// Result of a user comparator function. Only the sign matters.
pub trait CmpOutput {
    fn into_ordering(self) -> Result<Ordering, ComparisonError>;
}

macro_rules! impl_cmp_output_for_signed {
    ($($t:ty),*) => {
        $(
            impl CmpOutput for $t {
                #[inline]
                fn into_ordering(self) -> Result<Ordering, ComparisonError> {
                    Ok(self.cmp(&0))
                }
            }
        )*
    };
}

impl_cmp_output_for_signed!(i8, i16, i32, i64, isize);

impl CmpOutput for Ordering {
    #[inline]
    fn into_ordering(self) -> Result<Ordering, ComparisonError> {
        Ok(self)
    }
}

/// Dynamic results: a JSON integer that fits in `i64`, or a boolean
/// (`true` = 1, `false` = 0). Anything else, floats included, is rejected.
impl CmpOutput for Value {
    fn into_ordering(self) -> Result<Ordering, ComparisonError> {
        match &self {
            Value::Bool(b) => Ok(if *b {
                Ordering::Greater
            } else {
                Ordering::Equal
            }),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Ok(i.cmp(&0)),
                None => Err(ComparisonError::NonInteger(self.to_string())),
            },
            _ => Err(ComparisonError::NonInteger(self.to_string())),
        }
    }
}

impl<T: CmpOutput, E: fmt::Display> CmpOutput for Result<T, E> {
    fn into_ordering(self) -> Result<Ordering, ComparisonError> {
        match self {
            Ok(out) => out.into_ordering(),
            Err(err) => Err(ComparisonError::Comparator(err.to_string())),
        }
    }
}

/// Adapts a `Fn(&K, &K) -> R` closure into a [`Comparator`].
#[derive(Clone, Copy)]
pub struct FnComparator<F>(F);

impl<F> FnComparator<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnComparator")
    }
}

impl<K: ?Sized, F, R> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> R,
    R: CmpOutput,
{
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Result<Ordering, ComparisonError> {
        (self.0)(a, b).into_ordering()
    }
}
