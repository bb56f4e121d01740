//! Maps over JSON values, for embedders whose keys and comparators are only
//! known at run time.
//!
//! A [`DynSortedMap`] is built from an optional host comparator. Without one
//! keys follow [`ValueOrder`], which orders numbers, strings and arrays but
//! refuses to order anything else. A host comparator is any callable
//! returning a JSON integer; its failures and non-integer results surface
//! as [`ComparisonError`]s from the map operation that triggered them.

use std::cmp::Ordering;
use std::fmt;

use serde_json::Value;

use crate::compare::{CmpOutput, Comparator};
use crate::error::{ComparisonError, SortedMapError};
use crate::sorted_map::SortedMap;

/// Host comparator callable. `Err` carries the host's failure message.
pub type HostFn = dyn Fn(&Value, &Value) -> Result<Value, String>;

/// Comparator argument as a host hands it over.
pub enum CmpArg {
    Callable(Box<HostFn>),
    /// Something that cannot be called.
    Object(Value),
}

impl CmpArg {
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value, String> + 'static,
    {
        CmpArg::Callable(Box::new(f))
    }
}

impl fmt::Debug for CmpArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CmpArg::Callable(_) => f.write_str("Callable"),
            CmpArg::Object(v) => f.debug_tuple("Object").field(v).finish(),
        }
    }
}

/// Natural order over JSON values.
///
/// Numbers compare by value, booleans counting as `0` and `1`. Strings
/// compare by code point. Arrays compare element by element from the first
/// pair that differs, and a shorter prefix sorts first. `null`, objects and
/// any mix of the kinds above have no order and fail the comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValueOrder;

impl Comparator<Value> for ValueOrder {
    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ComparisonError> {
        if value_cmp(a, b, "<")? == Ordering::Less {
            return Ok(Ordering::Less);
        }
        if value_cmp(a, b, ">")? == Ordering::Greater {
            return Ok(Ordering::Greater);
        }
        Ok(Ordering::Equal)
    }
}

/// Comparator of a [`DynSortedMap`].
pub enum DynOrder {
    Natural(ValueOrder),
    Host(Box<HostFn>),
}

impl fmt::Debug for DynOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynOrder::Natural(_) => f.write_str("Natural"),
            DynOrder::Host(_) => f.write_str("Host"),
        }
    }
}

impl Comparator<Value> for DynOrder {
    fn compare(&self, a: &Value, b: &Value) -> Result<Ordering, ComparisonError> {
        match self {
            DynOrder::Natural(order) => order.compare(a, b),
            DynOrder::Host(f) => f(a, b).into_ordering(),
        }
    }
}

pub type DynSortedMap = SortedMap<Value, Value, DynOrder>;

impl SortedMap<Value, Value, DynOrder> {
    /// Builds an empty map from a host's comparator argument. `None` selects
    /// [`ValueOrder`]; an argument that cannot be called is rejected before
    /// anything is allocated.
    pub fn from_host(cmp: Option<CmpArg>) -> Result<Self, SortedMapError> {
        let order = match cmp {
            None => DynOrder::Natural(ValueOrder),
            Some(CmpArg::Callable(f)) => DynOrder::Host(f),
            Some(CmpArg::Object(v)) => {
                return Err(SortedMapError::Config(format!(
                    "comparator must be callable, got {}",
                    kind(&v)
                )))
            }
        };
        Ok(Self::with_order(order))
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

enum Num {
    Int(i128),
    Float(f64),
}

fn as_num(v: &Value) -> Option<Num> {
    match v {
        Value::Bool(b) => Some(Num::Int(i128::from(*b))),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Num::Int(i128::from(i)))
            } else if let Some(u) = n.as_u64() {
                Some(Num::Int(i128::from(u)))
            } else {
                n.as_f64().map(Num::Float)
            }
        }
        _ => None,
    }
}

fn num_cmp(a: &Num, b: &Num) -> Ordering {
    match (a, b) {
        (Num::Int(x), Num::Int(y)) => x.cmp(y),
        (Num::Int(x), Num::Float(y)) => int_float_cmp(*x, *y),
        (Num::Float(x), Num::Int(y)) => int_float_cmp(*y, *x).reverse(),
        (Num::Float(x), Num::Float(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer with a float, without rounding the
/// integer to the nearest representable float.
fn int_float_cmp(i: i128, f: f64) -> Ordering {
    if f.is_nan() {
        return Ordering::Equal;
    }
    if f.is_infinite() {
        return if f > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }
    let whole = f.trunc();
    // Saturates outside the i128 range, which still orders any JSON integer
    // correctly against it.
    match i.cmp(&(whole as i128)) {
        Ordering::Equal => {
            let frac = f - whole;
            if frac > 0.0 {
                Ordering::Less
            } else if frac < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        ord => ord,
    }
}

/// Equality used to skip the common prefix of two arrays. Never fails.
fn loose_eq(a: &Value, b: &Value) -> bool {
    match (as_num(a), as_num(b)) {
        (Some(x), Some(y)) => num_cmp(&x, &y) == Ordering::Equal,
        (None, None) => match (a, b) {
            (Value::Array(x), Value::Array(y)) => {
                x.len() == y.len() && x.iter().zip(y).all(|(p, q)| loose_eq(p, q))
            }
            (Value::Object(x), Value::Object(y)) => {
                x.len() == y.len()
                    && x
                        .iter()
                        .all(|(k, p)| y.get(k).map_or(false, |q| loose_eq(p, q)))
            }
            _ => a == b,
        },
        _ => false,
    }
}

fn value_cmp(a: &Value, b: &Value, op: &'static str) -> Result<Ordering, ComparisonError> {
    if let (Some(x), Some(y)) = (as_num(a), as_num(b)) {
        return Ok(num_cmp(&x, &y));
    }
    match (a, b) {
        (Value::String(x), Value::String(y)) => Ok(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (p, q) in x.iter().zip(y) {
                if !loose_eq(p, q) {
                    return value_cmp(p, q, op);
                }
            }
            Ok(x.len().cmp(&y.len()))
        }
        _ => Err(ComparisonError::Unorderable {
            op,
            left: kind(a),
            right: kind(b),
        }),
    }
}
