//! Native input values, and conversion from plain JSON documents.
//!
//! [`NativeValue`] is the caller-facing shape of an item before it is tagged.
//! It is deliberately looser than [`AttributeValue`](crate::AttributeValue):
//! sets hold arbitrary values and floats are representable, so that the
//! serializer can classify them and report exactly what is wrong.

use crate::decimal::Decimal;
use crate::error::{Result, SizeError};
use serde_json::Value;
use std::collections::BTreeMap;

/// A value as supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeValue {
    Null,
    Bool(bool),
    /// An exact decimal number.
    Number(Decimal),
    /// A binary floating-point number. Never serializable; present so that
    /// floats are rejected with a precise error instead of being rounded.
    Float(f64),
    String(String),
    Binary(Vec<u8>),
    /// An unordered collection; its element type decides `NS`, `SS` or `BS`.
    Set(Vec<NativeValue>),
    List(Vec<NativeValue>),
    Map(BTreeMap<String, NativeValue>),
}

/// One item: top-level attribute names to native values.
pub type Item = BTreeMap<String, NativeValue>;

impl NativeValue {
    /// A set of numbers.
    pub fn number_set<I, D>(items: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<Decimal>,
    {
        NativeValue::Set(
            items
                .into_iter()
                .map(|d| NativeValue::Number(d.into()))
                .collect(),
        )
    }

    /// A set of strings.
    pub fn string_set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NativeValue::Set(
            items
                .into_iter()
                .map(|s| NativeValue::String(s.into()))
                .collect(),
        )
    }

    /// A set of binary blobs.
    pub fn binary_set<I, B>(items: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Vec<u8>>,
    {
        NativeValue::Set(
            items
                .into_iter()
                .map(|b| NativeValue::Binary(b.into()))
                .collect(),
        )
    }

    /// Human-readable category, used in error messages.
    pub fn category(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Bool(_) => "boolean",
            NativeValue::Number(_) => "number",
            NativeValue::Float(_) => "float",
            NativeValue::String(_) => "string",
            NativeValue::Binary(_) => "binary",
            NativeValue::Set(_) => "set",
            NativeValue::List(_) => "list",
            NativeValue::Map(_) => "map",
        }
    }

    /// Convert a JSON value into a native value.
    ///
    /// JSON numbers are read from their literal text, so `0.1` becomes the
    /// exact decimal 0.1 rather than the nearest `f64`. JSON has no set or
    /// binary type; those shapes only come from the constructors above.
    pub fn from_json(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => NativeValue::Null,
            Value::Bool(b) => NativeValue::Bool(*b),
            Value::Number(n) => NativeValue::Number(n.to_string().parse()?),
            Value::String(s) => NativeValue::String(s.clone()),
            Value::Array(items) => NativeValue::List(
                items
                    .iter()
                    .map(NativeValue::from_json)
                    .collect::<Result<_>>()?,
            ),
            Value::Object(map) => NativeValue::Map(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), NativeValue::from_json(v)?)))
                    .collect::<Result<_>>()?,
            ),
        })
    }
}

/// Parse a JSON object into an [`Item`].
///
/// Fails with [`SizeError::Json`] on malformed JSON and with
/// [`SizeError::UnsupportedType`] when the document is not an object.
pub fn item_from_json(json: &str) -> Result<Item> {
    let value: Value = serde_json::from_str(json)?;
    match NativeValue::from_json(&value)? {
        NativeValue::Map(item) => Ok(item),
        other => Err(SizeError::UnsupportedType(format!(
            "an item must be a JSON object, got {}",
            other.category()
        ))),
    }
}

impl From<bool> for NativeValue {
    fn from(b: bool) -> Self {
        NativeValue::Bool(b)
    }
}

impl From<Decimal> for NativeValue {
    fn from(d: Decimal) -> Self {
        NativeValue::Number(d)
    }
}

impl From<f64> for NativeValue {
    fn from(f: f64) -> Self {
        NativeValue::Float(f)
    }
}

impl From<f32> for NativeValue {
    fn from(f: f32) -> Self {
        NativeValue::Float(f64::from(f))
    }
}

impl From<&str> for NativeValue {
    fn from(s: &str) -> Self {
        NativeValue::String(s.to_string())
    }
}

impl From<String> for NativeValue {
    fn from(s: String) -> Self {
        NativeValue::String(s)
    }
}

impl From<Vec<u8>> for NativeValue {
    fn from(b: Vec<u8>) -> Self {
        NativeValue::Binary(b)
    }
}

impl From<&[u8]> for NativeValue {
    fn from(b: &[u8]) -> Self {
        NativeValue::Binary(b.to_vec())
    }
}

impl From<Vec<NativeValue>> for NativeValue {
    fn from(items: Vec<NativeValue>) -> Self {
        NativeValue::List(items)
    }
}

impl From<BTreeMap<String, NativeValue>> for NativeValue {
    fn from(map: BTreeMap<String, NativeValue>) -> Self {
        NativeValue::Map(map)
    }
}

impl<T: Into<NativeValue>> From<Option<T>> for NativeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(NativeValue::Null, Into::into)
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for NativeValue {
                fn from(n: $t) -> Self {
                    NativeValue::Number(Decimal::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
