//! Native value → DynamoDB attribute value.
//!
//! Classification follows a fixed precedence so that overlapping categories
//! resolve the same way every time:
//!
//! 1. null → `NULL`
//! 2. boolean → `BOOL`
//! 3. exact decimal → `N` (floats are rejected)
//! 4. string → `S`
//! 5. binary → `B`
//! 6. set of numbers → `NS`
//! 7. set of strings → `SS`
//! 8. set of binaries → `BS`
//! 9. map → `M`
//! 10. list → `L`
//!
//! # Example
//! ```
//! use dynamo_size::{serialize, AttributeValue, NativeValue};
//!
//! let value = NativeValue::string_set(["a", "b"]);
//! assert_eq!(
//!     serialize(&value).unwrap(),
//!     AttributeValue::StrSet(vec!["a".into(), "b".into()])
//! );
//! ```

use crate::decimal::{Decimal, DecimalContext};
use crate::error::{Result, SizeError};
use crate::native::{Item, NativeValue};
use crate::types::{AttributeMap, AttributeValue};
use std::collections::HashSet;
use std::hash::Hash;

/// Knobs for [`Serializer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Report sets mixing numbers, strings and binaries as
    /// [`SizeError::HeterogeneousSet`]. When disabled such sets fail with
    /// [`SizeError::UnsupportedType`], as no set type matches them.
    pub strict_sets: bool,
    /// Numeric context numbers are canonicalized in.
    pub context: DecimalContext,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            strict_sets: true,
            context: DecimalContext::DYNAMODB,
        }
    }
}

/// Element type of a set, decided by its first element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetKind {
    Number,
    String,
    Binary,
}

impl SetKind {
    fn name(self) -> &'static str {
        match self {
            SetKind::Number => "number",
            SetKind::String => "string",
            SetKind::Binary => "binary",
        }
    }
}

/// Converts [`NativeValue`]s into [`AttributeValue`]s.
///
/// Stateless apart from its options: serializing the same value twice
/// always yields the same tree.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    options: SerializerOptions,
}

impl Serializer {
    /// Create a serializer with the given options.
    pub fn new(options: SerializerOptions) -> Self {
        Self { options }
    }

    /// The options this serializer was built with.
    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Serialize one value, recursing into lists and maps.
    pub fn serialize(&self, value: &NativeValue) -> Result<AttributeValue> {
        match value {
            NativeValue::Null => Ok(AttributeValue::Null),
            NativeValue::Bool(b) => Ok(AttributeValue::Bool(*b)),
            NativeValue::Number(n) => Ok(AttributeValue::Num(self.serialize_number(n)?)),
            NativeValue::Float(f) => Err(SizeError::FloatNotSupported(*f)),
            NativeValue::String(s) => Ok(AttributeValue::Str(s.clone())),
            NativeValue::Binary(b) => Ok(AttributeValue::Bin(b.clone())),
            NativeValue::Set(items) => self.serialize_set(items),
            NativeValue::Map(map) => {
                let map = map
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), self.serialize(v)?)))
                    .collect::<Result<_>>()?;
                Ok(AttributeValue::Map(map))
            }
            NativeValue::List(items) => {
                let items = items
                    .iter()
                    .map(|v| self.serialize(v))
                    .collect::<Result<_>>()?;
                Ok(AttributeValue::List(items))
            }
        }
    }

    /// Serialize every top-level attribute of an item.
    #[tracing::instrument(level = "trace", skip_all, fields(attributes = item.len()))]
    pub fn serialize_item(&self, item: &Item) -> Result<AttributeMap> {
        item.iter()
            .map(|(name, value)| {
                let attr = self.serialize(value).inspect_err(|e| {
                    tracing::debug!(attribute = %name, error = %e, "attribute rejected");
                })?;
                Ok((name.clone(), attr))
            })
            .collect()
    }

    fn serialize_number(&self, n: &Decimal) -> Result<String> {
        self.options.context.canonicalize(n)
    }

    /// Sets are homogeneous: the first element decides the set type and every
    /// other element must agree. Duplicates collapse to their first occurrence;
    /// numbers compare by value, so `1`, `1.0` and `-0`/`0` are duplicates.
    fn serialize_set(&self, items: &[NativeValue]) -> Result<AttributeValue> {
        let kinds = items
            .iter()
            .map(classify_set_element)
            .collect::<Result<Vec<_>>>()?;

        // An empty set satisfies the first test tried, the number set.
        let kind = kinds.first().copied().unwrap_or(SetKind::Number);
        if let Some(other) = kinds.iter().copied().find(|k| *k != kind) {
            let message = format!(
                "set mixes {} and {} elements",
                kind.name(),
                other.name()
            );
            return Err(if self.options.strict_sets {
                SizeError::HeterogeneousSet(message)
            } else {
                SizeError::UnsupportedType(message)
            });
        }

        Ok(match kind {
            SetKind::Number => {
                let mut seen = HashSet::with_capacity(items.len());
                let numbers = items
                    .iter()
                    .filter_map(|v| match v {
                        NativeValue::Number(n) => Some(n),
                        _ => None,
                    })
                    .filter(|n| seen.insert(n.value_key()))
                    .map(|n| self.serialize_number(n))
                    .collect::<Result<Vec<_>>>()?;
                AttributeValue::NumSet(numbers)
            }
            SetKind::String => AttributeValue::StrSet(dedup(
                items
                    .iter()
                    .filter_map(|v| match v {
                        NativeValue::String(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect(),
            )),
            SetKind::Binary => AttributeValue::BinSet(dedup(
                items
                    .iter()
                    .filter_map(|v| match v {
                        NativeValue::Binary(b) => Some(b.clone()),
                        _ => None,
                    })
                    .collect(),
            )),
        })
    }
}

/// Only scalars may live in a set. Floats are reported as such rather than
/// as an unsupported set element.
fn classify_set_element(value: &NativeValue) -> Result<SetKind> {
    match value {
        NativeValue::Number(_) => Ok(SetKind::Number),
        NativeValue::Float(f) => Err(SizeError::FloatNotSupported(*f)),
        NativeValue::String(_) => Ok(SetKind::String),
        NativeValue::Binary(_) => Ok(SetKind::Binary),
        other => Err(SizeError::UnsupportedType(format!(
            "set containing a {} element",
            other.category()
        ))),
    }
}

fn dedup<T: Eq + Hash + Clone>(items: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Serialize with [`SerializerOptions::default`].
pub fn serialize(value: &NativeValue) -> Result<AttributeValue> {
    Serializer::default().serialize(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn num(s: &str) -> NativeValue {
        NativeValue::Number(s.parse().unwrap())
    }

    #[test]
    fn scalars_get_their_own_tags() {
        assert_eq!(serialize(&NativeValue::Null).unwrap(), AttributeValue::Null);
        assert_eq!(
            serialize(&NativeValue::Bool(false)).unwrap(),
            AttributeValue::Bool(false)
        );
        assert_eq!(
            serialize(&num("3.140")).unwrap(),
            AttributeValue::Num("3.140".to_string())
        );
        assert_eq!(
            serialize(&NativeValue::from("hi")).unwrap(),
            AttributeValue::Str("hi".to_string())
        );
        assert_eq!(
            serialize(&NativeValue::from(vec![1u8, 2])).unwrap(),
            AttributeValue::Bin(vec![1, 2])
        );
    }

    #[test]
    fn floats_are_rejected_everywhere() {
        assert!(matches!(
            serialize(&NativeValue::from(1.5f64)),
            Err(SizeError::FloatNotSupported(f)) if f == 1.5
        ));
        let nested = NativeValue::List(vec![NativeValue::from(0.25f32)]);
        assert!(matches!(
            serialize(&nested),
            Err(SizeError::FloatNotSupported(_))
        ));
        let set = NativeValue::Set(vec![num("1"), NativeValue::Float(2.0)]);
        assert!(matches!(
            serialize(&set),
            Err(SizeError::FloatNotSupported(_))
        ));
    }

    #[test]
    fn set_type_follows_elements() {
        assert_eq!(
            serialize(&NativeValue::number_set([3, 1])).unwrap(),
            AttributeValue::NumSet(vec!["3".to_string(), "1".to_string()])
        );
        assert_eq!(
            serialize(&NativeValue::binary_set([vec![0u8], vec![1u8]])).unwrap(),
            AttributeValue::BinSet(vec![vec![0], vec![1]])
        );
        assert_eq!(
            serialize(&NativeValue::Set(vec![])).unwrap(),
            AttributeValue::NumSet(vec![])
        );
    }

    #[test]
    fn set_duplicates_collapse() {
        assert_eq!(
            serialize(&NativeValue::string_set(["a", "b", "a"])).unwrap(),
            AttributeValue::StrSet(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn number_set_duplicates_compare_by_value() {
        let set = NativeValue::Set(vec![
            num("1.0"),
            num("1"),
            num("100"),
            num("1E+2"),
            num("-0"),
            num("0.00"),
        ]);
        assert_eq!(
            serialize(&set).unwrap(),
            AttributeValue::NumSet(vec![
                "1.0".to_string(),
                "100".to_string(),
                "-0".to_string(),
            ])
        );
    }

    #[test]
    fn mixed_sets_depend_on_strictness() {
        let mixed = NativeValue::Set(vec![num("1"), NativeValue::from("a")]);
        assert!(matches!(
            serialize(&mixed),
            Err(SizeError::HeterogeneousSet(_))
        ));

        let lenient = Serializer::new(SerializerOptions {
            strict_sets: false,
            ..SerializerOptions::default()
        });
        assert!(matches!(
            lenient.serialize(&mixed),
            Err(SizeError::UnsupportedType(_))
        ));
    }

    #[test]
    fn sets_of_containers_are_unsupported() {
        let set = NativeValue::Set(vec![NativeValue::List(vec![])]);
        assert!(matches!(
            serialize(&set),
            Err(SizeError::UnsupportedType(msg)) if msg.contains("list")
        ));
    }

    #[test]
    fn containers_recurse() {
        let mut inner = BTreeMap::new();
        inner.insert("Key".to_string(), NativeValue::from(7));
        let value = NativeValue::List(vec![NativeValue::Map(inner), NativeValue::Null]);

        let mut expected = BTreeMap::new();
        expected.insert("Key".to_string(), AttributeValue::Num("7".to_string()));
        assert_eq!(
            serialize(&value).unwrap(),
            AttributeValue::List(vec![AttributeValue::Map(expected), AttributeValue::Null])
        );
    }

    #[test]
    fn bad_numbers_surface_from_nested_positions() {
        let value = NativeValue::List(vec![num("NaN")]);
        assert!(matches!(
            serialize(&value),
            Err(SizeError::UnsupportedNumber(_))
        ));
    }
}
