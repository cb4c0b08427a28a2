//! Byte-cost model for DynamoDB items.
//!
//! | Type | Cost |
//! |------|------|
//! | `NULL`, `BOOL` | 1 |
//! | `N` | `ceil(len / 2) + 1` over the canonical text |
//! | `S` | UTF-8 length |
//! | `B` | raw byte length |
//! | `NS`, `SS`, `BS` | sum of the element costs |
//! | `L` | each element + 1, plus 3 |
//! | `M` | each value + key length + 1, plus 3 |
//!
//! Top-level attributes pay only their value and their name; the per-entry
//! byte and the 3-byte framing apply to nested maps alone.

use crate::types::{AttributeMap, AttributeValue};

const CONTAINER_OVERHEAD: u64 = 3;
const ELEMENT_OVERHEAD: u64 = 1;

/// Estimated stored size of one attribute value, in bytes.
pub fn attribute_cost(value: &AttributeValue) -> u64 {
    match value {
        AttributeValue::Null | AttributeValue::Bool(_) => 1,
        AttributeValue::Num(n) => number_cost(n),
        AttributeValue::Str(s) => string_cost(s),
        AttributeValue::Bin(b) => binary_cost(b),
        AttributeValue::NumSet(ns) => ns.iter().map(|n| number_cost(n)).sum(),
        AttributeValue::StrSet(ss) => ss.iter().map(|s| string_cost(s)).sum(),
        AttributeValue::BinSet(bs) => bs.iter().map(|b| binary_cost(b)).sum(),
        AttributeValue::List(items) => {
            items
                .iter()
                .map(|v| attribute_cost(v) + ELEMENT_OVERHEAD)
                .sum::<u64>()
                + CONTAINER_OVERHEAD
        }
        AttributeValue::Map(map) => {
            map.iter()
                .map(|(k, v)| attribute_cost(v) + string_cost(k) + ELEMENT_OVERHEAD)
                .sum::<u64>()
                + CONTAINER_OVERHEAD
        }
    }
}

/// Estimated stored size of a whole item, in bytes.
///
/// Attribute names, like nested map keys, are counted in UTF-8 bytes, as
/// DynamoDB sizes them, not in characters: a name `"ñ"` costs 2.
pub fn item_cost(item: &AttributeMap) -> u64 {
    item.iter()
        .map(|(name, value)| attribute_cost(value) + string_cost(name))
        .sum()
}

/// [`item_cost`] in kilobytes (`bytes / 1024`, unrounded).
pub fn item_cost_kb(item: &AttributeMap) -> f64 {
    item_cost(item) as f64 / 1024.0
}

/// Counts characters of the decimal text, sign and point included. This is
/// the billing approximation, not a significant-digit count.
fn number_cost(n: &str) -> u64 {
    (n.chars().count() as u64).div_ceil(2) + 1
}

fn string_cost(s: &str) -> u64 {
    s.len() as u64
}

fn binary_cost(b: &[u8]) -> u64 {
    b.len() as u64
}
