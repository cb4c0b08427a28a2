//! DynamoDB attribute values: the tagged form every native value is
//! serialized into before it is costed.

use std::collections::BTreeMap;

/// One attribute in DynamoDB's tagged-union representation.
///
/// Numbers are kept as their canonical decimal text because that text is
/// what the size estimate is computed from. Binary payloads hold raw bytes;
/// base64 only appears in the wire form (see [`crate::wire`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// `NULL`
    Null,
    /// `BOOL`
    Bool(bool),
    /// `N`
    Num(String),
    /// `S`
    Str(String),
    /// `B`
    Bin(Vec<u8>),
    /// `NS`
    NumSet(Vec<String>),
    /// `SS`
    StrSet(Vec<String>),
    /// `BS`
    BinSet(Vec<Vec<u8>>),
    /// `L`
    List(Vec<AttributeValue>),
    /// `M`
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    /// The DynamoDB type descriptor for this value (`"S"`, `"NS"`, `"M"`, ...).
    pub fn type_tag(&self) -> &'static str {
        match self {
            AttributeValue::Null => "NULL",
            AttributeValue::Bool(_) => "BOOL",
            AttributeValue::Num(_) => "N",
            AttributeValue::Str(_) => "S",
            AttributeValue::Bin(_) => "B",
            AttributeValue::NumSet(_) => "NS",
            AttributeValue::StrSet(_) => "SS",
            AttributeValue::BinSet(_) => "BS",
            AttributeValue::List(_) => "L",
            AttributeValue::Map(_) => "M",
        }
    }
}

/// The serialized top-level attributes of one item.
pub type AttributeMap = BTreeMap<String, AttributeValue>;
