//! DynamoDB JSON: the wire form of attribute values.
//!
//! Each attribute is a single-key object naming its type:
//!
//! ```text
//! {"S": "text"}   {"N": "1.5"}   {"B": "3q2+7w=="}   {"BOOL": true}
//! {"NULL": true}  {"SS": ["a"]}  {"L": [{"N": "1"}]} {"M": {"k": {"S": "v"}}}
//! ```
//!
//! Binary payloads travel as standard base64 and are decoded on the way in,
//! so costs are always computed over raw bytes. Number text is kept verbatim.

use crate::error::{Result, SizeError};
use crate::types::{AttributeMap, AttributeValue};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

impl AttributeValue {
    /// Render this value as a DynamoDB JSON object.
    pub fn to_wire(&self) -> Value {
        let payload = match self {
            AttributeValue::Null => Value::Bool(true),
            AttributeValue::Bool(b) => Value::Bool(*b),
            AttributeValue::Num(n) => Value::String(n.clone()),
            AttributeValue::Str(s) => Value::String(s.clone()),
            AttributeValue::Bin(b) => Value::String(STANDARD.encode(b)),
            AttributeValue::NumSet(ns) => strings(ns),
            AttributeValue::StrSet(ss) => strings(ss),
            AttributeValue::BinSet(bs) => Value::Array(
                bs.iter()
                    .map(|b| Value::String(STANDARD.encode(b)))
                    .collect(),
            ),
            AttributeValue::List(items) => {
                Value::Array(items.iter().map(AttributeValue::to_wire).collect())
            }
            AttributeValue::Map(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_wire()))
                    .collect(),
            ),
        };
        let mut object = Map::with_capacity(1);
        object.insert(self.type_tag().to_string(), payload);
        Value::Object(object)
    }

    /// Parse a DynamoDB JSON object.
    ///
    /// Fails with [`SizeError::InvalidNode`] unless `value` is an object with
    /// exactly one recognised type key whose payload has the right shape.
    pub fn from_wire(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| invalid(format!("expected an object, got {value}")))?;
        let mut entries = object.iter();
        let (tag, payload) = match (entries.next(), entries.next()) {
            (Some(entry), None) => entry,
            _ => {
                return Err(invalid(format!(
                    "expected exactly one type key, got {}",
                    object.len()
                )))
            }
        };

        match tag.as_str() {
            "NULL" => match payload {
                Value::Bool(true) => Ok(AttributeValue::Null),
                other => Err(invalid(format!("NULL must be true, got {other}"))),
            },
            "BOOL" => payload
                .as_bool()
                .map(AttributeValue::Bool)
                .ok_or_else(|| invalid(format!("BOOL must be a boolean, got {payload}"))),
            "N" => Ok(AttributeValue::Num(string(tag, payload)?)),
            "S" => Ok(AttributeValue::Str(string(tag, payload)?)),
            "B" => Ok(AttributeValue::Bin(binary(&string(tag, payload)?)?)),
            "NS" => Ok(AttributeValue::NumSet(array(tag, payload, |v| string(tag, v))?)),
            "SS" => Ok(AttributeValue::StrSet(array(tag, payload, |v| string(tag, v))?)),
            "BS" => Ok(AttributeValue::BinSet(array(tag, payload, |v| {
                binary(&string(tag, v)?)
            })?)),
            "L" => Ok(AttributeValue::List(array(
                tag,
                payload,
                AttributeValue::from_wire,
            )?)),
            "M" => {
                let map = payload
                    .as_object()
                    .ok_or_else(|| invalid(format!("M must be an object, got {payload}")))?;
                Ok(AttributeValue::Map(
                    map.iter()
                        .map(|(k, v)| Ok((k.clone(), AttributeValue::from_wire(v)?)))
                        .collect::<Result<_>>()?,
                ))
            }
            other => Err(invalid(format!("unknown type key {other:?}"))),
        }
    }
}

fn invalid(message: String) -> SizeError {
    SizeError::InvalidNode(message)
}

fn strings(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn string(tag: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(format!("{tag} expects a string, got {value}")))
}

fn binary(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| invalid(format!("invalid base64 payload: {e}")))
}

fn array<T>(tag: &str, value: &Value, parse: impl Fn(&Value) -> Result<T>) -> Result<Vec<T>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("{tag} expects an array, got {value}")))?
        .iter()
        .map(parse)
        .collect()
}

/// Parse a DynamoDB JSON item: an object of attribute name to wire value.
pub fn item_from_wire(json: &str) -> Result<AttributeMap> {
    let value: Value = serde_json::from_str(json)?;
    let object = value
        .as_object()
        .ok_or_else(|| invalid(format!("an item must be an object, got {value}")))?;
    object
        .iter()
        .map(|(k, v)| Ok((k.clone(), AttributeValue::from_wire(v)?)))
        .collect()
}

/// Render an item as a DynamoDB JSON object.
pub fn item_to_wire(item: &AttributeMap) -> Value {
    Value::Object(
        item.iter()
            .map(|(k, v)| (k.clone(), v.to_wire()))
            .collect(),
    )
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AttributeValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        AttributeValue::from_wire(&value).map_err(serde::de::Error::custom)
    }
}
