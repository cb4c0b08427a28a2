//! # dynamo-size
//!
//! Estimates how many bytes an item occupies once stored in DynamoDB.
//!
//! An item is first serialized into DynamoDB's tagged attribute form
//! (`S`, `N`, `B`, `BOOL`, `NULL`, `SS`, `NS`, `BS`, `L`, `M`), then the
//! documented size rules are summed over the tree: strings by UTF-8 length,
//! numbers by the length of their decimal text, binaries by raw length, and
//! a small framing overhead for every nested list and map.
//!
//! ## Quick start
//!
//! ```rust
//! use dynamo_size::{calculate_bytes, Item, NativeValue};
//!
//! let mut item = Item::new();
//! item.insert("id".into(), NativeValue::from(123));
//! item.insert("active".into(), NativeValue::from(true));
//!
//! // "id": ceil(3/2)+1 + 2, "active": 1 + 6
//! assert_eq!(calculate_bytes(&item).unwrap(), 12);
//!
//! // Plain JSON records and DynamoDB JSON work too.
//! assert_eq!(dynamo_size::calculate_bytes_json(r#"{"a": true}"#).unwrap(), 2);
//! assert_eq!(dynamo_size::calculate_bytes_wire(r#"{"b": {"B": "AAE="}}"#).unwrap(), 3);
//! ```
//!
//! ## Modules
//!
//! - [`decimal`] - exact decimals and the DynamoDB numeric context
//! - [`native`] - caller-facing values, JSON documents → native values
//! - [`serializer`] - native values → attribute values
//! - [`cost`] - byte-cost model over attribute values
//! - [`wire`] - DynamoDB JSON ↔ attribute values
//! - [`error`] - error types
//! - [`types`] - the `AttributeValue` tree

pub mod cost;
pub mod decimal;
pub mod error;
pub mod native;
pub mod serializer;
pub mod types;
pub mod wire;

pub use cost::{attribute_cost, item_cost, item_cost_kb};
pub use decimal::{Decimal, DecimalContext};
pub use error::SizeError;
pub use native::{item_from_json, Item, NativeValue};
pub use serializer::{serialize, Serializer, SerializerOptions};
pub use types::{AttributeMap, AttributeValue};
pub use wire::{item_from_wire, item_to_wire};

use error::Result;

/// Estimated stored size of `item`, in bytes.
pub fn calculate_bytes(item: &Item) -> Result<u64> {
    calculate_bytes_with(item, &SerializerOptions::default())
}

/// [`calculate_bytes`] in kilobytes (`bytes / 1024`).
pub fn calculate_kbytes(item: &Item) -> Result<f64> {
    Ok(calculate_bytes(item)? as f64 / 1024.0)
}

/// [`calculate_bytes`] with explicit serializer options.
#[tracing::instrument(level = "debug", skip_all, fields(attributes = item.len()))]
pub fn calculate_bytes_with(item: &Item, options: &SerializerOptions) -> Result<u64> {
    let attributes = Serializer::new(*options).serialize_item(item)?;
    let bytes = item_cost(&attributes);
    tracing::debug!(bytes, "item size estimated");
    Ok(bytes)
}

/// Estimated size of a plain JSON object, numbers read as exact decimals.
pub fn calculate_bytes_json(json: &str) -> Result<u64> {
    calculate_bytes(&item_from_json(json)?)
}

/// Estimated size of an item given in DynamoDB JSON.
#[tracing::instrument(level = "debug", skip_all, fields(len = json.len()))]
pub fn calculate_bytes_wire(json: &str) -> Result<u64> {
    let attributes = item_from_wire(json)?;
    let bytes = item_cost(&attributes);
    tracing::debug!(bytes, "item size estimated");
    Ok(bytes)
}
