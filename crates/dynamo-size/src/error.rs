//! Error types for serialization, decimal parsing and wire decoding.

use thiserror::Error;

/// Errors that can occur while turning a value into DynamoDB attributes.
///
/// Every failure is detected before the cost walk starts; costing an
/// [`AttributeValue`](crate::types::AttributeValue) tree cannot fail.
#[derive(Error, Debug)]
pub enum SizeError {
    /// The native value matches none of the ten DynamoDB attribute shapes.
    /// Carries a description of the offending value's category.
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A binary floating-point number was supplied where an exact decimal
    /// is required.
    #[error("Float types are not supported, use an exact decimal instead: {0}")]
    FloatNotSupported(f64),

    /// The number cannot be represented in the DynamoDB numeric context
    /// (non-finite, too many digits, exponent out of range).
    #[error("Unsupported number: {0}")]
    UnsupportedNumber(String),

    /// A set mixes number, string and binary elements.
    #[error("Heterogeneous set: {0}")]
    HeterogeneousSet(String),

    /// The text is not a decimal literal.
    #[error("Invalid decimal literal: {0:?}")]
    InvalidDecimal(String),

    /// A DynamoDB JSON document does not describe a valid attribute value.
    #[error("Invalid attribute value: {0}")]
    InvalidNode(String),

    /// The input string was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout dynamo-size.
pub type Result<T> = std::result::Result<T, SizeError>;
