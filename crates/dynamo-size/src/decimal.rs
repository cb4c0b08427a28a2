//! Exact decimal numbers and the DynamoDB numeric context.
//!
//! DynamoDB stores numbers as decimal text with up to 38 significant digits
//! and an adjusted exponent between -128 and +126. Numbers are never passed
//! through binary floating point: a [`Decimal`] keeps the sign, the
//! coefficient digits and the exponent exactly as written, and
//! [`DecimalContext::canonicalize`] refuses anything it could only store by
//! rounding, clamping or overflowing.
//!
//! # Example
//! ```
//! use dynamo_size::{Decimal, DecimalContext};
//!
//! let n: Decimal = "1.50".parse().unwrap();
//! assert_eq!(DecimalContext::DYNAMODB.canonicalize(&n).unwrap(), "1.50");
//!
//! let big: Decimal = "1e200".parse().unwrap();
//! assert!(DecimalContext::DYNAMODB.canonicalize(&big).is_err());
//! ```

use crate::error::{Result, SizeError};
use std::fmt;
use std::str::FromStr;

/// An exact decimal number: `(-1)^sign * coefficient * 10^exponent`.
///
/// Trailing zeros are significant (`1.50` keeps its exponent of -2), leading
/// coefficient zeros are not. Equality is structural, so `1.5 != 1.50`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    negative: bool,
    kind: Kind,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Kind {
    /// Coefficient digits without leading zeros (`"0"` for zero).
    Finite { coefficient: String, exponent: i64 },
    Infinity,
    NaN,
    SignalingNaN,
}

impl Decimal {
    /// Returns `true` unless the value is an infinity or a NaN.
    pub fn is_finite(&self) -> bool {
        matches!(self.kind, Kind::Finite { .. })
    }

    /// Returns `true` for zero of either sign and any exponent.
    pub fn is_zero(&self) -> bool {
        matches!(&self.kind, Kind::Finite { coefficient, .. } if coefficient == "0")
    }

    /// Returns `true` if the sign bit is set (`-0` included).
    pub fn is_sign_negative(&self) -> bool {
        self.negative
    }

    /// The number with trailing coefficient zeros folded into the exponent
    /// and the sign of zero dropped. Two finite decimals are numerically
    /// equal exactly when their value keys are equal (`1.0` and `1`,
    /// `1E+2` and `100`, `-0` and `0.00`).
    pub fn value_key(&self) -> Decimal {
        match &self.kind {
            Kind::Finite { .. } if self.is_zero() => Self::finite(false, "0".to_string(), 0),
            Kind::Finite {
                coefficient,
                exponent,
            } => {
                let trimmed = coefficient.trim_end_matches('0');
                let shift = (coefficient.len() - trimmed.len()) as i64;
                Self::finite(
                    self.negative,
                    trimmed.to_string(),
                    exponent.saturating_add(shift),
                )
            }
            _ => self.clone(),
        }
    }

    fn finite(negative: bool, coefficient: String, exponent: i64) -> Self {
        Self {
            negative,
            kind: Kind::Finite {
                coefficient,
                exponent,
            },
        }
    }
}

impl FromStr for Decimal {
    type Err = SizeError;

    /// Parse a decimal literal such as `42`, `-1.50`, `.5`, `6.02E23`,
    /// `Infinity` or `NaN`. Surrounding whitespace is ignored, letters are
    /// case-insensitive, and single underscores may separate digits
    /// (`1_000`, `0.000_1`, `1e1_0`).
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SizeError::InvalidDecimal(s.to_string());
        let text = s.trim();

        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };

        let special = match body.to_ascii_lowercase().as_str() {
            "inf" | "infinity" => Some(Kind::Infinity),
            "nan" => Some(Kind::NaN),
            "snan" => Some(Kind::SignalingNaN),
            _ => None,
        };
        if let Some(kind) = special {
            return Ok(Self { negative, kind });
        }

        let (mantissa, exponent) = match body.find(['e', 'E']) {
            Some(i) => (&body[..i], Some(&body[i + 1..])),
            None => (body, None),
        };
        let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
        let int_part = strip_separators(int_part).ok_or_else(invalid)?;
        let frac_part = strip_separators(frac_part).ok_or_else(invalid)?;
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let exponent = match exponent {
            Some(e) => parse_exponent(e).ok_or_else(invalid)?,
            None => 0,
        };
        let exponent = exponent.saturating_sub(frac_part.len() as i64);

        let digits: String = int_part
            .chars()
            .chain(frac_part.chars())
            .skip_while(|c| *c == '0')
            .collect();
        let coefficient = if digits.is_empty() {
            "0".to_string()
        } else {
            digits
        };

        Ok(Self::finite(negative, coefficient, exponent))
    }
}

/// Digits with optional single underscores between them, underscores
/// removed. `None` for anything else; empty input stays empty.
fn strip_separators(s: &str) -> Option<String> {
    if s.is_empty() {
        return Some(String::new());
    }
    let groups: Vec<&str> = s.split('_').collect();
    if groups
        .iter()
        .any(|g| g.is_empty() || !g.bytes().all(|b| b.is_ascii_digit()))
    {
        return None;
    }
    Some(groups.concat())
}

/// Exponents too large for `i64` saturate; the context rejects them later.
fn parse_exponent(e: &str) -> Option<i64> {
    let (negative, digits) = match e.as_bytes().first() {
        Some(b'-') => (true, &e[1..]),
        Some(b'+') => (false, &e[1..]),
        _ => (false, e),
    };
    let digits = strip_separators(digits).filter(|d| !d.is_empty())?;
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(n: $t) -> Self {
                    let negative = n < 0;
                    Self::finite(negative, n.unsigned_abs().to_string(), 0)
                }
            }
        )*
    };
}

impl_from_signed!(i8, i16, i32, i64, i128, isize);

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(n: $t) -> Self {
                    Self::finite(false, n.to_string(), 0)
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, u128, usize);

/// Scientific-string rendering: plain notation while the exponent is not
/// positive and the adjusted exponent is at least -6, `dE±n` otherwise.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        let (coefficient, exponent) = match &self.kind {
            Kind::Infinity => return write!(f, "{sign}Infinity"),
            Kind::NaN => return write!(f, "{sign}NaN"),
            Kind::SignalingNaN => return write!(f, "{sign}sNaN"),
            Kind::Finite {
                coefficient,
                exponent,
            } => (coefficient, *exponent),
        };

        let len = coefficient.len() as i64;
        let left_digits = exponent.saturating_add(len);
        let dot_place = if exponent <= 0 && left_digits > -6 {
            left_digits
        } else {
            1
        };

        let (int_part, frac_part) = if dot_place <= 0 {
            let zeros = "0".repeat(dot_place.unsigned_abs() as usize);
            ("0".to_string(), format!(".{zeros}{coefficient}"))
        } else if dot_place >= len {
            let zeros = "0".repeat((dot_place - len) as usize);
            (format!("{coefficient}{zeros}"), String::new())
        } else {
            let (int_part, frac_part) = coefficient.split_at(dot_place as usize);
            (int_part.to_string(), format!(".{frac_part}"))
        };

        write!(f, "{sign}{int_part}{frac_part}")?;
        if left_digits != dot_place {
            write!(f, "E{:+}", left_digits - dot_place)?;
        }
        Ok(())
    }
}

/// Precision and exponent limits a number must fit without rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalContext {
    /// Maximum number of coefficient digits.
    pub precision: u32,
    /// Smallest adjusted exponent of a normal number.
    pub e_min: i64,
    /// Largest adjusted exponent.
    pub e_max: i64,
}

impl DecimalContext {
    /// The context DynamoDB stores numbers in.
    pub const DYNAMODB: Self = Self {
        precision: 38,
        e_min: -128,
        e_max: 126,
    };

    /// Smallest exponent a subnormal number can carry without rounding.
    pub fn e_tiny(&self) -> i64 {
        self.e_min - i64::from(self.precision) + 1
    }

    /// Render `value` as its canonical decimal string.
    ///
    /// Fails with [`SizeError::UnsupportedNumber`] when the value is not
    /// finite, or when storing it would round away digits, clamp a zero's
    /// exponent, overflow or underflow.
    pub fn canonicalize(&self, value: &Decimal) -> Result<String> {
        let (coefficient, exponent) = match &value.kind {
            Kind::Finite {
                coefficient,
                exponent,
            } => (coefficient, *exponent),
            _ => {
                return Err(SizeError::UnsupportedNumber(format!(
                    "{value} is not supported"
                )))
            }
        };

        let digits = coefficient.len() as i64;
        let e_tiny = self.e_tiny();

        if value.is_zero() {
            if exponent < e_tiny || exponent > self.e_max {
                return Err(SizeError::UnsupportedNumber(format!(
                    "{value}: exponent would be clamped to [{e_tiny}, {}]",
                    self.e_max
                )));
            }
            return Ok(value.to_string());
        }

        if digits > i64::from(self.precision) {
            return Err(SizeError::UnsupportedNumber(format!(
                "{value}: {digits} digits exceed the precision of {}",
                self.precision
            )));
        }
        let adjusted = exponent.saturating_add(digits - 1);
        if adjusted > self.e_max {
            return Err(SizeError::UnsupportedNumber(format!(
                "{value}: overflow, adjusted exponent {adjusted} exceeds {}",
                self.e_max
            )));
        }
        if exponent < e_tiny {
            return Err(SizeError::UnsupportedNumber(format!(
                "{value}: underflow, exponent {exponent} is below {e_tiny}"
            )));
        }

        Ok(value.to_string())
    }
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self::DYNAMODB
    }
}
