//! Decoding of numeric literal tokens into values.
//!
//! The lexer only classifies numbers. Consumers that need the value (the
//! CLI's token dump, tests) decode the token text here.

use groovy_ast::syntax_kind::SyntaxKind;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value")]
pub enum NumericValue {
    Int(i32),
    Long(i64),
    /// Decimal digits of the value. Literals wider than 128 bits keep their
    /// own digits.
    BigInteger(String),
    Float(f32),
    Double(f64),
    /// The literal's decimal text without its suffix.
    BigDecimal(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum NumberFormatError {
    #[error("{0} is not a numeric token")]
    NotNumeric(SyntaxKind),
    #[error("invalid numeric literal '{0}'")]
    Invalid(String),
}

/// Decode the text of a numeric token of the given kind.
///
/// Unsuffixed integers widen to the smallest of int, long and big integer
/// that holds them. The `i` and `l` suffixes demand a fit.
pub fn decode_number(kind: SyntaxKind, text: &str) -> Result<NumericValue, NumberFormatError> {
    let invalid = || NumberFormatError::Invalid(text.to_string());
    match kind {
        SyntaxKind::NumInt | SyntaxKind::NumLong | SyntaxKind::NumBigInt => {
            let suffixed = text.ends_with(|c: char| matches!(c, 'i' | 'I' | 'l' | 'L' | 'g' | 'G'));
            let digits = if suffixed { &text[..text.len() - 1] } else { text };
            let (radix, body) = split_radix(digits);
            let Ok(value) = u128::from_str_radix(body, radix) else {
                // Only overflow can fail here; keep the digits.
                if kind == SyntaxKind::NumBigInt || (!suffixed && body.chars().all(|c| c.is_digit(radix))) {
                    return Ok(NumericValue::BigInteger(body.to_string()));
                }
                return Err(invalid());
            };
            match kind {
                SyntaxKind::NumBigInt => Ok(NumericValue::BigInteger(value.to_string())),
                SyntaxKind::NumLong => i64::try_from(value).map(NumericValue::Long).map_err(|_| invalid()),
                _ if suffixed => i32::try_from(value).map(NumericValue::Int).map_err(|_| invalid()),
                _ => Ok(if let Ok(int) = i32::try_from(value) {
                    NumericValue::Int(int)
                } else if let Ok(long) = i64::try_from(value) {
                    NumericValue::Long(long)
                } else {
                    NumericValue::BigInteger(value.to_string())
                }),
            }
        }
        SyntaxKind::NumFloat | SyntaxKind::NumDouble | SyntaxKind::NumBigDecimal => {
            let body = text.trim_end_matches(|c: char| matches!(c, 'f' | 'F' | 'd' | 'D' | 'g' | 'G'));
            match kind {
                SyntaxKind::NumFloat => body.parse().map(NumericValue::Float).map_err(|_| invalid()),
                SyntaxKind::NumDouble => body.parse().map(NumericValue::Double).map_err(|_| invalid()),
                _ => body
                    .parse::<f64>()
                    .map(|_| NumericValue::BigDecimal(body.to_string()))
                    .map_err(|_| invalid()),
            }
        }
        other => Err(NumberFormatError::NotNumeric(other)),
    }
}

fn split_radix(digits: &str) -> (u32, &str) {
    if let Some(hex) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, hex)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    }
}
