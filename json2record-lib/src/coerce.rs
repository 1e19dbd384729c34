//! Lax coercion of loosely-typed values into strict field types.
//!
//! Each function either returns the converted value or the [`FieldErrorKind`]
//! describing why the input cannot be used. Paths and offending inputs are
//! attached by the caller.

use crate::error::FieldErrorKind;
use serde_json::Value;

pub fn coerce_text(value: &Value) -> Result<String, FieldErrorKind> {
    match value {
        Value::String(s) => Ok(s.clone()),
        _ => Err(FieldErrorKind::StringType),
    }
}

/// Integers pass through; floats only when they carry no fractional part.
pub fn coerce_integer(value: &Value) -> Result<i64, FieldErrorKind> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.is_u64() {
                return Err(FieldErrorKind::IntParsing);
            }
            match n.as_f64() {
                Some(f) if f.fract() != 0.0 => Err(FieldErrorKind::IntFromFloat),
                Some(f) => float_to_i64(f).ok_or(FieldErrorKind::IntParsing),
                None => Err(FieldErrorKind::IntParsing),
            }
        }
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::String(s) => parse_integer(s).ok_or(FieldErrorKind::IntParsing),
        _ => Err(FieldErrorKind::IntType),
    }
}

/// NaN and the infinities are rejected: JSON has no spelling for them.
pub fn coerce_number(value: &Value) -> Result<f64, FieldErrorKind> {
    let number = match value {
        Value::Number(n) => n.as_f64().ok_or(FieldErrorKind::FloatParsing)?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| FieldErrorKind::FloatParsing)?,
        _ => return Err(FieldErrorKind::FloatType),
    };
    if number.is_finite() {
        Ok(number)
    } else {
        Err(FieldErrorKind::FiniteNumber)
    }
}

pub fn coerce_bool(value: &Value) -> Result<bool, FieldErrorKind> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f == 0.0 => Ok(false),
            Some(f) if f == 1.0 => Ok(true),
            _ => Err(FieldErrorKind::BoolParsing),
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
            _ => Err(FieldErrorKind::BoolParsing),
        },
        _ => Err(FieldErrorKind::BoolType),
    }
}

fn parse_integer(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Some(i);
    }
    // "30.0" and "30.00" are accepted; "30.5" is not.
    let (whole, fraction) = trimmed.split_once('.')?;
    if !fraction.is_empty() && fraction.chars().all(|c| c == '0') {
        whole.parse::<i64>().ok()
    } else {
        None
    }
}

fn float_to_i64(f: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    if f.is_finite() && f >= -LIMIT && f < LIMIT {
        Some(f as i64)
    } else {
        None
    }
}
