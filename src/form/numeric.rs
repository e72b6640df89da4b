//! Lenient numeric coercion of form input.
//!
//! Inputs are read the way a browser number field is: leading whitespace is
//! skipped and the longest numeric prefix is taken, so `"12abc"` reads as 12.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_INTEGER: Regex =
        Regex::new(r"^\s*[+-]?\d+").expect("Failed to compile integer pattern");
    static ref LEADING_DECIMAL: Regex =
        Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?")
            .expect("Failed to compile decimal pattern");
}

fn leading_integer(input: &str) -> Option<i64> {
    let matched = LEADING_INTEGER.find(input)?;
    let digits = matched.as_str().trim();
    match digits.parse::<i64>() {
        Ok(value) => Some(value),
        // Too many digits for i64: saturate in the direction of the sign.
        Err(_) if digits.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

fn leading_decimal(input: &str) -> Option<f64> {
    let matched = LEADING_DECIMAL.find(input)?;
    matched.as_str().trim().parse::<f64>().ok()
}

/// Quantity of copies; anything that is not a positive integer becomes 1.
pub fn parse_quantity(input: &str) -> u32 {
    match leading_integer(input) {
        Some(value) if value >= 1 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Total price paid; invalid, negative or non-finite input becomes 0.
pub fn parse_total_price(input: &str) -> f64 {
    match leading_decimal(input) {
        Some(value) if value.is_finite() && value >= 0.0 => value,
        _ => 0.0,
    }
}

/// Sale price; empty, invalid or negative input means the book is not sold.
pub fn parse_sold_for(input: &str) -> Option<f64> {
    if input.trim().is_empty() {
        return None;
    }
    leading_decimal(input).filter(|value| value.is_finite() && *value >= 0.0)
}
