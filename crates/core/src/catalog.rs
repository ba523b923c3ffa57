//! Input validation for catalog and account data.
//!
//! Handlers receive loosely typed input (JSON bodies, multipart text fields);
//! these helpers turn it into the stored representation or a
//! [`CoreError::Validation`].

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Required fields
// ---------------------------------------------------------------------------

/// Return the trimmed value of a required text field.
pub fn require_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// Return a required secret exactly as supplied. Whitespace is significant,
/// so only a missing or empty value is rejected.
pub fn require_secret<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Return a required value or a validation error naming the field.
pub fn require<T>(field: &str, value: Option<T>) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::Validation(format!("{field} is required")))
}

/// Parse a required integer text field (multipart forms carry numbers as text).
pub fn parse_int(field: &str, value: Option<&str>) -> Result<i32, CoreError> {
    let raw = require_text(field, value)?;
    raw.parse::<i32>()
        .map_err(|_| CoreError::Validation(format!("{field} must be an integer, got '{raw}'")))
}

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// Parse a decimal price string (`"499"`, `"499.9"`, `"499.99"`) into minor units.
///
/// At most two fractional digits are accepted and the result must not be
/// negative.
pub fn parse_price(raw: &str) -> Result<i64, CoreError> {
    let raw = raw.trim();
    let invalid = || CoreError::Validation(format!("Invalid price '{raw}'"));

    if raw.starts_with('-') {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }

    let (whole, frac) = match raw.split_once('.') {
        Some((_, "")) => return Err(invalid()),
        Some((w, f)) => (w, f),
        None => (raw, ""),
    };
    if whole.is_empty() || frac.len() > 2 {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole: i64 = whole.parse().map_err(|_| invalid())?;
    let frac: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(frac))
        .ok_or_else(invalid)
}

/// Format minor units as a two-decimal price string.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

// ---------------------------------------------------------------------------
// Lesson links
// ---------------------------------------------------------------------------

/// Validate a link list supplied as JSON text and return its canonical form.
///
/// Blank input means "no links". Only arrays and objects are accepted.
pub fn parse_links(raw: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::Validation(format!("links must be valid JSON: {e}")))?;
    if !(value.is_array() || value.is_object()) {
        return Err(CoreError::Validation(
            "links must be a JSON array or object".into(),
        ));
    }
    Ok(Some(value.to_string()))
}

/// Decode stored link text. Absent or undecodable text yields `None`.
pub fn decode_links(stored: Option<&str>) -> Option<serde_json::Value> {
    stored
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| serde_json::from_str(s).ok())
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Lowercase and trim an email address, rejecting obviously malformed input.
pub fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid || email.contains(char::is_whitespace) {
        return Err(CoreError::Validation(format!("Invalid email address '{raw}'")));
    }
    Ok(email)
}
