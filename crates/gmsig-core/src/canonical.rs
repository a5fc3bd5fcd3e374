//! Canonical JSON encoding.
//!
//! Signatures are computed over bytes, not over JSON values, so every producer
//! and verifier must render a measurement to exactly the same bytes regardless
//! of how the document was parsed, re-indented, or re-ordered in transit.
//!
//! Rules (applied recursively):
//! - object members are sorted by the UTF-8 bytes of their keys
//! - no whitespace; `,` between elements and `:` between key and value
//! - strings use the short escapes `\" \\ \b \f \n \r \t`, `\u00XX` for the
//!   remaining control characters, and (by default) `\uXXXX` for U+007F and
//!   every non-ASCII character, with surrogate pairs above the BMP
//! - integer tokens are written as exact decimals of any size; `-0` is `0`
//! - floats are written with the shortest digit string that round-trips,
//!   in fixed notation for decimal exponents in `[-4, 16)` and in
//!   `d.ddde±XX` notation otherwise
//!
//! The default profile is the sorted-keys, compact, ASCII-escaped form most
//! existing signers already emit, so signatures interoperate with documents
//! signed elsewhere.
//!
//! This module performs no I/O and never consults serde_json's own
//! formatting for anything that is signed.

use itertools::Itertools;
use serde_json::{Map, Number, Value};

use crate::errors::{GmError, GmResult};

/// How numbers are admitted into canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberPolicy {
    /// Integers verbatim, floats as shortest round-trip decimals.
    #[default]
    ShortestRoundTrip,
    /// Reject any number written with a fraction or an exponent.
    IntegersOnly,
}

/// Canonical encoding profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalJsonOptions {
    /// Escape U+007F and all non-ASCII characters as `\uXXXX`.
    pub escape_non_ascii: bool,
    pub numbers: NumberPolicy,
}

impl Default for CanonicalJsonOptions {
    fn default() -> Self {
        Self {
            escape_non_ascii: true,
            numbers: NumberPolicy::ShortestRoundTrip,
        }
    }
}

/// Canonical bytes under the default profile.
///
/// Total for every value serde_json can represent.
pub fn canonical_json_bytes(value: &Value) -> Vec<u8> {
    render(value, &CanonicalJsonOptions::default()).into_bytes()
}

/// Canonical bytes under an explicit profile.
pub fn canonical_json_bytes_with(value: &Value, opts: &CanonicalJsonOptions) -> GmResult<Vec<u8>> {
    if opts.numbers == NumberPolicy::IntegersOnly {
        ensure_integers(value)?;
    }
    Ok(render(value, opts).into_bytes())
}

/// Canonical form as a string (always valid UTF-8).
pub fn canonical_json_string(value: &Value, opts: &CanonicalJsonOptions) -> GmResult<String> {
    if opts.numbers == NumberPolicy::IntegersOnly {
        ensure_integers(value)?;
    }
    Ok(render(value, opts))
}

fn render(value: &Value, opts: &CanonicalJsonOptions) -> String {
    let mut out = String::new();
    write_value(&mut out, value, opts.escape_non_ascii);
    out
}

fn ensure_integers(value: &Value) -> GmResult<()> {
    match value {
        Value::Number(n) if !is_integer_token(&n.to_string()) => {
            Err(GmError::NonIntegerNumber(n.to_string()))
        }
        Value::Array(items) => items.iter().try_for_each(ensure_integers),
        Value::Object(map) => map.values().try_for_each(ensure_integers),
        _ => Ok(()),
    }
}

fn write_value(out: &mut String, value: &Value, escape_non_ascii: bool) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s, escape_non_ascii),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item, escape_non_ascii);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in sorted_members(map).enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(out, key, escape_non_ascii);
                out.push(':');
                write_value(out, item, escape_non_ascii);
            }
            out.push('}');
        }
    }
}

// Map iteration order depends on serde_json features (preserve_order), so
// members are always re-sorted here.
fn sorted_members(map: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    map.iter()
        .sorted_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()))
}

// Numbers carry their source token (serde_json `arbitrary_precision`), so an
// integer is never squeezed through f64.
fn write_number(out: &mut String, n: &Number) {
    let token = n.to_string();
    if is_integer_token(&token) {
        if token == "-0" {
            out.push('0');
        } else {
            out.push_str(&token);
        }
        return;
    }
    match token.parse::<f64>() {
        Ok(f) => out.push_str(&format_float(f)),
        Err(_) => out.push_str(&token),
    }
}

fn is_integer_token(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Shortest round-trip rendering of an f64.
///
/// Non-finite values (only reachable from out-of-range exponents such as
/// `1e400`) use the `Infinity` / `NaN` spellings existing signers emit.
pub(crate) fn format_float(f: f64) -> String {
    let sign = if f.is_sign_negative() { "-" } else { "" };
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return format!("{sign}Infinity");
    }
    if f == 0.0 {
        return format!("{sign}0.0");
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.2345e-5".
    let sci = format!("{:e}", f.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.to_string();
    };

    if (-4..16).contains(&exp) {
        let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
        format!("{sign}{}", fixed_notation(&digits, exp))
    } else {
        let exp_sign = if exp < 0 { '-' } else { '+' };
        format!("{sign}{mantissa}e{exp_sign}{:02}", exp.unsigned_abs())
    }
}

fn fixed_notation(digits: &str, exp: i32) -> String {
    if exp < 0 {
        let zeros = "0".repeat((-exp - 1) as usize);
        return format!("0.{zeros}{digits}");
    }
    let int_len = exp as usize + 1;
    if digits.len() <= int_len {
        let zeros = "0".repeat(int_len - digits.len());
        format!("{digits}{zeros}.0")
    } else {
        format!("{}.{}", &digits[..int_len], &digits[int_len..])
    }
}

fn write_string(out: &mut String, s: &str, escape_non_ascii: bool) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => push_unicode_escape(out, c as u16),
            c if escape_non_ascii && (c as u32) >= 0x7f => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    push_unicode_escape(out, *unit);
                }
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_unicode_escape(out: &mut String, unit: u16) {
    out.push_str(&format!("\\u{unit:04x}"));
}
