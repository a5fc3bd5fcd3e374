//! Document-level operations.
//!
//! A signed document is a JSON object carrying the measurement and a sibling
//! `signature` field. Only the measurement participates in the signature;
//! every other field is carried through untouched.
//!
//! Structural problems (missing fields, unreadable keys, disallowed numbers)
//! are returned as errors. Cryptographic outcomes are a plain `bool`.

use serde_json::{Map, Value};

use crate::config::{validate_config, LimitsConfig, SignerConfig};
use crate::errors::{GmError, GmResult};
use crate::hash::measurement_digest;
use crate::keys::{load_private_key_pem, load_public_key_pem};
use crate::sign::sign_measurement_with;
use crate::verify::{collapse, verify_digest};

/// Parse document bytes after enforcing the configured size limit.
pub fn parse_document(bytes: &[u8], limits: &LimitsConfig) -> GmResult<Value> {
    limits.check_document(bytes.len())?;
    serde_json::from_slice(bytes)
        .map_err(|e| GmError::invalid_argument(format!("invalid JSON document: {e}")))
}

/// Sign `document`'s `golden_measurement` with a PEM private key.
///
/// Returns a copy of the document with `signature` added or overwritten.
pub fn sign_document(document: &Value, private_key_pem: &[u8]) -> GmResult<Value> {
    sign_document_with(&SignerConfig::default(), document, private_key_pem)
}

pub fn sign_document_with(
    cfg: &SignerConfig,
    document: &Value,
    private_key_pem: &[u8],
) -> GmResult<Value> {
    validate_config(cfg)?;

    let fields = as_object(document, &cfg.fields.measurement)?;
    let measurement = required_field(fields, &cfg.fields.measurement)?;

    cfg.limits.check_key_pem(private_key_pem)?;
    let key = load_private_key_pem(private_key_pem)?;
    let signature = sign_measurement_with(measurement, &key, &cfg.canonical)?;

    let mut signed = fields.clone();
    signed.insert(cfg.fields.signature.clone(), Value::String(signature));

    tracing::info!(
        algorithm = %key.algorithm(),
        field = %cfg.fields.measurement,
        "document signed"
    );
    Ok(Value::Object(signed))
}

/// Verify a signed document against a PEM public key.
pub fn verify_document(document: &Value, public_key_pem: &[u8]) -> GmResult<bool> {
    verify_document_with(&SignerConfig::default(), document, public_key_pem)
}

pub fn verify_document_with(
    cfg: &SignerConfig,
    document: &Value,
    public_key_pem: &[u8],
) -> GmResult<bool> {
    validate_config(cfg)?;

    let fields = as_object(document, &cfg.fields.measurement)?;
    let measurement = required_field(fields, &cfg.fields.measurement)?;
    let signature = required_field(fields, &cfg.fields.signature)?;

    cfg.limits.check_key_pem(public_key_pem)?;
    let key = load_public_key_pem(public_key_pem)?;
    let digest = measurement_digest(measurement, &cfg.canonical)?;

    let result = match signature.as_str() {
        Some(b64) => verify_digest(&digest, b64, &key),
        None => Err(GmError::malformed_signature("signature field is not a string")),
    };
    let ok = collapse(result);

    tracing::info!(algorithm = %key.algorithm(), ok, "document verified");
    Ok(ok)
}

// A non-object document has no fields at all, so it reports the first field
// the operation needs.
fn as_object<'a>(document: &'a Value, first_field: &str) -> GmResult<&'a Map<String, Value>> {
    document
        .as_object()
        .ok_or_else(|| GmError::missing_field(first_field))
}

fn required_field<'a>(fields: &'a Map<String, Value>, name: &str) -> GmResult<&'a Value> {
    fields.get(name).ok_or_else(|| GmError::missing_field(name))
}
