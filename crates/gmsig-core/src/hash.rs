//! Measurement digests.
//!
//! Both signature families sign the SHA-256 digest of the canonical bytes, so
//! the digest is computed once here and handed to the key-specific code.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::{canonical_json_bytes_with, CanonicalJsonOptions};
use crate::errors::GmResult;

/// SHA-256 digest length in bytes.
pub const DIGEST_LEN: usize = 32;

/// Hash raw bytes with SHA-256.
pub fn sha256(bytes: &[u8]) -> [u8; DIGEST_LEN] {
    let mut h = Sha256::new();
    h.update(bytes);
    let mut out = [0u8; DIGEST_LEN];
    out.copy_from_slice(&h.finalize());
    out
}

/// SHA-256 over the canonical form of a measurement.
pub fn measurement_digest(value: &Value, opts: &CanonicalJsonOptions) -> GmResult<[u8; DIGEST_LEN]> {
    let bytes = canonical_json_bytes_with(value, opts)?;
    let digest = sha256(&bytes);
    tracing::debug!(
        canonical_len = bytes.len(),
        digest = %hex::encode(digest),
        "measurement canonicalized"
    );
    Ok(digest)
}

/// P-521 scalar width in bytes.
#[cfg(feature = "p521")]
pub(crate) const P521_FIELD_LEN: usize = 66;

/// Left-pad a digest to the P-521 field width.
///
/// A digest shorter than the group order is used as-is by ECDSA, so the
/// padded value is the same integer; the padding only satisfies the prehash
/// length floor of the P-521 signer.
#[cfg(feature = "p521")]
pub(crate) fn widen_for_p521(digest: &[u8; DIGEST_LEN]) -> [u8; P521_FIELD_LEN] {
    let mut out = [0u8; P521_FIELD_LEN];
    out[P521_FIELD_LEN - DIGEST_LEN..].copy_from_slice(digest);
    out
}

/// Lowercase hex of [`measurement_digest`].
pub fn measurement_digest_hex(value: &Value, opts: &CanonicalJsonOptions) -> GmResult<String> {
    Ok(hex::encode(measurement_digest(value, opts)?))
}
