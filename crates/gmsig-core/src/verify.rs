//! Verify path.
//!
//! Internally every rejection keeps its reason (`MalformedSignature`,
//! `UnsupportedKeyType`, `SignatureMismatch`) so it can be logged and tested.
//! The public boolean API collapses all of them to `false` in exactly one
//! place, [`collapse`], so callers probing signatures cannot tell a
//! malformed signature from a wrong one.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use p256::ecdsa::signature::hazmat::PrehashVerifier;
use rsa::Pkcs1v15Sign;
use serde_json::Value;
use sha2::Sha256;

use crate::canonical::CanonicalJsonOptions;
use crate::errors::{GmError, GmResult};
#[cfg(feature = "p521")]
use crate::hash::widen_for_p521;
use crate::hash::{measurement_digest, DIGEST_LEN};
use crate::keys::{EcPublicKey, PublicKey};

/// Verify a base64 signature over a measurement (default canonical profile).
///
/// Returns `true` only when the cryptographic check succeeds.
pub fn verify_measurement(measurement: &Value, signature_b64: &str, key: &PublicKey) -> bool {
    verify_measurement_with(measurement, signature_b64, key, &CanonicalJsonOptions::default())
}

pub fn verify_measurement_with(
    measurement: &Value,
    signature_b64: &str,
    key: &PublicKey,
    opts: &CanonicalJsonOptions,
) -> bool {
    collapse(verify_measurement_detailed(measurement, signature_b64, key, opts))
}

/// Same check as [`verify_measurement_with`], keeping the failure reason.
pub fn verify_measurement_detailed(
    measurement: &Value,
    signature_b64: &str,
    key: &PublicKey,
    opts: &CanonicalJsonOptions,
) -> GmResult<()> {
    let digest = measurement_digest(measurement, opts)?;
    verify_digest(&digest, signature_b64, key)
}

pub(crate) fn verify_digest(
    digest: &[u8; DIGEST_LEN],
    signature_b64: &str,
    key: &PublicKey,
) -> GmResult<()> {
    let signature = BASE64
        .decode(signature_b64)
        .map_err(|e| GmError::malformed_signature(format!("invalid base64: {e}")))?;

    match key {
        PublicKey::Rsa(k) => k
            .verify(Pkcs1v15Sign::new::<Sha256>(), digest, &signature)
            .map_err(|_| GmError::SignatureMismatch),
        PublicKey::EllipticCurve(EcPublicKey::P256(k)) => {
            let sig = p256::ecdsa::Signature::from_der(&signature).map_err(malformed_der)?;
            k.verify_prehash(digest, &sig)
                .map_err(|_| GmError::SignatureMismatch)
        }
        #[cfg(feature = "p384")]
        PublicKey::EllipticCurve(EcPublicKey::P384(k)) => {
            let sig = p384::ecdsa::Signature::from_der(&signature).map_err(malformed_der)?;
            k.verify_prehash(digest, &sig)
                .map_err(|_| GmError::SignatureMismatch)
        }
        #[cfg(feature = "p521")]
        PublicKey::EllipticCurve(EcPublicKey::P521(k)) => {
            let sig = p521::ecdsa::Signature::from_der(&signature).map_err(malformed_der)?;
            let verifier = p521::ecdsa::VerifyingKey::from_affine(*k.as_affine())
                .map_err(|e| GmError::crypto(format!("invalid P-521 public key: {e}")))?;
            verifier
                .verify_prehash(&widen_for_p521(digest), &sig)
                .map_err(|_| GmError::SignatureMismatch)
        }
        #[cfg(feature = "k256")]
        PublicKey::EllipticCurve(EcPublicKey::K256(k)) => {
            let sig = k256::ecdsa::Signature::from_der(&signature).map_err(malformed_der)?;
            // secp256k1 verification only takes low-S; OpenSSL signers emit both.
            let sig = sig.normalize_s().unwrap_or(sig);
            k.verify_prehash(digest, &sig)
                .map_err(|_| GmError::SignatureMismatch)
        }
        PublicKey::Unsupported(k) => Err(GmError::unsupported_key_type(k.algorithm.clone())),
    }
}

fn malformed_der(e: p256::ecdsa::Error) -> GmError {
    GmError::malformed_signature(format!("invalid DER ECDSA signature: {e}"))
}

/// The only place a verification error turns into `false`.
pub(crate) fn collapse(result: GmResult<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(code = err.code(), error = %err, "signature rejected");
            false
        }
    }
}
