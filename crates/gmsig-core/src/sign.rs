//! Sign path: canonicalize, digest, dispatch on key family, base64.
//!
//! RSA keys sign with PKCS#1 v1.5 over the SHA-256 digest. EC keys sign the
//! same digest as an ECDSA prehash (RFC 6979 nonces) and the signature is
//! DER encoded, which is what OpenSSL-based verifiers expect.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use p256::ecdsa::signature::hazmat::PrehashSigner;
use rsa::Pkcs1v15Sign;
use serde_json::Value;
use sha2::Sha256;

use crate::canonical::CanonicalJsonOptions;
use crate::errors::{GmError, GmResult};
#[cfg(feature = "p521")]
use crate::hash::widen_for_p521;
use crate::hash::{measurement_digest, DIGEST_LEN};
use crate::keys::{EcPrivateKey, PrivateKey};

/// Sign a measurement with the default canonical profile.
///
/// Returns the signature as standard base64 with padding.
pub fn sign_measurement(measurement: &Value, key: &PrivateKey) -> GmResult<String> {
    sign_measurement_with(measurement, key, &CanonicalJsonOptions::default())
}

pub fn sign_measurement_with(
    measurement: &Value,
    key: &PrivateKey,
    opts: &CanonicalJsonOptions,
) -> GmResult<String> {
    let digest = measurement_digest(measurement, opts)?;
    let signature = sign_digest(key, &digest)?;

    tracing::debug!(
        algorithm = %key.algorithm(),
        digest = %hex::encode(digest),
        signature_len = signature.len(),
        "measurement signed"
    );

    Ok(BASE64.encode(signature))
}

/// Raw signature bytes over a SHA-256 digest.
pub(crate) fn sign_digest(key: &PrivateKey, digest: &[u8; DIGEST_LEN]) -> GmResult<Vec<u8>> {
    match key {
        PrivateKey::Rsa(k) => k
            .sign(Pkcs1v15Sign::new::<Sha256>(), digest)
            .map_err(|e| GmError::crypto(format!("RSA signing failed: {e}"))),
        PrivateKey::EllipticCurve(EcPrivateKey::P256(k)) => {
            let sig: p256::ecdsa::Signature = k
                .sign_prehash(digest)
                .map_err(|e| GmError::crypto(format!("ECDSA signing failed: {e}")))?;
            Ok(sig.to_der().as_bytes().to_vec())
        }
        #[cfg(feature = "p384")]
        PrivateKey::EllipticCurve(EcPrivateKey::P384(k)) => {
            let sig: p384::ecdsa::Signature = k
                .sign_prehash(digest)
                .map_err(|e| GmError::crypto(format!("ECDSA signing failed: {e}")))?;
            Ok(sig.to_der().as_bytes().to_vec())
        }
        #[cfg(feature = "p521")]
        PrivateKey::EllipticCurve(EcPrivateKey::P521(k)) => {
            let signer = p521::ecdsa::SigningKey::from_bytes(&k.to_bytes())
                .map_err(|e| GmError::crypto(format!("invalid P-521 scalar: {e}")))?;
            let sig: p521::ecdsa::Signature = signer
                .sign_prehash(&widen_for_p521(digest))
                .map_err(|e| GmError::crypto(format!("ECDSA signing failed: {e}")))?;
            Ok(sig.to_der().as_bytes().to_vec())
        }
        #[cfg(feature = "k256")]
        PrivateKey::EllipticCurve(EcPrivateKey::K256(k)) => {
            let sig: k256::ecdsa::Signature = k
                .sign_prehash(digest)
                .map_err(|e| GmError::crypto(format!("ECDSA signing failed: {e}")))?;
            Ok(sig.to_der().as_bytes().to_vec())
        }
        PrivateKey::Unsupported(k) => Err(GmError::unsupported_key_type(k.algorithm.clone())),
    }
}
