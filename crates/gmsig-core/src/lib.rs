//! gmsig-core
//!
//! Core primitives for signing golden measurements:
//! - Canonical JSON encoding for signature-stable bytes
//! - SHA-256 measurement digests
//! - PEM key loading into a closed RSA / elliptic-curve key model
//! - RSA PKCS#1 v1.5 and ECDSA signing and verification
//! - Document-level sign/verify over the `golden_measurement` field
//!
//! The crate performs no file I/O and holds no global state; every function
//! can be called concurrently from any thread.

pub mod canonical;
pub mod config;
pub mod document;
pub mod errors;
pub mod hash;
pub mod keys;
pub mod sign;
pub mod verify;

pub use crate::errors::{GmError, GmResult};

/// Default document field names.
/// These must remain stable; documents in the wild depend on them.
pub mod fields {
    pub const GOLDEN_MEASUREMENT: &str = "golden_measurement";
    pub const SIGNATURE: &str = "signature";
}

/// Convenience re-exports.
pub mod prelude {
    pub use crate::canonical::{
        canonical_json_bytes, canonical_json_bytes_with, canonical_json_string,
        CanonicalJsonOptions, NumberPolicy,
    };
    pub use crate::config::{validate_config, FieldNames, LimitsConfig, SignerConfig};
    pub use crate::document::{
        parse_document, sign_document, sign_document_with, verify_document,
        verify_document_with,
    };
    pub use crate::hash::{measurement_digest, measurement_digest_hex};
    pub use crate::keys::{
        load_private_key_pem, load_public_key_pem, KeyFamily, PrivateKey, PublicKey,
    };
    pub use crate::sign::{sign_measurement, sign_measurement_with};
    pub use crate::verify::{
        verify_measurement, verify_measurement_detailed, verify_measurement_with,
    };
    pub use crate::{GmError, GmResult};
}
