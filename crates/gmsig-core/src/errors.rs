//! Error types for gmsig-core.
//!
//! All fallible operations in this crate return [`GmResult`]. Every variant
//! carries a stable, machine-readable code (see [`GmError::code`]) so that
//! higher layers (CLI, services) can report failures without string matching.

use thiserror::Error;

/// Result alias used across gmsig-core.
pub type GmResult<T> = Result<T, GmError>;

/// Errors produced by canonicalization, key loading, signing and verification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GmError {
    /// A required field is absent from the input document.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// PEM bytes do not decode to a recognized, unencrypted key.
    #[error("failed to load key: {0}")]
    KeyLoad(String),

    /// The loaded key is neither RSA nor a supported elliptic curve.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// The signature is not valid standard base64, or not a well-formed
    /// signature encoding for the key's algorithm.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The cryptographic check ran and rejected the signature.
    #[error("signature does not match measurement")]
    SignatureMismatch,

    /// A floating-point number was found while the integers-only number
    /// policy is active.
    #[error("non-integer number is not allowed in canonical form: {0}")]
    NonIntegerNumber(String),

    /// The signing primitive itself failed.
    #[error("cryptographic operation failed: {0}")]
    Crypto(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl GmError {
    pub fn missing_field(name: impl Into<String>) -> Self {
        Self::MissingField(name.into())
    }

    pub fn key_load(msg: impl Into<String>) -> Self {
        Self::KeyLoad(msg.into())
    }

    pub fn unsupported_key_type(algorithm: impl Into<String>) -> Self {
        Self::UnsupportedKeyType(algorithm.into())
    }

    pub fn malformed_signature(msg: impl Into<String>) -> Self {
        Self::MalformedSignature(msg.into())
    }

    pub fn crypto(msg: impl Into<String>) -> Self {
        Self::Crypto(msg.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn limit_exceeded(msg: impl Into<String>) -> Self {
        Self::LimitExceeded(msg.into())
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "document.field.missing",
            Self::KeyLoad(_) => "key.load",
            Self::UnsupportedKeyType(_) => "key.unsupported",
            Self::MalformedSignature(_) => "signature.malformed",
            Self::SignatureMismatch => "signature.mismatch",
            Self::NonIntegerNumber(_) => "canonical.number.non_integer",
            Self::Crypto(_) => "crypto",
            Self::InvalidArgument(_) => "argument.invalid",
            Self::LimitExceeded(_) => "limit.exceeded",
        }
    }
}
