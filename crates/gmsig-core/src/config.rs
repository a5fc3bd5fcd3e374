//! Configuration structures for gmsig-core.
//!
//! This module defines explicit configuration objects used by higher-level
//! components (CLI, services) to control which document fields are signed,
//! how measurements are canonicalized, and how much input is accepted.
//!
//! The core crate itself does not read environment variables. All configuration
//! must be provided explicitly by the caller.

use crate::canonical::CanonicalJsonOptions;
use crate::errors::{GmError, GmResult};

/// Global configuration container.
#[derive(Debug, Clone, Default)]
pub struct SignerConfig {
    pub fields: FieldNames,
    pub canonical: CanonicalJsonOptions,
    pub limits: LimitsConfig,
}

/// Names of the document fields the signer reads and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub measurement: String,
    pub signature: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            measurement: crate::fields::GOLDEN_MEASUREMENT.to_string(),
            signature: crate::fields::SIGNATURE.to_string(),
        }
    }
}

/// Input size limits, checked before any parsing happens.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub max_key_pem_bytes: usize,
    pub max_document_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_key_pem_bytes: 64 * 1024,
            max_document_bytes: 64 * 1024 * 1024,
        }
    }
}

impl LimitsConfig {
    pub fn check_key_pem(&self, pem: &[u8]) -> GmResult<()> {
        if pem.len() > self.max_key_pem_bytes {
            return Err(GmError::limit_exceeded(format!(
                "key PEM is {} bytes (max {})",
                pem.len(),
                self.max_key_pem_bytes
            )));
        }
        Ok(())
    }

    pub fn check_document(&self, len: usize) -> GmResult<()> {
        if len > self.max_document_bytes {
            return Err(GmError::limit_exceeded(format!(
                "document is {len} bytes (max {})",
                self.max_document_bytes
            )));
        }
        Ok(())
    }
}

/// Validate a full configuration object.
pub fn validate_config(cfg: &SignerConfig) -> GmResult<()> {
    if cfg.fields.measurement.is_empty() || cfg.fields.signature.is_empty() {
        return Err(GmError::invalid_argument("field names must not be empty"));
    }

    if cfg.fields.measurement == cfg.fields.signature {
        return Err(GmError::invalid_argument(
            "measurement and signature fields must differ",
        ));
    }

    if cfg.limits.max_key_pem_bytes == 0 || cfg.limits.max_document_bytes == 0 {
        return Err(GmError::invalid_argument(
            "limits must be greater than zero",
        ));
    }

    Ok(())
}
