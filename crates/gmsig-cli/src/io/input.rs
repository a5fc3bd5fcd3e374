use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gmsig_core::config::LimitsConfig;
use gmsig_core::document::parse_document;

pub fn read_json_file<P: AsRef<Path>>(path: P, limits: &LimitsConfig) -> Result<serde_json::Value> {
    let path = path.as_ref();
    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let v = parse_document(&raw, limits)
        .with_context(|| format!("failed to load document {}", path.display()))?;
    Ok(v)
}

pub fn read_key_file<P: AsRef<Path>>(path: P, limits: &LimitsConfig) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let raw = fs::read(path).with_context(|| format!("failed to read key {}", path.display()))?;
    limits
        .check_key_pem(&raw)
        .with_context(|| format!("refusing key file {}", path.display()))?;
    Ok(raw)
}
