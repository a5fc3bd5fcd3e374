use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Result};
use gmsig_core::canonical::canonical_json_string;
use gmsig_core::config::SignerConfig;
use gmsig_core::hash::measurement_digest_hex;
use serde::Serialize;

use crate::io::input;
use crate::output::{self, Report};

#[derive(Debug, Serialize)]
pub struct CanonicalizeOut {
    pub field: String,
    pub canonical: String,
    pub sha256: String,
}

impl Report for CanonicalizeOut {
    fn ok(&self) -> bool {
        true
    }

    fn human(&self) -> String {
        format!("{}\nsha256: {}", self.canonical, self.sha256)
    }

    fn marked(&self) -> bool {
        false
    }
}

pub fn run(cfg: &SignerConfig, document: &Path) -> Result<ExitCode> {
    let doc = input::read_json_file(document, &cfg.limits)?;
    let field = &cfg.fields.measurement;
    let measurement = doc
        .get(field)
        .ok_or_else(|| anyhow!("{} has no '{field}' field", document.display()))?;

    output::print(&CanonicalizeOut {
        field: field.clone(),
        canonical: canonical_json_string(measurement, &cfg.canonical)?,
        sha256: measurement_digest_hex(measurement, &cfg.canonical)?,
    })?;
    Ok(ExitCode::SUCCESS)
}
