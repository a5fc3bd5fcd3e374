use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use gmsig_core::config::SignerConfig;
use serde::Serialize;

use crate::io::input;
use crate::output::{self, Report};

#[derive(Debug, Serialize)]
pub struct VerifyOut {
    pub ok: bool,
}

impl Report for VerifyOut {
    fn ok(&self) -> bool {
        self.ok
    }

    fn human(&self) -> String {
        if self.ok { "Verified" } else { "Verification failed" }.to_string()
    }
}

pub fn run(cfg: &SignerConfig, document: &Path, key: &Path) -> Result<ExitCode> {
    let doc = input::read_json_file(document, &cfg.limits)?;
    let pem = input::read_key_file(key, &cfg.limits)?;

    let ok = gmsig_core::document::verify_document_with(cfg, &doc, &pem)
        .with_context(|| format!("failed to verify {}", document.display()))?;

    output::print(&VerifyOut { ok })?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::from(1) })
}
