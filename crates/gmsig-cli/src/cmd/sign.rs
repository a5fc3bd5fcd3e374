use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use gmsig_core::config::SignerConfig;
use serde::Serialize;

use crate::io::{export, input};
use crate::output::{self, Report};

#[derive(Debug, Serialize)]
pub struct SignOut {
    pub ok: bool,
    pub output: String,
    pub signature: String,
}

impl Report for SignOut {
    fn ok(&self) -> bool {
        self.ok
    }

    fn human(&self) -> String {
        format!("Signed and saved to {}", self.output)
    }
}

pub fn run(cfg: &SignerConfig, document: &Path, key: &Path, out: &Path) -> Result<ExitCode> {
    let doc = input::read_json_file(document, &cfg.limits)?;
    let pem = input::read_key_file(key, &cfg.limits)?;

    let signed = gmsig_core::document::sign_document_with(cfg, &doc, &pem)
        .with_context(|| format!("failed to sign {}", document.display()))?;

    let signature = signed
        .get(&cfg.fields.signature)
        .and_then(|v| v.as_str())
        .with_context(|| format!("signed document has no '{}' string", cfg.fields.signature))?
        .to_string();

    export::write_json_pretty(out, &signed)?;
    output::print(&SignOut {
        ok: true,
        output: out.display().to_string(),
        signature,
    })?;
    Ok(ExitCode::SUCCESS)
}
