use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Write a document pretty-printed with 2-space indentation.
pub fn write_json_pretty<P: AsRef<Path>>(path: P, value: &serde_json::Value) -> Result<()> {
    let path = path.as_ref();
    let mut bytes = serde_json::to_vec_pretty(value)?;
    bytes.push(b'\n');

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
