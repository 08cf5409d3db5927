//! Serialization and persistence of the report document.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Renders a value as pretty-printed JSON with two-space indentation.
pub fn render_report(report: &impl Serialize) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report as JSON to `path`, creating parent directories as needed.
#[tracing::instrument(skip(path, report), fields(path = %path.display()))]
pub fn write_report(path: &Path, report: &impl Serialize) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let json = render_report(report)?;
    debug!(bytes = json.len(), "Report rendered");
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;

    info!("Report saved");
    Ok(())
}
