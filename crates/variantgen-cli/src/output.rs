use std::fs::{OpenOptions, create_dir_all};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use variantgen_core::{Diagnostic, SynthesisError};
use variantgen_synth::{Expansion, SwiftPrinter};

use crate::{CliError, CliResult};

/// Per-declaration entry of the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationReport {
    pub name: String,
    pub declarations: Vec<String>,
    pub warnings: Vec<Diagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportedError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportedError {
    pub code: &'static str,
    pub message: String,
}

impl DeclarationReport {
    pub fn expanded(name: &str, expansion: &Expansion, printer: &SwiftPrinter) -> Self {
        Self {
            name: name.to_string(),
            declarations: expansion.render_with(printer),
            warnings: expansion.warnings.clone(),
            error: None,
        }
    }

    pub fn failed(name: &str, error: &SynthesisError) -> Self {
        Self {
            name: name.to_string(),
            declarations: Vec::new(),
            warnings: Vec::new(),
            error: Some(ReportedError {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }
}

/// Join every generated declaration with a blank line between them.
pub fn render_text(reports: &[DeclarationReport]) -> String {
    let texts: Vec<&str> = reports
        .iter()
        .flat_map(|report| report.declarations.iter().map(String::as_str))
        .collect();
    if texts.is_empty() {
        return String::new();
    }
    let mut out = texts.join("\n\n");
    out.push('\n');
    out
}

pub fn render_json(reports: &[DeclarationReport]) -> CliResult<String> {
    let mut out = serde_json::to_string_pretty(reports)?;
    out.push('\n');
    Ok(out)
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> CliResult<()> {
    let data = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &data)
}

/// Write through a sibling temp file and rename it over the target.
pub fn write_bytes_atomic(path: &Path, data: &[u8]) -> CliResult<()> {
    let parent = path.parent().filter(|parent| !parent.as_os_str().is_empty());
    if let Some(parent) = parent {
        create_dir_all(parent)?;
    }

    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = parent {
        sync_dir(parent)?;
    }

    Ok(())
}

fn temp_path(path: &Path) -> CliResult<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| CliError::Invalid("invalid path for atomic write".to_string()))?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}
