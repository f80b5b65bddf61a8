//! # Validate Subcommand
//!
//! Validates metadata documents given as files or directories. Directories
//! contribute every `*.json` file directly inside them; YAML documents are
//! validated only when named explicitly.
//! Exit code 0 when every document is valid, 1 otherwise.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bse_schema::validate::load_document;
use bse_schema::MetadataValidator;
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Output format for validation reports.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Metadata files or directories to validate.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Also apply curation rules (lowercase family).
    #[arg(long)]
    pub strict: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Validation outcome for one file.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FileReport {
    pub path: String,
    pub valid: bool,
    pub violations: Vec<ReportedViolation>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ReportedViolation {
    pub path: String,
    pub rule: String,
    pub message: String,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let validator = MetadataValidator::new()
        .context("failed to compile metadata schema")?
        .with_strict(args.strict);

    let files = collect_documents(&args.paths)?;
    if files.is_empty() {
        bail!("no metadata documents found");
    }

    let reports: Vec<FileReport> = files
        .iter()
        .map(|path| check_file(&validator, path))
        .collect();

    match args.format {
        OutputFormat::Text => {
            for report in &reports {
                print_text(report);
            }
        }
        OutputFormat::Json => {
            let rendered =
                serde_json::to_string_pretty(&reports).context("failed to render report")?;
            println!("{rendered}");
        }
    }

    let failed = reports.iter().filter(|r| !r.valid).count();
    tracing::info!(total = reports.len(), failed, "validation finished");
    Ok(if failed == 0 { 0 } else { 1 })
}

/// Expand directories into the metadata documents they contain.
pub fn collect_documents(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            let entries = std::fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries {
                let entry_path = entry
                    .with_context(|| format!("failed to read directory: {}", path.display()))?
                    .path();
                if entry_path.is_file() && is_document(&entry_path) {
                    found.push(entry_path);
                }
            }
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

fn is_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

/// Load and validate one file. Load failures are reported, not raised.
pub fn check_file(validator: &MetadataValidator, path: &Path) -> FileReport {
    let shown = path.display().to_string();
    let value = match load_document(path) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(path = %shown, error = %e, "document failed to load");
            return FileReport {
                path: shown,
                valid: false,
                violations: vec![ReportedViolation {
                    path: String::new(),
                    rule: "load_error".to_string(),
                    message: e.to_string(),
                }],
            };
        }
    };

    let result = validator.validate(&value);
    FileReport {
        path: shown,
        valid: result.is_valid(),
        violations: result
            .violations()
            .iter()
            .map(|v| ReportedViolation {
                path: v.path(),
                rule: v.rule().to_string(),
                message: v.message(),
            })
            .collect(),
    }
}

fn print_text(report: &FileReport) {
    if report.valid {
        println!("OK    {}", report.path);
        return;
    }
    println!("FAIL  {}", report.path);
    for v in &report.violations {
        let location = if v.path.is_empty() { "(root)" } else { v.path.as_str() };
        println!("      {location}: {} [{}]", v.message, v.rule);
    }
}
