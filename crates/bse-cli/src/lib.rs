//! # bse-cli — Basis Set Exchange Metadata CLI
//!
//! Provides the `bse` command-line interface over `bse-schema`.
//!
//! ## Subcommands
//!
//! - `bse validate` — Validate metadata documents (files or directories).
//! - `bse schema` — Print the embedded metadata schema.
//! - `bse list-roles` — List basis set roles.
//! - `bse list-families`, `bse list-basis-sets`, `bse get-family`,
//!   `bse lookup-by-role`, `bse check-references` — Catalog queries over
//!   the metadata directory given by `--data-dir` or `BSE_DATA_DIR`.
//!
//! ```bash
//! bse validate data/ --strict
//! bse --data-dir data lookup-by-role def2-svp jkfit
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from business logic.
//! - Handlers delegate to `bse-schema`; no validation logic lives here.

pub mod catalog;
pub mod info;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use bse_schema::{MetadataCatalog, MetadataValidator};

/// Return the data directory or explain how to provide one.
pub fn require_data_dir(data_dir: Option<&Path>) -> Result<&Path> {
    data_dir.context("no metadata directory given; pass --data-dir or set BSE_DATA_DIR")
}

/// Load and validate the metadata catalog in `data_dir`.
pub fn load_catalog(data_dir: Option<&Path>) -> Result<MetadataCatalog> {
    let dir = require_data_dir(data_dir)?;
    let validator = MetadataValidator::new().context("failed to compile metadata schema")?;
    tracing::debug!(dir = %dir.display(), "loading metadata catalog");
    MetadataCatalog::load(dir, &validator)
        .with_context(|| format!("failed to load metadata catalog from {}", dir.display()))
}

/// Render two-column rows with the first column padded to a common width.
pub fn format_columns(rows: &[(String, String)]) -> Vec<String> {
    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("{k:<width$}  {v}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_columns_pads_to_widest_key() {
        let rows = vec![
            ("jfit".to_string(), "J-fitting".to_string()),
            ("orbital".to_string(), "Orbital basis".to_string()),
        ];
        assert_eq!(
            format_columns(&rows),
            vec!["jfit     J-fitting", "orbital  Orbital basis"]
        );
    }

    #[test]
    fn format_columns_aligns_non_ascii_keys() {
        let rows = vec![
            ("müller-dz".to_string(), "a".to_string()),
            ("sto-3g".to_string(), "b".to_string()),
        ];
        assert_eq!(format_columns(&rows), vec!["müller-dz  a", "sto-3g     b"]);
    }

    #[test]
    fn format_columns_empty() {
        assert!(format_columns(&[]).is_empty());
    }

    #[test]
    fn require_data_dir_missing() {
        let err = require_data_dir(None).unwrap_err();
        assert!(err.to_string().contains("BSE_DATA_DIR"));
    }

    #[test]
    fn require_data_dir_present() {
        let dir = PathBuf::from("/data");
        assert_eq!(require_data_dir(Some(dir.as_path())).unwrap(), Path::new("/data"));
    }

    #[test]
    fn load_catalog_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("sto-3g.json"),
            serde_json::json!({
                "molssi_bse_schema": {"schema_type": "metadata", "schema_version": "0.1"},
                "basis_set_name": "STO-3G",
                "basis_set_family": "pople",
                "basis_set_description": "STO-nG minimal basis",
                "basis_set_role": "orbital",
                "basis_set_auxiliaries": {}
            })
            .to_string(),
        )
        .unwrap();
        let catalog = load_catalog(Some(dir.path())).unwrap();
        assert_eq!(catalog.names(), vec!["sto-3g"]);
    }
}
