//! # Schema and Role Listings
//!
//! Commands that need no metadata directory: `bse schema` and
//! `bse list-roles`.

use anyhow::{Context, Result};
use bse_core::BasisSetRole;
use clap::Args;

use crate::format_columns;

/// Arguments for the list-roles subcommand.
#[derive(Args, Debug)]
pub struct ListRolesArgs {
    /// Print only the role names.
    #[arg(short, long)]
    pub no_description: bool,
}

/// Print the embedded metadata schema as pretty JSON.
pub fn run_schema() -> Result<u8> {
    let rendered = serde_json::to_string_pretty(bse_schema::metadata_schema())
        .context("failed to render metadata schema")?;
    println!("{rendered}");
    Ok(0)
}

/// Print every basis set role, optionally with its display name.
pub fn run_list_roles(args: &ListRolesArgs) -> Result<u8> {
    for line in role_lines(args.no_description) {
        println!("{line}");
    }
    Ok(0)
}

fn role_lines(no_description: bool) -> Vec<String> {
    if no_description {
        return BasisSetRole::all()
            .iter()
            .map(|r| r.as_str().to_string())
            .collect();
    }
    let rows: Vec<(String, String)> = BasisSetRole::all()
        .iter()
        .map(|r| (r.as_str().to_string(), r.display_name().to_string()))
        .collect();
    format_columns(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_lines_names_only() {
        assert_eq!(
            role_lines(true),
            vec!["orbital", "rifit", "jkfit", "jfit", "admmfit"]
        );
    }

    #[test]
    fn role_lines_with_descriptions() {
        let lines = role_lines(false);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "orbital  Orbital basis");
        assert!(lines[4].starts_with("admmfit  Auxiliary-Density"));
    }
}
