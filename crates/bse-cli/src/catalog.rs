//! # Catalog Subcommands
//!
//! Queries over the metadata directory: family listings, filtered basis set
//! listings, auxiliary lookup by role, and dangling-reference checks.

use anyhow::{anyhow, Result};
use bse_core::AuxiliaryRole;
use bse_schema::MetadataCatalog;
use clap::Args;

use crate::format_columns;

/// Arguments for the list-basis-sets subcommand.
#[derive(Args, Debug, Default)]
pub struct ListBasisSetsArgs {
    /// Limit to basis sets whose name contains this substring.
    #[arg(short, long)]
    pub substr: Option<String>,

    /// Limit to the specified family.
    #[arg(short, long)]
    pub family: Option<String>,

    /// Limit to the specified role.
    #[arg(short, long)]
    pub role: Option<String>,

    /// Print only the basis set names.
    #[arg(short, long)]
    pub no_description: bool,
}

/// Arguments for the lookup-by-role subcommand.
#[derive(Args, Debug)]
pub struct LookupByRoleArgs {
    /// Primary (orbital) basis set name.
    pub primary: String,

    /// Fitting role of the auxiliary basis to look for.
    pub role: String,
}

/// Arguments for the get-family subcommand.
#[derive(Args, Debug)]
pub struct GetFamilyArgs {
    /// Basis set name.
    pub name: String,
}

/// Print every family in the catalog.
pub fn run_list_families(catalog: &MetadataCatalog) -> Result<u8> {
    for family in catalog.families() {
        println!("{family}");
    }
    Ok(0)
}

/// Print basis sets matching the given criteria.
pub fn run_list_basis_sets(args: &ListBasisSetsArgs, catalog: &MetadataCatalog) -> Result<u8> {
    for line in basis_set_lines(args, catalog)? {
        println!("{line}");
    }
    Ok(0)
}

fn basis_set_lines(args: &ListBasisSetsArgs, catalog: &MetadataCatalog) -> Result<Vec<String>> {
    let matches = catalog.filter(
        args.substr.as_deref(),
        args.family.as_deref(),
        args.role.as_deref(),
    )?;

    if args.no_description {
        return Ok(matches.iter().map(|r| r.normalized_name()).collect());
    }
    let rows: Vec<(String, String)> = matches
        .iter()
        .map(|r| (r.normalized_name(), r.basis_set_description.clone()))
        .collect();
    Ok(format_columns(&rows))
}

/// Print the auxiliary basis a primary basis declares for a role.
pub fn run_lookup_by_role(args: &LookupByRoleArgs, catalog: &MetadataCatalog) -> Result<u8> {
    println!("{}", lookup(args, catalog)?);
    Ok(0)
}

fn lookup<'a>(args: &LookupByRoleArgs, catalog: &'a MetadataCatalog) -> Result<&'a str> {
    let role: AuxiliaryRole = args.role.to_lowercase().parse().map_err(|_| {
        anyhow!(
            "role '{}' is not an auxiliary role (expected one of: {})",
            args.role,
            AuxiliaryRole::NAMES.join(", ")
        )
    })?;
    Ok(catalog.lookup_by_role(&args.primary, role)?)
}

/// Print the family of a basis set.
pub fn run_get_family(args: &GetFamilyArgs, catalog: &MetadataCatalog) -> Result<u8> {
    println!("{}", catalog.family_of(&args.name)?);
    Ok(0)
}

/// Report auxiliary entries whose target basis is not in the catalog.
///
/// Exit code 1 if any are found.
pub fn run_check_references(catalog: &MetadataCatalog) -> Result<u8> {
    let dangling = catalog.dangling_auxiliaries();
    for d in &dangling {
        println!("{}: {} -> {} (not in catalog)", d.basis, d.role, d.target);
    }
    println!(
        "Checked {} basis sets, {} dangling auxiliary reference(s)",
        catalog.len(),
        dangling.len()
    );
    Ok(if dangling.is_empty() { 0 } else { 1 })
}
