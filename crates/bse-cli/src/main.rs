//! # bse CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bse_cli::catalog::{
    run_check_references, run_get_family, run_list_basis_sets, run_list_families,
    run_lookup_by_role, GetFamilyArgs, ListBasisSetsArgs, LookupByRoleArgs,
};
use bse_cli::info::{run_list_roles, run_schema, ListRolesArgs};
use bse_cli::load_catalog;
use bse_cli::validate::{run_validate, ValidateArgs};

/// Basis Set Exchange metadata toolkit.
///
/// Validates basis set metadata documents against the metadata schema and
/// answers queries over a directory of metadata documents.
#[derive(Parser, Debug)]
#[command(name = "bse", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory of metadata documents used by catalog queries.
    #[arg(long, env = "BSE_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate metadata documents against the metadata schema.
    Validate(ValidateArgs),

    /// Print the metadata schema.
    Schema,

    /// List all basis set roles and their descriptions.
    ListRoles(ListRolesArgs),

    /// List all basis set families in the catalog.
    ListFamilies,

    /// List basis sets in the catalog, optionally filtered.
    ListBasisSets(ListBasisSetsArgs),

    /// Look up an auxiliary basis by primary basis and role.
    LookupByRole(LookupByRoleArgs),

    /// Print the family of a basis set.
    GetFamily(GetFamilyArgs),

    /// Report auxiliary references to basis sets missing from the catalog.
    CheckReferences,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let data_dir = cli.data_dir.as_deref();
    match cli.command {
        Commands::Validate(args) => run_validate(&args),
        Commands::Schema => run_schema(),
        Commands::ListRoles(args) => run_list_roles(&args),
        Commands::ListFamilies => run_list_families(&load_catalog(data_dir)?),
        Commands::ListBasisSets(args) => run_list_basis_sets(&args, &load_catalog(data_dir)?),
        Commands::LookupByRole(args) => run_lookup_by_role(&args, &load_catalog(data_dir)?),
        Commands::GetFamily(args) => run_get_family(&args, &load_catalog(data_dir)?),
        Commands::CheckReferences => run_check_references(&load_catalog(data_dir)?),
    }
}
