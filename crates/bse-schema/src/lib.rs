//! # bse-schema — Metadata Schema Validation
//!
//! Validates basis set metadata documents and loads them into catalogs.
//!
//! ## Schema (`schema`)
//!
//! The draft-07 metadata schema (`bse_basis_metadata`, version `0.1`) is
//! embedded as an immutable constant. [`metadata_schema`] exposes it for
//! external draft-07 validators.
//!
//! ## Validation (`validate`)
//!
//! [`MetadataValidator::validate`] checks a JSON value against the metadata
//! shape and returns every violation as a typed [`Violation`] with a JSON
//! pointer path. Malformed input is data, not an error: validation itself
//! never fails. The same value is also checked against the compiled schema
//! through the `jsonschema` crate via
//! [`MetadataValidator::conformance_violations`].
//!
//! ## Catalogs (`catalog`)
//!
//! [`MetadataCatalog`] loads a directory of metadata documents, rejecting
//! the whole directory if any document is invalid, and answers family,
//! role, and auxiliary lookups.
//!
//! ## Crate Policy
//!
//! - Depends only on `bse-core` internally.
//! - Violations are reported with the instance path and the rule broken.

pub mod catalog;
pub mod schema;
pub mod validate;

pub use catalog::{CatalogError, DanglingAuxiliary, MetadataCatalog};
pub use schema::{metadata_schema, SCHEMA_NAME, SCHEMA_VERSION};
pub use validate::{
    AuxiliariesIssue, MetadataValidator, SchemaBlockIssue, SchemaValidationError,
    SchemaViolation, ValidationResult, ValidationViolations, Violation,
};
