//! # bse-core — Foundational Types for Basis Set Metadata
//!
//! Strongly typed primitives shared by every other crate in the workspace.
//! Depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed role enums.** `BasisSetRole` (5 variants) and `AuxiliaryRole`
//!    (4 variants) are the only representations of roles. Exhaustive `match`
//!    forces every consumer to handle a newly added role.
//!
//! 2. **Typed records behind validation.** `MetadataRecord` mirrors the
//!    metadata schema field for field and rejects unknown fields. Untrusted
//!    JSON goes through `bse-schema` validation first, which produces
//!    actionable diagnostics; deserialization is the last step.
//!
//! 3. **One name normalization.** Catalog keys and lookups all go through
//!    [`normalize_basis_name`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `bse-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod metadata;
pub mod role;

pub use error::BseError;
pub use metadata::{normalize_basis_name, MetadataRecord, SchemaHeader, METADATA_SCHEMA_TYPE};
pub use role::{AuxiliaryRole, BasisSetRole};
