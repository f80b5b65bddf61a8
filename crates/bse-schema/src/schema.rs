//! # Metadata Schema
//!
//! The draft-07 JSON Schema describing a basis set metadata document.
//! Built once per process and never mutated afterwards.
//!
//! Field names, enumerations, and the `name`/`version` identifiers must not
//! change without updating every producer of metadata documents.

use std::sync::OnceLock;

use serde_json::{json, Value};

/// Schema identifier carried in the `name` field.
pub const SCHEMA_NAME: &str = "bse_basis_metadata";

/// Schema version carried in the `version` field.
pub const SCHEMA_VERSION: &str = "0.1";

/// Draft-07 dialect URI.
pub const DRAFT_07_URI: &str = "http://json-schema.org/draft-07/schema#";

/// The six required top-level keys, in declaration order.
pub const REQUIRED_FIELDS: &[&str] = &[
    "molssi_bse_schema",
    "basis_set_name",
    "basis_set_family",
    "basis_set_description",
    "basis_set_role",
    "basis_set_auxiliaries",
];

static METADATA_SCHEMA: OnceLock<Value> = OnceLock::new();

/// Returns the metadata schema.
pub fn metadata_schema() -> &'static Value {
    METADATA_SCHEMA.get_or_init(build_schema)
}

fn build_schema() -> Value {
    json!({
        "$schema": DRAFT_07_URI,
        "name": SCHEMA_NAME,
        "version": SCHEMA_VERSION,
        "url": "https://github.com/MolSSI-BSE/basis_set_exchange",
        "description": "JSON schema for basis set metadata",
        "type": "object",
        "additionalProperties": false,
        "required": REQUIRED_FIELDS,
        "properties": {
            "molssi_bse_schema": {
                "description": "Info about which schema the file follows",
                "type": "object",
                "additionalProperties": false,
                "required": ["schema_type", "schema_version"],
                "properties": {
                    "schema_type": {
                        "description": "What type of BSE JSON file this is",
                        "type": "string",
                        "enum": ["metadata"]
                    },
                    "schema_version": {
                        "description": "Version of the BSE metadata schema being used",
                        "type": "string"
                    }
                }
            },
            "basis_set_name": {
                "description": "Name of the basis set",
                "type": "string"
            },
            "basis_set_family": {
                "description": "Family to which this basis set belongs",
                "type": "string"
            },
            "basis_set_description": {
                "description": "Brief description of the basis set",
                "type": "string"
            },
            "basis_set_role": {
                "description": "Role this basis set plays in a calculation",
                "type": "string",
                "enum": bse_core::BasisSetRole::NAMES
            },
            "basis_set_auxiliaries": {
                "description": "Auxiliary basis sets used together with this basis, by fitting role",
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "jfit": {"type": "string"},
                    "jkfit": {"type": "string"},
                    "rifit": {"type": "string"},
                    "admmfit": {"type": "string"}
                }
            }
        }
    })
}
