//! # Metadata Records
//!
//! Typed form of a basis set metadata document. The struct layout mirrors
//! the metadata schema exactly: six required top-level fields, no extras.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BseError;
use crate::role::{AuxiliaryRole, BasisSetRole};

/// Required value of `molssi_bse_schema.schema_type` for metadata documents.
pub const METADATA_SCHEMA_TYPE: &str = "metadata";

/// The `molssi_bse_schema` block identifying the document type and version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaHeader {
    /// Always `"metadata"` for a valid record.
    pub schema_type: String,
    /// Free-form schema version string.
    pub schema_version: String,
}

impl SchemaHeader {
    /// A metadata header with the given version.
    pub fn metadata(schema_version: impl Into<String>) -> Self {
        Self {
            schema_type: METADATA_SCHEMA_TYPE.to_string(),
            schema_version: schema_version.into(),
        }
    }
}

/// A basis set metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataRecord {
    pub molssi_bse_schema: SchemaHeader,
    pub basis_set_name: String,
    pub basis_set_family: String,
    pub basis_set_description: String,
    pub basis_set_role: BasisSetRole,
    /// Companion basis names keyed by fitting role. Names are not checked
    /// against any catalog here.
    pub basis_set_auxiliaries: BTreeMap<AuxiliaryRole, String>,
}

impl MetadataRecord {
    /// The basis name used as a catalog key.
    pub fn normalized_name(&self) -> String {
        normalize_basis_name(&self.basis_set_name)
    }

    /// Name of the auxiliary basis registered for `role`, if any.
    pub fn auxiliary(&self, role: AuxiliaryRole) -> Option<&str> {
        self.basis_set_auxiliaries.get(&role).map(String::as_str)
    }

    /// Serialize back into a JSON value.
    pub fn to_value(&self) -> Result<Value, BseError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Normalize a basis set name for comparison: names are case-insensitive.
pub fn normalize_basis_name(name: &str) -> String {
    name.to_lowercase()
}
