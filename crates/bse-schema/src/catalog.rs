//! # Metadata Catalog
//!
//! A collection of validated metadata records keyed by normalized basis
//! set name. Loading is all-or-nothing: one invalid document rejects the
//! whole directory, and every failing document is reported.
//!
//! Auxiliary references are not checked at load time. Call
//! [`MetadataCatalog::dangling_auxiliaries`] to find auxiliary entries
//! whose target is not in the catalog.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use bse_core::{normalize_basis_name, AuxiliaryRole, BasisSetRole, MetadataRecord};
use thiserror::Error;

use crate::validate::{MetadataValidator, SchemaValidationError};

/// Error building or querying a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog directory could not be listed.
    #[error("cannot read catalog directory '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more documents failed to load or validate.
    #[error("{} invalid metadata document(s):\n{}", .failures.len(), render_failures(.failures))]
    InvalidRecords {
        failures: Vec<SchemaValidationError>,
    },

    /// Two records normalize to the same basis set name.
    #[error("duplicate basis set '{0}'")]
    DuplicateBasis(String),

    /// No record with the given name.
    #[error("basis set '{0}' does not exist")]
    UnknownBasis(String),

    /// No record belongs to the given family.
    #[error("family '{0}' is not a valid family")]
    UnknownFamily(String),

    /// The role string names no basis set role.
    #[error("role '{0}' is not a valid role")]
    UnknownRole(String),

    /// The primary basis has no auxiliary for the requested role.
    #[error("role {role} doesn't exist for {basis}")]
    RoleNotAvailable { basis: String, role: AuxiliaryRole },
}

fn render_failures(failures: &[SchemaValidationError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// An auxiliary entry pointing at a basis set the catalog does not contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingAuxiliary {
    /// Normalized name of the primary basis declaring the auxiliary.
    pub basis: String,
    /// Fitting role of the auxiliary entry.
    pub role: AuxiliaryRole,
    /// Auxiliary basis name as written in the record.
    pub target: String,
}

/// Validated metadata records indexed by normalized name.
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    records: BTreeMap<String, MetadataRecord>,
}

impl MetadataCatalog {
    /// Load every `*.json` document directly inside `dir`.
    ///
    /// Other files, YAML included, are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the directory cannot be listed,
    /// `CatalogError::InvalidRecords` listing every document that failed,
    /// and `CatalogError::DuplicateBasis` on a name collision.
    pub fn load(dir: &Path, validator: &MetadataValidator) -> Result<Self, CatalogError> {
        let io_error = |source: std::io::Error| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if path.is_file() && is_metadata_document(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut records = Vec::with_capacity(paths.len());
        let mut failures = Vec::new();
        for path in &paths {
            match validator.validate_file(path) {
                Ok(record) => {
                    tracing::debug!(path = %path.display(), name = %record.basis_set_name, "loaded metadata");
                    records.push(record);
                }
                Err(e) => failures.push(e),
            }
        }

        if !failures.is_empty() {
            return Err(CatalogError::InvalidRecords { failures });
        }

        let catalog = Self::from_records(records)?;
        tracing::info!(dir = %dir.display(), count = catalog.len(), "metadata catalog loaded");
        Ok(catalog)
    }

    /// Build a catalog from already-typed records.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateBasis` if two records share a
    /// normalized name.
    pub fn from_records(
        records: impl IntoIterator<Item = MetadataRecord>,
    ) -> Result<Self, CatalogError> {
        let mut map = BTreeMap::new();
        for record in records {
            let key = record.normalized_name();
            if map.contains_key(&key) {
                return Err(CatalogError::DuplicateBasis(record.basis_set_name));
            }
            map.insert(key, record);
        }
        Ok(Self { records: map })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&MetadataRecord> {
        self.records.get(&normalize_basis_name(name))
    }

    /// Normalized names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.records.keys().map(String::as_str).collect()
    }

    /// Distinct families, sorted.
    pub fn families(&self) -> Vec<&str> {
        self.records
            .values()
            .map(|r| r.basis_set_family.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Family of the named basis set.
    pub fn family_of(&self, name: &str) -> Result<&str, CatalogError> {
        self.require(name).map(|r| r.basis_set_family.as_str())
    }

    /// Records matching every given criterion. All matching is case-insensitive.
    ///
    /// `substr` matches against the basis set name.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownFamily` or `CatalogError::UnknownRole`
    /// if a criterion names something that does not exist.
    pub fn filter(
        &self,
        substr: Option<&str>,
        family: Option<&str>,
        role: Option<&str>,
    ) -> Result<Vec<&MetadataRecord>, CatalogError> {
        let family = family.map(str::to_lowercase);
        if let Some(f) = &family {
            if !self.families().iter().any(|known| known.to_lowercase() == *f) {
                return Err(CatalogError::UnknownFamily(f.clone()));
            }
        }

        let role = role
            .map(|r| {
                r.to_lowercase()
                    .parse::<BasisSetRole>()
                    .map_err(|_| CatalogError::UnknownRole(r.to_string()))
            })
            .transpose()?;

        let substr = substr.map(str::to_lowercase);

        Ok(self
            .records
            .iter()
            .filter(|(_, r)| {
                family
                    .as_deref()
                    .map_or(true, |f| r.basis_set_family.to_lowercase() == f)
            })
            .filter(|(_, r)| role.map_or(true, |role| r.basis_set_role == role))
            .filter(|(key, _)| substr.as_deref().map_or(true, |s| key.contains(s)))
            .map(|(_, r)| r)
            .collect())
    }

    /// Name of the auxiliary basis registered by `primary` for `role`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownBasis` if `primary` is not in the
    /// catalog, and `CatalogError::RoleNotAvailable` if it declares no
    /// auxiliary for `role`.
    pub fn lookup_by_role(&self, primary: &str, role: AuxiliaryRole) -> Result<&str, CatalogError> {
        let record = self.require(primary)?;
        record
            .auxiliary(role)
            .ok_or_else(|| CatalogError::RoleNotAvailable {
                basis: primary.to_string(),
                role,
            })
    }

    /// Auxiliary entries whose target basis is not in the catalog.
    pub fn dangling_auxiliaries(&self) -> Vec<DanglingAuxiliary> {
        let mut dangling = Vec::new();
        for (name, record) in &self.records {
            for (role, target) in &record.basis_set_auxiliaries {
                if self.get(target).is_none() {
                    tracing::warn!(basis = %name, %role, %target, "auxiliary basis not in catalog");
                    dangling.push(DanglingAuxiliary {
                        basis: name.clone(),
                        role: *role,
                        target: target.clone(),
                    });
                }
            }
        }
        dangling
    }

    fn require(&self, name: &str) -> Result<&MetadataRecord, CatalogError> {
        self.get(name)
            .ok_or_else(|| CatalogError::UnknownBasis(name.to_string()))
    }
}

fn is_metadata_document(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}
