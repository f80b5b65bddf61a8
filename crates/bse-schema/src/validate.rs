//! # Metadata Validation
//!
//! Structural validation of basis set metadata documents.
//!
//! ## Reporting Policy
//!
//! Every violation is reported, never just the first. Violations are grouped
//! by rule in a fixed order:
//!
//! 1. the document is not an object (reported alone; nothing else is checked)
//! 2. missing required fields, in declaration order
//! 3. undeclared top-level fields, in key order
//! 4. problems inside `molssi_bse_schema`
//! 5. non-string `basis_set_name`, `basis_set_family`, `basis_set_description`
//! 6. `basis_set_role` outside the role enumeration
//! 7. problems inside `basis_set_auxiliaries`
//!
//! Validation is pure: no I/O, no shared mutable state, and identical input
//! always yields an identical violation list.
//!
//! ## Draft-07 Conformance
//!
//! [`MetadataValidator`] also compiles the embedded schema with the
//! `jsonschema` crate. A document has no structural violations exactly when
//! it conforms to the schema; `conformance_violations` exposes the raw
//! draft-07 errors for tooling that wants schema paths.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bse_core::{AuxiliaryRole, BasisSetRole, MetadataRecord, METADATA_SCHEMA_TYPE};
use jsonschema::Validator;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::schema::{metadata_schema, REQUIRED_FIELDS, SCHEMA_NAME};

const SCHEMA_BLOCK: &str = "molssi_bse_schema";
const ROLE_FIELD: &str = "basis_set_role";
const AUXILIARIES_FIELD: &str = "basis_set_auxiliaries";
const STRING_FIELDS: &[&str] = &["basis_set_name", "basis_set_family", "basis_set_description"];
const SCHEMA_BLOCK_KEYS: &[&str] = &["schema_type", "schema_version"];

/// Error during metadata validation or document loading.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The document did not conform to the metadata shape.
    #[error("validation failed for '{source_name}':\n{violations}")]
    ValidationFailed {
        /// File path or caller-supplied label of the document.
        source_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The compiled draft-07 validator could not be built.
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Schema identifier.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// A document that passed validation could not be converted to a record.
    #[error("record conversion error for '{source_name}': {reason}")]
    RecordConversion {
        /// File path or caller-supplied label of the document.
        source_name: String,
        /// Underlying deserialization failure.
        reason: String,
    },
}

/// Problem inside the `molssi_bse_schema` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaBlockIssue {
    /// The block is not an object.
    NotAnObject { found: &'static str },
    /// `schema_type` or `schema_version` is absent.
    MissingKey(String),
    /// A key other than `schema_type` and `schema_version`.
    UnexpectedKey(String),
    /// `schema_type` or `schema_version` is not a string.
    NotAString { key: String, found: &'static str },
    /// `schema_type` is a string other than `"metadata"`.
    WrongSchemaType(String),
}

/// Problem inside the `basis_set_auxiliaries` object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuxiliariesIssue {
    /// The auxiliaries value is not an object.
    NotAnObject { found: &'static str },
    /// A key that is not one of the auxiliary roles.
    UnknownRole(String),
    /// An auxiliary basis name that is not a string.
    NotAString { role: String, found: &'static str },
}

/// A single rule broken by a metadata document.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// A value has the wrong JSON type. `field` is `None` for the document root.
    TypeMismatch {
        field: Option<String>,
        expected: &'static str,
        found: &'static str,
    },
    /// A required top-level field is absent.
    MissingField(String),
    /// A top-level field outside the six declared ones.
    UnexpectedField(String),
    /// The `molssi_bse_schema` block is malformed.
    InvalidSchemaBlock(SchemaBlockIssue),
    /// A value outside a closed enumeration.
    InvalidEnum {
        field: String,
        value: Value,
        allowed: &'static [&'static str],
    },
    /// The `basis_set_auxiliaries` object is malformed.
    InvalidAuxiliaries(AuxiliariesIssue),
    /// Strict mode only: the family contains uppercase characters.
    FamilyNotLowercase(String),
}

impl Violation {
    /// JSON Pointer to the offending location in the document.
    pub fn path(&self) -> String {
        match self {
            Self::TypeMismatch { field: None, .. } => String::new(),
            Self::TypeMismatch { field: Some(f), .. } => pointer(&[f]),
            Self::MissingField(f) => pointer(&[f]),
            Self::UnexpectedField(f) => pointer(&[f]),
            Self::InvalidSchemaBlock(issue) => match issue {
                SchemaBlockIssue::NotAnObject { .. } | SchemaBlockIssue::MissingKey(_) => {
                    pointer(&[SCHEMA_BLOCK])
                }
                SchemaBlockIssue::UnexpectedKey(k) | SchemaBlockIssue::NotAString { key: k, .. } => {
                    pointer(&[SCHEMA_BLOCK, k.as_str()])
                }
                SchemaBlockIssue::WrongSchemaType(_) => pointer(&[SCHEMA_BLOCK, "schema_type"]),
            },
            Self::InvalidEnum { field, .. } => pointer(&[field]),
            Self::InvalidAuxiliaries(issue) => match issue {
                AuxiliariesIssue::NotAnObject { .. } => pointer(&[AUXILIARIES_FIELD]),
                AuxiliariesIssue::UnknownRole(k) | AuxiliariesIssue::NotAString { role: k, .. } => {
                    pointer(&[AUXILIARIES_FIELD, k.as_str()])
                }
            },
            Self::FamilyNotLowercase(_) => pointer(&["basis_set_family"]),
        }
    }

    /// Short name of the rule that was broken.
    pub fn rule(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::MissingField(_) => "missing_field",
            Self::UnexpectedField(_) => "unexpected_field",
            Self::InvalidSchemaBlock(_) => "invalid_schema_block",
            Self::InvalidEnum { .. } => "invalid_enum",
            Self::InvalidAuxiliaries(_) => "invalid_auxiliaries",
            Self::FamilyNotLowercase(_) => "family_not_lowercase",
        }
    }

    /// Human-readable description, without the location.
    pub fn message(&self) -> String {
        match self {
            Self::TypeMismatch {
                expected, found, ..
            } => format!("expected {expected}, found {found}"),
            Self::MissingField(f) => format!("missing required field \"{f}\""),
            Self::UnexpectedField(f) => format!("field \"{f}\" is not permitted"),
            Self::InvalidSchemaBlock(issue) => match issue {
                SchemaBlockIssue::NotAnObject { found } => {
                    format!("schema block must be an object, found {found}")
                }
                SchemaBlockIssue::MissingKey(k) => {
                    format!("schema block is missing required key \"{k}\"")
                }
                SchemaBlockIssue::UnexpectedKey(k) => {
                    format!("schema block key \"{k}\" is not permitted")
                }
                SchemaBlockIssue::NotAString { found, .. } => {
                    format!("expected string, found {found}")
                }
                SchemaBlockIssue::WrongSchemaType(t) => {
                    format!("schema type must be \"{METADATA_SCHEMA_TYPE}\", found \"{t}\"")
                }
            },
            Self::InvalidEnum { value, allowed, .. } => {
                format!("{value} is not one of [{}]", allowed.join(", "))
            }
            Self::InvalidAuxiliaries(issue) => match issue {
                AuxiliariesIssue::NotAnObject { found } => {
                    format!("auxiliaries must be an object, found {found}")
                }
                AuxiliariesIssue::UnknownRole(k) => format!(
                    "\"{k}\" is not an auxiliary role (expected one of [{}])",
                    AuxiliaryRole::NAMES.join(", ")
                ),
                AuxiliariesIssue::NotAString { found, .. } => {
                    format!("auxiliary basis name must be a string, found {found}")
                }
            },
            Self::FamilyNotLowercase(f) => format!("family \"{f}\" is not lowercase"),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path();
        if path.is_empty() {
            write!(f, "  (root): {}", self.message())
        } else {
            write!(f, "  {path}: {}", self.message())
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl From<Vec<Violation>> for ValidationViolations {
    fn from(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid,
    Invalid(ValidationViolations),
}

impl ValidationResult {
    fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(violations.into())
        }
    }

    /// Returns true for [`ValidationResult::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// All violations; empty when valid.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Valid => &[],
            Self::Invalid(v) => v.violations(),
        }
    }

    /// Convert into a `Result`, labelling failures with `source_name`.
    pub fn into_result(self, source_name: &str) -> Result<(), SchemaValidationError> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(violations) => Err(SchemaValidationError::ValidationFailed {
                source_name: source_name.to_string(),
                violations,
            }),
        }
    }
}

/// A raw draft-07 error reported by the compiled schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON Pointer path to the violating value in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    /// Human-readable description from the validator.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Validate a document against the metadata shape.
///
/// Stateless; equivalent to a non-strict [`MetadataValidator::validate`].
pub fn validate(record: &Value) -> ValidationResult {
    ValidationResult::from_violations(structural_violations(record))
}

/// Metadata validator with a compiled draft-07 schema.
///
/// `Send + Sync`: a single instance can be shared across threads. The
/// schema is compiled once at construction.
pub struct MetadataValidator {
    strict: bool,
    conformance: Validator,
}

impl fmt::Debug for MetadataValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataValidator")
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

impl MetadataValidator {
    /// Compile the embedded metadata schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if the schema
    /// cannot be compiled.
    pub fn new() -> Result<Self, SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft7);
        let conformance = opts.build(metadata_schema()).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: SCHEMA_NAME.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            strict: false,
            conformance,
        })
    }

    /// Enable or disable curation rules on top of the structural checks.
    ///
    /// Strict mode additionally requires `basis_set_family` to be lowercase.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate a parsed JSON value, reporting every violation.
    pub fn validate(&self, record: &Value) -> ValidationResult {
        let mut violations = structural_violations(record);
        if self.strict {
            violations.extend(curation_violations(record));
        }
        ValidationResult::from_violations(violations)
    }

    /// Check a value against the compiled draft-07 schema.
    pub fn conformance_violations(&self, record: &Value) -> Vec<SchemaViolation> {
        self.conformance
            .iter_errors(record)
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    /// Returns true if the value conforms to the draft-07 schema.
    pub fn is_conformant(&self, record: &Value) -> bool {
        self.conformance.is_valid(record)
    }

    /// Validate a value and convert it into a typed record.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with every
    /// violation if the value is not a valid metadata document.
    pub fn validate_value(
        &self,
        record: &Value,
        source_name: &str,
    ) -> Result<MetadataRecord, SchemaValidationError> {
        self.validate(record).into_result(source_name)?;
        serde_json::from_value(record.clone()).map_err(|e| {
            SchemaValidationError::RecordConversion {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            }
        })
    }

    /// Load a metadata document from disk, validate it, and convert it.
    ///
    /// `.yaml`/`.yml` files are parsed as YAML; anything else as JSON.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::DocumentLoadError` if the file cannot
    /// be read or parsed, and `SchemaValidationError::ValidationFailed` if
    /// the document is not valid.
    pub fn validate_file(&self, path: &Path) -> Result<MetadataRecord, SchemaValidationError> {
        let value = load_document(path)?;
        self.validate_value(&value, &path.display().to_string())
    }
}

/// Read a JSON or YAML document into a JSON value.
///
/// # Errors
///
/// Returns `SchemaValidationError::DocumentLoadError` if the file cannot be
/// read or is not well-formed.
pub fn load_document(path: &Path) -> Result<Value, SchemaValidationError> {
    let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
        path: path.display().to_string(),
        reason,
    };

    let content =
        std::fs::read_to_string(path).map_err(|e| load_error(format!("cannot read file: {e}")))?;

    match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .map_err(|e| load_error(format!("invalid YAML: {e}"))),
        _ => serde_json::from_str(&content).map_err(|e| load_error(format!("invalid JSON: {e}"))),
    }
}

fn structural_violations(record: &Value) -> Vec<Violation> {
    let Some(obj) = record.as_object() else {
        return vec![Violation::TypeMismatch {
            field: None,
            expected: "object",
            found: json_type_name(record),
        }];
    };

    let mut violations = Vec::new();

    for field in REQUIRED_FIELDS {
        if !obj.contains_key(*field) {
            violations.push(Violation::MissingField(field.to_string()));
        }
    }

    for key in obj.keys() {
        if !REQUIRED_FIELDS.contains(&key.as_str()) {
            violations.push(Violation::UnexpectedField(key.clone()));
        }
    }

    if let Some(block) = obj.get(SCHEMA_BLOCK) {
        check_schema_block(block, &mut violations);
    }

    for field in STRING_FIELDS {
        if let Some(value) = obj.get(*field) {
            if !value.is_string() {
                violations.push(Violation::TypeMismatch {
                    field: Some(field.to_string()),
                    expected: "string",
                    found: json_type_name(value),
                });
            }
        }
    }

    if let Some(role) = obj.get(ROLE_FIELD) {
        let known = role
            .as_str()
            .is_some_and(|r| BasisSetRole::from_str(r).is_ok());
        if !known {
            violations.push(Violation::InvalidEnum {
                field: ROLE_FIELD.to_string(),
                value: role.clone(),
                allowed: BasisSetRole::NAMES,
            });
        }
    }

    if let Some(aux) = obj.get(AUXILIARIES_FIELD) {
        check_auxiliaries(aux, &mut violations);
    }

    violations
}

fn check_schema_block(block: &Value, violations: &mut Vec<Violation>) {
    let Some(block) = block.as_object() else {
        violations.push(Violation::InvalidSchemaBlock(SchemaBlockIssue::NotAnObject {
            found: json_type_name(block),
        }));
        return;
    };

    for key in SCHEMA_BLOCK_KEYS {
        if !block.contains_key(*key) {
            violations.push(Violation::InvalidSchemaBlock(SchemaBlockIssue::MissingKey(
                key.to_string(),
            )));
        }
    }

    for key in block.keys() {
        if !SCHEMA_BLOCK_KEYS.contains(&key.as_str()) {
            violations.push(Violation::InvalidSchemaBlock(SchemaBlockIssue::UnexpectedKey(
                key.clone(),
            )));
        }
    }

    for key in SCHEMA_BLOCK_KEYS {
        match block.get(*key) {
            Some(Value::String(_)) | None => {}
            Some(other) => violations.push(Violation::InvalidSchemaBlock(
                SchemaBlockIssue::NotAString {
                    key: key.to_string(),
                    found: json_type_name(other),
                },
            )),
        }
    }

    if let Some(schema_type) = block.get("schema_type").and_then(Value::as_str) {
        if schema_type != METADATA_SCHEMA_TYPE {
            violations.push(Violation::InvalidSchemaBlock(
                SchemaBlockIssue::WrongSchemaType(schema_type.to_string()),
            ));
        }
    }
}

fn check_auxiliaries(aux: &Value, violations: &mut Vec<Violation>) {
    let Some(aux) = aux.as_object() else {
        violations.push(Violation::InvalidAuxiliaries(AuxiliariesIssue::NotAnObject {
            found: json_type_name(aux),
        }));
        return;
    };

    for (key, value) in aux {
        if AuxiliaryRole::from_str(key).is_err() {
            violations.push(Violation::InvalidAuxiliaries(AuxiliariesIssue::UnknownRole(
                key.clone(),
            )));
        } else if !value.is_string() {
            violations.push(Violation::InvalidAuxiliaries(AuxiliariesIssue::NotAString {
                role: key.clone(),
                found: json_type_name(value),
            }));
        }
    }
}

fn curation_violations(record: &Value) -> Vec<Violation> {
    let family = record
        .as_object()
        .and_then(|obj: &Map<String, Value>| obj.get("basis_set_family"))
        .and_then(Value::as_str);

    match family {
        Some(f) if f.chars().any(char::is_uppercase) => {
            vec![Violation::FamilyNotLowercase(f.to_string())]
        }
        _ => Vec::new(),
    }
}

/// JSON type name as used in schema `type` keywords.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build a JSON Pointer (RFC 6901) from raw segments.
fn pointer<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| format!("/{}", s.as_ref().replace('~', "~0").replace('/', "~1")))
        .collect()
}
