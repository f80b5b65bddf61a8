//! Integration tests: metadata document validation.
//!
//! Covers the reference scenarios (valid minimal record, auxiliaries, bad
//! role, missing field, bad auxiliary key) and property tests over generated
//! records. Every structural verdict is cross-checked against the compiled
//! draft-07 schema.

use bse_core::{AuxiliaryRole, BasisSetRole};
use bse_schema::schema::REQUIRED_FIELDS;
use bse_schema::{
    AuxiliariesIssue, MetadataValidator, ValidationResult, ValidationViolations, Violation,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn minimal_record() -> Value {
    json!({
        "molssi_bse_schema": {"schema_type": "metadata", "schema_version": "1"},
        "basis_set_name": "cc-pVDZ",
        "basis_set_family": "cc",
        "basis_set_description": "Dunning correlation-consistent",
        "basis_set_role": "orbital",
        "basis_set_auxiliaries": {}
    })
}

fn invalid(violations: Vec<Violation>) -> ValidationResult {
    ValidationResult::Invalid(ValidationViolations::from(violations))
}

/// Validate and assert the draft-07 schema agrees on validity.
fn check(validator: &MetadataValidator, doc: &Value) -> ValidationResult {
    let result = validator.validate(doc);
    assert_eq!(
        result.is_valid(),
        validator.is_conformant(doc),
        "structural verdict disagrees with draft-07 schema for {doc}: {:?} vs {:?}",
        result,
        validator.conformance_violations(doc)
    );
    result
}

#[test]
fn scenario_valid_minimal_record() {
    let validator = MetadataValidator::new().unwrap();
    assert_eq!(check(&validator, &minimal_record()), ValidationResult::Valid);
}

#[test]
fn scenario_valid_with_auxiliaries() {
    let validator = MetadataValidator::new().unwrap();
    let mut doc = minimal_record();
    doc["basis_set_auxiliaries"] = json!({"jkfit": "cc-pVDZ-jkfit"});
    assert_eq!(check(&validator, &doc), ValidationResult::Valid);
}

#[test]
fn scenario_bad_role() {
    let validator = MetadataValidator::new().unwrap();
    let mut doc = minimal_record();
    doc["basis_set_role"] = json!("bogus");
    assert_eq!(
        check(&validator, &doc),
        invalid(vec![Violation::InvalidEnum {
            field: "basis_set_role".to_string(),
            value: json!("bogus"),
            allowed: &["orbital", "rifit", "jkfit", "jfit", "admmfit"],
        }])
    );
}

#[test]
fn scenario_missing_family() {
    let validator = MetadataValidator::new().unwrap();
    let mut doc = minimal_record();
    doc.as_object_mut().unwrap().remove("basis_set_family");
    assert_eq!(
        check(&validator, &doc),
        invalid(vec![Violation::MissingField("basis_set_family".to_string())])
    );
}

#[test]
fn scenario_bad_auxiliary_key() {
    let validator = MetadataValidator::new().unwrap();
    let mut doc = minimal_record();
    doc["basis_set_auxiliaries"] = json!({"foo": "x"});
    assert_eq!(
        check(&validator, &doc),
        invalid(vec![Violation::InvalidAuxiliaries(AuxiliariesIssue::UnknownRole(
            "foo".to_string()
        ))])
    );
}

#[test]
fn every_role_accepted() {
    let validator = MetadataValidator::new().unwrap();
    for role in BasisSetRole::all() {
        let mut doc = minimal_record();
        doc["basis_set_role"] = json!(role.as_str());
        assert!(check(&validator, &doc).is_valid(), "role {role} rejected");
    }
}

#[test]
fn all_auxiliaries_accepted() {
    let validator = MetadataValidator::new().unwrap();
    let mut doc = minimal_record();
    doc["basis_set_auxiliaries"] = json!({
        "jfit": "def2-universal-jfit",
        "jkfit": "def2-universal-jkfit",
        "rifit": "def2-svp-rifit",
        "admmfit": "admm-1"
    });
    assert!(check(&validator, &doc).is_valid());
}

#[test]
fn wrong_schema_type_rejected_by_both() {
    let validator = MetadataValidator::new().unwrap();
    let mut doc = minimal_record();
    doc["molssi_bse_schema"]["schema_type"] = json!("component");
    let result = check(&validator, &doc);
    assert_eq!(result.violations().len(), 1);
    assert_eq!(result.violations()[0].rule(), "invalid_schema_block");
}

#[test]
fn non_objects_rejected_by_both() {
    let validator = MetadataValidator::new().unwrap();
    for doc in [json!(null), json!([]), json!("x"), json!(1.5), json!(false)] {
        let result = check(&validator, &doc);
        assert_eq!(result.violations()[0].rule(), "type_mismatch");
    }
}

/// Strategy producing valid metadata documents.
fn valid_record() -> impl Strategy<Value = Value> {
    let role = prop::sample::select(BasisSetRole::NAMES.to_vec());
    let aux = prop::collection::btree_map(
        prop::sample::select(AuxiliaryRole::NAMES.to_vec()),
        "[A-Za-z0-9-]{1,16}",
        0..=4,
    );
    (
        "[A-Za-z0-9.]{0,8}",
        "[A-Za-z0-9*+-]{1,16}",
        "[a-z0-9]{1,10}",
        "[ -~]{0,40}",
        role,
        aux,
    )
        .prop_map(|(version, name, family, description, role, aux)| {
            let aux: serde_json::Map<String, Value> = aux
                .into_iter()
                .map(|(k, v)| (k.to_string(), Value::String(v)))
                .collect();
            json!({
                "molssi_bse_schema": {"schema_type": "metadata", "schema_version": version},
                "basis_set_name": name,
                "basis_set_family": family,
                "basis_set_description": description,
                "basis_set_role": role,
                "basis_set_auxiliaries": aux
            })
        })
}

proptest! {
    /// Every record satisfying the invariants is valid.
    #[test]
    fn valid_records_are_valid(doc in valid_record()) {
        let validator = MetadataValidator::new().unwrap();
        prop_assert!(validator.validate(&doc).is_valid());
        prop_assert!(validator.is_conformant(&doc));
    }

    /// Removing one required field reports exactly that field as missing.
    #[test]
    fn missing_field_reported_exactly(
        doc in valid_record(),
        field in prop::sample::select(REQUIRED_FIELDS.to_vec()),
    ) {
        let validator = MetadataValidator::new().unwrap();
        let mut doc = doc;
        doc.as_object_mut().unwrap().remove(field);
        let result = validator.validate(&doc);
        prop_assert_eq!(result.violations(), &[Violation::MissingField(field.to_string())]);
        prop_assert!(!validator.is_conformant(&doc));
    }

    /// A seventh, undeclared top-level key is reported.
    #[test]
    fn extra_field_reported(doc in valid_record(), key in "[a-z_]{1,12}") {
        prop_assume!(!REQUIRED_FIELDS.contains(&key.as_str()));
        let validator = MetadataValidator::new().unwrap();
        let mut doc = doc;
        doc[key.as_str()] = json!(true);
        let result = validator.validate(&doc);
        prop_assert_eq!(result.violations(), &[Violation::UnexpectedField(key.clone())]);
        prop_assert!(!validator.is_conformant(&doc));
    }

    /// Roles outside the enumeration are reported as invalid enum values.
    #[test]
    fn unknown_role_reported(doc in valid_record(), role in "[a-z]{1,10}") {
        prop_assume!(!BasisSetRole::NAMES.contains(&role.as_str()));
        let validator = MetadataValidator::new().unwrap();
        let mut doc = doc;
        doc["basis_set_role"] = json!(role);
        let result = validator.validate(&doc);
        prop_assert_eq!(result.violations().len(), 1);
        prop_assert_eq!(result.violations()[0].rule(), "invalid_enum");
        prop_assert!(!validator.is_conformant(&doc));
    }

    /// Auxiliary keys outside the fitting roles are reported.
    #[test]
    fn unknown_auxiliary_reported(doc in valid_record(), key in "[a-z]{1,10}") {
        prop_assume!(!AuxiliaryRole::NAMES.contains(&key.as_str()));
        let validator = MetadataValidator::new().unwrap();
        let mut doc = doc;
        doc["basis_set_auxiliaries"][key.as_str()] = json!("x");
        let result = validator.validate(&doc);
        let expected = Violation::InvalidAuxiliaries(AuxiliariesIssue::UnknownRole(key.clone()));
        prop_assert!(result.violations().contains(&expected));
        prop_assert!(!validator.is_conformant(&doc));
    }

    /// Validation is pure: the same input always yields the same result.
    #[test]
    fn validation_is_idempotent(doc in valid_record(), drop in 0usize..6) {
        let validator = MetadataValidator::new().unwrap();
        let mut doc = doc;
        doc.as_object_mut().unwrap().remove(REQUIRED_FIELDS[drop]);
        doc["basis_set_role"] = json!("bogus");
        prop_assert_eq!(validator.validate(&doc), validator.validate(&doc));
    }
}

#[test]
fn validator_shared_across_threads() {
    let validator = std::sync::Arc::new(MetadataValidator::new().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let validator = std::sync::Arc::clone(&validator);
            std::thread::spawn(move || {
                let mut doc = minimal_record();
                if i % 2 == 1 {
                    doc["basis_set_role"] = json!("bogus");
                }
                validator.validate(&doc).is_valid()
            })
        })
        .collect();
    let verdicts: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(verdicts, vec![true, false, true, false]);
}
