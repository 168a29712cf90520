//! `/predict` body validation.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use irisml_core::{Classifier, FieldError, IrisError, Model, PredictionRequest};

fn field_errors(body: &str) -> Vec<FieldError> {
    match PredictionRequest::from_json_slice(body.as_bytes()) {
        Err(IrisError::Validation(errs)) => errs,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn accepts_four_positive_floats() {
    let req = PredictionRequest::from_json_slice(
        br#"{"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2}"#,
    )
    .unwrap();
    assert_eq!(req.features(), [5.1, 3.5, 1.4, 0.2]);
}

#[test]
fn accepts_integers_numeric_strings_and_extra_fields() {
    let req = PredictionRequest::from_json_slice(
        br#"{"sepal_length": 5, "sepal_width": "3.5", "petal_length": 1.4, "petal_width": 0.2, "note": "x"}"#,
    )
    .unwrap();
    assert_eq!(req.features(), [5.0, 3.5, 1.4, 0.2]);
}

#[test]
fn large_values_are_not_bounded() {
    let req = PredictionRequest::from_json_slice(
        br#"{"sepal_length": 1e300, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2}"#,
    )
    .unwrap();
    assert_eq!(req.sepal_length, 1e300);
}

#[test]
fn negative_value_is_greater_than_error() {
    let errs = field_errors(r#"{"sepal_length": -1, "sepal_width": 3, "petal_length": 1, "petal_width": 1}"#);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind, "greater_than");
    assert_eq!(errs[0].loc, vec!["body", "sepal_length"]);
    assert_eq!(errs[0].msg, "Input should be greater than 0");
}

#[test]
fn zero_is_rejected() {
    let errs = field_errors(r#"{"sepal_length": 1, "sepal_width": 0, "petal_length": 1, "petal_width": 1}"#);
    assert_eq!(errs[0].kind, "greater_than");
    assert_eq!(errs[0].loc[1], "sepal_width");
}

#[test]
fn every_failing_field_is_reported() {
    let errs = field_errors(r#"{"sepal_length": "abc", "sepal_width": null, "petal_length": 0}"#);
    let kinds: Vec<_> = errs.iter().map(|e| (e.loc[1].as_str().unwrap(), e.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            ("sepal_length", "float_parsing"),
            ("sepal_width", "float_type"),
            ("petal_length", "greater_than"),
            ("petal_width", "missing"),
        ]
    );
}

#[test]
fn malformed_json_is_json_invalid() {
    let errs = field_errors("{not json");
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind, "json_invalid");
    assert_eq!(errs[0].loc, vec![json!("body"), json!(1)]);
    assert_eq!(errs[0].input, Some(json!({})));
    assert!(errs[0].ctx.as_ref().unwrap()["error"].is_string());
}

#[test]
fn decode_error_position_is_a_byte_offset() {
    // truncated document: offset is the body length
    let body = r#"{"sepal_length": 5.1,"#;
    let errs = field_errors(body);
    assert_eq!(errs[0].loc[1], json!(body.len()));

    // trailing garbage on the second line
    let errs = field_errors("{}\n x");
    assert_eq!(errs[0].kind, "json_invalid");
    assert_eq!(errs[0].loc[1], json!(4));
}

#[test]
fn empty_body_is_missing() {
    let errs = field_errors("");
    assert_eq!(errs.len(), 1);
    let v = serde_json::to_value(&errs[0]).unwrap();
    assert_eq!(v, json!({ "type": "missing", "loc": ["body"], "msg": "Field required", "input": null }));
}

#[test]
fn whitespace_body_is_json_invalid() {
    let errs = field_errors("  ");
    assert_eq!(errs[0].kind, "json_invalid");
    assert_eq!(errs[0].loc[1], json!(2));
}

fn http_errors(content_type: Option<&str>, body: &str) -> Vec<FieldError> {
    match PredictionRequest::from_http_body(content_type, body.as_bytes()) {
        Err(IrisError::Validation(errs)) => errs,
        other => panic!("expected validation error, got {other:?}"),
    }
}

const SETOSA: &str = r#"{"sepal_length": 5.1, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2}"#;

#[test]
fn json_media_types_are_decoded() {
    for ct in [None, Some("application/json"), Some("Application/JSON; charset=utf-8"), Some("application/vnd.iris+json"), Some("")] {
        let req = PredictionRequest::from_http_body(ct, SETOSA.as_bytes()).unwrap();
        assert_eq!(req.features(), [5.1, 3.5, 1.4, 0.2], "content type {ct:?}");
    }
}

#[test]
fn non_json_media_type_fails_object_check() {
    for ct in ["text/plain", "application/x-www-form-urlencoded", "text/json", "json"] {
        let errs = http_errors(Some(ct), SETOSA);
        assert_eq!(errs.len(), 1, "content type {ct}");
        assert_eq!(errs[0].kind, "model_attributes_type");
        assert_eq!(errs[0].loc, vec!["body"]);
        assert_eq!(errs[0].input, Some(Value::from(SETOSA)));
    }
}

#[test]
fn empty_body_is_missing_whatever_the_media_type() {
    let errs = http_errors(Some("text/plain"), "");
    assert_eq!(errs[0].kind, "missing");
    assert_eq!(errs[0].input, Some(Value::Null));
}

#[test]
fn overflowing_number_decodes_to_infinity() {
    let req = PredictionRequest::from_json_slice(
        br#"{"sepal_length": 1e400, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2, "extra": [1e999]}"#,
    )
    .unwrap();
    assert_eq!(req.sepal_length, f64::INFINITY);

    // the shipped model refuses it at inference time, not at validation
    let model = Model::load(concat!(env!("CARGO_MANIFEST_DIR"), "/../../model.json")).unwrap();
    assert!(matches!(model.classify(&req.features()), Err(IrisError::Inference(_))));
}

#[test]
fn negative_overflow_fails_positivity() {
    let errs = field_errors(r#"{"sepal_length": -1e400, "sepal_width": 3.5, "petal_length": 1.4, "petal_width": 0.2}"#);
    assert_eq!(errs.len(), 1);
    assert_eq!(errs[0].kind, "greater_than");
    assert_eq!(errs[0].loc, vec!["body", "sepal_length"]);
}

#[test]
fn non_object_body_is_rejected() {
    let errs = field_errors("[5.1, 3.5, 1.4, 0.2]");
    assert_eq!(errs[0].kind, "model_attributes_type");
}

#[test]
fn validation_error_serializes_like_framework_detail() {
    let errs = field_errors(r#"{"sepal_length": -1, "sepal_width": 3, "petal_length": 1, "petal_width": 1}"#);
    let v = serde_json::to_value(&errs[0]).unwrap();
    assert_eq!(v["type"], "greater_than");
    assert_eq!(v["loc"], json!(["body", "sepal_length"]));
    assert_eq!(v["input"], json!(-1));
    assert_eq!(v["ctx"]["gt"], json!(0.0));
}
