//! `/predict` request/response contract.
//!
//! Validation collects every failing field instead of stopping at the first,
//! and reports each as a `{type, loc, msg, input}` item.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{json, Map, Value};

use crate::error::{IrisError, Result};
use crate::model::{Features, N_FEATURES};

/// Request field names, in feature order.
pub const FIELDS: [&str; N_FEATURES] = ["sepal_length", "sepal_width", "petal_length", "petal_width"];

/// Four Iris measurements in centimeters. All strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

/// Predicted class index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub prediction: i64,
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Path to the failing input: `"body"`, then a field name or a byte offset.
    pub loc: Vec<Value>,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctx: Option<Value>,
}

impl FieldError {
    fn body(kind: &'static str, msg: &str, input: Option<Value>, ctx: Option<Value>) -> Self {
        Self { kind, loc: vec![Value::from("body")], msg: msg.to_string(), input, ctx }
    }

    fn field(kind: &'static str, field: &str, msg: &str, input: Value) -> Self {
        Self {
            kind,
            loc: vec![Value::from("body"), Value::from(field)],
            msg: msg.to_string(),
            input: Some(input),
            ctx: None,
        }
    }
}

impl PredictionRequest {
    /// Parse and validate a body as received over HTTP.
    ///
    /// The body is decoded as JSON only when `content_type` is absent or a JSON
    /// media type (`application/json`, `application/*+json`). Any other type is
    /// validated as a raw string and fails the object check.
    pub fn from_http_body(content_type: Option<&str>, body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Err(missing_body());
        }
        match content_type {
            Some(ct) if !is_json_media_type(ct) => {
                Self::from_value(&Value::String(String::from_utf8_lossy(body).into_owned()))
            }
            _ => Self::from_json_slice(body),
        }
    }

    /// Parse and validate a raw JSON body.
    ///
    /// Number literals beyond `f64` range decode to infinities instead of
    /// failing the whole document.
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        if body.is_empty() {
            return Err(missing_body());
        }
        let raw: Box<RawValue> = serde_json::from_slice(body).map_err(|e| {
            IrisError::Validation(vec![FieldError {
                kind: "json_invalid",
                loc: vec![Value::from("body"), Value::from(decode_position(body, &e))],
                msg: "JSON decode error".to_string(),
                input: Some(json!({})),
                ctx: Some(json!({ "error": e.to_string() })),
            }])
        })?;
        let value = match serde_json::from_str::<Value>(raw.get()) {
            Ok(v) => v,
            Err(_) => overflowing_value(&raw),
        };
        Self::from_value(&value)
    }

    /// Validate an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            IrisError::Validation(vec![FieldError::body(
                "model_attributes_type",
                "Input should be a valid dictionary or object to extract fields from",
                Some(value.clone()),
                None,
            )])
        })?;

        let mut errors = Vec::new();
        let mut features: Features = [0.0; N_FEATURES];
        for (slot, name) in features.iter_mut().zip(FIELDS) {
            match positive_field(obj, name) {
                Ok(v) => *slot = v,
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(IrisError::Validation(errors));
        }

        let [sepal_length, sepal_width, petal_length, petal_width] = features;
        Ok(Self { sepal_length, sepal_width, petal_length, petal_width })
    }

    /// Feature vector in model input order.
    pub fn features(&self) -> Features {
        [self.sepal_length, self.sepal_width, self.petal_length, self.petal_width]
    }
}

fn positive_field(obj: &Map<String, Value>, name: &str) -> std::result::Result<f64, FieldError> {
    let raw = match obj.get(name) {
        Some(v) => v,
        None => {
            return Err(FieldError::field(
                "missing",
                name,
                "Field required",
                Value::Object(obj.clone()),
            ))
        }
    };

    let v = match raw {
        Value::Number(n) => n.as_f64(),
        // lax mode: numeric strings are coerced
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                return Err(FieldError::field(
                    "float_parsing",
                    name,
                    "Input should be a valid number, unable to parse string as a number",
                    raw.clone(),
                ))
            }
        },
        _ => None,
    };

    let v = v.ok_or_else(|| {
        FieldError::field("float_type", name, "Input should be a valid number", raw.clone())
    })?;

    if v.is_nan() || v <= 0.0 {
        let mut err = FieldError::field("greater_than", name, "Input should be greater than 0", raw.clone());
        err.ctx = Some(json!({ "gt": 0.0 }));
        return Err(err);
    }
    Ok(v)
}

fn missing_body() -> IrisError {
    IrisError::Validation(vec![FieldError::body("missing", "Field required", Some(Value::Null), None)])
}

/// `application/json` or any `application/*+json`, parameters ignored.
/// A blank header counts as absent.
fn is_json_media_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    if essence.is_empty() {
        return true;
    }
    match essence.split_once('/') {
        Some((main, sub)) => main == "application" && (sub == "json" || sub.ends_with("+json")),
        None => false,
    }
}

/// Byte offset of a decode error. EOF errors point one past the last byte.
fn decode_position(body: &[u8], e: &serde_json::Error) -> usize {
    if e.is_eof() {
        return body.len();
    }
    let line_start: usize = body
        .split(|b| *b == b'\n')
        .take(e.line().saturating_sub(1))
        .map(|line| line.len() + 1)
        .sum();
    (line_start + e.column().saturating_sub(1)).min(body.len())
}

/// Syntactically valid JSON that `Value` refuses: a number literal overflowed
/// `f64`. Top-level members are decoded one by one and an overflowed number
/// becomes the string `"inf"`/`"-inf"`, which the lax float rule reads back as
/// an infinity. Anything else that still fails decodes as `null`.
fn overflowing_value(raw: &RawValue) -> Value {
    let Ok(members) = serde_json::from_str::<BTreeMap<String, Box<RawValue>>>(raw.get()) else {
        return Value::String(raw.get().to_string());
    };
    let obj = members
        .into_iter()
        .map(|(k, v)| {
            let decoded = serde_json::from_str::<Value>(v.get()).unwrap_or_else(|_| match v.get().parse::<f64>() {
                Ok(f) if f.is_infinite() => Value::from(if f > 0.0 { "inf" } else { "-inf" }),
                _ => Value::Null,
            });
            (k, decoded)
        })
        .collect::<Map<String, Value>>();
    Value::Object(obj)
}
