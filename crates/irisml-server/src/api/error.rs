//! HTTP error mapping.
//!
//! Bodies always carry a `detail` field: a list of field errors for
//! validation failures, a plain message otherwise.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use irisml_core::{FieldError, IrisError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Inference(String),
    #[error("Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Internal Server Error")]
    Internal,
}

impl From<IrisError> for ApiError {
    fn from(e: IrisError) -> Self {
        match e {
            IrisError::Validation(errs) => ApiError::Validation(errs),
            IrisError::Inference(msg) => ApiError::Inference(msg),
            other => {
                tracing::error!(code = other.client_code().as_str(), error = %other, "unexpected error in handler");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = match self {
            ApiError::Validation(errs) => Json(json!({ "detail": errs })),
            other => Json(json!({ "detail": other.to_string() })),
        };
        (status, body).into_response()
    }
}
