//! Shared error type across irisml crates.

use thiserror::Error;

use crate::protocol::FieldError;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Request body failed schema validation.
    Validation,
    /// Model evaluation failed.
    Inference,
    /// Model artifact could not be loaded.
    Load,
    /// Configuration missing or invalid.
    Config,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and error bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::Validation => "VALIDATION",
            ClientCode::Inference => "INFERENCE",
            ClientCode::Load => "LOAD",
            ClientCode::Config => "CONFIG",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, IrisError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum IrisError {
    #[error("validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("{0}")]
    Inference(String),
    #[error("model load failed: {0}")]
    Load(String),
    #[error("config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl IrisError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            IrisError::Validation(_) => ClientCode::Validation,
            IrisError::Inference(_) => ClientCode::Inference,
            IrisError::Load(_) => ClientCode::Load,
            IrisError::Config(_) => ClientCode::Config,
            IrisError::Internal(_) => ClientCode::Internal,
        }
    }
}
