//! irisml core: request schema, model adapter, and error types.
//!
//! This crate defines the prediction contract and the classifier seam shared
//! by the HTTP server and tests. It carries no transport or runtime
//! dependencies so the model adapter can be reused outside the server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed requests and broken artifacts surface as `IrisError`, never as a
//! crashed worker.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod protocol;

/// Shared result type.
pub use error::{ClientCode, IrisError, Result};
pub use model::{Classifier, Features, Model, N_FEATURES};
pub use protocol::{FieldError, PredictionRequest, PredictionResponse};
