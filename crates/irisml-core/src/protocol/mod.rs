//! Wire contracts for the prediction API.

pub mod predict;

pub use predict::{FieldError, PredictionRequest, PredictionResponse, FIELDS};
