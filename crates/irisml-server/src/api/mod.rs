//! Prediction API handlers.

pub mod error;
pub mod predict;

pub use error::ApiError;
pub use predict::predict;
