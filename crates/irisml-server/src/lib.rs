//! irisml server library entry.
//!
//! This crate wires the model adapter, the metrics registry, and the HTTP
//! handlers into an axum router. It is consumed by the binary (`main.rs`) and
//! by integration tests.

pub mod api;
pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
