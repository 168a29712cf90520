//! Axum router wiring.
//!
//! `/` and `/metrics` are operational; `/predict` is the only API route.
//! Unknown paths and wrong methods get JSON `detail` bodies.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::root).fallback(ops::method_not_allowed))
        .route("/predict", post(api::predict).fallback(ops::method_not_allowed))
        .route("/metrics", get(ops::metrics).fallback(ops::method_not_allowed))
        .fallback(ops::not_found)
        .with_state(state)
}
