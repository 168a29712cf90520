//! Shared application state for the prediction service.
//!
//! The model and the metrics registry are built once at startup and handed
//! to every handler through `Arc`s. Handlers only ever see `&` access.

use std::sync::Arc;

use irisml_core::error::Result;
use irisml_core::{Classifier, Model};

use crate::config::ServiceConfig;
use crate::obs::ApiMetrics;

#[derive(Clone)]
pub struct AppState {
    model: Arc<dyn Classifier>,
    metrics: Arc<ApiMetrics>,
}

impl AppState {
    /// Wire an already-loaded classifier and registry.
    pub fn new(model: Arc<dyn Classifier>, metrics: Arc<ApiMetrics>) -> Self {
        Self { model, metrics }
    }

    /// Load the model artifact named by config.
    /// Returns Result so main can exit non-zero instead of serving without a model.
    pub fn from_config(cfg: &ServiceConfig) -> Result<Self> {
        let model = Model::load(&cfg.model.path)?;
        tracing::info!(path = %cfg.model.path, model = %model.name(), kind = model.kind(), "model loaded");
        Ok(Self::new(Arc::new(model), Arc::new(ApiMetrics::new())))
    }

    pub fn model(&self) -> &dyn Classifier {
        self.model.as_ref()
    }

    pub fn metrics(&self) -> &ApiMetrics {
        &self.metrics
    }
}
