//! Model adapter.
//!
//! A model artifact is a versioned JSON export of a fitted estimator. It is
//! loaded once at startup and evaluated through the [`Classifier`] seam, which
//! takes `&self` only: a loaded model is never mutated and can be shared across
//! request handlers without locking.

pub mod linear;
pub mod tree;

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{IrisError, Result};

pub use linear::LogisticRegression;
pub use tree::DecisionTree;

/// Number of input features (sepal length/width, petal length/width).
pub const N_FEATURES: usize = 4;

/// Model input vector.
pub type Features = [f64; N_FEATURES];

const ARTIFACT_VERSION: u32 = 1;

/// Inference entry point. Implementations must be reentrant.
pub trait Classifier: Send + Sync {
    /// Predict a class label. Does not validate feature ranges.
    fn classify(&self, features: &Features) -> Result<i64>;
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Artifact {
    version: u32,
    #[serde(default)]
    name: Option<String>,
    n_features: usize,
    model: Estimator,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Estimator {
    DecisionTree(DecisionTree),
    Logistic(LogisticRegression),
}

/// A loaded, validated estimator.
#[derive(Debug)]
pub struct Model {
    name: String,
    estimator: Estimator,
}

impl Model {
    /// Read and validate an artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| IrisError::Load(format!("read {} failed: {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    /// Parse and validate an artifact already in memory.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let artifact: Artifact = serde_json::from_str(s)
            .map_err(|e| IrisError::Load(format!("invalid artifact json: {e}")))?;

        if artifact.version != ARTIFACT_VERSION {
            return Err(IrisError::Load(format!(
                "unsupported artifact version {} (expected {ARTIFACT_VERSION})",
                artifact.version
            )));
        }
        if artifact.n_features != N_FEATURES {
            return Err(IrisError::Load(format!(
                "artifact expects {} features, this service provides {N_FEATURES}",
                artifact.n_features
            )));
        }

        match &artifact.model {
            Estimator::DecisionTree(t) => t.validate()?,
            Estimator::Logistic(l) => l.validate()?,
        }

        let name = artifact.name.unwrap_or_else(|| "unnamed".to_string());
        tracing::debug!(model = %name, kind = artifact.model.kind(), "model artifact validated");
        Ok(Self { name, estimator: artifact.model })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Estimator kind as written in the artifact.
    pub fn kind(&self) -> &'static str {
        self.estimator.kind()
    }
}

impl Estimator {
    fn kind(&self) -> &'static str {
        match self {
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::Logistic(_) => "logistic",
        }
    }
}

impl Classifier for Model {
    fn classify(&self, features: &Features) -> Result<i64> {
        // Estimators are only defined on finite input.
        if features.iter().any(|v| !v.is_finite()) {
            return Err(IrisError::Inference(
                "Input X contains infinity or a value too large for dtype('float64').".into(),
            ));
        }
        match &self.estimator {
            Estimator::DecisionTree(t) => t.classify(features),
            Estimator::Logistic(l) => l.classify(features),
        }
    }
}
