//! Multinomial logistic regression.
//!
//! Only the decision function is evaluated; the softmax is monotonic so the
//! arg-max of the raw scores is the predicted class.

use serde::Deserialize;

use crate::error::{IrisError, Result};
use crate::model::{Classifier, Features};

#[derive(Debug, Clone, Deserialize)]
pub struct LogisticRegression {
    classes: Vec<i64>,
    coef: Vec<Features>,
    intercept: Vec<f64>,
}

impl LogisticRegression {
    pub fn new(classes: Vec<i64>, coef: Vec<Features>, intercept: Vec<f64>) -> Result<Self> {
        let model = Self { classes, coef, intercept };
        model.validate()?;
        Ok(model)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(IrisError::Load("logistic model has no classes".into()));
        }
        if self.coef.len() != self.classes.len() || self.intercept.len() != self.classes.len() {
            return Err(IrisError::Load(format!(
                "logistic shape mismatch: {} classes, {} coef rows, {} intercepts",
                self.classes.len(),
                self.coef.len(),
                self.intercept.len()
            )));
        }
        let finite = self.coef.iter().flatten().chain(&self.intercept).all(|v| v.is_finite());
        if !finite {
            return Err(IrisError::Load("logistic coefficients must be finite".into()));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn classify(&self, features: &Features) -> Result<i64> {
        let mut best: Option<(i64, f64)> = None;
        for ((class, row), b) in self.classes.iter().zip(&self.coef).zip(&self.intercept) {
            let score = row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b;
            if !score.is_finite() {
                return Err(IrisError::Inference(format!(
                    "decision score for class {class} is not finite ({score})"
                )));
            }
            // First class wins on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((*class, score));
            }
        }
        best.map(|(class, _)| class)
            .ok_or_else(|| IrisError::Inference("logistic model has no classes".into()))
    }
}
