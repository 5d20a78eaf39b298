//! Binary logistic regression scorer
//!
//! Inference only. Weights come from `model.json`, produced by the offline
//! training stage.

use serde::{Deserialize, Serialize};

use super::features::FeatureVector;
use super::labels::LabelMap;
use super::traits::{Score, Scorer};
use crate::models::ClassProbabilities;

/// Fitted linear model: `P(classes[1]) = sigmoid(coef . x + intercept)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    /// One weight per feature column
    pub coef: Vec<f64>,
    pub intercept: f64,
    /// Class ids in model order; `classes[1]` is the positive class
    pub classes: [i64; 2],
}

impl LogisticModel {
    pub fn new(coef: Vec<f64>, intercept: f64, classes: [i64; 2]) -> Self {
        Self {
            coef,
            intercept,
            classes,
        }
    }

    pub fn input_size(&self) -> usize {
        self.coef.len()
    }

    /// Raw decision value `coef . x + intercept`
    pub fn decision(&self, vector: &FeatureVector) -> f64 {
        debug_assert_eq!(
            vector.dimension(),
            self.coef.len(),
            "feature vector does not match model input size"
        );
        vector.dot(&self.coef) + self.intercept
    }

    /// Probabilities in model class order
    pub fn predict_proba(&self, vector: &FeatureVector) -> [f64; 2] {
        let p1 = sigmoid(self.decision(vector));
        [1.0 - p1, p1]
    }

    /// Predicted class id; ties go to `classes[0]`
    pub fn predict(&self, vector: &FeatureVector) -> i64 {
        if self.decision(vector) > 0.0 {
            self.classes[1]
        } else {
            self.classes[0]
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.classes[0] == self.classes[1] {
            return Err(format!(
                "model classes must be distinct, got {:?}",
                self.classes
            ));
        }
        if !self.intercept.is_finite() {
            return Err("model intercept is not finite".into());
        }
        if let Some(pos) = self.coef.iter().position(|w| !w.is_finite()) {
            return Err(format!("model coefficient at column {pos} is not finite"));
        }
        Ok(())
    }
}

/// Numerically stable logistic function
fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// A `LogisticModel` bound to the label map, so its class-ordered output
/// can be reported as {FAKE, REAL}.
#[derive(Debug, Clone)]
pub struct LogisticScorer {
    model: LogisticModel,
    /// Position of the REAL class in `model.classes`
    real_position: usize,
}

impl LogisticScorer {
    /// Bind a model to a label map; every model class must resolve.
    pub fn bind(model: LogisticModel, labels: &LabelMap) -> Result<Self, String> {
        model.validate()?;

        for class in model.classes {
            if labels.name_of(class).is_none() {
                return Err(format!("model class {class} is missing from the label map"));
            }
        }

        let real_id = labels.real_id();
        let real_position = model
            .classes
            .iter()
            .position(|&c| c == real_id)
            .ok_or_else(|| format!("model classes {:?} do not include REAL ({real_id})", model.classes))?;

        Ok(Self {
            model,
            real_position,
        })
    }

    pub fn model(&self) -> &LogisticModel {
        &self.model
    }
}

impl Scorer for LogisticScorer {
    fn score(&self, vector: &FeatureVector) -> Score {
        let proba = self.model.predict_proba(vector);
        let real = proba[self.real_position];
        Score {
            predicted_class: self.model.predict(vector),
            probabilities: ClassProbabilities {
                fake: 1.0 - real,
                real,
            },
        }
    }
}
