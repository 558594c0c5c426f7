use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::core::adapter::{self, ReconciledVector};
use crate::models::ModelFamily;

/// Errors raised while loading a model artifact
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model artifact has an empty column list")]
    EmptyColumns,

    #[error("model artifact expects columns unknown to the feature schema: {}", .0.join(", "))]
    UnknownColumns(Vec<String>),

    #[error("malformed estimator: {0}")]
    MalformedEstimator(String),
}

/// Errors raised while predicting
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("input has {actual} columns but the estimator expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("estimator produced class index {0} outside the label list")]
    UnknownClass(usize),
}

/// Linear decision function over the reconciled row.
///
/// One coefficient row per class; binary models may carry a single row, in
/// which case a positive decision value selects the second label.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearEstimator {
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearEstimator {
    fn n_features(&self) -> usize {
        self.coefficients.first().map(|row| row.len()).unwrap_or(0)
    }

    fn predict_class(&self, row: &[f64]) -> Result<usize, PredictionError> {
        let expected = self.n_features();
        if row.len() != expected {
            return Err(PredictionError::ShapeMismatch {
                expected,
                actual: row.len(),
            });
        }

        let score = |class: usize| -> f64 {
            self.coefficients[class]
                .iter()
                .zip(row)
                .map(|(w, x)| w * x)
                .sum::<f64>()
                + self.intercepts[class]
        };

        if self.coefficients.len() == 1 {
            return Ok(if score(0) > 0.0 { 1 } else { 0 });
        }

        let mut best = 0;
        let mut best_score = score(0);
        for class in 1..self.coefficients.len() {
            let s = score(class);
            if s > best_score {
                best = class;
                best_score = s;
            }
        }
        Ok(best)
    }
}

/// Trained estimator, label decoder and expected column layout.
///
/// Immutable after load; one artifact per model family. The family is an
/// explicit tag in the artifact rather than something inferred from the
/// column names.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelBundle {
    pub family: ModelFamily,
    estimator: LinearEstimator,
    labels: Vec<String>,
    columns: Vec<String>,
}

impl ModelBundle {
    /// Load and validate an artifact from disk.
    ///
    /// The file must deserialize into exactly the (family, estimator,
    /// labels, columns) shape; anything else is a load error and disables
    /// the affected model only.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let bundle: ModelBundle = serde_json::from_str(&raw)?;
        bundle.validate()?;

        tracing::info!(
            "Loaded {} model from {} ({} columns, {} labels)",
            bundle.family.as_str(),
            path.as_ref().display(),
            bundle.columns.len(),
            bundle.labels.len()
        );

        Ok(bundle)
    }

    /// Assemble a bundle from parts, running the same validation as `load`
    pub fn from_parts(
        family: ModelFamily,
        estimator: LinearEstimator,
        labels: Vec<String>,
        columns: Vec<String>,
    ) -> Result<Self, BundleError> {
        let bundle = Self {
            family,
            estimator,
            labels,
            columns,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    fn validate(&self) -> Result<(), BundleError> {
        if self.columns.is_empty() {
            return Err(BundleError::EmptyColumns);
        }

        adapter::validate_columns(&self.columns).map_err(BundleError::UnknownColumns)?;

        if self.estimator.coefficients.is_empty() {
            return Err(BundleError::MalformedEstimator(
                "no coefficient rows".to_string(),
            ));
        }
        if self.estimator.intercepts.len() != self.estimator.coefficients.len() {
            return Err(BundleError::MalformedEstimator(format!(
                "{} coefficient rows but {} intercepts",
                self.estimator.coefficients.len(),
                self.estimator.intercepts.len()
            )));
        }
        for (i, row) in self.estimator.coefficients.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(BundleError::MalformedEstimator(format!(
                    "coefficient row {} has {} weights for {} columns",
                    i,
                    row.len(),
                    self.columns.len()
                )));
            }
        }

        let classes = if self.estimator.coefficients.len() == 1 {
            2
        } else {
            self.estimator.coefficients.len()
        };
        if self.labels.len() != classes {
            return Err(BundleError::MalformedEstimator(format!(
                "{} labels for {} classes",
                self.labels.len(),
                classes
            )));
        }

        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Run the estimator on a reconciled row and decode the label
    pub fn predict(&self, input: &ReconciledVector) -> Result<String, PredictionError> {
        let class = self.estimator.predict_class(input.values())?;
        self.labels
            .get(class)
            .cloned()
            .ok_or(PredictionError::UnknownClass(class))
    }
}
