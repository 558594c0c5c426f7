use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::features::{is_known_feature, CanonicalFeatureMap};

/// Diseases that appear as `<Disease>_Yes` / `<Disease>_No` column pairs in
/// trained layouts.
const COMPLEMENT_DISEASES: [&str; 3] = ["Diabetes", "Hypertension", "Obesity"];

/// Errors from reconciling a column layout
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("model column list is empty")]
    EmptyColumns,
}

/// A row strictly matching one model's expected column layout
#[derive(Debug, Clone, PartialEq)]
pub struct ReconciledVector {
    columns: Vec<String>,
    values: Vec<f64>,
}

impl ReconciledVector {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a column, if the layout contains it
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.values[i])
    }

    /// Snapshot for persistence
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.columns
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect()
    }
}

/// How one expected column is grounded in canonical features
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnRule {
    /// Read the first listed canonical name present in the map; the exact
    /// column name always comes first, so direct matches outrank aliases.
    FirstOf(Vec<String>),
    /// `1 - positive` when a positive indicator is present, else an explicit
    /// complement indicator, else 0.
    Complement {
        positives: Vec<String>,
        explicit: String,
    },
}

impl ColumnRule {
    fn apply(&self, features: &CanonicalFeatureMap) -> f64 {
        match self {
            ColumnRule::FirstOf(names) => names
                .iter()
                .find_map(|name| features.get(name))
                .unwrap_or(0.0),
            ColumnRule::Complement { positives, explicit } => {
                if let Some(positive) = positives.iter().find_map(|name| features.get(name)) {
                    1.0 - positive
                } else {
                    features.get(explicit).unwrap_or(0.0)
                }
            }
        }
    }
}

/// Resolve one expected column against the canonical schema.
///
/// Returns None when no rule can ground the column in a known canonical
/// feature; bundle loading turns that into an error instead of letting the
/// column reconcile to 0 forever.
pub fn resolve_column(column: &str) -> Option<ColumnRule> {
    // Complement columns first; the canonical map never carries *_No keys
    if let Some(disease) = column.strip_suffix("_No") {
        if COMPLEMENT_DISEASES.contains(&disease) {
            return Some(ColumnRule::Complement {
                positives: vec![
                    format!("Disease_Type_{}", disease),
                    format!("{}_Yes", disease),
                ],
                explicit: column.to_string(),
            });
        }
    }

    let chain: Vec<String> = if let Some(value) = column.strip_prefix("Gender_") {
        vec![column.to_string(), format!("Sex_{}", value)]
    } else if let Some(value) = column.strip_prefix("Sex_") {
        vec![column.to_string(), format!("Gender_{}", value)]
    } else if let Some(disease) = column.strip_prefix("Disease_Type_") {
        vec![column.to_string(), format!("{}_Yes", disease)]
    } else if let Some(disease) = column.strip_suffix("_Yes") {
        vec![column.to_string(), format!("Disease_Type_{}", disease)]
    } else if column == "Height" || column == "Height_cm" {
        let alias = if column == "Height" { "Height_cm" } else { "Height" };
        vec![column.to_string(), alias.to_string()]
    } else if column == "Weight" || column == "Weight_kg" {
        let alias = if column == "Weight" { "Weight_kg" } else { "Weight" };
        vec![column.to_string(), alias.to_string()]
    } else if let Some(phrase) = column.strip_prefix("Fitness Goal_") {
        let mut chain = vec![column.to_string()];
        match phrase {
            "Weight Loss" => chain.push("Fitness Goal_Lose Weight".to_string()),
            "Lose Weight" => chain.push("Fitness Goal_Weight Loss".to_string()),
            "Weight Gain" => chain.push("Fitness Goal_Gain Muscle".to_string()),
            "Gain Muscle" => chain.push("Fitness Goal_Weight Gain".to_string()),
            _ => {}
        }
        chain
    } else {
        // Severity_, Physical_Activity_Level_, Dietary_Restrictions_,
        // Allergies_, Preferred_Cuisine_, Age, BMI: single canonical spelling
        vec![column.to_string()]
    };

    if chain.iter().any(|name| is_known_feature(name)) {
        Some(ColumnRule::FirstOf(chain))
    } else {
        None
    }
}

/// Check a column layout against the canonical schema.
///
/// Returns the columns no rule can ground in a known canonical feature.
pub fn validate_columns(columns: &[String]) -> Result<(), Vec<String>> {
    let unknown: Vec<String> = columns
        .iter()
        .filter(|column| resolve_column(column).is_none())
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(unknown)
    }
}

/// Reconcile the canonical feature map into one model's column layout.
///
/// Total for any non-empty layout: columns no rule resolves default to 0
/// (bundle loading rejects such layouts up front, so this is a backstop).
pub fn reconcile(
    columns: &[String],
    features: &CanonicalFeatureMap,
) -> Result<ReconciledVector, ReconcileError> {
    if columns.is_empty() {
        return Err(ReconcileError::EmptyColumns);
    }

    let values = columns
        .iter()
        .map(|column| {
            resolve_column(column)
                .map(|rule| rule.apply(features))
                .unwrap_or(0.0)
        })
        .collect();

    Ok(ReconciledVector {
        columns: columns.to_vec(),
        values,
    })
}
