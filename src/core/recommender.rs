use std::sync::Arc;

use crate::core::adapter::{reconcile, ReconciledVector};
use crate::core::features::{encode_profile, CanonicalFeatureMap};
use crate::models::{ModelFamily, UserProfile};
use crate::services::bundle::ModelBundle;

/// Outcome of one model family for one submission
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    /// The model produced a plan
    Recommended {
        label: String,
        vector: ReconciledVector,
    },
    /// The bundle never loaded; this family is disabled for the process
    Unavailable,
    /// Reconciliation or prediction failed for this submission only
    Failed(String),
}

impl PlanOutcome {
    pub fn label(&self) -> Option<&str> {
        match self {
            PlanOutcome::Recommended { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// Result of running both model families over one profile
#[derive(Debug, Clone)]
pub struct RecommendationOutcome {
    pub bmi: f64,
    pub features: CanonicalFeatureMap,
    pub gym: PlanOutcome,
    pub diet: PlanOutcome,
}

/// Orchestrates encode → reconcile → predict across the loaded bundles.
///
/// Bundles are explicit immutable values captured at startup; a family whose
/// artifact failed to load stays disabled without affecting the other. The
/// pipeline is sequential per submission and shares nothing mutable across
/// submissions.
#[derive(Debug, Clone)]
pub struct Recommender {
    gym: Option<Arc<ModelBundle>>,
    diet: Option<Arc<ModelBundle>>,
}

impl Recommender {
    pub fn new(gym: Option<ModelBundle>, diet: Option<ModelBundle>) -> Self {
        Self {
            gym: gym.map(Arc::new),
            diet: diet.map(Arc::new),
        }
    }

    pub fn available(&self, family: ModelFamily) -> bool {
        match family {
            ModelFamily::Gym => self.gym.is_some(),
            ModelFamily::Diet => self.diet.is_some(),
        }
    }

    pub fn any_available(&self) -> bool {
        self.gym.is_some() || self.diet.is_some()
    }

    /// Run the full pipeline for one profile
    pub fn recommend(&self, profile: &UserProfile) -> RecommendationOutcome {
        let features = encode_profile(profile);

        let gym = Self::run(self.gym.as_deref(), ModelFamily::Gym, &features);
        let diet = Self::run(self.diet.as_deref(), ModelFamily::Diet, &features);

        RecommendationOutcome {
            bmi: profile.bmi(),
            features,
            gym,
            diet,
        }
    }

    fn run(
        bundle: Option<&ModelBundle>,
        family: ModelFamily,
        features: &CanonicalFeatureMap,
    ) -> PlanOutcome {
        let bundle = match bundle {
            Some(bundle) => bundle,
            None => return PlanOutcome::Unavailable,
        };

        let vector = match reconcile(bundle.columns(), features) {
            Ok(vector) => vector,
            Err(e) => {
                tracing::error!("{} reconciliation failed: {}", family.as_str(), e);
                return PlanOutcome::Failed(e.to_string());
            }
        };

        match bundle.predict(&vector) {
            Ok(label) => {
                tracing::debug!("{} model recommended: {}", family.as_str(), label);
                PlanOutcome::Recommended { label, vector }
            }
            Err(e) => {
                tracing::error!("{} prediction failed: {}", family.as_str(), e);
                PlanOutcome::Failed(e.to_string())
            }
        }
    }
}
