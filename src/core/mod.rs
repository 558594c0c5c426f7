// Core pipeline exports
pub mod adapter;
pub mod advice;
pub mod features;
pub mod recommender;

pub use adapter::{reconcile, resolve_column, validate_columns, ReconcileError, ReconciledVector};
pub use advice::advisory_notes;
pub use features::{encode_profile, is_known_feature, CanonicalFeatureMap, KNOWN_FEATURES};
pub use recommender::{PlanOutcome, RecommendationOutcome, Recommender};
