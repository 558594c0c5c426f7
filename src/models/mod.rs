// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ActivityLevel, Allergy, Cuisine, DietaryRestriction, FitnessGoal, Gender, MedicalCondition,
    ModelFamily, PredictionRecord, Severity, UserProfile,
};
pub use requests::{
    AllergyChoice, ConditionChoice, CuisineChoice, RecommendationRequest, RestrictionChoice,
};
pub use responses::{
    ErrorResponse, HealthResponse, ModelAvailability, PlanResult, PlanStatus,
    RecommendationResponse,
};
