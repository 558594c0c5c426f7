use serde::{Deserialize, Serialize};

/// Result for one model family within a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResult {
    pub status: PlanStatus,
    pub plan: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Recommended,
    Unavailable,
    Failed,
}

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub bmi: f64,
    #[serde(rename = "gymPlan")]
    pub gym_plan: PlanResult,
    #[serde(rename = "dietPlan")]
    pub diet_plan: PlanResult,
    pub advice: Vec<String>,
    pub saved: bool,
}

/// Per-model availability reported by the health endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelAvailability {
    pub gym: bool,
    pub diet: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub models: ModelAvailability,
    pub store: bool,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
