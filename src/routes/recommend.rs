use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{advisory_notes, PlanOutcome, Recommender};
use crate::models::{
    ErrorResponse, HealthResponse, ModelAvailability, ModelFamily, PlanResult, PlanStatus,
    PredictionRecord, RecommendationRequest, RecommendationResponse,
};
use crate::services::RecordStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub recommender: Recommender,
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/recommendations", web::post().to(recommend))
        .route("/records", web::get().to(get_records))
        .route("/debug/echo", web::post().to(debug_echo));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let models = ModelAvailability {
        gym: state.recommender.available(ModelFamily::Gym),
        diet: state.recommender.available(ModelFamily::Diet),
    };

    let status = if store_healthy && models.gym && models.diet {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        models,
        store: store_healthy,
        timestamp: chrono::Utc::now(),
    })
}

/// Debug endpoint to echo raw JSON for debugging
async fn debug_echo(body: web::Bytes, req: actix_web::HttpRequest) -> impl Responder {
    let body_str = String::from_utf8_lossy(&body);
    tracing::info!(
        "DEBUG echo - path: {}, method: {}, body: {}",
        req.path(),
        req.method(),
        body_str
    );
    HttpResponse::Ok().json(serde_json::json!({
        "path": req.path(),
        "method": req.method().to_string(),
        "body": body_str,
    }))
}

/// Plan recommendation endpoint
///
/// POST /api/v1/recommendations
///
/// Runs the encode → reconcile → predict pipeline over both model families
/// and best-effort persists one record per produced plan. A store failure
/// downgrades `saved` but never withholds the plans.
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    if !state.recommender.any_available() {
        return HttpResponse::ServiceUnavailable().json(ErrorResponse {
            error: "models_unavailable".to_string(),
            message: "No recommendation models are loaded".to_string(),
            status_code: 503,
        });
    }

    let profile = req.to_profile();
    let outcome = state.recommender.recommend(&profile);

    let mut saved = true;
    for (family, plan) in [
        (ModelFamily::Gym, &outcome.gym),
        (ModelFamily::Diet, &outcome.diet),
    ] {
        if let PlanOutcome::Recommended { label, vector } = plan {
            let record = PredictionRecord {
                model_family: family,
                profile: profile.clone(),
                canonical_input: outcome.features.to_map(),
                reconciled_input: vector.to_map(),
                prediction: label.clone(),
                timestamp: chrono::Utc::now(),
            };

            if let Err(e) = state.store.insert_record(&record).await {
                tracing::error!("Failed to persist {} prediction: {}", family.as_str(), e);
                saved = false;
            }
        }
    }

    let advice = advisory_notes(&profile, outcome.bmi);

    HttpResponse::Ok().json(RecommendationResponse {
        bmi: outcome.bmi,
        gym_plan: plan_result(outcome.gym),
        diet_plan: plan_result(outcome.diet),
        advice,
        saved,
    })
}

/// Get recent prediction records
///
/// GET /api/v1/records?limit={limit}
///
/// Returns the most recent prediction records from the store, for analysis
/// and debugging purposes.
async fn get_records(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> impl Responder {
    let limit = query
        .get("limit")
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(25);

    match state.store.list_records(limit).await {
        Ok(records) => HttpResponse::Ok().json(serde_json::json!({
            "count": records.len(),
            "records": records,
        })),
        Err(e) => {
            tracing::error!("Failed to fetch prediction records: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch records".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

fn plan_result(outcome: PlanOutcome) -> PlanResult {
    match outcome {
        PlanOutcome::Recommended { label, .. } => PlanResult {
            status: PlanStatus::Recommended,
            plan: Some(label),
            message: None,
        },
        PlanOutcome::Unavailable => PlanResult {
            status: PlanStatus::Unavailable,
            plan: None,
            message: Some("Recommendation not available for this model".to_string()),
        },
        PlanOutcome::Failed(message) => PlanResult {
            status: PlanStatus::Failed,
            plan: None,
            message: Some(message),
        },
    }
}
