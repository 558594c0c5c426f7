// Integration tests for Coach Algo

use actix_web::{test as actix_test, web, App};
use serde_json::json;
use std::sync::Arc;

use coach_algo::core::Recommender;
use coach_algo::models::{
    ActivityLevel, FitnessGoal, Gender, MedicalCondition, Severity, UserProfile,
};
use coach_algo::routes;
use coach_algo::routes::recommend::AppState;
use coach_algo::services::{BundleError, ModelBundle, RecordStore};

fn create_test_profile(goal: FitnessGoal, conditions: Vec<MedicalCondition>) -> UserProfile {
    UserProfile {
        age: 30,
        weight_kg: 70.0,
        height_cm: 170.0,
        gender: Gender::Male,
        fitness_goal: goal,
        conditions,
        severity: Severity::None,
        activity_level: ActivityLevel::Moderate,
        dietary_restrictions: vec![],
        allergies: vec![],
        preferred_cuisines: vec![],
    }
}

fn load_recommender() -> Recommender {
    let gym = ModelBundle::load("model/gym_model.json").expect("gym artifact should load");
    let diet = ModelBundle::load("model/diet_model.json").expect("diet artifact should load");
    Recommender::new(Some(gym), Some(diet))
}

fn write_temp_artifact(content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("coach_algo_{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, content).expect("temp artifact should be writable");
    path
}

#[test]
fn test_end_to_end_recommendation_from_artifacts() {
    let recommender = load_recommender();

    let mut profile = create_test_profile(
        FitnessGoal::LoseWeight,
        vec![MedicalCondition::Diabetes],
    );
    profile.severity = Severity::Mild;
    profile.dietary_restrictions = vec![coach_algo::models::DietaryRestriction::LowSugar];

    let outcome = recommender.recommend(&profile);

    assert_eq!(outcome.bmi, 24.22);
    assert_eq!(outcome.gym.label(), Some("Cardio Focus Program"));
    assert_eq!(outcome.diet.label(), Some("Low Carb Plan"));
}

#[test]
fn test_gain_muscle_profile_selects_strength_program() {
    let recommender = load_recommender();
    let profile = create_test_profile(FitnessGoal::GainMuscle, vec![]);

    let outcome = recommender.recommend(&profile);

    assert_eq!(outcome.gym.label(), Some("Strength Building Program"));
    assert_eq!(outcome.diet.label(), Some("Balanced Nutrition Plan"));
}

#[test]
fn test_hypertension_profile_gets_low_sodium_plan() {
    let recommender = load_recommender();

    let mut profile = create_test_profile(
        FitnessGoal::MaintainFitness,
        vec![MedicalCondition::Hypertension],
    );
    profile.severity = Severity::Moderate;
    profile.dietary_restrictions = vec![coach_algo::models::DietaryRestriction::LowSodium];

    let outcome = recommender.recommend(&profile);

    assert_eq!(outcome.diet.label(), Some("Low Sodium Plan"));
}

#[test]
fn test_missing_artifact_degrades_that_model_only() {
    let gym = ModelBundle::load("model/gym_model.json").expect("gym artifact should load");
    let diet = ModelBundle::load("model/no_such_model.json").ok();
    assert!(diet.is_none());

    let recommender = Recommender::new(Some(gym), diet);
    let outcome = recommender.recommend(&create_test_profile(FitnessGoal::LoseWeight, vec![]));

    assert!(outcome.gym.label().is_some());
    assert!(outcome.diet.label().is_none());
}

#[test]
fn test_corrupt_artifact_fails_to_load() {
    let path = write_temp_artifact("not json at all {");
    let err = ModelBundle::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, BundleError::Parse(_)));
}

#[test]
fn test_artifact_with_unknown_columns_is_rejected() {
    let path = write_temp_artifact(
        r#"{
            "family": "gym",
            "estimator": {
                "coefficients": [[0.1, 0.2]],
                "intercepts": [0.0]
            },
            "labels": ["A", "B"],
            "columns": ["Age", "Blood_Type_AB"]
        }"#,
    );
    let err = ModelBundle::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    match err {
        BundleError::UnknownColumns(cols) => assert_eq!(cols, vec!["Blood_Type_AB"]),
        other => panic!("expected UnknownColumns, got {:?}", other),
    }
}

#[test]
fn test_artifact_with_empty_columns_is_rejected() {
    let path = write_temp_artifact(
        r#"{
            "family": "diet",
            "estimator": {
                "coefficients": [[]],
                "intercepts": [0.0]
            },
            "labels": ["A", "B"],
            "columns": []
        }"#,
    );
    let err = ModelBundle::load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, BundleError::EmptyColumns));
}

fn recommendation_payload() -> serde_json::Value {
    json!({
        "age": 30,
        "weightKg": 70.0,
        "heightCm": 170.0,
        "gender": "Male",
        "fitnessGoal": "Lose Weight",
        "medicalConditions": ["Diabetes"],
        "severity": "Mild",
        "activityLevel": "Moderate",
        "dietaryRestrictions": ["Low_Sugar"]
    })
}

#[actix_web::test]
async fn test_recommendation_endpoint_persists_and_returns_plans() {
    let mut server = mockito::Server::new_async().await;
    // One record per produced plan: gym and diet
    let insert_mock = server
        .mock(
            "POST",
            "/databases/fitness_coach/collections/predictions/documents",
        )
        .with_status(201)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let store = Arc::new(RecordStore::new(
        server.url(),
        "test_key".to_string(),
        "test_project".to_string(),
        "fitness_coach".to_string(),
        "predictions".to_string(),
    ));
    let state = AppState {
        store,
        recommender: load_recommender(),
    };

    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(recommendation_payload())
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["bmi"], 24.22);
    assert_eq!(body["gymPlan"]["status"], "recommended");
    assert_eq!(body["gymPlan"]["plan"], "Cardio Focus Program");
    assert_eq!(body["dietPlan"]["plan"], "Low Carb Plan");
    assert_eq!(body["saved"], true);
    // Diabetes note from the advisory block
    assert!(body["advice"]
        .as_array()
        .unwrap()
        .iter()
        .any(|note| note.as_str().unwrap().contains("low GI")));

    insert_mock.assert_async().await;
}

#[actix_web::test]
async fn test_store_failure_does_not_withhold_the_prediction() {
    let mut server = mockito::Server::new_async().await;
    let insert_mock = server
        .mock(
            "POST",
            "/databases/fitness_coach/collections/predictions/documents",
        )
        .with_status(500)
        .with_body("{}")
        .expect(2)
        .create_async()
        .await;

    let store = Arc::new(RecordStore::new(
        server.url(),
        "test_key".to_string(),
        "test_project".to_string(),
        "fitness_coach".to_string(),
        "predictions".to_string(),
    ));
    let state = AppState {
        store,
        recommender: load_recommender(),
    };

    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(recommendation_payload())
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = actix_test::read_body_json(resp).await;
    // Plans come back even though every insert failed
    assert_eq!(body["gymPlan"]["status"], "recommended");
    assert_eq!(body["dietPlan"]["status"], "recommended");
    assert_eq!(body["saved"], false);

    insert_mock.assert_async().await;
}

#[actix_web::test]
async fn test_validation_error_returns_structured_400() {
    let store = Arc::new(RecordStore::new(
        "http://127.0.0.1:1/v1".to_string(),
        "test_key".to_string(),
        "test_project".to_string(),
        "fitness_coach".to_string(),
        "predictions".to_string(),
    ));
    let state = AppState {
        store,
        recommender: load_recommender(),
    };

    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let mut payload = recommendation_payload();
    payload["age"] = json!(101);

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(payload)
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = actix_test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
}

#[actix_web::test]
async fn test_no_models_loaded_returns_503() {
    let store = Arc::new(RecordStore::new(
        "http://127.0.0.1:1/v1".to_string(),
        "test_key".to_string(),
        "test_project".to_string(),
        "fitness_coach".to_string(),
        "predictions".to_string(),
    ));
    let state = AppState {
        store,
        recommender: Recommender::new(None, None),
    };

    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/recommendations")
        .set_json(recommendation_payload())
        .to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}

#[actix_web::test]
async fn test_health_endpoint_reports_per_model_availability() {
    let mut server = mockito::Server::new_async().await;
    let _health_mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let store = Arc::new(RecordStore::new(
        server.url(),
        "test_key".to_string(),
        "test_project".to_string(),
        "fitness_coach".to_string(),
        "predictions".to_string(),
    ));
    let gym = ModelBundle::load("model/gym_model.json").expect("gym artifact should load");
    let state = AppState {
        store,
        recommender: Recommender::new(Some(gym), None),
    };

    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = actix_test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = actix_test::read_body_json(resp).await;
    // Diet model is missing, so the service reports itself degraded
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["models"]["gym"], true);
    assert_eq!(body["models"]["diet"], false);
    assert_eq!(body["store"], true);
}
