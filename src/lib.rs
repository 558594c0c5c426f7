//! Coach Algo - Plan recommendation service for the Fitness Coach app
//!
//! This library implements the encode -> reconcile -> predict pipeline that
//! turns a user's health profile into workout and diet plan recommendations,
//! bridging the inconsistent column layouts the two model families were
//! trained with.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{encode_profile, reconcile, CanonicalFeatureMap, Recommender};
pub use crate::models::{
    PredictionRecord, RecommendationRequest, RecommendationResponse, UserProfile,
};
pub use crate::services::{ModelBundle, RecordStore};
