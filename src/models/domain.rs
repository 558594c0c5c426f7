use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model families served by the recommender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    Gym,
    Diet,
}

impl ModelFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Gym => "gym",
            ModelFamily::Diet => "diet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitnessGoal {
    #[serde(rename = "Lose Weight")]
    LoseWeight,
    #[serde(rename = "Gain Muscle")]
    GainMuscle,
    #[serde(rename = "Maintain Fitness")]
    MaintainFitness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MedicalCondition {
    Diabetes,
    Hypertension,
    Obesity,
}

/// Condition severity; None means no condition severity was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    Moderate,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DietaryRestriction {
    #[serde(rename = "Low_Sodium")]
    LowSodium,
    #[serde(rename = "Low_Sugar")]
    LowSugar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Allergy {
    Gluten,
    Peanuts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cuisine {
    Chinese,
    Indian,
    Italian,
    Mexican,
}

/// User health/fitness profile for one submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u8,
    #[serde(rename = "weightKg")]
    pub weight_kg: f64,
    #[serde(rename = "heightCm")]
    pub height_cm: f64,
    pub gender: Gender,
    #[serde(rename = "fitnessGoal")]
    pub fitness_goal: FitnessGoal,
    #[serde(default)]
    pub conditions: Vec<MedicalCondition>,
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(rename = "activityLevel")]
    pub activity_level: ActivityLevel,
    #[serde(rename = "dietaryRestrictions", default)]
    pub dietary_restrictions: Vec<DietaryRestriction>,
    #[serde(default)]
    pub allergies: Vec<Allergy>,
    #[serde(rename = "preferredCuisines", default)]
    pub preferred_cuisines: Vec<Cuisine>,
}

fn default_severity() -> Severity {
    Severity::None
}

impl UserProfile {
    /// Body mass index from weight and height, rounded to two decimals
    pub fn bmi(&self) -> f64 {
        let height_m = self.height_cm / 100.0;
        let raw = self.weight_kg / (height_m * height_m);
        (raw * 100.0).round() / 100.0
    }

    pub fn has_condition(&self, condition: MedicalCondition) -> bool {
        self.conditions.contains(&condition)
    }
}

/// Append-only record of a single model prediction
///
/// One record is written per model per submission; records are never
/// updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "modelFamily")]
    pub model_family: ModelFamily,
    pub profile: UserProfile,
    #[serde(rename = "canonicalInput")]
    pub canonical_input: BTreeMap<String, f64>,
    #[serde(rename = "reconciledInput")]
    pub reconciled_input: BTreeMap<String, f64>,
    pub prediction: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(weight_kg: f64, height_cm: f64) -> UserProfile {
        UserProfile {
            age: 25,
            weight_kg,
            height_cm,
            gender: Gender::Male,
            fitness_goal: FitnessGoal::MaintainFitness,
            conditions: vec![],
            severity: Severity::None,
            activity_level: ActivityLevel::Moderate,
            dietary_restrictions: vec![],
            allergies: vec![],
            preferred_cuisines: vec![],
        }
    }

    #[test]
    fn test_bmi_reference_value() {
        // 70 kg at 170 cm
        assert_eq!(profile(70.0, 170.0).bmi(), 24.22);
    }

    #[test]
    fn test_bmi_rounds_to_two_decimals() {
        let bmi = profile(63.87, 170.0).bmi();
        assert_eq!(bmi, 22.1);
    }

    #[test]
    fn test_model_family_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ModelFamily::Gym).unwrap(),
            "\"gym\""
        );
    }

    #[test]
    fn test_goal_uses_form_phrasing() {
        assert_eq!(
            serde_json::to_string(&FitnessGoal::LoseWeight).unwrap(),
            "\"Lose Weight\""
        );
    }
}
