use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    ActivityLevel, Allergy, Cuisine, DietaryRestriction, FitnessGoal, Gender, MedicalCondition,
    Severity, UserProfile,
};

/// Multi-select entries carry the form's "None" sentinel; a selection that
/// contains it is treated as an empty selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionChoice {
    None,
    Diabetes,
    Hypertension,
    Obesity,
}

impl ConditionChoice {
    fn to_domain(self) -> Option<MedicalCondition> {
        match self {
            ConditionChoice::None => None,
            ConditionChoice::Diabetes => Some(MedicalCondition::Diabetes),
            ConditionChoice::Hypertension => Some(MedicalCondition::Hypertension),
            ConditionChoice::Obesity => Some(MedicalCondition::Obesity),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestrictionChoice {
    None,
    #[serde(rename = "Low_Sodium")]
    LowSodium,
    #[serde(rename = "Low_Sugar")]
    LowSugar,
}

impl RestrictionChoice {
    fn to_domain(self) -> Option<DietaryRestriction> {
        match self {
            RestrictionChoice::None => None,
            RestrictionChoice::LowSodium => Some(DietaryRestriction::LowSodium),
            RestrictionChoice::LowSugar => Some(DietaryRestriction::LowSugar),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllergyChoice {
    None,
    Gluten,
    Peanuts,
}

impl AllergyChoice {
    fn to_domain(self) -> Option<Allergy> {
        match self {
            AllergyChoice::None => None,
            AllergyChoice::Gluten => Some(Allergy::Gluten),
            AllergyChoice::Peanuts => Some(Allergy::Peanuts),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CuisineChoice {
    None,
    Chinese,
    Indian,
    Italian,
    Mexican,
}

impl CuisineChoice {
    fn to_domain(self) -> Option<Cuisine> {
        match self {
            CuisineChoice::None => None,
            CuisineChoice::Chinese => Some(Cuisine::Chinese),
            CuisineChoice::Indian => Some(Cuisine::Indian),
            CuisineChoice::Italian => Some(Cuisine::Italian),
            CuisineChoice::Mexican => Some(Cuisine::Mexican),
        }
    }
}

/// Collapse a multi-select into domain values, honoring the "None" sentinel
/// and dropping duplicates.
fn normalize<C, T>(choices: &[C], to_domain: impl Fn(C) -> Option<T>) -> Vec<T>
where
    C: Copy,
    T: PartialEq,
{
    let mut out = Vec::new();
    for choice in choices.iter().copied() {
        match to_domain(choice) {
            Some(value) => {
                if !out.contains(&value) {
                    out.push(value);
                }
            }
            // Sentinel present: the whole selection reads as empty
            None => return Vec::new(),
        }
    }
    out
}

/// Submission payload for plan recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendationRequest {
    #[validate(range(min = 10, max = 100))]
    pub age: u8,
    #[validate(range(min = 30.0, max = 200.0))]
    #[serde(alias = "weight_kg", rename = "weightKg")]
    pub weight_kg: f64,
    #[validate(range(min = 100.0, max = 250.0))]
    #[serde(alias = "height_cm", rename = "heightCm")]
    pub height_cm: f64,
    pub gender: Gender,
    #[serde(alias = "fitness_goal", rename = "fitnessGoal")]
    pub fitness_goal: FitnessGoal,
    #[serde(default, alias = "medical_conditions", rename = "medicalConditions")]
    pub medical_conditions: Vec<ConditionChoice>,
    #[serde(default = "default_severity")]
    pub severity: Severity,
    #[serde(
        default = "default_activity_level",
        alias = "activity_level",
        rename = "activityLevel"
    )]
    pub activity_level: ActivityLevel,
    #[serde(default, alias = "dietary_restrictions", rename = "dietaryRestrictions")]
    pub dietary_restrictions: Vec<RestrictionChoice>,
    #[serde(default)]
    pub allergies: Vec<AllergyChoice>,
    #[serde(default, alias = "preferred_cuisines", rename = "preferredCuisines")]
    pub preferred_cuisines: Vec<CuisineChoice>,
}

fn default_severity() -> Severity {
    Severity::None
}

fn default_activity_level() -> ActivityLevel {
    ActivityLevel::Moderate
}

impl RecommendationRequest {
    /// Build the domain profile, applying the sentinel semantics of the
    /// form's multi-selects.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            age: self.age,
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            gender: self.gender,
            fitness_goal: self.fitness_goal,
            conditions: normalize(&self.medical_conditions, ConditionChoice::to_domain),
            severity: self.severity,
            activity_level: self.activity_level,
            dietary_restrictions: normalize(
                &self.dietary_restrictions,
                RestrictionChoice::to_domain,
            ),
            allergies: normalize(&self.allergies, AllergyChoice::to_domain),
            preferred_cuisines: normalize(&self.preferred_cuisines, CuisineChoice::to_domain),
        }
    }
}
