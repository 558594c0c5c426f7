use std::collections::BTreeMap;

use crate::models::{
    ActivityLevel, Allergy, Cuisine, DietaryRestriction, FitnessGoal, Gender, MedicalCondition,
    Severity, UserProfile,
};

/// Every canonical feature name the encoder produces.
///
/// The two model families were trained against different slices of this
/// schema, under different naming conventions; the encoder emits all of them
/// so the adapter can resolve any trained column layout. Load-time column
/// validation checks against this same table.
pub const KNOWN_FEATURES: [&str; 34] = [
    "Age",
    "BMI",
    "Weight",
    "Weight_kg",
    "Height",
    "Height_cm",
    "Gender_Male",
    "Gender_Female",
    "Sex_Male",
    "Sex_Female",
    "Disease_Type_Diabetes",
    "Disease_Type_Hypertension",
    "Disease_Type_Obesity",
    "Diabetes_Yes",
    "Hypertension_Yes",
    "Severity_Mild",
    "Severity_Moderate",
    "Severity_Severe",
    "Physical_Activity_Level_Active",
    "Physical_Activity_Level_Moderate",
    "Physical_Activity_Level_Sedentary",
    "Dietary_Restrictions_Low_Sodium",
    "Dietary_Restrictions_Low_Sugar",
    "Allergies_Gluten",
    "Allergies_Peanuts",
    "Preferred_Cuisine_Chinese",
    "Preferred_Cuisine_Indian",
    "Preferred_Cuisine_Italian",
    "Preferred_Cuisine_Mexican",
    "Fitness Goal_Lose Weight",
    "Fitness Goal_Gain Muscle",
    "Fitness Goal_Maintain Fitness",
    "Fitness Goal_Weight Loss",
    "Fitness Goal_Weight Gain",
];

pub fn is_known_feature(name: &str) -> bool {
    KNOWN_FEATURES.contains(&name)
}

/// Canonical mapping of named indicators derived from one profile.
///
/// Every name in [`KNOWN_FEATURES`] is present; unset indicators sit at 0 so
/// downstream complement derivation can rely on key presence. Mutually
/// exclusive categories (severity, activity, gender, goal) carry at most one
/// indicator at 1 within each alias group.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFeatureMap {
    values: BTreeMap<String, f64>,
}

impl CanonicalFeatureMap {
    fn with_known_zeroed() -> Self {
        let values = KNOWN_FEATURES
            .iter()
            .map(|name| (name.to_string(), 0.0))
            .collect();
        Self { values }
    }

    fn set(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    fn flag(&mut self, name: &str, on: bool) {
        self.set(name, if on { 1.0 } else { 0.0 });
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Snapshot for persistence
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.values.clone()
    }
}

/// Derive the canonical feature mapping from a profile.
///
/// Pure function: no error conditions, no side effects. Unknown or empty
/// selections simply leave their indicators at 0.
pub fn encode_profile(profile: &UserProfile) -> CanonicalFeatureMap {
    let mut features = CanonicalFeatureMap::with_known_zeroed();

    features.set("Age", f64::from(profile.age));
    features.set("BMI", profile.bmi());
    // Both unit-suffixed and bare spellings, one per model family
    features.set("Weight", profile.weight_kg);
    features.set("Weight_kg", profile.weight_kg);
    features.set("Height", profile.height_cm);
    features.set("Height_cm", profile.height_cm);

    let male = profile.gender == Gender::Male;
    features.flag("Gender_Male", male);
    features.flag("Gender_Female", !male);
    features.flag("Sex_Male", male);
    features.flag("Sex_Female", !male);

    let diabetes = profile.has_condition(MedicalCondition::Diabetes);
    let hypertension = profile.has_condition(MedicalCondition::Hypertension);
    features.flag("Disease_Type_Diabetes", diabetes);
    features.flag("Disease_Type_Hypertension", hypertension);
    features.flag(
        "Disease_Type_Obesity",
        profile.has_condition(MedicalCondition::Obesity),
    );
    features.flag("Diabetes_Yes", diabetes);
    features.flag("Hypertension_Yes", hypertension);

    features.flag("Severity_Mild", profile.severity == Severity::Mild);
    features.flag("Severity_Moderate", profile.severity == Severity::Moderate);
    features.flag("Severity_Severe", profile.severity == Severity::Severe);

    features.flag(
        "Physical_Activity_Level_Active",
        profile.activity_level == ActivityLevel::Active,
    );
    features.flag(
        "Physical_Activity_Level_Moderate",
        profile.activity_level == ActivityLevel::Moderate,
    );
    features.flag(
        "Physical_Activity_Level_Sedentary",
        profile.activity_level == ActivityLevel::Sedentary,
    );

    features.flag(
        "Dietary_Restrictions_Low_Sodium",
        profile
            .dietary_restrictions
            .contains(&DietaryRestriction::LowSodium),
    );
    features.flag(
        "Dietary_Restrictions_Low_Sugar",
        profile
            .dietary_restrictions
            .contains(&DietaryRestriction::LowSugar),
    );

    features.flag("Allergies_Gluten", profile.allergies.contains(&Allergy::Gluten));
    features.flag("Allergies_Peanuts", profile.allergies.contains(&Allergy::Peanuts));

    features.flag(
        "Preferred_Cuisine_Chinese",
        profile.preferred_cuisines.contains(&Cuisine::Chinese),
    );
    features.flag(
        "Preferred_Cuisine_Indian",
        profile.preferred_cuisines.contains(&Cuisine::Indian),
    );
    features.flag(
        "Preferred_Cuisine_Italian",
        profile.preferred_cuisines.contains(&Cuisine::Italian),
    );
    features.flag(
        "Preferred_Cuisine_Mexican",
        profile.preferred_cuisines.contains(&Cuisine::Mexican),
    );

    // Both goal phrasings the model families were trained with
    let lose = profile.fitness_goal == FitnessGoal::LoseWeight;
    let gain = profile.fitness_goal == FitnessGoal::GainMuscle;
    features.flag("Fitness Goal_Lose Weight", lose);
    features.flag("Fitness Goal_Gain Muscle", gain);
    features.flag(
        "Fitness Goal_Maintain Fitness",
        profile.fitness_goal == FitnessGoal::MaintainFitness,
    );
    features.flag("Fitness Goal_Weight Loss", lose);
    features.flag("Fitness Goal_Weight Gain", gain);

    features
}
