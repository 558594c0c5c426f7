use crate::models::{ActivityLevel, MedicalCondition, UserProfile};

/// General guidance shown alongside the predicted plans.
///
/// BMI bands follow the usual WHO cut-offs; condition notes only fire for
/// conditions actually reported.
pub fn advisory_notes(profile: &UserProfile, bmi: f64) -> Vec<String> {
    let mut notes = Vec::new();

    if bmi < 18.5 {
        notes.push(
            "Consider focusing on nutrient-dense foods to reach a healthy weight.".to_string(),
        );
    } else if (25.0..30.0).contains(&bmi) {
        notes.push(
            "Consider moderate calorie restriction and increased physical activity.".to_string(),
        );
    } else if bmi >= 30.0 {
        notes.push("Consider consulting a healthcare provider for weight management.".to_string());
    }

    if profile.has_condition(MedicalCondition::Diabetes) {
        notes.push("Monitor carbohydrates and focus on low GI foods.".to_string());
    }
    if profile.has_condition(MedicalCondition::Hypertension) {
        notes.push("Consider the DASH diet with reduced sodium.".to_string());
    }

    if profile.activity_level == ActivityLevel::Sedentary {
        notes.push("Increase activity with short walks or light exercises.".to_string());
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FitnessGoal, Gender, Severity};

    fn profile() -> UserProfile {
        UserProfile {
            age: 40,
            weight_kg: 70.0,
            height_cm: 170.0,
            gender: Gender::Female,
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
    fn test_healthy_profile_gets_no_notes() {
        let notes = advisory_notes(&profile(), 22.0);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_underweight_band() {
        let notes = advisory_notes(&profile(), 17.9);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("nutrient-dense"));
    }

    #[test]
    fn test_overweight_and_obese_bands_differ() {
        let overweight = advisory_notes(&profile(), 27.0);
        let obese = advisory_notes(&profile(), 31.0);
        assert!(overweight[0].contains("calorie restriction"));
        assert!(obese[0].contains("healthcare provider"));
    }

    #[test]
    fn test_condition_and_activity_notes_stack() {
        let mut p = profile();
        p.conditions = vec![MedicalCondition::Diabetes, MedicalCondition::Hypertension];
        p.activity_level = ActivityLevel::Sedentary;
        let notes = advisory_notes(&p, 22.0);
        assert_eq!(notes.len(), 3);
    }
}
