use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Other,
}

impl Sex {
    pub fn from_input(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("male") {
            Sex::Male
        } else {
            Sex::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => Err(AppError::UnknownActivityLevel(other.to_string())),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Harris-Benedict BMR scaled by the activity multiplier.
pub fn daily_calorie_target(
    weight_kg: f64,
    height_cm: f64,
    age: u32,
    sex: Sex,
    activity: ActivityLevel,
) -> f64 {
    let age = f64::from(age);
    let bmr = match sex {
        Sex::Male => 88.362 + (13.397 * weight_kg) + (4.799 * height_cm) - (5.677 * age),
        Sex::Other => 447.593 + (9.247 * weight_kg) + (3.098 * height_cm) - (4.330 * age),
    };
    bmr * activity.multiplier()
}

/// Feet are truncated and the leftover inches rounded on their own, so a
/// remainder of 11.5 or more renders as `X'12"` instead of carrying.
pub fn centimeters_to_feet_inches(cm: f64) -> String {
    let inches_total = cm / 2.54;
    let feet = (inches_total / 12.0).floor() as i64;
    let inches = (inches_total % 12.0).round_ties_even() as i64;
    format!("{feet}'{inches}\"")
}

pub fn kilograms_to_pounds(kg: f64) -> f64 {
    round_to(kg * 2.20462, 2)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    #[test]
    fn male_moderate_scenario() {
        let target = daily_calorie_target(80.0, 180.0, 30, Sex::Male, ActivityLevel::Moderate);
        let expected = (88.362 + 13.397 * 80.0 + 4.799 * 180.0 - 5.677 * 30.0) * 1.55;
        assert!((target - expected).abs() < 1e-9);
        assert!((target - 2873.1296).abs() < 1e-3);
        assert_eq!(target.ceil() as i64, 2874);
    }

    #[test]
    fn other_sex_uses_second_formula() {
        let target = daily_calorie_target(60.0, 165.0, 40, Sex::Other, ActivityLevel::Sedentary);
        let expected = (447.593 + 9.247 * 60.0 + 3.098 * 165.0 - 4.330 * 40.0) * 1.2;
        assert!((target - expected).abs() < 1e-9);
    }

    #[test]
    fn monotonic_in_weight_height_and_age() {
        for sex in [Sex::Male, Sex::Other] {
            for level in LEVELS {
                let base = daily_calorie_target(70.0, 170.0, 35, sex, level);
                assert!(daily_calorie_target(71.0, 170.0, 35, sex, level) > base);
                assert!(daily_calorie_target(70.0, 171.0, 35, sex, level) > base);
                assert!(daily_calorie_target(70.0, 170.0, 36, sex, level) < base);
            }
        }
    }

    #[test]
    fn sex_parsing_is_case_insensitive_and_trims() {
        assert_eq!(Sex::from_input("male"), Sex::Male);
        assert_eq!(Sex::from_input("  Male "), Sex::Male);
        assert_eq!(Sex::from_input("female"), Sex::Other);
        assert_eq!(Sex::from_input(""), Sex::Other);
    }

    #[test]
    fn activity_level_lookup() {
        for level in LEVELS {
            assert_eq!(level.as_str().parse::<ActivityLevel>().unwrap(), level);
        }
        let err = "couch".parse::<ActivityLevel>().unwrap_err();
        assert!(matches!(err, AppError::UnknownActivityLevel(ref s) if s == "couch"));
        assert!("Moderate".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn pounds_conversion() {
        assert_eq!(kilograms_to_pounds(0.0), 0.0);
        assert_eq!(kilograms_to_pounds(100.0), 220.46);
        assert_eq!(kilograms_to_pounds(80.0), 176.37);
    }

    #[test]
    fn feet_inches_conversion() {
        assert_eq!(centimeters_to_feet_inches(182.88), "6'0\"");
        assert_eq!(centimeters_to_feet_inches(0.0), "0'0\"");
        assert_eq!(centimeters_to_feet_inches(180.0), "5'11\"");
    }

    #[test]
    fn feet_inches_does_not_carry() {
        // 23.6 inches: one foot plus 11.6 inches rounded on its own.
        assert_eq!(centimeters_to_feet_inches(59.944), "1'12\"");
    }
}
