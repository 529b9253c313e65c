//! User profile and onboarding intake types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lenient;
use crate::toggle::ToggleSet;

/// Age used for a fresh intake form.
pub const DEFAULT_AGE: u32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YogaExperience {
    Beginner,
    Intermediate,
    Advanced,
}

impl YogaExperience {
    pub const ALL: [YogaExperience; 3] = [
        YogaExperience::Beginner,
        YogaExperience::Intermediate,
        YogaExperience::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
        }
    }

    /// Upper-case label with underscores spaced out ("VERY ACTIVE").
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    Vegetarian,
    Vegan,
    Omnivore,
    Pescatarian,
}

impl DietaryPreference {
    pub const ALL: [DietaryPreference; 4] = [
        DietaryPreference::Vegetarian,
        DietaryPreference::Vegan,
        DietaryPreference::Omnivore,
        DietaryPreference::Pescatarian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
            Self::Omnivore => "omnivore",
            Self::Pescatarian => "pescatarian",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    StressRelief,
    Flexibility,
    GeneralWellness,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::WeightLoss,
        Goal::MuscleGain,
        Goal::StressRelief,
        Goal::Flexibility,
        Goal::GeneralWellness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeightLoss => "weight_loss",
            Self::MuscleGain => "muscle_gain",
            Self::StressRelief => "stress_relief",
            Self::Flexibility => "flexibility",
            Self::GeneralWellness => "general_wellness",
        }
    }

    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// The onboarding form, accumulated across both intake steps and sent as
/// the registration body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserIntake {
    pub name: String,
    pub email: String,
    age: u32,
    pub gender: Gender,
    pub yoga_experience: YogaExperience,
    pub dietary_preferences: ToggleSet<DietaryPreference>,
    /// Sent empty; the intake form does not collect allergies.
    pub allergies: Vec<String>,
    pub goals: ToggleSet<Goal>,
    pub activity_level: ActivityLevel,
}

impl Default for UserIntake {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            age: DEFAULT_AGE,
            gender: Gender::Other,
            yoga_experience: YogaExperience::Beginner,
            dietary_preferences: ToggleSet::new(),
            allergies: Vec::new(),
            goals: ToggleSet::new(),
            activity_level: ActivityLevel::Moderate,
        }
    }
}

impl UserIntake {
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Set the age; zero is raised to one.
    pub fn set_age(&mut self, age: u32) {
        self.age = age.max(1);
    }
}

/// A registered user, as returned by the service and persisted locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub age: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub yoga_experience: Option<String>,
    #[serde(default)]
    pub dietary_preferences: BTreeSet<String>,
    #[serde(default)]
    pub goals: BTreeSet<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub activity_level: Option<String>,
}

impl User {
    /// Complete a registration reply with the profile fields the service
    /// does not echo back.
    pub fn from_registration(reply: User, intake: &UserIntake) -> Self {
        let or_intake = |value: Option<String>, fallback: &str| {
            value
                .filter(|v| !v.is_empty())
                .or_else(|| Some(fallback.to_string()))
        };

        Self {
            id: reply.id,
            name: if reply.name.is_empty() {
                intake.name.clone()
            } else {
                reply.name
            },
            email: if reply.email.is_empty() {
                intake.email.clone()
            } else {
                reply.email
            },
            age: reply.age.filter(|age| *age > 0).or(Some(intake.age())),
            gender: or_intake(reply.gender, intake.gender.as_str()),
            yoga_experience: or_intake(reply.yoga_experience, intake.yoga_experience.as_str()),
            dietary_preferences: if reply.dietary_preferences.is_empty() {
                intake
                    .dietary_preferences
                    .iter()
                    .map(|p| p.as_str().to_string())
                    .collect()
            } else {
                reply.dietary_preferences
            },
            goals: if reply.goals.is_empty() {
                intake.goals.iter().map(|g| g.as_str().to_string()).collect()
            } else {
                reply.goals
            },
            activity_level: or_intake(reply.activity_level, intake.activity_level.as_str()),
        }
    }
}
