//! Plan records returned after a check-in: reasoning, yoga and meals.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lenient;

/// Reply to a check-in submission.
///
/// Every part is optional; an absent part was not generated this cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub checkin_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub reasoning: Option<Reasoning>,
    #[serde(default, deserialize_with = "lenient::record_or_default")]
    pub plans: Plans,
}

impl PlanResult {
    pub fn yoga_plan(&self) -> Option<&YogaPlan> {
        self.plans.yoga.as_ref()
    }

    pub fn nutrition_meals(&self) -> &[NutritionMeal] {
        &self.plans.nutrition
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reasoning {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub energy_trend: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub appetite_trend: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plans {
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub yoga: Option<YogaPlan>,
    #[serde(default, deserialize_with = "lenient::vec_or_empty")]
    pub nutrition: Vec<NutritionMeal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YogaPlan {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub session_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub duration_minutes: Option<u32>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub youtube_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub youtube_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub youtube_video_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub description: Option<String>,
}

/// Nutrient values of a meal. Known fields that are missing or malformed
/// are `None`; anything else the service sends is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub calories: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub fiber: Option<f64>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// One meal of a daily nutrition plan.
///
/// The check-in reply and the `today` listing name two fields differently;
/// both spellings are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionMeal {
    #[serde(default, deserialize_with = "lenient::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub meal_type: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub recipe_name: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_record")]
    pub nutrients: Option<Nutrients>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub sattvic_score: Option<f64>,
    #[serde(
        default,
        alias = "meal_simplicity_index",
        deserialize_with = "lenient::opt_f64"
    )]
    pub simplicity_index: Option<f64>,
    #[serde(
        default,
        alias = "recipe_instructions",
        deserialize_with = "lenient::opt_string"
    )]
    pub instructions: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub date: Option<String>,
}

impl NutritionMeal {
    pub fn calories(&self) -> Option<f64> {
        self.nutrients.as_ref().and_then(|n| n.calories)
    }

    pub fn protein(&self) -> Option<f64> {
        self.nutrients.as_ref().and_then(|n| n.protein)
    }

    pub fn fiber(&self) -> Option<f64> {
        self.nutrients.as_ref().and_then(|n| n.fiber)
    }
}
