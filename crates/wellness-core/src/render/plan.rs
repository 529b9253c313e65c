//! Text views of yoga sessions and meal plans.

use std::fmt;

use crate::aggregate::{self, format_calories, format_grams, DailySummary, NutritionTotals};
use crate::plan::{NutritionMeal, PlanResult, Reasoning, YogaPlan};

/// Ingredients listed per meal card right after a check-in.
pub const CHECKIN_INGREDIENT_PREVIEW: usize = 6;

/// Ingredients listed per meal card on the today view.
pub const TODAY_INGREDIENT_PREVIEW: usize = 8;

pub const NO_INSTRUCTIONS: &str = "No instructions available.";

const STRESS_RELIEF: &[&str] = &[
    "Child's Pose (Balasana) - 2 min",
    "Cat-Cow Stretch - 1 min",
    "Seated Forward Fold - 2 min",
    "Legs Up the Wall - 5 min",
    "Corpse Pose (Savasana) - 5 min",
    "Alternate Nostril Breathing - 3 min",
];

const ENERGIZING: &[&str] = &[
    "Sun Salutation (Surya Namaskar) - 5 rounds",
    "Warrior I & II - 1 min each",
    "Triangle Pose (Trikonasana) - 1 min",
    "Downward Dog - 1 min",
    "Cobra Pose - 30 sec",
    "Bridge Pose - 1 min",
];

const FLEXIBILITY: &[&str] = &[
    "Standing Forward Fold - 1 min",
    "Seated Forward Fold - 2 min",
    "Pigeon Pose - 2 min each side",
    "Butterfly Pose - 2 min",
    "Reclining Hand-to-Big-Toe - 1 min each",
    "Twisted Triangle - 1 min each side",
];

const STRENGTH: &[&str] = &[
    "Plank Pose - 30-60 sec",
    "Warrior III - 30 sec each",
    "Side Plank - 30 sec each",
    "Chair Pose - 1 min",
    "Boat Pose - 30 sec",
    "Crow Pose - 30 sec",
];

const RECOVERY: &[&str] = &[
    "Gentle Twists - 1 min each",
    "Supported Bridge - 3 min",
    "Legs Up the Wall - 5 min",
    "Reclining Bound Angle - 3 min",
    "Supine Spinal Twist - 2 min each",
    "Corpse Pose (Savasana) - 5 min",
];

const GENERAL: &[&str] = &[
    "Mountain Pose - 1 min",
    "Downward Dog - 1 min",
    "Warrior I - 1 min",
    "Child's Pose - 2 min",
    "Corpse Pose - 3 min",
];

/// Suggested poses for a session type; unknown or missing types get a
/// general sequence.
pub fn exercises_for_session(session_type: Option<&str>) -> &'static [&'static str] {
    match session_type {
        Some("stress_relief") => STRESS_RELIEF,
        Some("energizing") => ENERGIZING,
        Some("flexibility") => FLEXIBILITY,
        Some("strength") => STRENGTH,
        Some("recovery") => RECOVERY,
        _ => GENERAL,
    }
}

pub fn thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/maxresdefault.jpg", video_id)
}

/// Score values of zero are treated as not scored.
fn present_score(score: Option<f64>) -> Option<f64> {
    score.filter(|s| *s != 0.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealCard {
    /// "meal_type: recipe_name"
    pub summary: String,
    pub scores: Option<String>,
    pub ingredients: Option<String>,
    pub nutrients: Option<String>,
    pub details: String,
}

impl MealCard {
    pub fn from_meal(meal: &NutritionMeal, ingredient_limit: usize) -> Self {
        let scores = present_score(meal.sattvic_score).map(|sattvic| {
            match meal.simplicity_index {
                Some(simplicity) => {
                    format!("Sattvic Score: {}/10 | Simplicity: {}/10", sattvic, simplicity)
                }
                None => format!("Sattvic Score: {}/10", sattvic),
            }
        });

        let ingredients = (!meal.ingredients.is_empty()).then(|| {
            let shown = &meal.ingredients[..meal.ingredients.len().min(ingredient_limit)];
            let ellipsis = if meal.ingredients.len() > ingredient_limit {
                "..."
            } else {
                ""
            };
            format!("{}{}", shown.join(", "), ellipsis)
        });

        let nutrients = meal.nutrients.as_ref().map(|n| {
            format!(
                "Calories: {} | Protein: {} | Fiber: {}",
                format_calories(n.calories.unwrap_or(0.0)),
                format_grams(n.protein.unwrap_or(0.0)),
                format_grams(n.fiber.unwrap_or(0.0)),
            )
        });

        Self {
            summary: format!("{}: {}", meal.meal_type, meal.recipe_name),
            scores,
            ingredients,
            nutrients,
            details: meal
                .instructions
                .clone()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| NO_INSTRUCTIONS.to_string()),
        }
    }
}

impl fmt::Display for MealCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        if let Some(scores) = &self.scores {
            write!(f, "\n  {}", scores)?;
        }
        if let Some(ingredients) = &self.ingredients {
            write!(f, "\n  Ingredients: {}", ingredients)?;
        }
        if let Some(nutrients) = &self.nutrients {
            write!(f, "\n  {}", nutrients)?;
        }
        write!(f, "\n  Instructions:")?;
        for line in self.details.lines() {
            write!(f, "\n    {}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoLink {
    pub title: String,
    pub url: String,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct YogaSection {
    pub session_type: Option<String>,
    pub duration_minutes: Option<u32>,
    pub description: Option<String>,
    pub video: Option<VideoLink>,
    pub exercises: &'static [&'static str],
}

impl YogaSection {
    pub fn from_plan(plan: &YogaPlan) -> Self {
        let video = plan.youtube_url.as_ref().map(|url| VideoLink {
            title: plan
                .youtube_title
                .clone()
                .unwrap_or_else(|| "Yoga session".to_string()),
            url: url.clone(),
            thumbnail: plan.youtube_video_id.as_deref().map(thumbnail_url),
        });

        Self {
            session_type: plan.session_type.clone(),
            duration_minutes: plan.duration_minutes,
            description: plan.description.clone(),
            video,
            exercises: exercises_for_session(plan.session_type.as_deref()),
        }
    }
}

impl fmt::Display for YogaSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Yoga")?;
        if let Some(kind) = &self.session_type {
            write!(f, " ({})", kind.replace('_', " "))?;
        }
        if let Some(minutes) = self.duration_minutes {
            write!(f, " - {} minutes", minutes)?;
        }
        if let Some(description) = &self.description {
            write!(f, "\n  {}", description)?;
        }
        if let Some(video) = &self.video {
            write!(f, "\n  Watch: {} <{}>", video.title, video.url)?;
        }
        write!(f, "\n  Sequence:")?;
        for (i, exercise) in self.exercises.iter().enumerate() {
            write!(f, "\n    {}. {}", i + 1, exercise)?;
        }
        Ok(())
    }
}

/// Everything shown after a successful check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanView {
    pub reasoning: Option<Reasoning>,
    pub yoga: Option<YogaSection>,
    pub meals: Vec<MealCard>,
    pub totals: Option<NutritionTotals>,
}

pub fn render_plan_result(result: &PlanResult) -> PlanView {
    let meals = result.nutrition_meals();
    PlanView {
        reasoning: result.reasoning.clone(),
        yoga: result.yoga_plan().map(YogaSection::from_plan),
        meals: meals
            .iter()
            .map(|meal| MealCard::from_meal(meal, CHECKIN_INGREDIENT_PREVIEW))
            .collect(),
        totals: (!meals.is_empty()).then(|| aggregate::totals(meals)),
    }
}

impl fmt::Display for PlanView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks: Vec<String> = Vec::new();

        if let Some(reasoning) = &self.reasoning {
            let mut text = String::from("Why this plan:");
            if let Some(explanation) = &reasoning.explanation {
                text.push_str(&format!("\n  {}", explanation));
            }
            text.push_str(&format!(
                "\n  Energy trend: {} | Appetite trend: {}",
                reasoning.energy_trend.as_deref().unwrap_or("unknown"),
                reasoning.appetite_trend.as_deref().unwrap_or("unknown"),
            ));
            blocks.push(text);
        }
        if let Some(yoga) = &self.yoga {
            blocks.push(yoga.to_string());
        }
        if !self.meals.is_empty() {
            let cards: Vec<String> = self.meals.iter().map(ToString::to_string).collect();
            blocks.push(format!("Complete Daily Meal Plan\n{}", cards.join("\n")));
        }
        if let Some(totals) = &self.totals {
            blocks.push(totals.to_string());
        }

        write!(f, "{}", blocks.join("\n\n"))
    }
}

/// Today's plan: yoga session, meal cards and the sidebar summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TodayView {
    pub yoga: Option<YogaSection>,
    pub meals: Vec<MealCard>,
    pub summary: DailySummary,
}

pub const NO_PLAN_MESSAGE: &str = "Complete a check-in to get your personalized plan for today!";

impl TodayView {
    pub fn is_empty(&self) -> bool {
        self.yoga.is_none() && self.meals.is_empty()
    }
}

pub fn render_today(yoga: Option<&YogaPlan>, meals: &[NutritionMeal]) -> TodayView {
    TodayView {
        yoga: yoga.map(YogaSection::from_plan),
        meals: meals
            .iter()
            .map(|meal| MealCard::from_meal(meal, TODAY_INGREDIENT_PREVIEW))
            .collect(),
        summary: aggregate::daily_summary(yoga, meals),
    }
}

impl fmt::Display for TodayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{}", NO_PLAN_MESSAGE);
        }
        let mut blocks: Vec<String> = Vec::new();
        if let Some(yoga) = &self.yoga {
            blocks.push(yoga.to_string());
        }
        blocks.extend(self.meals.iter().map(ToString::to_string));
        blocks.push(self.summary.to_string());
        write!(f, "{}", blocks.join("\n\n"))
    }
}
