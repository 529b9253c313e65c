//! Derived values over plan and dashboard records.
//!
//! Everything here is a pure function of its input. Sums are accumulated
//! in sorted order so that any permutation of the input gives bit-identical
//! results.

use std::fmt;

use crate::dashboard::DashboardOverview;
use crate::plan::{NutritionMeal, YogaPlan};

/// How many top meals / recent videos the dashboard lists.
pub const TOP_ITEM_LIMIT: usize = 3;

/// Daily nutrition totals. Values are unrounded; use the display helpers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub fiber: f64,
    pub meal_count: usize,
}

impl NutritionTotals {
    pub fn calories_display(&self) -> String {
        format_calories(self.calories)
    }

    pub fn protein_display(&self) -> String {
        format_grams(self.protein)
    }

    pub fn fiber_display(&self) -> String {
        format_grams(self.fiber)
    }
}

impl fmt::Display for NutritionTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Daily Nutrition Summary")?;
        writeln!(f, "  Total Calories: {}", self.calories_display())?;
        writeln!(f, "  Total Protein: {}", self.protein_display())?;
        writeln!(f, "  Total Fiber: {}", self.fiber_display())?;
        write!(f, "  Total Meals: {}", self.meal_count)
    }
}

pub fn format_calories(calories: f64) -> String {
    format!("{}", calories.round() as i64)
}

pub fn format_grams(grams: f64) -> String {
    format!("{:.1}g", grams)
}

fn ordered_sum(values: impl Iterator<Item = f64>) -> f64 {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.into_iter().sum()
}

/// Sum calories, protein and fiber over `meals`; missing values count as 0.
pub fn totals(meals: &[NutritionMeal]) -> NutritionTotals {
    NutritionTotals {
        calories: ordered_sum(meals.iter().map(|m| m.calories().unwrap_or(0.0))),
        protein: ordered_sum(meals.iter().map(|m| m.protein().unwrap_or(0.0))),
        fiber: ordered_sum(meals.iter().map(|m| m.fiber().unwrap_or(0.0))),
        meal_count: meals.len(),
    }
}

/// Mean sattvic score over the meals that carry one, or 0 if none do.
pub fn average_sattvic(meals: &[NutritionMeal]) -> f64 {
    let scores: Vec<f64> = meals.iter().filter_map(|m| m.sattvic_score).collect();
    if scores.is_empty() {
        return 0.0;
    }
    let count = scores.len() as f64;
    ordered_sum(scores.into_iter()) / count
}

/// Trend arrow shown on a stat card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn from_bool(up: bool) -> Self {
        if up {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Up => "Improving",
            Self::Down => "Needs attention",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub direction: Direction,
}

impl fmt::Display for StatCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.title, self.value, self.direction.label())
    }
}

/// The four headline cards of the dashboard.
pub fn stat_cards(overview: &DashboardOverview) -> [StatCard; 4] {
    let yoga = overview.yoga.consistency_percentage;
    let stress = overview.wellness.stress_reduction;

    [
        StatCard {
            title: "Yoga Consistency",
            value: format!("{}%", yoga),
            direction: Direction::from_bool(yoga > 70.0),
        },
        StatCard {
            title: "Protein Intake",
            value: format!("{}g", overview.nutrition.protein_total),
            direction: Direction::Up,
        },
        StatCard {
            title: "Stress Reduction",
            value: format!("{}%", stress),
            direction: Direction::from_bool(stress > 50.0),
        },
        StatCard {
            title: "Adherence",
            value: format!("{}%", overview.wellness.adherence_avg),
            direction: Direction::from_bool(overview.wellness.adherence_improvement > 0.0),
        },
    ]
}

/// The first `TOP_ITEM_LIMIT` entries of a ranked list.
pub fn leading<T>(items: &[T]) -> &[T] {
    &items[..items.len().min(TOP_ITEM_LIMIT)]
}

/// Sidebar summary of today's plan.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub yoga_minutes: Option<u32>,
    pub nutrition: Option<NutritionTotals>,
    pub average_sattvic: f64,
}

impl DailySummary {
    pub fn yoga_label(&self) -> String {
        match self.yoga_minutes {
            Some(minutes) => format!("{} min", minutes),
            None => "Not scheduled".to_string(),
        }
    }

    pub fn sattvic_label(&self) -> String {
        format!("{:.1}/10", self.average_sattvic)
    }
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Daily Summary")?;
        write!(f, "  Yoga Session: {}", self.yoga_label())?;
        if let Some(nutrition) = &self.nutrition {
            write!(f, "\n  Total Calories: {}", nutrition.calories_display())?;
            write!(f, "\n  Protein: {}", nutrition.protein_display())?;
            write!(f, "\n  Fiber: {}", nutrition.fiber_display())?;
            write!(f, "\n  Avg Sattvic: {}", self.sattvic_label())?;
        }
        Ok(())
    }
}

pub fn daily_summary(yoga: Option<&YogaPlan>, meals: &[NutritionMeal]) -> DailySummary {
    DailySummary {
        yoga_minutes: yoga.and_then(|plan| plan.duration_minutes),
        nutrition: (!meals.is_empty()).then(|| totals(meals)),
        average_sattvic: average_sattvic(meals),
    }
}
