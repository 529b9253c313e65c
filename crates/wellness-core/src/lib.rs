//! Core types and pure transforms for the wellness coach client.
//!
//! This crate holds everything that does not touch the network or disk:
//!
//! - Typed records for users, check-ins, plans, quizzes, dashboards and
//!   decision traces and chat messages, parsed leniently so partial payloads still load
//! - [`CheckIn`] and [`UserIntake`] form state with bounded setters
//! - [`RequestState`], the single-flight state machine every flow uses
//! - [`aggregate`] for nutrition totals, sattvic averages and stat cards
//! - [`trend`] for chart-ready series
//! - [`render`] for text views of plans and traces
//!
//! # Example
//!
//! ```rust
//! use wellness_core::{aggregate, NutritionMeal};
//!
//! let meals: Vec<NutritionMeal> = serde_json::from_str(
//!     r#"[{"meal_type": "lunch", "nutrients": {"calories": 410.4, "protein": 12}}]"#,
//! ).unwrap();
//!
//! let totals = aggregate::totals(&meals);
//! assert_eq!(totals.calories_display(), "410");
//! assert_eq!(totals.protein_display(), "12.0g");
//! ```

pub mod aggregate;
pub mod chat;
pub mod checkin;
pub mod dashboard;
pub mod lenient;
pub mod plan;
pub mod quiz;
pub mod render;
pub mod request;
pub mod toggle;
pub mod trace;
pub mod trend;
pub mod user;

pub use aggregate::{DailySummary, Direction, NutritionTotals, StatCard};
pub use chat::{ChatMessage, ChatReply, ChatRequest, ChatRole};
pub use checkin::{CheckIn, Mood, Range};
pub use dashboard::{DashboardOverview, TopItems, TrendPoint, TrendSeries, TrendSet};
pub use plan::{NutritionMeal, Nutrients, PlanResult, Plans, Reasoning, YogaPlan};
pub use quiz::{QuestionList, QuizQuestion, QuizResult, QuizSubmission, ResponseMap};
pub use request::{Outcome, RequestState};
pub use toggle::ToggleSet;
pub use trace::{DecisionTrace, MemoryEntry, RuleDetail, TriggeredRule};
pub use user::{
    ActivityLevel, DietaryPreference, Gender, Goal, User, UserIntake, YogaExperience,
};
