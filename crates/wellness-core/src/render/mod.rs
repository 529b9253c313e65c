//! Plain-text views over service records.
//!
//! Renderers never fail: absent or malformed parts of a record are skipped.

mod plan;
mod trace;

pub use plan::{
    exercises_for_session, render_plan_result, render_today, thumbnail_url, MealCard, PlanView,
    TodayView, VideoLink, YogaSection, CHECKIN_INGREDIENT_PREVIEW, NO_INSTRUCTIONS,
    NO_PLAN_MESSAGE, TODAY_INGREDIENT_PREVIEW,
};
pub use trace::{
    render_trace, trace_text, truncate_chars, MemoryPreview, RuleLine, ToolUsage, TraceSection,
    MEMORY_PREVIEW_CHARS, MEMORY_PREVIEW_LIMIT,
};
