//! The gateway contract every client implementation satisfies.

use async_trait::async_trait;
use wellness_core::{
    ChatMessage, CheckIn, DashboardOverview, DecisionTrace, NutritionMeal, PlanResult, QuizQuestion,
    QuizResult, ResponseMap, TopItems, TrendSet, User, UserIntake, YogaPlan,
};

use crate::error::Result;

/// Every network call the client makes goes through this trait.
///
/// Implementations are shared across flows and must be safe to call
/// concurrently.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    /// Register a new user from the intake form.
    async fn register(&self, intake: &UserIntake) -> Result<User>;

    /// Submit a daily check-in; the reply carries the generated plans.
    async fn submit_check_in(&self, user_id: i64, check_in: &CheckIn) -> Result<PlanResult>;

    async fn quiz_questions(&self) -> Result<Vec<QuizQuestion>>;

    async fn submit_quiz(&self, user_id: i64, responses: &ResponseMap) -> Result<QuizResult>;

    async fn dashboard_overview(&self, user_id: i64) -> Result<DashboardOverview>;

    /// Named trend series covering the last `days` days.
    async fn trends(&self, user_id: i64, days: u32) -> Result<TrendSet>;

    async fn top_items(&self, user_id: i64) -> Result<TopItems>;

    /// Today's yoga session, or `None` when nothing is scheduled.
    async fn today_yoga_plan(&self, user_id: i64) -> Result<Option<YogaPlan>>;

    async fn today_nutrition_plans(&self, user_id: i64) -> Result<Vec<NutritionMeal>>;

    async fn today_traces(&self, user_id: i64) -> Result<Vec<DecisionTrace>>;

    async fn recent_traces(&self, user_id: i64, limit: u32) -> Result<Vec<DecisionTrace>>;

    /// Send the whole conversation; the reply is the coach's next message.
    async fn send_chat_message(
        &self,
        user_id: i64,
        messages: &[ChatMessage],
    ) -> Result<ChatMessage>;

    /// Human-readable implementation name, for logs.
    fn name(&self) -> &str;
}
