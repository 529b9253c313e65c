//! Failing gateway - every call returns the same HTTP error.

use async_trait::async_trait;
use gateway_client::{GatewayClient, GatewayError, Result};
use wellness_core::{
    ChatMessage, CheckIn, DashboardOverview, DecisionTrace, NutritionMeal, PlanResult, QuizQuestion,
    QuizResult, ResponseMap, TopItems, TrendSet, User, UserIntake, YogaPlan,
};

/// A gateway for which the service is always down.
#[derive(Debug, Clone)]
pub struct FailingGateway {
    status: u16,
    detail: Option<String>,
}

impl Default for FailingGateway {
    fn default() -> Self {
        Self {
            status: 500,
            detail: None,
        }
    }
}

impl FailingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `status` and a `{"detail": ...}` message.
    pub fn with_detail(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: Some(detail.into()),
        }
    }

    fn error<T>(&self) -> Result<T> {
        Err(GatewayError::Status {
            status: self.status,
            detail: self.detail.clone(),
        })
    }
}

#[async_trait]
impl GatewayClient for FailingGateway {
    async fn register(&self, _intake: &UserIntake) -> Result<User> {
        self.error()
    }

    async fn submit_check_in(&self, _user_id: i64, _check_in: &CheckIn) -> Result<PlanResult> {
        self.error()
    }

    async fn quiz_questions(&self) -> Result<Vec<QuizQuestion>> {
        self.error()
    }

    async fn submit_quiz(&self, _user_id: i64, _responses: &ResponseMap) -> Result<QuizResult> {
        self.error()
    }

    async fn dashboard_overview(&self, _user_id: i64) -> Result<DashboardOverview> {
        self.error()
    }

    async fn trends(&self, _user_id: i64, _days: u32) -> Result<TrendSet> {
        self.error()
    }

    async fn top_items(&self, _user_id: i64) -> Result<TopItems> {
        self.error()
    }

    async fn today_yoga_plan(&self, _user_id: i64) -> Result<Option<YogaPlan>> {
        self.error()
    }

    async fn today_nutrition_plans(&self, _user_id: i64) -> Result<Vec<NutritionMeal>> {
        self.error()
    }

    async fn today_traces(&self, _user_id: i64) -> Result<Vec<DecisionTrace>> {
        self.error()
    }

    async fn recent_traces(&self, _user_id: i64, _limit: u32) -> Result<Vec<DecisionTrace>> {
        self.error()
    }

    async fn send_chat_message(
        &self,
        _user_id: i64,
        _messages: &[ChatMessage],
    ) -> Result<ChatMessage> {
        self.error()
    }

    fn name(&self) -> &str {
        "FailingGateway"
    }
}
