//! Delayed gateway - wraps another gateway with artificial latency.

use std::time::Duration;

use async_trait::async_trait;
use gateway_client::{GatewayClient, Result};
use tokio::time::sleep;
use wellness_core::{
    ChatMessage, CheckIn, DashboardOverview, DecisionTrace, NutritionMeal, PlanResult, QuizQuestion,
    QuizResult, ResponseMap, TopItems, TrendSet, User, UserIntake, YogaPlan,
};

/// A gateway that sleeps before forwarding every call.
///
/// Useful for holding a request in flight while a test pokes at the flow.
pub struct DelayedGateway<G: GatewayClient> {
    inner: G,
    delay: Duration,
}

impl<G: GatewayClient> DelayedGateway<G> {
    pub fn new(inner: G, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn with_millis(inner: G, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: GatewayClient> GatewayClient for DelayedGateway<G> {
    async fn register(&self, intake: &UserIntake) -> Result<User> {
        sleep(self.delay).await;
        self.inner.register(intake).await
    }

    async fn submit_check_in(&self, user_id: i64, check_in: &CheckIn) -> Result<PlanResult> {
        sleep(self.delay).await;
        self.inner.submit_check_in(user_id, check_in).await
    }

    async fn quiz_questions(&self) -> Result<Vec<QuizQuestion>> {
        sleep(self.delay).await;
        self.inner.quiz_questions().await
    }

    async fn submit_quiz(&self, user_id: i64, responses: &ResponseMap) -> Result<QuizResult> {
        sleep(self.delay).await;
        self.inner.submit_quiz(user_id, responses).await
    }

    async fn dashboard_overview(&self, user_id: i64) -> Result<DashboardOverview> {
        sleep(self.delay).await;
        self.inner.dashboard_overview(user_id).await
    }

    async fn trends(&self, user_id: i64, days: u32) -> Result<TrendSet> {
        sleep(self.delay).await;
        self.inner.trends(user_id, days).await
    }

    async fn top_items(&self, user_id: i64) -> Result<TopItems> {
        sleep(self.delay).await;
        self.inner.top_items(user_id).await
    }

    async fn today_yoga_plan(&self, user_id: i64) -> Result<Option<YogaPlan>> {
        sleep(self.delay).await;
        self.inner.today_yoga_plan(user_id).await
    }

    async fn today_nutrition_plans(&self, user_id: i64) -> Result<Vec<NutritionMeal>> {
        sleep(self.delay).await;
        self.inner.today_nutrition_plans(user_id).await
    }

    async fn today_traces(&self, user_id: i64) -> Result<Vec<DecisionTrace>> {
        sleep(self.delay).await;
        self.inner.today_traces(user_id).await
    }

    async fn recent_traces(&self, user_id: i64, limit: u32) -> Result<Vec<DecisionTrace>> {
        sleep(self.delay).await;
        self.inner.recent_traces(user_id, limit).await
    }

    async fn send_chat_message(
        &self,
        user_id: i64,
        messages: &[ChatMessage],
    ) -> Result<ChatMessage> {
        sleep(self.delay).await;
        self.inner.send_chat_message(user_id, messages).await
    }

    fn name(&self) -> &str {
        "DelayedGateway"
    }
}
