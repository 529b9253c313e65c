//! Planning service HTTP client.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use wellness_core::lenient::list_from_value;
use wellness_core::{
    ChatMessage, ChatReply, ChatRequest, CheckIn, DashboardOverview, DecisionTrace, NutritionMeal,
    PlanResult, QuestionList, QuizQuestion, QuizResult, QuizSubmission, ResponseMap, TopItems, TrendSet, User, UserIntake,
    YogaPlan,
};

use crate::client::GatewayClient;
use crate::config::GatewayConfig;
use crate::error::{error_detail, GatewayError, Result};

/// `GatewayClient` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpGatewayClient {
    http: Client,
    config: GatewayConfig,
}

impl HttpGatewayClient {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GatewayError::Http)?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn get_value(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    async fn post_value<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<Value> {
        debug!("POST {}", url);
        let response = self.http.post(url).json(body).send().await?;
        read_json(response).await
    }

    async fn get<R: DeserializeOwned>(&self, url: &str) -> Result<R> {
        Ok(serde_json::from_value(self.get_value(url).await?)?)
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<R> {
        Ok(serde_json::from_value(self.post_value(url, body).await?)?)
    }
}

/// Check the status, then parse the body. Error bodies contribute their
/// `detail` text.
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let detail = error_detail(&body);
        warn!("Request failed with HTTP {}: {}", status, detail.as_deref().unwrap_or(""));
        return Err(GatewayError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&body)?)
}

/// Today's yoga reply is either a plan or `{"message": "..."}` when nothing
/// is scheduled.
pub fn yoga_plan_from_reply(reply: Value) -> Result<Option<YogaPlan>> {
    match reply {
        Value::Object(ref map) if map.contains_key("message") => {
            debug!("No yoga plan today: {}", map["message"]);
            Ok(None)
        }
        Value::Object(_) => Ok(Some(serde_json::from_value(reply)?)),
        _ => Ok(None),
    }
}

#[async_trait]
impl GatewayClient for HttpGatewayClient {
    async fn register(&self, intake: &UserIntake) -> Result<User> {
        let user: User = self.post(&self.config.register_url(), intake).await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    async fn submit_check_in(&self, user_id: i64, check_in: &CheckIn) -> Result<PlanResult> {
        let result: PlanResult = self.post(&self.config.check_in_url(user_id), check_in).await?;
        info!(
            "Check-in {:?} accepted: {} meal(s), yoga {}",
            result.checkin_id,
            result.nutrition_meals().len(),
            if result.yoga_plan().is_some() { "planned" } else { "none" }
        );
        Ok(result)
    }

    async fn quiz_questions(&self) -> Result<Vec<QuizQuestion>> {
        let list: QuestionList = self.get(&self.config.quiz_questions_url()).await?;
        Ok(list.questions)
    }

    async fn submit_quiz(&self, user_id: i64, responses: &ResponseMap) -> Result<QuizResult> {
        let body = QuizSubmission { responses };
        let result: QuizResult = self.post(&self.config.quiz_url(user_id), &body).await?;
        info!("Quiz submitted with {} response(s)", responses.len());
        Ok(result)
    }

    async fn dashboard_overview(&self, user_id: i64) -> Result<DashboardOverview> {
        self.get(&self.config.overview_url(user_id)).await
    }

    async fn trends(&self, user_id: i64, days: u32) -> Result<TrendSet> {
        self.get(&self.config.trends_url(user_id, days)).await
    }

    async fn top_items(&self, user_id: i64) -> Result<TopItems> {
        self.get(&self.config.top_items_url(user_id)).await
    }

    async fn today_yoga_plan(&self, user_id: i64) -> Result<Option<YogaPlan>> {
        let reply = self.get_value(&self.config.today_yoga_url(user_id)).await?;
        yoga_plan_from_reply(reply)
    }

    async fn today_nutrition_plans(&self, user_id: i64) -> Result<Vec<NutritionMeal>> {
        let reply = self
            .get_value(&self.config.today_nutrition_url(user_id))
            .await?;
        Ok(list_from_value(reply))
    }

    async fn today_traces(&self, user_id: i64) -> Result<Vec<DecisionTrace>> {
        let reply = self.get_value(&self.config.today_traces_url(user_id)).await?;
        Ok(list_from_value(reply))
    }

    async fn recent_traces(&self, user_id: i64, limit: u32) -> Result<Vec<DecisionTrace>> {
        let reply = self
            .get_value(&self.config.recent_traces_url(user_id, limit))
            .await?;
        Ok(list_from_value(reply))
    }

    async fn send_chat_message(
        &self,
        user_id: i64,
        messages: &[ChatMessage],
    ) -> Result<ChatMessage> {
        let body = ChatRequest { user_id, messages };
        let reply: ChatReply = self.post(&self.config.chat_url(), &body).await?;
        debug!("Chat reply of {} chars", reply.message.chars().count());
        Ok(reply.into_message())
    }

    fn name(&self) -> &str {
        "HttpGatewayClient"
    }
}
