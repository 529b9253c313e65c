//! Scripted gateway - canned replies, call counters and recorded requests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use gateway_client::{GatewayClient, GatewayError, Result};
use tokio::sync::Mutex;
use wellness_core::{
    ChatMessage, CheckIn, DashboardOverview, DecisionTrace, Nutrients, NutritionMeal, PlanResult, Plans,
    QuizQuestion, QuizResult, ResponseMap, TopItems, TrendSet, User, UserIntake, YogaPlan,
};

/// Gateway operations, for counting calls and scripting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Register,
    SubmitCheckIn,
    QuizQuestions,
    SubmitQuiz,
    DashboardOverview,
    Trends,
    TopItems,
    TodayYogaPlan,
    TodayNutritionPlans,
    TodayTraces,
    RecentTraces,
    SendChatMessage,
}

const OPERATION_COUNT: usize = 12;

/// Reply used when no chat reply is scripted.
pub const DEFAULT_CHAT_REPLY: &str =
    "I'm a wellness coach focused on Sattvic nutrition and yoga. How can I help you today?";

/// Calories and protein the echo plan assigns per ingredient.
pub const ECHO_CALORIES_PER_INGREDIENT: f64 = 120.0;
pub const ECHO_PROTEIN_PER_INGREDIENT: f64 = 4.5;

#[derive(Debug, Clone)]
struct Failure {
    status: u16,
    detail: Option<String>,
}

#[derive(Debug, Default)]
struct Recorded {
    intakes: Vec<UserIntake>,
    check_ins: Vec<(i64, CheckIn)>,
    quiz_responses: Vec<ResponseMap>,
    trend_days: Vec<u32>,
    trace_limits: Vec<u32>,
    chat_histories: Vec<Vec<ChatMessage>>,
}

/// A gateway that answers from a script.
///
/// Unscripted operations answer like a cooperative service: registration
/// echoes the intake under `user_id`, check-ins get a one-meal plan built
/// from the submitted ingredients, the quiz echoes the responses as scores,
/// and everything else is empty.
pub struct ScriptedGateway {
    user_id: i64,
    plan: Option<PlanResult>,
    questions: Vec<QuizQuestion>,
    quiz_result: Option<QuizResult>,
    overview: DashboardOverview,
    trends: TrendSet,
    top_items: TopItems,
    yoga: Option<YogaPlan>,
    meals: Vec<NutritionMeal>,
    today_traces: Vec<DecisionTrace>,
    recent_traces: Vec<DecisionTrace>,
    chat_reply: String,
    failures: HashMap<Operation, Failure>,
    calls: [AtomicUsize; OPERATION_COUNT],
    recorded: Mutex<Recorded>,
}

impl Default for ScriptedGateway {
    fn default() -> Self {
        Self {
            user_id: 1,
            plan: None,
            questions: standard_questions(),
            quiz_result: None,
            overview: DashboardOverview::default(),
            trends: TrendSet::default(),
            top_items: TopItems::default(),
            yoga: None,
            meals: Vec::new(),
            today_traces: Vec::new(),
            recent_traces: Vec::new(),
            chat_reply: DEFAULT_CHAT_REPLY.to_string(),
            failures: HashMap::new(),
            calls: Default::default(),
            recorded: Mutex::new(Recorded::default()),
        }
    }
}

/// The six questions the planning service ships with.
pub fn standard_questions() -> Vec<QuizQuestion> {
    [
        ("stress", "How stressed do you feel today?"),
        ("anxiety", "Rate your anxiety level"),
        ("motivation", "How motivated are you today?"),
        ("mindfulness", "How mindful/present do you feel?"),
        ("appetite", "How is your appetite?"),
        ("sleep", "How was your sleep quality last night?"),
    ]
    .into_iter()
    .map(|(id, question)| QuizQuestion {
        id: id.to_string(),
        question: question.to_string(),
        scale: Some("1-10".to_string()),
        category: Some(id.to_string()),
    })
    .collect()
}

/// Plan with a single lunch built from the check-in's ingredients.
pub fn echo_plan(checkin_id: i64, check_in: &CheckIn) -> PlanResult {
    let ingredients: Vec<String> = check_in
        .ingredient_list()
        .into_iter()
        .map(str::to_string)
        .collect();
    let count = ingredients.len() as f64;

    let meal = NutritionMeal {
        meal_type: "lunch".to_string(),
        recipe_name: if ingredients.is_empty() {
            "Simple Kitchari".to_string()
        } else {
            format!("{} bowl", ingredients.join(" & "))
        },
        nutrients: Some(Nutrients {
            calories: Some(ECHO_CALORIES_PER_INGREDIENT * count),
            protein: Some(ECHO_PROTEIN_PER_INGREDIENT * count),
            fiber: Some(count),
            ..Default::default()
        }),
        ingredients,
        sattvic_score: Some(8.0),
        simplicity_index: Some(9.0),
        ..Default::default()
    };

    PlanResult {
        checkin_id: Some(checkin_id),
        reasoning: None,
        plans: Plans {
            yoga: None,
            nutrition: vec![meal],
        },
    }
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_plan(mut self, plan: PlanResult) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn with_questions(mut self, questions: Vec<QuizQuestion>) -> Self {
        self.questions = questions;
        self
    }

    pub fn with_quiz_result(mut self, result: QuizResult) -> Self {
        self.quiz_result = Some(result);
        self
    }

    pub fn with_overview(mut self, overview: DashboardOverview) -> Self {
        self.overview = overview;
        self
    }

    pub fn with_trends(mut self, trends: TrendSet) -> Self {
        self.trends = trends;
        self
    }

    pub fn with_top_items(mut self, top_items: TopItems) -> Self {
        self.top_items = top_items;
        self
    }

    pub fn with_yoga_plan(mut self, plan: YogaPlan) -> Self {
        self.yoga = Some(plan);
        self
    }

    pub fn with_meals(mut self, meals: Vec<NutritionMeal>) -> Self {
        self.meals = meals;
        self
    }

    pub fn with_today_traces(mut self, traces: Vec<DecisionTrace>) -> Self {
        self.today_traces = traces;
        self
    }

    pub fn with_recent_traces(mut self, traces: Vec<DecisionTrace>) -> Self {
        self.recent_traces = traces;
        self
    }

    pub fn with_chat_reply(mut self, reply: impl Into<String>) -> Self {
        self.chat_reply = reply.into();
        self
    }

    /// Make `operation` fail with an HTTP status and optional detail text.
    pub fn failing(mut self, operation: Operation, status: u16, detail: Option<&str>) -> Self {
        self.failures.insert(
            operation,
            Failure {
                status,
                detail: detail.map(str::to_string),
            },
        );
        self
    }

    /// Number of times `operation` was called, including failed calls.
    pub fn calls(&self, operation: Operation) -> usize {
        self.calls[operation as usize].load(Ordering::SeqCst)
    }

    pub async fn registrations(&self) -> Vec<UserIntake> {
        self.recorded.lock().await.intakes.clone()
    }

    pub async fn check_ins(&self) -> Vec<(i64, CheckIn)> {
        self.recorded.lock().await.check_ins.clone()
    }

    pub async fn quiz_submissions(&self) -> Vec<ResponseMap> {
        self.recorded.lock().await.quiz_responses.clone()
    }

    pub async fn trend_days(&self) -> Vec<u32> {
        self.recorded.lock().await.trend_days.clone()
    }

    pub async fn trace_limits(&self) -> Vec<u32> {
        self.recorded.lock().await.trace_limits.clone()
    }

    /// Conversations as sent, one entry per chat call.
    pub async fn chat_histories(&self) -> Vec<Vec<ChatMessage>> {
        self.recorded.lock().await.chat_histories.clone()
    }

    fn begin(&self, operation: Operation) -> Result<()> {
        self.calls[operation as usize].fetch_add(1, Ordering::SeqCst);
        match self.failures.get(&operation) {
            Some(failure) => Err(GatewayError::Status {
                status: failure.status,
                detail: failure.detail.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GatewayClient for ScriptedGateway {
    async fn register(&self, intake: &UserIntake) -> Result<User> {
        self.begin(Operation::Register)?;
        self.recorded.lock().await.intakes.push(intake.clone());

        let reply = User {
            id: self.user_id,
            name: intake.name.clone(),
            email: intake.email.clone(),
            age: None,
            gender: None,
            yoga_experience: None,
            dietary_preferences: Default::default(),
            goals: Default::default(),
            activity_level: None,
        };
        Ok(reply)
    }

    async fn submit_check_in(&self, user_id: i64, check_in: &CheckIn) -> Result<PlanResult> {
        self.begin(Operation::SubmitCheckIn)?;
        let mut recorded = self.recorded.lock().await;
        recorded.check_ins.push((user_id, check_in.clone()));
        let checkin_id = recorded.check_ins.len() as i64;

        Ok(match &self.plan {
            Some(plan) => plan.clone(),
            None => echo_plan(checkin_id, check_in),
        })
    }

    async fn quiz_questions(&self) -> Result<Vec<QuizQuestion>> {
        self.begin(Operation::QuizQuestions)?;
        Ok(self.questions.clone())
    }

    async fn submit_quiz(&self, _user_id: i64, responses: &ResponseMap) -> Result<QuizResult> {
        self.begin(Operation::SubmitQuiz)?;
        let mut recorded = self.recorded.lock().await;
        recorded.quiz_responses.push(responses.clone());

        if let Some(result) = &self.quiz_result {
            return Ok(result.clone());
        }
        Ok(QuizResult {
            id: Some(recorded.quiz_responses.len() as i64),
            scores: responses
                .iter()
                .map(|(id, value)| (id.clone(), f64::from(*value)))
                .collect(),
            date: None,
        })
    }

    async fn dashboard_overview(&self, _user_id: i64) -> Result<DashboardOverview> {
        self.begin(Operation::DashboardOverview)?;
        Ok(self.overview.clone())
    }

    async fn trends(&self, _user_id: i64, days: u32) -> Result<TrendSet> {
        self.begin(Operation::Trends)?;
        self.recorded.lock().await.trend_days.push(days);
        Ok(self.trends.clone())
    }

    async fn top_items(&self, _user_id: i64) -> Result<TopItems> {
        self.begin(Operation::TopItems)?;
        Ok(self.top_items.clone())
    }

    async fn today_yoga_plan(&self, _user_id: i64) -> Result<Option<YogaPlan>> {
        self.begin(Operation::TodayYogaPlan)?;
        Ok(self.yoga.clone())
    }

    async fn today_nutrition_plans(&self, _user_id: i64) -> Result<Vec<NutritionMeal>> {
        self.begin(Operation::TodayNutritionPlans)?;
        Ok(self.meals.clone())
    }

    async fn today_traces(&self, _user_id: i64) -> Result<Vec<DecisionTrace>> {
        self.begin(Operation::TodayTraces)?;
        Ok(self.today_traces.clone())
    }

    async fn recent_traces(&self, _user_id: i64, limit: u32) -> Result<Vec<DecisionTrace>> {
        self.begin(Operation::RecentTraces)?;
        self.recorded.lock().await.trace_limits.push(limit);
        Ok(self
            .recent_traces
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn send_chat_message(
        &self,
        _user_id: i64,
        messages: &[ChatMessage],
    ) -> Result<ChatMessage> {
        self.begin(Operation::SendChatMessage)?;
        self.recorded.lock().await.chat_histories.push(messages.to_vec());
        Ok(ChatMessage::assistant(self.chat_reply.clone()))
    }

    fn name(&self) -> &str {
        "ScriptedGateway"
    }
}
