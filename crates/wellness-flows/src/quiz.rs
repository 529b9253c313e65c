//! Linear mental-health quiz.

use std::sync::Arc;

use gateway_client::GatewayClient;
use tokio::sync::Mutex;
use tracing::debug;
use wellness_core::quiz::{ANSWER_MIDPOINT, ANSWER_SCALE};
use wellness_core::{Outcome, QuizQuestion, QuizResult, RequestState, ResponseMap};

use crate::panel::{Panel, ViewGuard};

pub const NO_QUESTIONS_MESSAGE: &str = "No questions available";

/// Result of a `next()` or `previous()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Now showing the question at this index.
    Moved(usize),
    /// `next()` on the last question submitted the quiz.
    Submitted(Outcome),
    /// Nothing to move to.
    Unchanged,
}

#[derive(Debug, Default)]
struct Answers {
    current: usize,
    responses: ResponseMap,
}

/// Walks the question list one question at a time and submits every answer
/// at the end.
pub struct QuizFlow {
    gateway: Arc<dyn GatewayClient>,
    user_id: i64,
    questions: Panel<Vec<QuizQuestion>>,
    answers: Mutex<Answers>,
    submission: Panel<QuizResult>,
    guard: ViewGuard,
}

impl QuizFlow {
    pub fn new(gateway: Arc<dyn GatewayClient>, user_id: i64) -> Self {
        let guard = ViewGuard::new();
        Self {
            gateway,
            user_id,
            questions: Panel::new("quiz questions", guard.clone()),
            answers: Mutex::new(Answers::default()),
            submission: Panel::new("quiz submission", guard.clone()),
            guard,
        }
    }

    /// Fetch the questions. Once they are loaded this does nothing.
    pub async fn load(&self) -> Outcome {
        if self.questions.value().await.is_some() {
            debug!("Quiz questions already loaded");
            return Outcome::Ignored;
        }

        let outcome = self
            .questions
            .run(async {
                self.gateway
                    .quiz_questions()
                    .await
                    .map_err(|err| format!("Failed to load questions: {}", err.user_message()))
            })
            .await;

        if outcome == Outcome::Completed {
            let questions = self.questions().await;
            let mut answers = self.answers.lock().await;
            answers.current = 0;
            answers.responses = questions
                .iter()
                .map(|q| (q.id.clone(), ANSWER_MIDPOINT))
                .collect();
        }
        outcome
    }

    pub async fn load_state(&self) -> RequestState<Vec<QuizQuestion>> {
        self.questions.state().await
    }

    pub async fn questions(&self) -> Vec<QuizQuestion> {
        self.questions.value().await.unwrap_or_default()
    }

    /// Loaded successfully but the service had no questions.
    pub async fn is_empty(&self) -> bool {
        matches!(self.questions.value().await, Some(list) if list.is_empty())
    }

    pub async fn current_index(&self) -> usize {
        self.answers.lock().await.current
    }

    pub async fn current_question(&self) -> Option<QuizQuestion> {
        let index = self.current_index().await;
        self.questions().await.get(index).cloned()
    }

    /// Percent complete, counting the question on screen.
    pub async fn progress(&self) -> f64 {
        let len = self.questions().await.len();
        if len == 0 {
            return 0.0;
        }
        (self.current_index().await + 1) as f64 / len as f64 * 100.0
    }

    pub async fn responses(&self) -> ResponseMap {
        self.answers.lock().await.responses.clone()
    }

    pub async fn response(&self, question_id: &str) -> Option<u8> {
        self.answers.lock().await.responses.get(question_id).copied()
    }

    /// Record an answer, clamped to the 1-10 scale. Unknown question ids are
    /// refused with `None`.
    pub async fn set_response(&self, question_id: &str, value: i64) -> Option<u8> {
        let mut answers = self.answers.lock().await;
        let slot = answers.responses.get_mut(question_id)?;
        *slot = ANSWER_SCALE.constrain(value as f64) as u8;
        Some(*slot)
    }

    /// Answer the question on screen.
    pub async fn answer(&self, value: i64) -> Option<u8> {
        let question = self.current_question().await?;
        self.set_response(&question.id, value).await
    }

    /// Advance, or submit when on the last question. Once a submission has
    /// succeeded the quiz is finished and this does nothing.
    pub async fn next(&self) -> Navigation {
        let len = self.questions().await.len();
        if len == 0 {
            return Navigation::Unchanged;
        }
        if self.submission.value().await.is_some() {
            debug!("Quiz already submitted");
            return Navigation::Unchanged;
        }

        {
            let mut answers = self.answers.lock().await;
            if answers.current + 1 < len {
                answers.current += 1;
                return Navigation::Moved(answers.current);
            }
        }
        Navigation::Submitted(self.submit().await)
    }

    pub async fn previous(&self) -> Navigation {
        let mut answers = self.answers.lock().await;
        if answers.current == 0 {
            return Navigation::Unchanged;
        }
        answers.current -= 1;
        Navigation::Moved(answers.current)
    }

    async fn submit(&self) -> Outcome {
        let snapshot = self.responses().await;
        self.submission
            .run(async {
                self.gateway
                    .submit_quiz(self.user_id, &snapshot)
                    .await
                    .map_err(|err| format!("Failed to submit quiz: {}", err.user_message()))
            })
            .await
    }

    pub async fn submission_state(&self) -> RequestState<QuizResult> {
        self.submission.state().await
    }

    pub async fn result(&self) -> Option<QuizResult> {
        self.submission.value().await
    }

    /// Scores as `key: value/10`, once submitted.
    pub async fn score_lines(&self) -> Vec<String> {
        self.result()
            .await
            .map(|result| result.score_lines())
            .unwrap_or_default()
    }

    /// The latest load or submission error.
    pub async fn error(&self) -> Option<String> {
        match self.submission.error().await {
            Some(message) => Some(message),
            None => self.questions.error().await,
        }
    }

    pub fn teardown(&self) {
        self.guard.teardown();
    }
}
