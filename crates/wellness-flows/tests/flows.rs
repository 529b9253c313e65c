//! Integration tests for wellness-flows driven through the mock gateway.
//!
//! Run with:
//!   cargo test -p wellness-flows --test flows

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mock_gateway::{DelayedGateway, Operation, ScriptedGateway};
use tokio::time::sleep;
use uuid::Uuid;
use wellness_core::{ChatRole, Goal, Outcome, QuizQuestion};
use wellness_flows::{
    ChatFlow, CheckInFlow, IntakeWizard, Navigation, QuizFlow, SessionStore, TraceMode, TracePanel,
};

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("wellness-flows-{}", Uuid::new_v4()))
}

// ============================================================================
// Onboarding to first plan
// ============================================================================

mod onboarding_tests {
    use super::*;

    #[tokio::test]
    async fn test_onboard_then_check_in() {
        let dir = temp_dir();
        let gateway = Arc::new(ScriptedGateway::new().with_user_id(17));
        let session = Arc::new(SessionStore::open(&dir).unwrap());
        assert!(!session.is_established().await);

        let wizard = IntakeWizard::new(gateway.clone(), session.clone());
        wizard
            .update(|form| {
                form.name = "Meera".to_string();
                form.email = "meera@example.com".to_string();
            })
            .await;
        wizard.next().await;
        wizard.toggle_goal(Goal::GeneralWellness).await;
        assert_eq!(wizard.complete().await, Outcome::Completed);

        let restored = SessionStore::open(&dir).unwrap();
        let user_id = restored.user_id().await.unwrap();
        assert_eq!(user_id, 17);

        let flow = CheckInFlow::new(gateway.clone(), user_id);
        flow.update(|form| form.ingredients = "rice,lentils".to_string())
            .await;
        assert_eq!(flow.submit().await, Outcome::Completed);

        let result = flow.result().await.unwrap();
        assert!(!result.nutrition_meals().is_empty());

        let summary = flow.summary().await.unwrap();
        assert_eq!(summary.meal_count, result.nutrition_meals().len());
        let calories: f64 = result
            .nutrition_meals()
            .iter()
            .filter_map(|meal| meal.calories())
            .sum();
        assert_eq!(summary.calories, calories);
        assert_eq!(summary.calories_display(), "240");

        let view = flow.view().await.unwrap();
        assert_eq!(view.totals, Some(summary));
        assert_eq!(gateway.check_ins().await[0].0, 17);

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_teardown_before_registration_reply_skips_session() {
        let dir = temp_dir();
        let gateway = Arc::new(DelayedGateway::with_millis(ScriptedGateway::new(), 100));
        let session = Arc::new(SessionStore::empty(&dir));
        let wizard = Arc::new(IntakeWizard::new(gateway, session.clone()));
        wizard.next().await;

        let pending = {
            let wizard = Arc::clone(&wizard);
            tokio::spawn(async move { wizard.complete().await })
        };
        sleep(Duration::from_millis(20)).await;
        wizard.teardown();

        assert_eq!(pending.await.unwrap(), Outcome::Discarded);
        assert!(!session.is_established().await);
        assert!(!session.path().exists());
    }
}

// ============================================================================
// Quiz
// ============================================================================

mod quiz_tests {
    use super::*;

    #[tokio::test]
    async fn test_answer_and_submit() {
        let questions: Vec<QuizQuestion> = mock_gateway::standard_questions();
        let count = questions.len();
        let gateway = Arc::new(ScriptedGateway::new().with_questions(questions));
        let quiz = QuizFlow::new(gateway.clone(), 2);
        quiz.load().await;

        quiz.answer(9).await;
        for _ in 1..count {
            assert!(matches!(quiz.next().await, Navigation::Moved(_)));
        }
        quiz.answer(2).await;
        assert_eq!(quiz.next().await, Navigation::Submitted(Outcome::Completed));

        let sent = &gateway.quiz_submissions().await[0];
        assert_eq!(sent.len(), count);
        assert_eq!(sent.values().next(), Some(&9));
        assert_eq!(sent.values().last(), Some(&2));
        assert_eq!(gateway.calls(Operation::SubmitQuiz), 1);
    }
}

// ============================================================================
// Chat
// ============================================================================

mod chat_tests {
    use super::*;

    #[tokio::test]
    async fn test_restored_user_chats_with_history() {
        let dir = temp_dir();
        let session = SessionStore::empty(&dir);
        let gateway = Arc::new(ScriptedGateway::new().with_user_id(9));
        let wizard = IntakeWizard::new(gateway.clone(), Arc::new(session));
        wizard.next().await;
        assert_eq!(wizard.complete().await, Outcome::Completed);

        let user_id = SessionStore::open(&dir).unwrap().user_id().await.unwrap();
        let chat = ChatFlow::new(gateway.clone(), user_id);
        assert_eq!(chat.send("Is ghee sattvic?").await, Outcome::Completed);

        let history = chat.history().await;
        let roles: Vec<ChatRole> = history.iter().map(|message| message.role).collect();
        assert_eq!(roles, vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]);
        assert_eq!(history[2].content, mock_gateway::DEFAULT_CHAT_REPLY);
        assert_eq!(gateway.chat_histories().await[0].len(), 2);

        let _ = std::fs::remove_dir_all(dir);
    }
}

// ============================================================================
// Traces
// ============================================================================

mod trace_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_while_pending_is_ignored() {
        let gateway = Arc::new(DelayedGateway::with_millis(ScriptedGateway::new(), 100));
        let panel = Arc::new(TracePanel::new(gateway.clone(), 1));

        let first = {
            let panel = Arc::clone(&panel);
            tokio::spawn(async move { panel.load().await })
        };
        sleep(Duration::from_millis(20)).await;

        assert_eq!(panel.show(TraceMode::Recent).await, Outcome::Ignored);
        assert_eq!(first.await.unwrap(), Outcome::Completed);
        assert_eq!(gateway.inner().calls(Operation::RecentTraces), 0);
        assert_eq!(gateway.inner().calls(Operation::TodayTraces), 1);
        assert_eq!(panel.mode().await, TraceMode::Today);
    }
}
