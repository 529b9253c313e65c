//! Daily check-in form and its plan result.

use std::sync::Arc;

use gateway_client::GatewayClient;
use tokio::sync::Mutex;
use wellness_core::render::{render_plan_result, PlanView};
use wellness_core::{aggregate, CheckIn, NutritionTotals, Outcome, PlanResult, RequestState};

use crate::panel::{Panel, ViewGuard};

/// The check-in form. Submissions are single-flight: a submit while one is
/// pending sends nothing.
pub struct CheckInFlow {
    gateway: Arc<dyn GatewayClient>,
    user_id: i64,
    form: Mutex<CheckIn>,
    submission: Panel<PlanResult>,
    guard: ViewGuard,
}

impl CheckInFlow {
    pub fn new(gateway: Arc<dyn GatewayClient>, user_id: i64) -> Self {
        let guard = ViewGuard::new();
        Self {
            gateway,
            user_id,
            form: Mutex::new(CheckIn::default()),
            submission: Panel::new("check-in", guard.clone()),
            guard,
        }
    }

    pub async fn form(&self) -> CheckIn {
        self.form.lock().await.clone()
    }

    pub async fn update<F>(&self, edit: F)
    where
        F: FnOnce(&mut CheckIn),
    {
        edit(&mut *self.form.lock().await);
    }

    /// Submit a snapshot of the current form.
    pub async fn submit(&self) -> Outcome {
        let snapshot = self.form().await;
        self.submission
            .run(async {
                self.gateway
                    .submit_check_in(self.user_id, &snapshot)
                    .await
                    .map_err(|err| err.user_message())
            })
            .await
    }

    pub async fn state(&self) -> RequestState<PlanResult> {
        self.submission.state().await
    }

    pub async fn is_pending(&self) -> bool {
        self.submission.is_pending().await
    }

    pub async fn result(&self) -> Option<PlanResult> {
        self.submission.value().await
    }

    pub async fn error(&self) -> Option<String> {
        self.submission.error().await
    }

    /// Rendered plan of the last successful submission.
    pub async fn view(&self) -> Option<PlanView> {
        self.result().await.as_ref().map(render_plan_result)
    }

    /// Daily totals of the last successful submission's meals.
    pub async fn summary(&self) -> Option<NutritionTotals> {
        self.result()
            .await
            .map(|result| aggregate::totals(result.nutrition_meals()))
    }

    pub fn teardown(&self) {
        self.guard.teardown();
    }
}
