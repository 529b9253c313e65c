//! Today's plan panel.

use std::fmt;
use std::sync::Arc;

use gateway_client::GatewayClient;
use wellness_core::render::{render_today, render_trace, TodayView, TraceSection};
use wellness_core::{DecisionTrace, Outcome, RequestState};

use crate::panel::{Panel, ViewGuard};

#[derive(Debug, Clone, PartialEq)]
pub struct Today {
    pub view: TodayView,
    pub traces: Vec<DecisionTrace>,
}

impl Today {
    /// The explanation and triggered rules of each of today's traces. Traces
    /// with neither are left out.
    pub fn reasoning(&self) -> Vec<Vec<TraceSection>> {
        self.traces
            .iter()
            .map(|trace| {
                render_trace(trace)
                    .into_iter()
                    .filter(|section| {
                        matches!(section, TraceSection::Explanation(_) | TraceSection::Rules(_))
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|sections| !sections.is_empty())
            .collect()
    }
}

impl fmt::Display for Today {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reasoning = self.reasoning();
        if !reasoning.is_empty() {
            writeln!(f, "AI Reasoning")?;
            for sections in reasoning {
                for section in sections {
                    writeln!(f, "{}", section)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.view)
    }
}

pub struct TodayPanel {
    gateway: Arc<dyn GatewayClient>,
    user_id: i64,
    panel: Panel<Today>,
    guard: ViewGuard,
}

impl TodayPanel {
    pub fn new(gateway: Arc<dyn GatewayClient>, user_id: i64) -> Self {
        let guard = ViewGuard::new();
        Self {
            gateway,
            user_id,
            panel: Panel::new("today", guard.clone()),
            guard,
        }
    }

    /// Fetch today's yoga plan, meals and traces together.
    pub async fn load(&self) -> Outcome {
        self.panel
            .run(async {
                let (yoga, meals, traces) = tokio::try_join!(
                    self.gateway.today_yoga_plan(self.user_id),
                    self.gateway.today_nutrition_plans(self.user_id),
                    self.gateway.today_traces(self.user_id),
                )
                .map_err(|err| format!("Failed to load today's plan: {}", err.user_message()))?;

                Ok(Today {
                    view: render_today(yoga.as_ref(), &meals),
                    traces,
                })
            })
            .await
    }

    pub async fn state(&self) -> RequestState<Today> {
        self.panel.state().await
    }

    pub async fn today(&self) -> Option<Today> {
        self.panel.value().await
    }

    pub async fn error(&self) -> Option<String> {
        self.panel.error().await
    }

    pub fn teardown(&self) {
        self.guard.teardown();
    }
}
