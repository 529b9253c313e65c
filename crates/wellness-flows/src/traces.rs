//! Decision trace viewer.

use std::fmt;
use std::sync::Arc;

use gateway_client::GatewayClient;
use tokio::sync::Mutex;
use tracing::debug;
use wellness_core::render::trace_text;
use wellness_core::{DecisionTrace, Outcome, RequestState};

use crate::panel::{Panel, ViewGuard};

/// Number of traces requested in `Recent` mode.
pub const RECENT_TRACE_LIMIT: u32 = 10;

pub const NO_TRACES_MESSAGE: &str = "No decision traces available yet";
pub const NO_TRACES_HINT: &str = "Complete a check-in to see AI reasoning";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    #[default]
    Today,
    Recent,
}

impl TraceMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Recent => "Recent",
        }
    }
}

/// Traces fetched in one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceList {
    pub mode: TraceMode,
    pub traces: Vec<DecisionTrace>,
}

impl TraceList {
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

impl fmt::Display for TraceList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "{}\n{}", NO_TRACES_MESSAGE, NO_TRACES_HINT);
        }
        let blocks: Vec<String> = self.traces.iter().map(trace_text).collect();
        write!(f, "{}", blocks.join("\n\n"))
    }
}

pub struct TracePanel {
    gateway: Arc<dyn GatewayClient>,
    user_id: i64,
    mode: Mutex<TraceMode>,
    panel: Panel<TraceList>,
    guard: ViewGuard,
}

impl TracePanel {
    pub fn new(gateway: Arc<dyn GatewayClient>, user_id: i64) -> Self {
        let guard = ViewGuard::new();
        Self {
            gateway,
            user_id,
            mode: Mutex::new(TraceMode::default()),
            panel: Panel::new("traces", guard.clone()),
            guard,
        }
    }

    pub async fn mode(&self) -> TraceMode {
        *self.mode.lock().await
    }

    /// Switch mode and reload. The mode is kept while a load is pending.
    pub async fn show(&self, mode: TraceMode) -> Outcome {
        if !self.panel.begin().await {
            debug!("traces: load in flight, keeping {} mode", self.mode().await.label());
            return Outcome::Ignored;
        }
        *self.mode.lock().await = mode;
        let result = self.fetch(mode).await;
        self.panel.finish(result).await
    }

    /// Load traces for the current mode.
    pub async fn load(&self) -> Outcome {
        if !self.panel.begin().await {
            return Outcome::Ignored;
        }
        let mode = self.mode().await;
        let result = self.fetch(mode).await;
        self.panel.finish(result).await
    }

    async fn fetch(&self, mode: TraceMode) -> Result<TraceList, String> {
        let traces = match mode {
            TraceMode::Today => self.gateway.today_traces(self.user_id).await,
            TraceMode::Recent => {
                self.gateway
                    .recent_traces(self.user_id, RECENT_TRACE_LIMIT)
                    .await
            }
        }
        .map_err(|err| format!("Failed to load traces: {}", err.user_message()))?;

        Ok(TraceList { mode, traces })
    }

    pub async fn state(&self) -> RequestState<TraceList> {
        self.panel.state().await
    }

    pub async fn traces(&self) -> Option<TraceList> {
        self.panel.value().await
    }

    pub async fn error(&self) -> Option<String> {
        self.panel.error().await
    }

    pub fn teardown(&self) {
        self.guard.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mock_gateway::{Operation, ScriptedGateway};

    fn named(agent: &str) -> DecisionTrace {
        DecisionTrace {
            agent_name: Some(agent.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_empty_today() {
        let panel = TracePanel::new(Arc::new(ScriptedGateway::new()), 1);

        assert_eq!(panel.load().await, Outcome::Completed);
        let list = panel.traces().await.unwrap();
        assert!(list.is_empty());
        assert_eq!(
            list.to_string(),
            "No decision traces available yet\nComplete a check-in to see AI reasoning"
        );
    }

    #[tokio::test]
    async fn test_recent_mode_uses_limit() {
        let recent: Vec<DecisionTrace> = (0..12).map(|i| named(&format!("Agent{}", i))).collect();
        let gateway = Arc::new(
            ScriptedGateway::new()
                .with_today_traces(vec![named("PlannerAgent")])
                .with_recent_traces(recent),
        );
        let panel = TracePanel::new(gateway.clone(), 1);

        panel.load().await;
        assert_eq!(panel.traces().await.unwrap().traces.len(), 1);

        assert_eq!(panel.show(TraceMode::Recent).await, Outcome::Completed);
        let list = panel.traces().await.unwrap();
        assert_eq!(list.mode, TraceMode::Recent);
        assert_eq!(list.traces.len(), 10);
        assert_eq!(gateway.trace_limits().await, vec![RECENT_TRACE_LIMIT]);
        assert_eq!(gateway.calls(Operation::TodayTraces), 1);
        assert!(list.to_string().starts_with("Agent0\n\nAgent1"));
    }

    #[tokio::test]
    async fn test_concurrent_shows_fetch_once() {
        use mock_gateway::DelayedGateway;
        use std::time::Duration;
        use tokio::time::sleep;

        let gateway = Arc::new(DelayedGateway::with_millis(ScriptedGateway::new(), 100));
        let panel = Arc::new(TracePanel::new(gateway.clone(), 1));

        let first = {
            let panel = Arc::clone(&panel);
            tokio::spawn(async move { panel.show(TraceMode::Recent).await })
        };
        sleep(Duration::from_millis(20)).await;

        assert_eq!(panel.show(TraceMode::Today).await, Outcome::Ignored);
        assert_eq!(panel.mode().await, TraceMode::Recent);
        assert_eq!(first.await.unwrap(), Outcome::Completed);
        assert_eq!(panel.traces().await.unwrap().mode, TraceMode::Recent);
        assert_eq!(gateway.inner().calls(Operation::TodayTraces), 0);
        assert_eq!(gateway.inner().calls(Operation::RecentTraces), 1);
    }
}
