//! Interactive flows of the wellness coach client.
//!
//! Each flow owns its form state and one single-flight request slot
//! ([`panel::Panel`]). A submit or load while a request is pending is
//! ignored, and responses that arrive after [`teardown`](CheckInFlow::teardown)
//! are discarded.
//!
//! - [`SessionStore`] - the identified user, persisted as one JSON file
//! - [`IntakeWizard`] - two-step onboarding that registers the user
//! - [`CheckInFlow`] - daily check-in producing a plan
//! - [`QuizFlow`] - linear mental-health quiz
//! - [`ChatFlow`] - conversation with the wellness coach
//! - [`DashboardPanel`], [`TodayPanel`], [`TracePanel`] - read-only views
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mock_gateway::ScriptedGateway;
//! use wellness_flows::CheckInFlow;
//! use wellness_core::Outcome;
//!
//! #[tokio::main]
//! async fn main() {
//!     let flow = CheckInFlow::new(Arc::new(ScriptedGateway::new()), 1);
//!     flow.update(|form| form.ingredients = "rice,lentils".to_string()).await;
//!
//!     assert_eq!(flow.submit().await, Outcome::Completed);
//!     assert_eq!(flow.summary().await.unwrap().meal_count, 1);
//! }
//! ```

pub mod chat;
pub mod checkin;
pub mod dashboard;
pub mod error;
pub mod intake;
pub mod panel;
pub mod quiz;
pub mod session;
pub mod today;
pub mod traces;

pub use chat::ChatFlow;
pub use checkin::CheckInFlow;
pub use dashboard::{Dashboard, DashboardPanel, TREND_DAYS};
pub use error::{Result, SessionError};
pub use intake::{IntakeStep, IntakeWizard};
pub use panel::{Panel, ViewGuard};
pub use quiz::{Navigation, QuizFlow, NO_QUESTIONS_MESSAGE};
pub use session::{default_session_dir, SessionStore, SCHEMA_VERSION, SESSION_KEY};
pub use today::{Today, TodayPanel};
pub use traces::{TraceList, TraceMode, TracePanel, RECENT_TRACE_LIMIT};
