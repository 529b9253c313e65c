//! Mock gateway implementations for testing wellness flows.
//!
//! This crate provides in-memory implementations of the `GatewayClient`
//! trait:
//! - `ScriptedGateway` - Canned replies, call counters, recorded requests
//! - `FailingGateway` - Every call fails with the same HTTP error
//! - `DelayedGateway` - Wraps another gateway with artificial latency
//!
//! For the live service, use `gateway_client::HttpGatewayClient`.
//!
//! # Example
//!
//! ```rust
//! use mock_gateway::{GatewayClient, Operation, ScriptedGateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_gateway::GatewayError> {
//!     let gateway = ScriptedGateway::new();
//!
//!     let questions = gateway.quiz_questions().await?;
//!     assert_eq!(questions.len(), 6);
//!     assert_eq!(gateway.calls(Operation::QuizQuestions), 1);
//!     Ok(())
//! }
//! ```

mod delayed;
mod failing;
mod scripted;

// Re-export gateway-client types for convenience
pub use gateway_client::{async_trait, GatewayClient, GatewayError};

pub use delayed::DelayedGateway;
pub use failing::FailingGateway;
pub use scripted::{
    echo_plan, standard_questions, Operation, ScriptedGateway, DEFAULT_CHAT_REPLY,
    ECHO_CALORIES_PER_INGREDIENT, ECHO_PROTEIN_PER_INGREDIENT,
};
