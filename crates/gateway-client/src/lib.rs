//! Client for the wellness planning service.
//!
//! This crate provides:
//!
//! - [`GatewayClient`] - The trait every flow talks to; the only network seam
//! - [`HttpGatewayClient`] - The reqwest-backed implementation
//! - [`GatewayConfig`] - Base URL and timeout, with `from_env()`
//! - [`GatewayError`] - Error types, including the service's `detail` text
//!
//! # Example
//!
//! ```no_run
//! use gateway_client::{GatewayClient, GatewayConfig, HttpGatewayClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gateway_client::GatewayError> {
//!     let client = HttpGatewayClient::new(GatewayConfig::from_env()?)?;
//!
//!     for question in client.quiz_questions().await? {
//!         println!("{}: {}", question.id, question.question);
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod http;

pub use async_trait::async_trait;
pub use client::GatewayClient;
pub use config::{GatewayConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{error_detail, GatewayError, Result};
pub use http::{yoga_plan_from_reply, HttpGatewayClient};
