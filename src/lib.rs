//! # Equiwatch
//!
//! Client for the chemical-equipment monitoring backend: dashboard state
//! synchronization, measurement-file upload workflow, and view-model
//! derivation for renderers.
//!
//! ## Features
//!
//! - **Authenticated request layer**: Basic-auth REST client with a uniform
//!   error contract (unreachable vs. rejected vs. undecodable)
//! - **Dashboard controller**: owns summary/history/trend state, sequences
//!   refreshes, and reconciles state after uploads
//! - **Tolerant decoding**: accepts both historical history-endpoint shapes
//!   and the empty-backend summary response
//! - **Presentation bindings**: pure, total functions from state to
//!   renderable view-models
//!
//! ## Modules
//!
//! - [`api`]: request client, wire types, and the [`api::Backend`] seam
//! - [`dashboard`]: state machine, load/upload operations, event channel
//! - [`view`]: view-model bindings
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use equiwatch::api::ApiClient;
//! use equiwatch::config::Config;
//! use equiwatch::dashboard::DashboardController;
//! use equiwatch::view;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let client = ApiClient::new(&config.api)?;
//!     let controller = DashboardController::new(Arc::new(client));
//!
//!     controller.load().await?;
//!
//!     let state = controller.state().await;
//!     for card in view::summary_cards(state.summary.as_ref()) {
//!         println!("{}: {}", card.title, card.value);
//!     }
//!     println!("Trend: {}", state.trend);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod view;

// Re-export top-level types for convenience
pub use api::{
    Alert, ApiClient, ApiError, Backend, HealthScore, HistoryEnvelope, HistoryItem, Summary,
    UploadFile, UploadResult,
};

pub use dashboard::{
    DashboardController, DashboardError, DashboardEvent, DashboardState, LoadOutcome, Phase,
};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};

pub use view::{RiskBucket, RiskRow, SummaryCard};
