//! # Dashboard AI
//!
//! Client for an AI-assisted data-analysis backend: upload a spreadsheet,
//! receive chart suggestions for it, and build a dashboard whose charts fetch
//! live aggregated data.
//!
//! ## Modules
//!
//! - [`api`]: HTTP transport, wire types and the [`AnalysisBackend`] seam
//! - [`state`]: request lifecycle tracking and notifications
//! - [`hooks`]: one lifecycle-tracked resource per backend endpoint
//! - [`components`]: text rendering and client-side file validation
//! - [`app`]: orchestration of upload, suggestions and dashboard
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use dashboard_ai::{ApiClient, App, Config, ToastCenter};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     let backend = Arc::new(ApiClient::from_config(&config.api));
//!     let mut app = App::new(backend, Arc::new(ToastCenter::new()), &config);
//!
//!     app.drop_files(&[PathBuf::from("sales.csv")]).await?;
//!     app.load_suggestions().await;
//!     app.add_all_charts();
//!     app.refresh_dashboard().await;
//!
//!     println!("{}", app.render().join("\n"));
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod components;
pub mod config;
pub mod hooks;
pub mod state;

#[cfg(test)]
mod testing;

pub use api::{
    AnalysisBackend, ApiClient, ApiError, ApiResult, ChartData, ChartParams, ChartType,
    DatasetRef, Suggestion, SuggestionParameters,
};
pub use app::{AddOutcome, App};
pub use components::{ChartView, DropError, DropZone, SelectedFile};
pub use config::{Config, ConfigError};
pub use hooks::{ChartDataResource, SuggestionsResource, UploadResource};
pub use state::{Notifier, RequestState, Status, ToastCenter};
