//! Resource Hooks
//!
//! Each hook wraps one backend resource in a [`Resource`](crate::state::Resource)
//! lifecycle and exposes an async trigger. Hooks catch every error: failures
//! end up as `RequestState::Error` plus, where appropriate, a notification.

pub mod chart_data;
pub mod suggestions;
pub mod upload;

pub use chart_data::ChartDataResource;
pub use suggestions::SuggestionsResource;
pub use upload::UploadResource;
