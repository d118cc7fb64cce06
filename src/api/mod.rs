//! Backend API
//!
//! HTTP access to the analysis backend.
//!
//! # Endpoints
//!
//! - `POST /datasets/upload` - Upload a CSV or XLSX file
//! - `POST /analysis/suggestions` - Generate chart suggestions
//! - `POST /charts/data` - Aggregate data for one chart

pub mod client;
pub mod dto;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, RequestBody, RequestOptions, UploadFile, DEFAULT_API_BASE};
pub use dto::{
    ChartData, ChartParams, ChartType, DatasetRef, Point, Series, Suggestion,
    SuggestionParameters, KNOWN_AGGREGATIONS,
};
pub use endpoints::AnalysisBackend;
pub use error::{ApiError, ApiResult};
