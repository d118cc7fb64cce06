//! Data Transfer Objects
//!
//! Request and response types exchanged with the analysis backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregations the backend accepts for chart data
pub const KNOWN_AGGREGATIONS: [&str; 6] = ["sum", "mean", "count", "median", "min", "max"];

/// Reference to an uploaded dataset, returned by `POST /datasets/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRef {
    #[serde(rename = "datasetId")]
    pub dataset_id: String,
    pub filename: String,
}

/// Chart kind proposed by a suggestion
///
/// Unknown kinds are kept as [`ChartType::Other`] so they can be rendered as
/// unsupported instead of failing the whole suggestion list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Scatter,
    Other(String),
}

impl ChartType {
    pub fn as_str(&self) -> &str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
            ChartType::Other(other) => other,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, ChartType::Other(_))
    }
}

impl From<String> for ChartType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "bar" => ChartType::Bar,
            "line" => ChartType::Line,
            "pie" => ChartType::Pie,
            "scatter" => ChartType::Scatter,
            _ => ChartType::Other(value),
        }
    }
}

impl From<&str> for ChartType {
    fn from(value: &str) -> Self {
        ChartType::from(value.to_string())
    }
}

impl From<ChartType> for String {
    fn from(value: ChartType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart specification carried by a suggestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuggestionParameters {
    #[serde(default)]
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
    pub aggregation: String,
}

/// AI-generated chart suggestion, returned by `POST /analysis/suggestions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    #[serde(default)]
    pub insight: String,
    pub parameters: SuggestionParameters,
}

/// Body of `POST /analysis/suggestions`
#[derive(Debug, Clone, Serialize)]
pub struct SuggestionsRequest<'a> {
    #[serde(rename = "datasetId")]
    pub dataset_id: &'a str,
}

/// Body of `POST /charts/data`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartParams {
    #[serde(rename = "datasetId")]
    pub dataset_id: String,
    pub chart_type: ChartType,
    pub x_axis: String,
    pub y_axis: String,
    pub aggregation: String,
}

impl ChartParams {
    /// Derive request parameters for a suggestion on a dataset
    pub fn for_suggestion(dataset_id: &str, suggestion: &Suggestion) -> Self {
        let p = &suggestion.parameters;
        Self {
            dataset_id: dataset_id.to_string(),
            chart_type: p.chart_type.clone(),
            x_axis: p.x_axis.clone(),
            y_axis: p.y_axis.clone(),
            aggregation: p.aggregation.clone(),
        }
    }
}

/// A single `{x, y}` pair. `x` is a category or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: serde_json::Value,
    pub y: f64,
}

impl Point {
    /// Category label for `x`
    pub fn x_label(&self) -> String {
        match &self.x {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => "-".to_string(),
            other => other.to_string(),
        }
    }
}

/// One labelled data series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    #[serde(default)]
    pub data: Vec<Point>,
}

/// Aggregated chart data, returned by `POST /charts/data`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub series: Vec<Series>,
}

impl ChartData {
    /// Only the first series is ever rendered
    pub fn first_series(&self) -> Option<&Series> {
        self.series.first()
    }
}
