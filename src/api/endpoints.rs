//! Backend Endpoints
//!
//! The three resources the dashboard consumes, behind a trait so hooks can be
//! driven by any backend.
//!
//! - `POST /datasets/upload` - multipart upload, returns a [`DatasetRef`]
//! - `POST /analysis/suggestions` - AI chart suggestions for a dataset
//! - `POST /charts/data` - aggregated series for one chart

use async_trait::async_trait;

use super::client::{ApiClient, RequestOptions, UploadFile};
use super::dto::{ChartData, ChartParams, DatasetRef, Suggestion, SuggestionsRequest};
use super::error::{ApiError, ApiResult};

pub const UPLOAD_ENDPOINT: &str = "/datasets/upload";
pub const SUGGESTIONS_ENDPOINT: &str = "/analysis/suggestions";
pub const CHART_DATA_ENDPOINT: &str = "/charts/data";

/// Operations offered by the analysis backend
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Upload a dataset file
    async fn upload_dataset(&self, file: UploadFile) -> ApiResult<DatasetRef>;

    /// Generate chart suggestions for a dataset
    async fn get_suggestions(&self, dataset_id: &str) -> ApiResult<Vec<Suggestion>>;

    /// Fetch aggregated data for one chart
    async fn get_chart_data(&self, params: &ChartParams) -> ApiResult<ChartData>;
}

fn to_body<T: serde::Serialize>(value: &T) -> ApiResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ApiError::Request(e.to_string()))
}

#[async_trait]
impl AnalysisBackend for ApiClient {
    async fn upload_dataset(&self, file: UploadFile) -> ApiResult<DatasetRef> {
        self.request(UPLOAD_ENDPOINT, RequestOptions::post_file(file))
            .await
    }

    async fn get_suggestions(&self, dataset_id: &str) -> ApiResult<Vec<Suggestion>> {
        let body = to_body(&SuggestionsRequest { dataset_id })?;
        self.request(SUGGESTIONS_ENDPOINT, RequestOptions::post_json(body))
            .await
    }

    async fn get_chart_data(&self, params: &ChartParams) -> ApiResult<ChartData> {
        let body = to_body(params)?;
        self.request(CHART_DATA_ENDPOINT, RequestOptions::post_json(body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::ChartType;
    use crate::testing::spawn_stub;
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_suggestions_roundtrip() {
        let router = Router::new().route(
            "/api/analysis/suggestions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body, json!({"datasetId": "ds-9"}));
                Json(json!([{
                    "title": "Sales by region",
                    "insight": "North leads",
                    "parameters": {"chart_type": "bar", "x_axis": "region", "y_axis": "sales", "aggregation": "sum"}
                }]))
            }),
        );
        let client = ApiClient::new(spawn_stub(router).await);

        let suggestions = client.get_suggestions("ds-9").await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].parameters.chart_type, ChartType::Bar);
    }

    #[tokio::test]
    async fn test_chart_data_roundtrip() {
        let router = Router::new().route(
            "/api/charts/data",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"series": [{
                    "label": body["y_axis"],
                    "data": [{"x": "North", "y": 10.0}, {"x": "South", "y": 4.5}]
                }]}))
            }),
        );
        let client = ApiClient::new(spawn_stub(router).await);

        let params = ChartParams {
            dataset_id: "ds-9".to_string(),
            chart_type: ChartType::Bar,
            x_axis: "region".to_string(),
            y_axis: "sales".to_string(),
            aggregation: "sum".to_string(),
        };
        let data = client.get_chart_data(&params).await.unwrap();
        let first = data.first_series().unwrap();
        assert_eq!(first.label, "sales");
        assert_eq!(first.data.len(), 2);
    }
}
