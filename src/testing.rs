//! Shared test fixtures: a scripted backend and an axum stub server.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::api::{
    AnalysisBackend, ApiError, ApiResult, ChartData, ChartParams, ChartType, DatasetRef, Point,
    Series, Suggestion, SuggestionParameters, UploadFile,
};

/// Serve `router` on an ephemeral port and return its `/api` base URL
pub async fn spawn_stub(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}/api", addr)
}

pub fn suggestion(title: &str, chart_type: &str) -> Suggestion {
    Suggestion {
        title: title.to_string(),
        insight: format!("Insight for {}", title),
        parameters: SuggestionParameters {
            chart_type: ChartType::from(chart_type),
            x_axis: "region".to_string(),
            y_axis: "sales".to_string(),
            aggregation: "sum".to_string(),
        },
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Scripted [`AnalysisBackend`] that counts calls
#[derive(Default)]
pub struct FakeBackend {
    upload_response: Mutex<Option<ApiResult<DatasetRef>>>,
    suggestions: Mutex<HashMap<String, ApiResult<Vec<Suggestion>>>>,
    chart_failures: Mutex<HashMap<String, String>>,
    chart_requests: Mutex<Vec<ChartParams>>,
    pub upload_calls: AtomicUsize,
    pub suggestion_calls: AtomicUsize,
    pub chart_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every upload returns this result instead of a fresh `ds-N` id
    pub fn with_upload(self, result: ApiResult<DatasetRef>) -> Self {
        *self.upload_response.lock().unwrap() = Some(result);
        self
    }

    pub fn with_suggestions(self, dataset_id: &str, result: ApiResult<Vec<Suggestion>>) -> Self {
        self.suggestions
            .lock()
            .unwrap()
            .insert(dataset_id.to_string(), result);
        self
    }

    /// Chart requests for `y_axis` fail with `message`
    pub fn failing_chart(self, y_axis: &str, message: &str) -> Self {
        self.chart_failures
            .lock()
            .unwrap()
            .insert(y_axis.to_string(), message.to_string());
        self
    }

    pub fn uploads(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn suggestion_requests(&self) -> usize {
        self.suggestion_calls.load(Ordering::SeqCst)
    }

    pub fn chart_requests(&self) -> Vec<ChartParams> {
        self.chart_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisBackend for FakeBackend {
    async fn upload_dataset(&self, file: UploadFile) -> ApiResult<DatasetRef> {
        let n = self.upload_calls.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::task::yield_now().await;
        let scripted = self.upload_response.lock().unwrap().clone();
        match scripted {
            Some(result) => result,
            None => Ok(DatasetRef {
                dataset_id: format!("ds-{}", n),
                filename: file.filename,
            }),
        }
    }

    async fn get_suggestions(&self, dataset_id: &str) -> ApiResult<Vec<Suggestion>> {
        self.suggestion_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        let scripted = self.suggestions.lock().unwrap().get(dataset_id).cloned();
        match scripted {
            Some(result) => result,
            None => Ok(vec![
                suggestion("Sales by region", "bar"),
                suggestion("Sales trend", "line"),
                suggestion("Regional share", "pie"),
            ]),
        }
    }

    async fn get_chart_data(&self, params: &ChartParams) -> ApiResult<ChartData> {
        self.chart_calls.fetch_add(1, Ordering::SeqCst);
        self.chart_requests.lock().unwrap().push(params.clone());
        tokio::task::yield_now().await;

        let failure = self.chart_failures.lock().unwrap().get(&params.y_axis).cloned();
        if let Some(message) = failure {
            return Err(ApiError::Status {
                status: 400,
                message,
            });
        }

        Ok(ChartData {
            series: vec![Series {
                label: params.y_axis.clone(),
                data: vec![
                    Point { x: serde_json::json!("North"), y: 10.0 },
                    Point { x: serde_json::json!("South"), y: 4.0 },
                ],
            }],
        })
    }
}
