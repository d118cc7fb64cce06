//! Per-chart data hook.
//!
//! No loading toast: a dashboard fetches many charts at once. Failures get a
//! toast and the card shows the message inline.

use std::sync::Arc;

use crate::api::{AnalysisBackend, ChartData, ChartParams};
use crate::state::{Notifier, RequestState, Resource, Status};

pub struct ChartDataResource {
    backend: Arc<dyn AnalysisBackend>,
    notifier: Arc<dyn Notifier>,
    state: Resource<ChartData>,
}

impl ChartDataResource {
    pub fn new(backend: Arc<dyn AnalysisBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            state: Resource::new(),
        }
    }

    pub fn state(&self) -> RequestState<ChartData> {
        self.state.snapshot()
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn resource(&self) -> &Resource<ChartData> {
        &self.state
    }

    pub async fn fetch_chart_data(&self, params: &ChartParams) {
        let pending = self.state.start();
        tracing::debug!(
            dataset_id = %params.dataset_id,
            chart_type = %params.chart_type,
            x_axis = %params.x_axis,
            y_axis = %params.y_axis,
            "Requesting chart data"
        );

        let result = self
            .backend
            .get_chart_data(params)
            .await
            .map_err(|e| e.to_string());

        if let Err(e) = &result {
            tracing::error!(y_axis = %params.y_axis, error = %e, "Chart data request failed");
        }
        let failure = result.as_ref().err().cloned();

        if pending.resolve(result) {
            if let Some(message) = failure {
                self.notifier.error(&format!("Chart Error: {}", message));
            }
        }
    }

    pub fn reset(&self) {
        self.state.reset();
    }
}
