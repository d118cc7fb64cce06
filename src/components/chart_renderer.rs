//! Chart Renderer
//!
//! Owns the chart-data resource of one dashboard entry. [`ChartRenderer::sync`]
//! fetches only when the dataset or the entry's parameters actually changed,
//! and [`ChartRenderer::view`] maps the lifecycle onto what the card shows.

use std::sync::{Arc, Mutex};

use super::plot::{self, PRIMARY};
use super::{skeleton, wrap};
use crate::api::{AnalysisBackend, ChartParams, ChartType, Point, Suggestion};
use crate::hooks::ChartDataResource;
use crate::state::{Notifier, RequestState};

const DEFAULT_LABEL: &str = "Value";
const SCATTER_HEIGHT: usize = 6;

/// Chart types with a visualization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartKind {
    pub fn from_chart_type(chart_type: &ChartType) -> Option<Self> {
        match chart_type {
            ChartType::Bar => Some(ChartKind::Bar),
            ChartType::Line => Some(ChartKind::Line),
            ChartType::Pie => Some(ChartKind::Pie),
            ChartType::Scatter => Some(ChartKind::Scatter),
            ChartType::Other(_) => None,
        }
    }
}

/// What a chart card displays
#[derive(Debug, Clone, PartialEq)]
pub enum ChartView {
    Placeholder,
    Error(String),
    Unsupported(String),
    Chart {
        kind: ChartKind,
        label: String,
        points: Vec<Point>,
    },
}

/// Forgets the synced parameters unless the fetch for them completes, so an
/// abandoned sync is retried next time
struct SyncGuard<'a> {
    synced: &'a Mutex<Option<ChartParams>>,
    params: ChartParams,
    completed: bool,
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        if self.completed {
            return;
        }
        let mut synced = self.synced.lock().unwrap_or_else(|e| e.into_inner());
        if synced.as_ref() == Some(&self.params) {
            *synced = None;
        }
    }
}

pub struct ChartRenderer {
    suggestion: Suggestion,
    hook: ChartDataResource,
    synced: Mutex<Option<ChartParams>>,
}

impl ChartRenderer {
    pub fn new(
        suggestion: Suggestion,
        backend: Arc<dyn AnalysisBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            suggestion,
            hook: ChartDataResource::new(backend, notifier),
            synced: Mutex::new(None),
        }
    }

    pub fn suggestion(&self) -> &Suggestion {
        &self.suggestion
    }

    /// Swap the entry; the next [`sync`](Self::sync) refetches if its
    /// parameters differ.
    pub fn set_suggestion(&mut self, suggestion: Suggestion) {
        self.suggestion = suggestion;
    }

    pub fn hook(&self) -> &ChartDataResource {
        &self.hook
    }

    /// Bring the chart data in line with `dataset_id` and the entry's
    /// parameters. Returns whether a request was made.
    pub async fn sync(&self, dataset_id: Option<&str>) -> bool {
        let Some(dataset_id) = dataset_id.filter(|id| !id.is_empty()) else {
            return false;
        };
        if !self.suggestion.parameters.chart_type.is_supported() {
            return false;
        }

        let params = ChartParams::for_suggestion(dataset_id, &self.suggestion);
        {
            let mut synced = self.synced.lock().unwrap_or_else(|e| e.into_inner());
            if synced.as_ref() == Some(&params) {
                return false;
            }
            *synced = Some(params.clone());
        }

        let mut guard = SyncGuard {
            synced: &self.synced,
            params,
            completed: false,
        };
        self.hook.fetch_chart_data(&guard.params).await;
        guard.completed = true;
        true
    }

    /// Fetch again even though nothing changed
    pub async fn retry(&self, dataset_id: Option<&str>) -> bool {
        *self.synced.lock().unwrap_or_else(|e| e.into_inner()) = None;
        self.sync(dataset_id).await
    }

    pub fn view(&self) -> ChartView {
        let chart_type = &self.suggestion.parameters.chart_type;
        let Some(kind) = ChartKind::from_chart_type(chart_type) else {
            return ChartView::Unsupported(chart_type.as_str().to_string());
        };

        match self.hook.state() {
            RequestState::Idle | RequestState::Loading => ChartView::Placeholder,
            RequestState::Error(message) => ChartView::Error(message),
            RequestState::Success(data) => {
                let (label, points) = match data.series.into_iter().next() {
                    Some(series) if !series.label.is_empty() => (series.label, series.data),
                    Some(series) => (DEFAULT_LABEL.to_string(), series.data),
                    None => (DEFAULT_LABEL.to_string(), Vec::new()),
                };
                ChartView::Chart {
                    kind,
                    label,
                    points,
                }
            }
        }
    }

    /// Body lines for a card of inner width `width`
    pub fn render(&self, width: usize) -> Vec<String> {
        match self.view() {
            ChartView::Placeholder => {
                skeleton::block(&[width, width * 3 / 4, width / 2, width * 5 / 6])
            }
            ChartView::Error(message) => wrap(&format!("Chart error: {}", message), width),
            ChartView::Unsupported(chart_type) => {
                wrap(&format!("Unsupported chart type: {}", chart_type), width)
            }
            ChartView::Chart {
                kind,
                label,
                points,
            } => {
                let mut lines = match kind {
                    ChartKind::Pie => Vec::new(),
                    _ => vec![format!("■ {} {}", PRIMARY, label)],
                };
                lines.extend(match kind {
                    ChartKind::Bar => plot::bar(&points, width),
                    ChartKind::Line => plot::line(&points, width),
                    ChartKind::Pie => plot::pie(&points),
                    ChartKind::Scatter => plot::scatter(&points, width, SCATTER_HEIGHT),
                });
                lines
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Status, ToastCenter};
    use crate::testing::{suggestion, FakeBackend};
    use futures_util::FutureExt;

    fn renderer(chart_type: &str, backend: Arc<FakeBackend>) -> ChartRenderer {
        ChartRenderer::new(
            suggestion("Sales by region", chart_type),
            backend,
            Arc::new(ToastCenter::new()),
        )
    }

    #[tokio::test]
    async fn test_sync_fetches_once_per_params() {
        let backend = Arc::new(FakeBackend::new());
        let chart = renderer("bar", backend.clone());

        assert!(chart.sync(Some("ds-1")).await);
        assert!(!chart.sync(Some("ds-1")).await);
        assert_eq!(backend.chart_requests().len(), 1);

        assert!(chart.sync(Some("ds-2")).await);
        assert_eq!(backend.chart_requests()[1].dataset_id, "ds-2");
    }

    #[tokio::test]
    async fn test_parameter_change_refetches() {
        let backend = Arc::new(FakeBackend::new());
        let mut chart = renderer("bar", backend.clone());
        chart.sync(Some("ds-1")).await;

        let mut changed = chart.suggestion().clone();
        changed.parameters.aggregation = "mean".to_string();
        chart.set_suggestion(changed.clone());
        assert!(chart.sync(Some("ds-1")).await);

        // Equal values, new instance: no refetch
        chart.set_suggestion(changed);
        assert!(!chart.sync(Some("ds-1")).await);
        assert_eq!(backend.chart_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_no_dataset_no_fetch() {
        let backend = Arc::new(FakeBackend::new());
        let chart = renderer("bar", backend.clone());

        assert!(!chart.sync(None).await);
        assert!(!chart.sync(Some("")).await);
        assert_eq!(chart.view(), ChartView::Placeholder);
        assert!(backend.chart_requests().is_empty());
    }

    #[tokio::test]
    async fn test_success_view_uses_first_series() {
        let backend = Arc::new(FakeBackend::new());
        let chart = renderer("pie", backend);
        chart.sync(Some("ds-1")).await;

        match chart.view() {
            ChartView::Chart {
                kind,
                label,
                points,
            } => {
                assert_eq!(kind, ChartKind::Pie);
                assert_eq!(label, "sales");
                assert_eq!(points.len(), 2);
            }
            other => panic!("unexpected view {:?}", other),
        }
        let lines = chart.render(30);
        assert!(lines[0].contains("#2563EB"));
        assert!(lines[1].contains("#7C3AED"));
    }

    #[tokio::test]
    async fn test_error_renders_inline() {
        let backend = Arc::new(FakeBackend::new().failing_chart("sales", "Column not found"));
        let chart = renderer("line", backend);
        chart.sync(Some("ds-1")).await;

        assert_eq!(chart.view(), ChartView::Error("Column not found".to_string()));
        assert_eq!(chart.render(40), vec!["Chart error: Column not found"]);
    }

    #[tokio::test]
    async fn test_unsupported_type_renders_fallback() {
        let backend = Arc::new(FakeBackend::new());
        let chart = renderer("radar", backend.clone());

        assert!(!chart.sync(Some("ds-1")).await);
        assert!(backend.chart_requests().is_empty());
        assert_eq!(chart.hook().status(), Status::Idle);
        assert_eq!(chart.view(), ChartView::Unsupported("radar".to_string()));
        assert_eq!(chart.render(40), vec!["Unsupported chart type: radar"]);
    }

    #[tokio::test]
    async fn test_retry_refetches() {
        let backend = Arc::new(FakeBackend::new());
        let chart = renderer("scatter", backend.clone());
        chart.sync(Some("ds-1")).await;
        assert!(chart.retry(Some("ds-1")).await);
        assert_eq!(backend.chart_requests().len(), 2);
        assert!(chart.render(20).iter().any(|l| l.contains('●')));
    }

    #[tokio::test]
    async fn test_abandoned_sync_refetches() {
        let backend = Arc::new(FakeBackend::new());
        let chart = renderer("bar", backend.clone());

        assert!(chart.sync(Some("ds-1")).now_or_never().is_none());
        assert_eq!(chart.view(), ChartView::Placeholder);

        assert!(chart.sync(Some("ds-1")).await);
        assert_eq!(backend.chart_requests().len(), 2);
        assert!(matches!(chart.view(), ChartView::Chart { .. }));
    }

    #[test]
    fn test_placeholder_before_sync() {
        let chart = renderer("bar", Arc::new(FakeBackend::new()));
        assert!(chart.render(10).iter().all(|l| l.chars().all(|c| c == '░')));
    }
}
