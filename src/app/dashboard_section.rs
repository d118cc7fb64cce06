//! Dashboard section: the promoted chart entries and their renderers.

use futures_util::future::join_all;
use std::sync::Arc;

use crate::api::{AnalysisBackend, Suggestion};
use crate::components::chart_card::{self, CHART_WIDTH};
use crate::components::{dashboard_grid, ChartRenderer, ChartView};
use crate::state::Notifier;

pub const HEADING: &str = "Your Personalized Dashboard";

/// Result of an add-to-dashboard action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An entry with the same title exists; nothing changed
    Duplicate,
    /// `max_charts` reached; nothing changed
    DashboardFull,
}

pub struct DashboardSection {
    backend: Arc<dyn AnalysisBackend>,
    notifier: Arc<dyn Notifier>,
    charts: Vec<ChartRenderer>,
    max_charts: Option<usize>,
}

impl DashboardSection {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        notifier: Arc<dyn Notifier>,
        max_charts: Option<usize>,
    ) -> Self {
        Self {
            backend,
            notifier,
            charts: Vec::new(),
            max_charts,
        }
    }

    pub fn charts(&self) -> &[ChartRenderer] {
        &self.charts
    }

    pub fn titles(&self) -> Vec<&str> {
        self.charts.iter().map(|c| c.suggestion().title.as_str()).collect()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.charts.iter().any(|c| c.suggestion().title == title)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn add(&mut self, suggestion: &Suggestion) -> AddOutcome {
        if self.contains(&suggestion.title) {
            tracing::debug!(title = %suggestion.title, "Chart already on dashboard");
            return AddOutcome::Duplicate;
        }
        if let Some(max) = self.max_charts {
            if self.charts.len() >= max {
                tracing::warn!(max, "Dashboard is full");
                return AddOutcome::DashboardFull;
            }
        }

        tracing::info!(title = %suggestion.title, "Adding chart to dashboard");
        self.charts.push(ChartRenderer::new(
            suggestion.clone(),
            self.backend.clone(),
            self.notifier.clone(),
        ));
        AddOutcome::Added
    }

    pub fn clear(&mut self) {
        self.charts.clear();
    }

    /// Sync every chart with `dataset_id` concurrently. Returns how many
    /// charts issued a request.
    pub async fn refresh(&self, dataset_id: Option<&str>) -> usize {
        let synced = join_all(self.charts.iter().map(|chart| chart.sync(dataset_id))).await;
        synced.into_iter().filter(|fetched| *fetched).count()
    }

    pub fn render(&self) -> Vec<String> {
        let cards: Vec<Vec<String>> = self
            .charts
            .iter()
            .map(|chart| match chart.view() {
                ChartView::Placeholder => chart_card::render_skeleton(),
                _ => chart_card::render(chart.suggestion(), &chart.render(CHART_WIDTH)),
            })
            .collect();

        let mut lines = vec![HEADING.to_string()];
        lines.extend(dashboard_grid::render(&cards));
        lines
    }
}
