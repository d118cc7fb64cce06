//! Application Root
//!
//! Owns the active dataset and the three sections, and sequences them:
//! a successful upload unlocks suggestions, and promoted suggestions drive
//! per-chart data fetches.

pub mod dashboard_section;
pub mod suggestions_section;
pub mod upload_section;

pub use dashboard_section::{AddOutcome, DashboardSection};
pub use suggestions_section::SuggestionsSection;
pub use upload_section::UploadSection;

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{AnalysisBackend, DatasetRef, Suggestion};
use crate::components::DropError;
use crate::config::Config;
use crate::state::Notifier;

pub struct App {
    dataset: Option<DatasetRef>,
    upload: UploadSection,
    suggestions: SuggestionsSection,
    dashboard: DashboardSection,
}

impl App {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        notifier: Arc<dyn Notifier>,
        config: &Config,
    ) -> Self {
        Self {
            dataset: None,
            upload: UploadSection::new(
                backend.clone(),
                notifier.clone(),
                config.upload.max_file_size_bytes,
            ),
            suggestions: SuggestionsSection::new(
                backend.clone(),
                notifier.clone(),
                config.dashboard.carousel_page_size,
            ),
            dashboard: DashboardSection::new(backend, notifier, config.dashboard.max_charts),
        }
    }

    pub fn dataset(&self) -> Option<&DatasetRef> {
        self.dataset.as_ref()
    }

    pub fn dataset_id(&self) -> Option<&str> {
        self.dataset.as_ref().map(|d| d.dataset_id.as_str())
    }

    pub fn upload(&self) -> &UploadSection {
        &self.upload
    }

    pub fn suggestions(&self) -> &SuggestionsSection {
        &self.suggestions
    }

    pub fn suggestions_mut(&mut self) -> &mut SuggestionsSection {
        &mut self.suggestions
    }

    pub fn dashboard(&self) -> &DashboardSection {
        &self.dashboard
    }

    /// Drop files on the upload section. On success the new dataset, if any,
    /// becomes active.
    pub async fn drop_files(&mut self, files: &[PathBuf]) -> Result<Option<DatasetRef>, DropError> {
        self.upload.drop_files(files).await?;
        Ok(self.propagate_upload())
    }

    /// Hand a newly uploaded dataset to the root, once per dataset id
    pub fn propagate_upload(&mut self) -> Option<DatasetRef> {
        let dataset = self.upload.take_new_dataset()?;
        self.on_upload_success(dataset.clone());
        Some(dataset)
    }

    /// Switch the active dataset. Suggestions and charts of the previous
    /// dataset are dropped before anything new is fetched.
    pub fn on_upload_success(&mut self, dataset: DatasetRef) {
        tracing::info!(
            dataset_id = %dataset.dataset_id,
            filename = %dataset.filename,
            "Active dataset changed"
        );
        self.dashboard.clear();
        self.suggestions.reset();
        self.dataset = Some(dataset);
    }

    /// Fetch suggestions for the active dataset
    pub async fn load_suggestions(&self) -> bool {
        match self.dataset_id() {
            Some(id) => self.suggestions.load(id).await,
            None => false,
        }
    }

    pub fn add_chart(&mut self, suggestion: &Suggestion) -> AddOutcome {
        self.dashboard.add(suggestion)
    }

    /// Add the received suggestion titled `title`; `None` if there is none
    pub fn add_chart_by_title(&mut self, title: &str) -> Option<AddOutcome> {
        let suggestion = self.suggestions.find(title)?;
        Some(self.dashboard.add(&suggestion))
    }

    /// Add every received suggestion, in order
    pub fn add_all_charts(&mut self) -> Vec<AddOutcome> {
        self.suggestions
            .suggestions()
            .iter()
            .map(|s| self.dashboard.add(s))
            .collect()
    }

    /// Fetch data for every chart whose inputs changed
    pub async fn refresh_dashboard(&self) -> usize {
        self.dashboard.refresh(self.dataset_id()).await
    }

    pub fn render(&self) -> Vec<String> {
        let mut lines = self.upload.render();
        if let Some(id) = self.dataset_id() {
            lines.push(String::new());
            lines.extend(
                self.suggestions
                    .render(Some(id), |title| self.dashboard.contains(title)),
            );
            lines.push(String::new());
            lines.extend(self.dashboard.render());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RequestState, Status, ToastCenter, ToastVariant};
    use crate::testing::{suggestion, write_file, FakeBackend};

    struct Fixture {
        app: App,
        backend: Arc<FakeBackend>,
        toasts: Arc<ToastCenter>,
        _dir: tempfile::TempDir,
        file: PathBuf,
    }

    fn fixture(backend: FakeBackend) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let file = write_file(dir.path(), "sales.csv", b"region,sales\nNorth,10\n");
        let backend = Arc::new(backend);
        let toasts = Arc::new(ToastCenter::new());
        let app = App::new(backend.clone(), toasts.clone(), &Config::default());
        Fixture {
            app,
            backend,
            toasts,
            _dir: dir,
            file,
        }
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let mut f = fixture(FakeBackend::new());

        let dataset = f.app.drop_files(&[f.file.clone()]).await.unwrap().unwrap();
        assert_eq!(dataset.dataset_id, "ds-1");
        assert_eq!(f.app.dataset_id(), Some("ds-1"));

        assert!(f.app.load_suggestions().await);
        assert_eq!(f.app.add_chart_by_title("Sales by region"), Some(AddOutcome::Added));
        assert_eq!(f.app.add_chart_by_title("Missing"), None);
        assert_eq!(f.app.refresh_dashboard().await, 1);

        let requests = f.backend.chart_requests();
        assert_eq!(requests[0].dataset_id, "ds-1");
        assert_eq!(requests[0].x_axis, "region");

        let screen = f.app.render().join("\n");
        assert!(screen.contains(suggestions_section::HEADING));
        assert!(screen.contains(dashboard_section::HEADING));
        assert!(screen.contains("[✓ On dashboard]"));
        assert!(screen.contains("North"));
    }

    #[tokio::test]
    async fn test_sections_hidden_without_dataset() {
        let f = fixture(FakeBackend::new());
        let screen = f.app.render().join("\n");
        assert!(screen.contains("Drag and drop your file here"));
        assert!(!screen.contains(suggestions_section::HEADING));
        assert!(!screen.contains(dashboard_section::HEADING));
        assert!(!f.app.load_suggestions().await);
    }

    #[tokio::test]
    async fn test_upload_propagates_exactly_once() {
        let mut f = fixture(FakeBackend::new());
        f.app.drop_files(&[f.file.clone()]).await.unwrap();
        f.app.add_chart(&suggestion("A", "bar"));

        // Observing the same success state again must not reset the dashboard
        assert_eq!(f.app.propagate_upload(), None);
        assert_eq!(f.app.dashboard().titles(), vec!["A"]);
    }

    #[tokio::test]
    async fn test_new_dataset_clears_previous_state() {
        let mut f = fixture(FakeBackend::new());
        f.app.drop_files(&[f.file.clone()]).await.unwrap();
        f.app.load_suggestions().await;
        f.app.add_all_charts();
        assert_eq!(f.app.dashboard().len(), 3);

        let second = f.app.drop_files(&[f.file.clone()]).await.unwrap().unwrap();
        assert_eq!(second.dataset_id, "ds-2");
        assert!(f.app.dashboard().is_empty());
        assert_eq!(f.app.suggestions().hook().state(), RequestState::Idle);
        assert!(f.app.suggestions().suggestions().is_empty());

        assert!(f.app.load_suggestions().await);
        assert_eq!(f.backend.suggestion_requests(), 2);
    }

    #[tokio::test]
    async fn test_double_add_keeps_one_entry() {
        let mut f = fixture(FakeBackend::new());
        f.app.drop_files(&[f.file.clone()]).await.unwrap();
        f.app.load_suggestions().await;

        f.app.add_chart_by_title("Sales trend");
        assert_eq!(f.app.add_chart_by_title("Sales trend"), Some(AddOutcome::Duplicate));
        assert_eq!(f.app.dashboard().titles(), vec!["Sales trend"]);
    }

    #[tokio::test]
    async fn test_repeated_suggestion_load_is_noop() {
        let mut f = fixture(FakeBackend::new());
        f.app.drop_files(&[f.file.clone()]).await.unwrap();

        assert!(f.app.load_suggestions().await);
        assert!(!f.app.load_suggestions().await);
        assert_eq!(f.backend.suggestion_requests(), 1);
        assert_eq!(f.toasts.messages(ToastVariant::Success).len(), 2);
    }

    #[tokio::test]
    async fn test_failed_upload_keeps_no_dataset() {
        let mut f = fixture(FakeBackend::new().with_upload(Err(crate::api::ApiError::Status {
            status: 413,
            message: "too large".to_string(),
        })));

        assert_eq!(f.app.drop_files(&[f.file.clone()]).await.unwrap(), None);
        assert_eq!(f.app.dataset(), None);
        assert_eq!(f.app.upload().hook().status(), Status::Error);
        assert!(f
            .toasts
            .messages(ToastVariant::Error)
            .iter()
            .any(|m| m.contains("too large")));
        assert!(f.app.render().iter().any(|l| l == "Upload failed: too large"));
    }
}
