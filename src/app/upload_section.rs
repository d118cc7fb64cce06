//! Upload section: drop zone plus the upload hook.

use std::path::PathBuf;
use std::sync::Arc;

use crate::api::{AnalysisBackend, DatasetRef};
use crate::components::{DropError, DropZone, SelectedFile};
use crate::hooks::UploadResource;
use crate::state::{Notifier, RequestState};

pub struct UploadSection {
    zone: DropZone,
    hook: UploadResource,
    propagated: Option<String>,
}

impl UploadSection {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        notifier: Arc<dyn Notifier>,
        max_file_size_bytes: u64,
    ) -> Self {
        Self {
            zone: DropZone::new(max_file_size_bytes),
            hook: UploadResource::new(backend, notifier),
            propagated: None,
        }
    }

    pub fn hook(&self) -> &UploadResource {
        &self.hook
    }

    /// Validate a drop and upload it. Rejected drops issue no request and
    /// leave the upload state untouched.
    pub async fn drop_files(&self, files: &[PathBuf]) -> Result<SelectedFile, DropError> {
        if self.hook.state().is_loading() {
            tracing::warn!("Drop ignored while an upload is in progress");
            return Err(DropError::Busy);
        }

        let file = self.zone.accept(files).map_err(|e| {
            tracing::warn!(error = %e, "Drop rejected");
            e
        })?;
        self.hook.upload(&file).await;
        Ok(file)
    }

    /// The uploaded dataset, if it has not been handed out yet.
    ///
    /// Yields each distinct dataset id at most once, however often the
    /// success state is observed.
    pub fn take_new_dataset(&mut self) -> Option<DatasetRef> {
        let state = self.hook.state();
        let dataset = state.data()?;
        if self.propagated.as_deref() == Some(dataset.dataset_id.as_str()) {
            return None;
        }
        self.propagated = Some(dataset.dataset_id.clone());
        Some(dataset.clone())
    }

    pub fn render(&self) -> Vec<String> {
        let state = self.hook.state();
        let mut lines = vec!["Upload Your Data".to_string()];
        lines.extend(self.zone.render(state.is_loading()));
        match &state {
            RequestState::Success(dataset) => lines.push(format!(
                "Dataset: {} ({})",
                dataset.filename, dataset.dataset_id
            )),
            RequestState::Error(e) => lines.push(format!("Upload failed: {}", e)),
            RequestState::Idle | RequestState::Loading => {}
        }
        lines
    }
}
