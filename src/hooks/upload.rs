//! Dataset upload hook.

use std::sync::Arc;

use crate::api::{AnalysisBackend, DatasetRef};
use crate::components::SelectedFile;
use crate::state::{LoadingToast, Notifier, RequestState, Resource, Status};

pub struct UploadResource {
    backend: Arc<dyn AnalysisBackend>,
    notifier: Arc<dyn Notifier>,
    state: Resource<DatasetRef>,
}

impl UploadResource {
    pub fn new(backend: Arc<dyn AnalysisBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            state: Resource::new(),
        }
    }

    pub fn state(&self) -> RequestState<DatasetRef> {
        self.state.snapshot()
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn resource(&self) -> &Resource<DatasetRef> {
        &self.state
    }

    /// Upload a validated file. Dropping the returned future before it
    /// completes leaves the hook `Idle` again, with no loading toast.
    pub async fn upload(&self, file: &SelectedFile) {
        let pending = self.state.start();
        let toast = LoadingToast::show(self.notifier.as_ref(), "Uploading file...");
        tracing::info!(filename = %file.filename, size = file.size, "Uploading dataset");

        let result = match file.read().await {
            Ok(payload) => self
                .backend
                .upload_dataset(payload)
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(format!("Cannot read {}: {}", file.filename, e)),
        };

        toast.dismiss();

        let message = match &result {
            Ok(dataset) => {
                tracing::info!(dataset_id = %dataset.dataset_id, "Dataset uploaded");
                Ok(format!("File \"{}\" uploaded successfully!", dataset.filename))
            }
            Err(e) => {
                tracing::error!(filename = %file.filename, error = %e, "Upload failed");
                Err(format!("Upload failed: {}", e))
            }
        };

        if pending.resolve(result) {
            match message {
                Ok(m) => self.notifier.success(&m),
                Err(m) => self.notifier.error(&m),
            };
        }
    }
}
