//! Suggestions section: fetches suggestions for the active dataset and pages
//! through them.

use std::sync::Arc;

use crate::api::{AnalysisBackend, Suggestion};
use crate::components::Carousel;
use crate::hooks::SuggestionsResource;
use crate::state::{Notifier, RequestState};

pub const HEADING: &str = "AI Suggestions for Your Data";
pub const NO_DATASET: &str = "Upload a dataset to see AI-generated chart suggestions.";

pub struct SuggestionsSection {
    hook: SuggestionsResource,
    carousel: Carousel,
}

impl SuggestionsSection {
    pub fn new(
        backend: Arc<dyn AnalysisBackend>,
        notifier: Arc<dyn Notifier>,
        page_size: usize,
    ) -> Self {
        Self {
            hook: SuggestionsResource::new(backend, notifier),
            carousel: Carousel::new(page_size),
        }
    }

    pub fn hook(&self) -> &SuggestionsResource {
        &self.hook
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub async fn load(&self, dataset_id: &str) -> bool {
        self.hook.fetch_suggestions(dataset_id).await
    }

    /// Received suggestions, empty unless the fetch succeeded
    pub fn suggestions(&self) -> Vec<Suggestion> {
        match self.hook.state() {
            RequestState::Success(list) => list,
            _ => Vec::new(),
        }
    }

    pub fn find(&self, title: &str) -> Option<Suggestion> {
        self.suggestions().into_iter().find(|s| s.title == title)
    }

    pub fn scroll_next(&mut self) {
        let len = self.suggestions().len();
        self.carousel.scroll_next(len);
    }

    pub fn scroll_prev(&mut self) {
        self.carousel.scroll_prev();
    }

    pub fn reset(&mut self) {
        self.hook.reset();
        self.carousel.reset();
    }

    pub fn render(&self, dataset_id: Option<&str>, is_added: impl Fn(&str) -> bool) -> Vec<String> {
        let mut lines = vec![HEADING.to_string()];
        if dataset_id.is_none() {
            lines.push(NO_DATASET.to_string());
            return lines;
        }

        let state = self.hook.state();
        match &state {
            RequestState::Error(e) => lines.push(format!("Error: {}", e)),
            _ => lines.extend(self.carousel.render(&state, is_added)),
        }
        lines
    }
}
