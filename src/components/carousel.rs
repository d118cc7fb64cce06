//! Suggestions Carousel
//!
//! Paged, slide-by-one view over the suggestion list.

use super::icon::IconName;
use super::{side_by_side, suggestion_card};
use crate::api::Suggestion;
use crate::state::RequestState;

const SKELETON_CARDS: usize = 3;

#[derive(Debug, Clone)]
pub struct Carousel {
    position: usize,
    per_page: usize,
}

impl Carousel {
    pub fn new(per_page: usize) -> Self {
        Self {
            position: 0,
            per_page: per_page.max(1),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Last position that still fills a page
    fn max_position(&self, len: usize) -> usize {
        len.saturating_sub(self.per_page)
    }

    pub fn can_scroll_prev(&self) -> bool {
        self.position > 0
    }

    pub fn can_scroll_next(&self, len: usize) -> bool {
        self.position < self.max_position(len)
    }

    pub fn scroll_prev(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    pub fn scroll_next(&mut self, len: usize) {
        if self.can_scroll_next(len) {
            self.position += 1;
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Index range of the slides in view
    pub fn visible_range(&self, len: usize) -> std::ops::Range<usize> {
        let start = self.position.min(self.max_position(len));
        start..(start + self.per_page).min(len)
    }

    /// Render the carousel for the current suggestions state.
    /// `is_added` reports whether a title is already on the dashboard.
    pub fn render(
        &self,
        state: &RequestState<Vec<Suggestion>>,
        is_added: impl Fn(&str) -> bool,
    ) -> Vec<String> {
        match state {
            RequestState::Loading => {
                let cards: Vec<Vec<String>> = (0..SKELETON_CARDS)
                    .map(|_| suggestion_card::render_skeleton())
                    .collect();
                side_by_side(&cards, 2)
            }
            RequestState::Success(suggestions) => {
                if suggestions.is_empty() {
                    return vec!["No suggestions were generated for this dataset.".to_string()];
                }

                let range = self.visible_range(suggestions.len());
                let cards: Vec<Vec<String>> = range
                    .clone()
                    .map(|i| {
                        let s = &suggestions[i];
                        suggestion_card::render(s, i + 1, is_added(&s.title))
                    })
                    .collect();

                let mut lines = side_by_side(&cards, 2);
                lines.push(self.navigation(range, suggestions.len()));
                lines
            }
            RequestState::Idle | RequestState::Error(_) => Vec::new(),
        }
    }

    fn navigation(&self, range: std::ops::Range<usize>, len: usize) -> String {
        let prev = if self.can_scroll_prev() {
            IconName::ChevronLeft.glyph()
        } else {
            " "
        };
        let next = if self.can_scroll_next(len) {
            IconName::ChevronRight.glyph()
        } else {
            " "
        };
        format!("[{}] {}-{} of {} [{}]", prev, range.start + 1, range.end, len, next)
    }
}
