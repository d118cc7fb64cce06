//! Chart Card
//!
//! Dashboard tile: title, a short insight, and the chart body.

use super::icon::Icon;
use super::{frame, skeleton, truncate};
use crate::api::Suggestion;

/// Inner width of a dashboard card
pub const CHART_WIDTH: usize = 40;

pub fn render(suggestion: &Suggestion, body: &[String]) -> Vec<String> {
    let title = format!(
        "{}{}",
        Icon::for_chart(&suggestion.parameters.chart_type).prefix(),
        suggestion.title
    );

    let mut lines = Vec::with_capacity(body.len() + 2);
    if !suggestion.insight.is_empty() {
        lines.push(truncate(&suggestion.insight, CHART_WIDTH));
        lines.push(String::new());
    }
    lines.extend(body.iter().cloned());

    frame(Some(&title), &lines, CHART_WIDTH)
}

pub fn render_skeleton() -> Vec<String> {
    let body = skeleton::block(&[CHART_WIDTH, CHART_WIDTH * 3 / 4, CHART_WIDTH / 2, CHART_WIDTH]);
    frame(Some(&skeleton::bar(CHART_WIDTH / 2)), &body, CHART_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::suggestion;

    #[test]
    fn test_card_frame() {
        let card = render(&suggestion("Sales by region", "bar"), &["body".to_string()]);
        assert!(card[1].contains("▥ Sales by region"));
        assert!(card.iter().any(|l| l.contains("Insight for Sales by region")));
        assert!(card.iter().any(|l| l.contains("body")));
        let width = card[0].chars().count();
        assert!(card.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_line_chart_title_fits_frame() {
        let card = render(&suggestion("Sales trend", "line"), &[]);
        assert!(card[1].starts_with("│ ∿ Sales trend "));
        assert_eq!(card[1].chars().count(), card[0].chars().count());
    }

    #[test]
    fn test_skeleton_has_card_width() {
        let card = render_skeleton();
        assert_eq!(card[0].chars().count(), CHART_WIDTH + 4);
    }
}
