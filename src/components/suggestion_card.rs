//! Suggestion Card
//!
//! One AI suggestion with its insight and the add-to-dashboard action.

use super::icon::{Icon, IconName};
use super::{frame, skeleton, truncate, wrap};
use crate::api::Suggestion;

/// Inner width of a card
pub const CARD_WIDTH: usize = 30;

const INSIGHT_LINES: usize = 4;

/// Render a suggestion card. `number` is the 1-based position used to pick
/// the card from the command line; `added` flips the action label.
pub fn render(suggestion: &Suggestion, number: usize, added: bool) -> Vec<String> {
    let params = &suggestion.parameters;
    let title = format!("#{} {}", number, suggestion.title);

    let mut body = Vec::new();
    let mut insight = wrap(&suggestion.insight, CARD_WIDTH);
    if insight.len() > INSIGHT_LINES {
        insight.truncate(INSIGHT_LINES);
        if let Some(last) = insight.last_mut() {
            *last = truncate(&format!("{}…", last), CARD_WIDTH);
        }
    }
    body.extend(insight);
    while body.len() < INSIGHT_LINES {
        body.push(String::new());
    }

    body.push(truncate(
        &format!(
            "{}{} · {} × {} ({})",
            Icon::for_chart(&params.chart_type).prefix(),
            params.chart_type,
            params.x_axis,
            params.y_axis,
            params.aggregation
        ),
        CARD_WIDTH,
    ));
    body.push(String::new());
    body.push(if added {
        format!("[{} On dashboard]", IconName::Check.glyph())
    } else {
        format!("[{} Add to Dashboard]", IconName::Plus.glyph())
    });

    frame(Some(&title), &body, CARD_WIDTH)
}

/// Placeholder card with the same footprint as [`render`]
pub fn render_skeleton() -> Vec<String> {
    let mut body = skeleton::block(&[CARD_WIDTH, CARD_WIDTH * 5 / 6, CARD_WIDTH * 2 / 3]);
    while body.len() < INSIGHT_LINES + 2 {
        body.push(String::new());
    }
    body.push(skeleton::bar(CARD_WIDTH / 2));
    frame(Some(&skeleton::bar(CARD_WIDTH * 3 / 4)), &body, CARD_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::suggestion;

    #[test]
    fn test_card_contents() {
        let card = render(&suggestion("Sales by region", "bar"), 2, false);
        let text = card.join("\n");
        assert!(text.contains("#2 Sales by region"));
        assert!(text.contains("Insight for Sales by region"));
        assert!(text.contains("bar · region × sales (sum)"));
        assert!(text.contains("Add to Dashboard"));
    }

    #[test]
    fn test_added_label() {
        let card = render(&suggestion("Sales by region", "bar"), 1, true);
        assert!(card.join("\n").contains("On dashboard"));
    }

    #[test]
    fn test_skeleton_matches_card_height() {
        let card = render(&suggestion("Sales by region", "bar"), 1, false);
        assert_eq!(render_skeleton().len(), card.len());
    }
}
