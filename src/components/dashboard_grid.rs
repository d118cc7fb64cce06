//! Dashboard Grid
//!
//! Lays chart cards out two per row.

use super::side_by_side;

pub const EMPTY_TITLE: &str = "Your dashboard is empty.";
pub const EMPTY_HINT: &str = "Add charts from the suggestions above to get started.";

const COLUMNS: usize = 2;
const GAP: usize = 2;

pub fn render(cards: &[Vec<String>]) -> Vec<String> {
    if cards.is_empty() {
        return vec![EMPTY_TITLE.to_string(), EMPTY_HINT.to_string()];
    }

    let mut lines = Vec::new();
    for (i, row) in cards.chunks(COLUMNS).enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(side_by_side(row, GAP));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(tag: &str) -> Vec<String> {
        vec![format!("[{}]", tag), format!("[{}]", tag)]
    }

    #[test]
    fn test_empty_placeholder() {
        assert_eq!(render(&[]), vec![EMPTY_TITLE, EMPTY_HINT]);
    }

    #[test]
    fn test_two_columns() {
        let lines = render(&[card("a"), card("b"), card("c")]);
        assert_eq!(lines, vec!["[a]  [b]", "[a]  [b]", "", "[c]", "[c]"]);
    }
}
