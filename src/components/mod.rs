//! Presentation Components
//!
//! Text renderers for the dashboard. Components only read state handed to
//! them; the one exception is [`ChartRenderer`], which owns the chart-data
//! resource for its card.

pub mod carousel;
pub mod chart_card;
pub mod chart_renderer;
pub mod dashboard_grid;
pub mod drop_zone;
pub mod icon;
pub mod plot;
pub mod skeleton;
pub mod suggestion_card;

pub use carousel::Carousel;
pub use chart_renderer::{ChartKind, ChartRenderer, ChartView};
pub use drop_zone::{DropError, DropZone, FileKind, SelectedFile};
pub use icon::{Icon, IconName};

/// Cut `text` to at most `width` characters, marking the cut with `…`
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Pad (or cut) `text` to exactly `width` characters
pub fn pad(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let len = cut.chars().count();
    format!("{}{}", cut, " ".repeat(width - len))
}

/// Greedy word wrap
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
        while current.chars().count() > width {
            let head: String = current.chars().take(width).collect();
            current = current.chars().skip(width).collect();
            lines.push(head);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draw a box of inner width `width` around `body`, with an optional title
pub fn frame(title: Option<&str>, body: &[String], width: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(body.len() + 4);
    out.push(format!("┌{}┐", "─".repeat(width + 2)));
    if let Some(title) = title {
        out.push(format!("│ {} │", pad(title, width)));
        out.push(format!("├{}┤", "─".repeat(width + 2)));
    }
    for line in body {
        out.push(format!("│ {} │", pad(line, width)));
    }
    out.push(format!("└{}┘", "─".repeat(width + 2)));
    out
}

/// Lay equally sized blocks out next to each other
pub fn side_by_side(blocks: &[Vec<String>], gap: usize) -> Vec<String> {
    let height = blocks.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = blocks
        .iter()
        .map(|b| b.iter().map(|l| l.chars().count()).max().unwrap_or(0))
        .collect();

    (0..height)
        .map(|row| {
            blocks
                .iter()
                .zip(&widths)
                .map(|(block, width)| pad(block.get(row).map(String::as_str).unwrap_or(""), *width))
                .collect::<Vec<_>>()
                .join(&" ".repeat(gap))
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Render `y` without noise: integers bare, fractions to two places
pub fn format_value(y: f64) -> String {
    if y.fract() == 0.0 && y.abs() < 1e15 {
        format!("{}", y as i64)
    } else {
        format!("{:.2}", y)
    }
}
