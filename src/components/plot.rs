//! Text Plots
//!
//! Terminal renditions of the four supported chart kinds. Every plot takes
//! the points of a single series.

use super::{format_value, pad, truncate};
use crate::api::Point;

/// Category colors, assigned by position
pub const PALETTE: [&str; 6] = [
    "#2563EB", "#7C3AED", "#10B981", "#F59E0B", "#EF4444", "#14B8A6",
];

/// Color of single-series plots
pub const PRIMARY: &str = PALETTE[0];

const NO_DATA: &str = "No data";
const LABEL_WIDTH: usize = 12;
const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Deterministic color for the `index`-th category
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn no_data() -> Vec<String> {
    vec![NO_DATA.to_string()]
}

fn bounds(points: &[Point]) -> (f64, f64) {
    points.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.y), hi.max(p.y))
    })
}

/// Pick at most `max` points, evenly spaced
fn sample(points: &[Point], max: usize) -> Vec<&Point> {
    if points.len() <= max || max == 0 {
        return points.iter().collect();
    }
    (0..max).map(|i| &points[i * points.len() / max]).collect()
}

/// Horizontal bars scaled to the largest magnitude
pub fn bar(points: &[Point], width: usize) -> Vec<String> {
    if points.is_empty() {
        return no_data();
    }

    let label_width = points
        .iter()
        .map(|p| p.x_label().chars().count())
        .max()
        .unwrap_or(0)
        .min(LABEL_WIDTH);
    let values: Vec<String> = points.iter().map(|p| format_value(p.y)).collect();
    let value_width = values.iter().map(|v| v.len()).max().unwrap_or(0);
    let bar_width = width.saturating_sub(label_width + value_width + 4).max(1);
    let max_abs = points.iter().map(|p| p.y.abs()).fold(0.0, f64::max);

    points
        .iter()
        .zip(&values)
        .map(|(p, value)| {
            let len = if max_abs > 0.0 {
                ((p.y.abs() / max_abs) * bar_width as f64).round() as usize
            } else {
                0
            };
            format!(
                "{} │{} {}",
                pad(&p.x_label(), label_width),
                "█".repeat(len),
                value
            )
        })
        .collect()
}

/// Sparkline with range and endpoints
pub fn line(points: &[Point], width: usize) -> Vec<String> {
    if points.is_empty() {
        return no_data();
    }

    let shown = sample(points, width.max(1));
    let (lo, hi) = bounds(points);
    let span = hi - lo;

    let spark: String = shown
        .iter()
        .map(|p| {
            if span > 0.0 {
                let level = ((p.y - lo) / span * (SPARKS.len() - 1) as f64).round() as usize;
                SPARKS[level.min(SPARKS.len() - 1)]
            } else {
                SPARKS[SPARKS.len() / 2]
            }
        })
        .collect();

    let first = points[0].x_label();
    let last = points[points.len() - 1].x_label();
    let gap = width.saturating_sub(first.chars().count() + last.chars().count()).max(1);

    vec![
        spark,
        format!("min {} · max {}", format_value(lo), format_value(hi)),
        truncate(&format!("{}{}{}", first, " ".repeat(gap), last), width),
    ]
}

/// Share of the total per category, each with its palette color
pub fn pie(points: &[Point]) -> Vec<String> {
    let total: f64 = points.iter().map(|p| p.y.max(0.0)).sum();
    if points.is_empty() || total <= 0.0 {
        return no_data();
    }

    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let share = p.y.max(0.0) / total * 100.0;
            format!(
                "● {} {} {:>5.1}%",
                color_for(i),
                pad(&p.x_label(), LABEL_WIDTH),
                share
            )
        })
        .collect()
}

/// Dots on a character grid, one column per point
pub fn scatter(points: &[Point], width: usize, height: usize) -> Vec<String> {
    if points.is_empty() {
        return no_data();
    }

    let height = height.max(2);
    let shown = sample(points, width.saturating_sub(2).max(1));
    let (lo, hi) = bounds(points);
    let span = hi - lo;

    let mut grid = vec![vec![' '; shown.len()]; height];
    for (col, p) in shown.iter().enumerate() {
        let level = if span > 0.0 {
            ((p.y - lo) / span * (height - 1) as f64).round() as usize
        } else {
            height / 2
        };
        let row = height - 1 - level.min(height - 1);
        grid[row][col] = '●';
    }

    let mut lines: Vec<String> = grid
        .into_iter()
        .map(|row| format!("│{}", row.into_iter().collect::<String>()).trim_end().to_string())
        .collect();
    lines.push(format!("└{}", "─".repeat(shown.len())));
    lines.push(format!("min {} · max {}", format_value(lo), format_value(hi)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn points(values: &[(&str, f64)]) -> Vec<Point> {
        values
            .iter()
            .map(|(x, y)| Point { x: json!(x), y: *y })
            .collect()
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(color_for(0), "#2563EB");
        assert_eq!(color_for(5), "#14B8A6");
        assert_eq!(color_for(6), "#2563EB");
    }

    #[test]
    fn test_bar_scaling() {
        let lines = bar(&points(&[("North", 10.0), ("South", 5.0)]), 31);
        assert_eq!(lines.len(), 2);
        let north = lines[0].matches('█').count();
        let south = lines[1].matches('█').count();
        assert_eq!(north, south * 2);
        assert!(lines[0].starts_with("North │"));
        assert!(lines[0].ends_with(" 10"));
    }

    #[test]
    fn test_bar_all_zero() {
        let lines = bar(&points(&[("a", 0.0)]), 20);
        assert_eq!(lines[0].matches('█').count(), 0);
    }

    #[test]
    fn test_line_sparkline() {
        let lines = line(&points(&[("Jan", 1.0), ("Feb", 5.0), ("Mar", 3.0)]), 20);
        assert_eq!(lines[0], "▁█▅");
        assert_eq!(lines[1], "min 1 · max 5");
        assert!(lines[2].starts_with("Jan"));
        assert!(lines[2].ends_with("Mar"));
    }

    #[test]
    fn test_line_flat() {
        let lines = line(&points(&[("a", 2.0), ("b", 2.0)]), 10);
        assert_eq!(lines[0], "▅▅");
    }

    #[test]
    fn test_pie_shares() {
        let lines = pie(&points(&[("North", 3.0), ("South", 1.0)]));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("#2563EB"));
        assert!(lines[0].ends_with(" 75.0%"));
        assert!(lines[1].contains("#7C3AED"));
        assert!(lines[1].ends_with(" 25.0%"));
    }

    #[test]
    fn test_pie_without_positive_values() {
        assert_eq!(pie(&points(&[("a", 0.0), ("b", -1.0)])), vec!["No data"]);
    }

    #[test]
    fn test_scatter_grid() {
        let lines = scatter(&points(&[("a", 0.0), ("b", 10.0)]), 20, 4);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "│ ●");
        assert_eq!(lines[3], "│●");
        assert_eq!(lines[4], "└──");
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(bar(&[], 10), vec!["No data"]);
        assert_eq!(line(&[], 10), vec!["No data"]);
        assert_eq!(scatter(&[], 10, 4), vec!["No data"]);
    }

    #[test]
    fn test_sampling_caps_width() {
        let many: Vec<Point> = (0..100)
            .map(|i| Point { x: json!(i), y: i as f64 })
            .collect();
        assert_eq!(line(&many, 10)[0].chars().count(), 10);
    }
}
