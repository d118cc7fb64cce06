//! Icons
//!
//! A closed set of icon identifiers mapped to terminal glyphs. Names coming
//! from outside (config, suggestion payloads) resolve through
//! [`Icon::lookup`], which yields [`Icon::NoIcon`] for anything unknown.

use std::fmt;
use std::str::FromStr;

use crate::api::ChartType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconName {
    UploadCloud,
    LoaderCircle,
    ChevronLeft,
    ChevronRight,
    Plus,
    Check,
    AlertCircle,
    BarChart,
    LineChart,
    PieChart,
    ScatterChart,
}

impl IconName {
    pub const ALL: [IconName; 11] = [
        IconName::UploadCloud,
        IconName::LoaderCircle,
        IconName::ChevronLeft,
        IconName::ChevronRight,
        IconName::Plus,
        IconName::Check,
        IconName::AlertCircle,
        IconName::BarChart,
        IconName::LineChart,
        IconName::PieChart,
        IconName::ScatterChart,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            IconName::UploadCloud => "UploadCloud",
            IconName::LoaderCircle => "LoaderCircle",
            IconName::ChevronLeft => "ChevronLeft",
            IconName::ChevronRight => "ChevronRight",
            IconName::Plus => "Plus",
            IconName::Check => "Check",
            IconName::AlertCircle => "AlertCircle",
            IconName::BarChart => "BarChart",
            IconName::LineChart => "LineChart",
            IconName::PieChart => "PieChart",
            IconName::ScatterChart => "ScatterChart",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            IconName::UploadCloud => "☁",
            IconName::LoaderCircle => "◌",
            IconName::ChevronLeft => "‹",
            IconName::ChevronRight => "›",
            IconName::Plus => "+",
            IconName::Check => "✓",
            IconName::AlertCircle => "⚠",
            IconName::BarChart => "▥",
            IconName::LineChart => "∿",
            IconName::PieChart => "◔",
            IconName::ScatterChart => "⁘",
        }
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown icon: {0}")]
pub struct UnknownIcon(pub String);

impl FromStr for IconName {
    type Err = UnknownIcon;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IconName::ALL
            .iter()
            .copied()
            .find(|icon| icon.name() == s)
            .ok_or_else(|| UnknownIcon(s.to_string()))
    }
}

/// A resolved icon, or the explicit absence of one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Glyph(IconName),
    NoIcon,
}

impl Icon {
    pub fn lookup(name: &str) -> Self {
        name.parse().map(Icon::Glyph).unwrap_or(Icon::NoIcon)
    }

    pub fn for_chart(chart_type: &ChartType) -> Self {
        match chart_type {
            ChartType::Bar => Icon::Glyph(IconName::BarChart),
            ChartType::Line => Icon::Glyph(IconName::LineChart),
            ChartType::Pie => Icon::Glyph(IconName::PieChart),
            ChartType::Scatter => Icon::Glyph(IconName::ScatterChart),
            ChartType::Other(_) => Icon::NoIcon,
        }
    }

    /// Glyph followed by a space, or nothing
    pub fn prefix(&self) -> String {
        match self {
            Icon::Glyph(name) => format!("{} ", name.glyph()),
            Icon::NoIcon => String::new(),
        }
    }
}

impl From<IconName> for Icon {
    fn from(name: IconName) -> Self {
        Icon::Glyph(name)
    }
}
