use serde::{Deserialize, Serialize};

use crate::core::{CellValue, ChartType, RgbColor};

pub const SCATTER_MARKER_SIZE: f64 = 8.0;
pub const SCATTER_MARKER_OPACITY: f64 = 0.8;
pub const LINE_WIDTH: f64 = 3.0;
/// Fraction of a category slot shared by all bars of one group.
pub const BAR_GROUP_WIDTH: f64 = 0.8;

/// How grouped bars are laid out; set only for bar charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarGroupingMode {
    Group,
}

/// Position of one series' bars inside a category slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarGroupSlot {
    pub group: usize,
    /// Left edge relative to the category center, in category units.
    pub offset: f64,
    pub width: f64,
}

/// Declarative drawing hint per chart type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SeriesRenderHint {
    Markers { size: f64, opacity: f64 },
    Bars { slot: Option<BarGroupSlot> },
    Lines { width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub color: RgbColor,
    pub hint: SeriesRenderHint,
}

/// One projected series: parallel `x`/`y` arrays in dataset row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub name: String,
    pub column: String,
    pub x: Vec<CellValue>,
    pub y: Vec<CellValue>,
    pub style: SeriesStyle,
}

impl SeriesSpec {
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.x.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisTitles {
    pub x: String,
    pub y: String,
}

/// User-entered axis titles; `None` keeps the derived title.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisTitleOverrides {
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub y: Option<String>,
}

impl AxisTitleOverrides {
    #[must_use]
    pub fn new(x: Option<String>, y: Option<String>) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        non_blank(self.x.as_deref()).is_none() && non_blank(self.y.as_deref()).is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub axis_titles: AxisTitles,
    pub legend_visible: bool,
    pub bar_grouping: Option<BarGroupingMode>,
}

/// Fully derived, renderer-independent chart description.
///
/// Always rebuilt from scratch; never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpecification {
    pub chart_type: ChartType,
    pub palette: String,
    pub x_column: Option<String>,
    pub series: Vec<SeriesSpec>,
    pub layout: ChartLayout,
}

impl ChartSpecification {
    /// Placeholder specification with no series.
    #[must_use]
    pub fn empty(chart_type: ChartType, palette: impl Into<String>) -> Self {
        Self {
            chart_type,
            palette: palette.into(),
            x_column: None,
            series: Vec::new(),
            layout: ChartLayout::default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    #[must_use]
    pub fn series_len(&self) -> usize {
        self.series.len()
    }

    /// Applies user-entered axis titles over the derived ones.
    ///
    /// Blank overrides are ignored. The chart title is left as derived.
    #[must_use]
    pub fn with_axis_titles(mut self, overrides: &AxisTitleOverrides) -> Self {
        if self.is_empty() {
            return self;
        }
        if let Some(x) = non_blank(overrides.x.as_deref()) {
            self.layout.axis_titles.x = x.to_owned();
        }
        if let Some(y) = non_blank(overrides.y.as_deref()) {
            self.layout.axis_titles.y = y.to_owned();
        }
        self
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
