#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{CellValue, ChartType, ColorPalette, Row};

use super::{
    AxisBinding, AxisTitles, BAR_GROUP_WIDTH, BarGroupSlot, BarGroupingMode, ChartLayout,
    ChartSpecification, LINE_WIDTH, SCATTER_MARKER_OPACITY, SCATTER_MARKER_SIZE, SeriesBinding,
    SeriesRenderHint, SeriesSpec, SeriesStyle,
};

/// Derives the chart specification for the current binding.
///
/// Pure and total: identical inputs give identical output, and an incomplete
/// binding (no X or no series) yields the empty specification rather than an
/// error. Row order is preserved and values pass through untouched; a missing
/// cell projects as `CellValue::Null`.
#[must_use]
pub fn build_chart_specification(
    rows: &[Row],
    binding: &AxisBinding,
    chart_type: ChartType,
    palette: &ColorPalette,
) -> ChartSpecification {
    let Some(x_column) = binding.x_column() else {
        return ChartSpecification::empty(chart_type, palette.name());
    };
    if binding.series().is_empty() {
        return ChartSpecification::empty(chart_type, palette.name());
    }

    let series_count = binding.series_len();
    let x_values = project_column(rows, x_column);

    #[cfg(feature = "parallel-projection")]
    let series: Vec<SeriesSpec> = binding
        .series()
        .par_iter()
        .enumerate()
        .map(|(index, series)| {
            project_series(rows, &x_values, series, index, series_count, chart_type)
        })
        .collect();

    #[cfg(not(feature = "parallel-projection"))]
    let series: Vec<SeriesSpec> = binding
        .series()
        .iter()
        .enumerate()
        .map(|(index, series)| {
            project_series(rows, &x_values, series, index, series_count, chart_type)
        })
        .collect();

    let labels: Vec<&str> = binding
        .series()
        .iter()
        .map(SeriesBinding::display_label)
        .collect();
    let joined_labels = labels.join(", ");

    ChartSpecification {
        chart_type,
        palette: palette.name().to_owned(),
        x_column: Some(x_column.to_owned()),
        series,
        layout: ChartLayout {
            title: format!("{x_column} vs {joined_labels}"),
            axis_titles: AxisTitles {
                x: x_column.to_owned(),
                y: joined_labels,
            },
            legend_visible: series_count > 1,
            bar_grouping: (chart_type == ChartType::Bar).then_some(BarGroupingMode::Group),
        },
    }
}

fn project_column(rows: &[Row], column: &str) -> Vec<CellValue> {
    rows.iter()
        .map(|row| row.get(column).cloned().unwrap_or_default())
        .collect()
}

fn project_series(
    rows: &[Row],
    x_values: &[CellValue],
    series: &SeriesBinding,
    index: usize,
    series_count: usize,
    chart_type: ChartType,
) -> SeriesSpec {
    SeriesSpec {
        name: series.display_label().to_owned(),
        column: series.column.clone(),
        x: x_values.to_vec(),
        y: project_column(rows, &series.column),
        style: SeriesStyle {
            color: series.color,
            hint: render_hint(chart_type, index, series_count),
        },
    }
}

/// Chart-type drawing hint for the series at `index` of `series_count`.
#[must_use]
pub fn render_hint(chart_type: ChartType, index: usize, series_count: usize) -> SeriesRenderHint {
    match chart_type {
        ChartType::Scatter => SeriesRenderHint::Markers {
            size: SCATTER_MARKER_SIZE,
            opacity: SCATTER_MARKER_OPACITY,
        },
        ChartType::Line => SeriesRenderHint::Lines { width: LINE_WIDTH },
        ChartType::Bar => SeriesRenderHint::Bars {
            slot: bar_group_slot(index, series_count),
        },
    }
}

/// Side-by-side slot for grouped bars; `None` for a lone series.
#[must_use]
pub fn bar_group_slot(index: usize, series_count: usize) -> Option<BarGroupSlot> {
    if series_count < 2 {
        return None;
    }
    let width = BAR_GROUP_WIDTH / series_count as f64;
    Some(BarGroupSlot {
        group: index,
        offset: -BAR_GROUP_WIDTH / 2.0 + width * index as f64,
        width,
    })
}
