use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{ChartType, ColorPalette, ColumnCatalog, Dataset, RgbColor, Row};
use crate::error::{ChartError, ChartResult};
use crate::export::ExportConfig;

use super::{AxisBinding, AxisTitleOverrides, ChartSpecification, build_chart_specification};

/// What happens to existing bindings when a new dataset is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DatasetBindingPolicy {
    /// Clear every binding and axis title.
    #[default]
    Reset,
    /// Keep bindings whose column still exists in the new header.
    RetainValid,
}

/// Session-scoped state: dataset, catalog, bindings and chart choices.
///
/// Values are plain data so two states compare by equality in tests. The
/// dataset is shared, so cloning a state never copies rows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub catalog: ColumnCatalog,
    pub dataset: Arc<Dataset>,
    pub binding: AxisBinding,
    pub chart_type: ChartType,
    pub palette: ColorPalette,
    pub axis_titles: AxisTitleOverrides,
    pub export: ExportConfig,
}

impl SessionState {
    #[must_use]
    pub fn new(chart_type: ChartType, palette: ColorPalette, export: ExportConfig) -> Self {
        Self {
            chart_type,
            palette,
            export,
            ..Self::default()
        }
    }

    /// Rows of the loaded dataset, in upload order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        self.dataset.rows()
    }

    /// Projects the chart specification for this state, titles merged.
    #[must_use]
    pub fn specification(&self) -> ChartSpecification {
        build_chart_specification(self.rows(), &self.binding, self.chart_type, &self.palette)
            .with_axis_titles(&self.axis_titles)
    }
}

/// User intent applied to a `SessionState` by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    LoadDataset {
        dataset: Dataset,
        policy: DatasetBindingPolicy,
    },
    ReplaceCatalog(Vec<String>),
    SetX(String),
    ClearX,
    AddSeries {
        column: String,
        color: Option<RgbColor>,
    },
    AddNextSeries,
    RemoveSeries(usize),
    ReassignSeries {
        index: usize,
        column: String,
    },
    RelabelSeries {
        index: usize,
        label: String,
    },
    RecolorSeries {
        index: usize,
        color: RgbColor,
    },
    SetChartType(ChartType),
    SetPalette(ColorPalette),
    SetAxisTitles(AxisTitleOverrides),
    SetExportConfig(ExportConfig),
}

impl SessionAction {
    /// Whether applying the action can change the derived specification.
    #[must_use]
    pub fn affects_specification(&self) -> bool {
        !matches!(self, Self::SetExportConfig(_))
    }
}

/// Applies `action` to `state` and returns the next state.
///
/// The input state is never modified; on error the caller keeps it as is.
pub fn reduce(state: &SessionState, action: SessionAction) -> ChartResult<SessionState> {
    let mut next = state.clone();
    match action {
        SessionAction::LoadDataset { dataset, policy } => {
            next.catalog = ColumnCatalog::new(dataset.columns().to_vec())?;
            next.dataset = Arc::new(dataset);
            match policy {
                DatasetBindingPolicy::Reset => {
                    next.binding.clear();
                    next.axis_titles = AxisTitleOverrides::default();
                }
                DatasetBindingPolicy::RetainValid => {
                    next.binding.retain_valid(&next.catalog);
                }
            }
        }
        SessionAction::ReplaceCatalog(columns) => {
            ensure_columns_loaded(&state.dataset, &columns)?;
            next.catalog.replace(columns)?;
            next.binding.retain_valid(&next.catalog);
        }
        SessionAction::SetX(column) => next.binding.set_x(&next.catalog, &column)?,
        SessionAction::ClearX => next.binding.clear_x(),
        SessionAction::AddSeries { column, color } => {
            next.binding
                .add_series(&next.catalog, &column, color, &next.palette)?;
        }
        SessionAction::AddNextSeries => {
            next.binding.add_next_series(&next.catalog, &next.palette)?;
        }
        SessionAction::RemoveSeries(index) => {
            next.binding.remove_series(index)?;
        }
        SessionAction::ReassignSeries { index, column } => {
            next.binding.reassign_series(&next.catalog, index, &column)?;
        }
        SessionAction::RelabelSeries { index, label } => {
            next.binding.relabel_series(index, label)?;
        }
        SessionAction::RecolorSeries { index, color } => {
            next.binding.recolor_series(index, color)?;
        }
        SessionAction::SetChartType(chart_type) => next.chart_type = chart_type,
        SessionAction::SetPalette(palette) => next.palette = palette,
        SessionAction::SetAxisTitles(titles) => next.axis_titles = titles,
        SessionAction::SetExportConfig(config) => next.export = config,
    }
    Ok(next)
}

/// A catalog-only replacement may narrow the loaded header, never extend it;
/// new columns arrive with their rows through `LoadDataset`.
fn ensure_columns_loaded(dataset: &Dataset, columns: &[String]) -> ChartResult<()> {
    match columns
        .iter()
        .find(|column| !dataset.columns().contains(column))
    {
        Some(column) => Err(ChartError::InvalidColumn {
            column: column.clone(),
            reason: "column is not part of the loaded dataset",
        }),
        None => Ok(()),
    }
}
