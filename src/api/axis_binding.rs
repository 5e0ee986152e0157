use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{ColorPalette, ColumnCatalog, RgbColor};
use crate::error::{ChartError, ChartResult};

/// Role a column can hold: the single X axis or one Y series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisRole {
    X,
    Y,
}

impl fmt::Display for AxisRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => f.write_str("X"),
            Self::Y => f.write_str("Y"),
        }
    }
}

/// One Y series: bound column plus its display label and color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesBinding {
    pub column: String,
    pub label: String,
    pub color: RgbColor,
}

impl SeriesBinding {
    /// New binding whose label defaults to the column name.
    #[must_use]
    pub fn new(column: impl Into<String>, color: RgbColor) -> Self {
        let column = column.into();
        Self {
            label: column.clone(),
            column,
            color,
        }
    }

    /// Label shown in titles and legends; an unset label falls back to the column.
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.column
        } else {
            &self.label
        }
    }

    /// Whether the label is still the automatic one (column name or unset).
    #[must_use]
    pub fn has_default_label(&self) -> bool {
        self.label == self.column || self.label.trim().is_empty()
    }
}

/// Mapping from catalog columns to the X axis and the ordered Y series.
///
/// Invariants kept by every operation:
/// - a column holds at most one role (never X and Y, never two series)
/// - series order is insertion order and drives legend and bar offset order
/// - every bound column exists in the catalog the operation was checked against
///
/// Operations validate before mutating, so a rejected call leaves the binding
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisBinding {
    x_column: Option<String>,
    series: Vec<SeriesBinding>,
}

impl AxisBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn x_column(&self) -> Option<&str> {
        self.x_column.as_deref()
    }

    #[must_use]
    pub fn series(&self) -> &[SeriesBinding] {
        &self.series
    }

    #[must_use]
    pub fn series_len(&self) -> usize {
        self.series.len()
    }

    /// Whether both an X column and at least one series are bound.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.x_column.is_some() && !self.series.is_empty()
    }

    /// Role currently held by `column`, if any.
    #[must_use]
    pub fn role_of(&self, column: &str) -> Option<AxisRole> {
        if self.x_column.as_deref() == Some(column) {
            return Some(AxisRole::X);
        }
        self.series
            .iter()
            .any(|series| series.column == column)
            .then_some(AxisRole::Y)
    }

    /// Binds `column` to X. A column currently bound as a series moves to X.
    pub fn set_x(&mut self, catalog: &ColumnCatalog, column: &str) -> ChartResult<()> {
        catalog.require(column)?;
        if let Some(position) = self.position_of(column) {
            self.series.remove(position);
            debug!(column, from_index = position, "moved series column to X axis");
        }
        self.x_column = Some(column.to_owned());
        trace!(column, "bound X axis");
        Ok(())
    }

    pub fn clear_x(&mut self) {
        if let Some(previous) = self.x_column.take() {
            trace!(column = %previous, "cleared X axis");
        }
    }

    /// Appends a series for `column`.
    ///
    /// Without an explicit color the next unused palette color is assigned.
    pub fn add_series(
        &mut self,
        catalog: &ColumnCatalog,
        column: &str,
        color: Option<RgbColor>,
        palette: &ColorPalette,
    ) -> ChartResult<usize> {
        catalog.require(column)?;
        self.require_unbound(column, None)?;
        let color = color.unwrap_or_else(|| palette.next_color(&self.used_colors()));
        self.series.push(SeriesBinding::new(column, color));
        let index = self.series.len() - 1;
        debug!(column, index, color = %color, "added series");
        Ok(index)
    }

    /// Appends a series for the first catalog column not yet bound.
    ///
    /// Returns `Ok(None)` when every column already holds a role.
    pub fn add_next_series(
        &mut self,
        catalog: &ColumnCatalog,
        palette: &ColorPalette,
    ) -> ChartResult<Option<usize>> {
        let Some(column) = self.available_columns_for_new_series(catalog).into_iter().next()
        else {
            return Ok(None);
        };
        self.add_series(catalog, &column, None, palette).map(Some)
    }

    /// Removes the series at `index`; later series shift down by one.
    pub fn remove_series(&mut self, index: usize) -> ChartResult<SeriesBinding> {
        self.require_index(index)?;
        let removed = self.series.remove(index);
        debug!(column = %removed.column, index, "removed series");
        Ok(removed)
    }

    /// Points the series at `index` to `new_column`.
    ///
    /// Label and color are kept, except that a default label follows the new
    /// column so a user-chosen label is never overwritten.
    pub fn reassign_series(
        &mut self,
        catalog: &ColumnCatalog,
        index: usize,
        new_column: &str,
    ) -> ChartResult<()> {
        self.require_index(index)?;
        catalog.require(new_column)?;
        self.require_unbound(new_column, Some(index))?;

        let series = &mut self.series[index];
        if series.has_default_label() {
            series.label = new_column.to_owned();
        }
        debug!(from = %series.column, to = new_column, index, "reassigned series");
        series.column = new_column.to_owned();
        Ok(())
    }

    pub fn relabel_series(&mut self, index: usize, label: impl Into<String>) -> ChartResult<()> {
        self.require_index(index)?;
        self.series[index].label = label.into();
        Ok(())
    }

    pub fn recolor_series(&mut self, index: usize, color: RgbColor) -> ChartResult<()> {
        self.require_index(index)?;
        self.series[index].color = color;
        Ok(())
    }

    /// Columns the series at `index` may be reassigned to, in catalog order.
    ///
    /// The series' own column stays in the list; X and other series are excluded.
    pub fn available_columns_for(
        &self,
        catalog: &ColumnCatalog,
        index: usize,
    ) -> ChartResult<Vec<String>> {
        self.require_index(index)?;
        Ok(catalog
            .iter()
            .filter(|column| self.x_column.as_deref() != Some(*column))
            .filter(|column| {
                self.series
                    .iter()
                    .enumerate()
                    .all(|(position, series)| position == index || series.column != *column)
            })
            .map(str::to_owned)
            .collect())
    }

    /// Catalog columns holding no role, in catalog order.
    #[must_use]
    pub fn available_columns_for_new_series(&self, catalog: &ColumnCatalog) -> Vec<String> {
        catalog
            .iter()
            .filter(|column| self.role_of(column).is_none())
            .map(str::to_owned)
            .collect()
    }

    /// Drops every binding whose column is missing from `catalog`.
    ///
    /// Surviving series keep their relative order. Returns the dropped columns.
    pub fn retain_valid(&mut self, catalog: &ColumnCatalog) -> Vec<String> {
        let mut dropped = Vec::new();
        if let Some(x_column) = self.x_column.take_if(|column| !catalog.contains(column)) {
            dropped.push(x_column);
        }
        self.series.retain(|series| {
            let keep = catalog.contains(&series.column);
            if !keep {
                dropped.push(series.column.clone());
            }
            keep
        });
        if !dropped.is_empty() {
            debug!(?dropped, "dropped bindings missing from catalog");
        }
        dropped
    }

    pub fn clear(&mut self) {
        self.x_column = None;
        self.series.clear();
    }

    fn used_colors(&self) -> Vec<RgbColor> {
        self.series.iter().map(|series| series.color).collect()
    }

    fn position_of(&self, column: &str) -> Option<usize> {
        self.series.iter().position(|series| series.column == column)
    }

    fn require_index(&self, index: usize) -> ChartResult<()> {
        if index < self.series.len() {
            Ok(())
        } else {
            Err(ChartError::IndexOutOfRange {
                index,
                len: self.series.len(),
            })
        }
    }

    fn require_unbound(&self, column: &str, except_series: Option<usize>) -> ChartResult<()> {
        if self.x_column.as_deref() == Some(column) {
            return Err(ChartError::DuplicateBinding {
                column: column.to_owned(),
                role: AxisRole::X,
            });
        }
        match self.position_of(column) {
            Some(position) if Some(position) != except_series => {
                Err(ChartError::DuplicateBinding {
                    column: column.to_owned(),
                    role: AxisRole::Y,
                })
            }
            _ => Ok(()),
        }
    }
}
