use serde::{Deserialize, Serialize};

use crate::core::{CellValue, ChartType, RgbColor, Row};
use crate::error::{ChartError, ChartResult};

use super::{AxisTitleOverrides, ChartSpecification, SessionState};

pub const CHART_SPECIFICATION_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpecificationJsonContractV1 {
    pub schema_version: u32,
    pub specification: ChartSpecification,
}

/// Series entry of the chart-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSeries {
    pub name: String,
    pub color: RgbColor,
}

/// Request body understood by the chart-generation and export collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGenerationPayload {
    pub rows: Vec<Row>,
    #[serde(rename = "xColumn")]
    pub x_column: Option<String>,
    pub series: Vec<GenerationSeries>,
    #[serde(rename = "chartType")]
    pub chart_type: ChartType,
}

impl ChartGenerationPayload {
    /// Builds the payload from the live session state.
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        Self {
            rows: state.rows().to_vec(),
            x_column: state.binding.x_column().map(str::to_owned),
            series: state
                .binding
                .series()
                .iter()
                .map(|series| GenerationSeries {
                    name: series.column.clone(),
                    color: series.color,
                })
                .collect(),
            chart_type: state.chart_type,
        }
    }

    /// Rebuilds the payload from a specification snapshot.
    ///
    /// Every series shares the dataset's row order, so row `i` is the X value
    /// at `i` plus each series' Y value at `i`. Only bound columns survive.
    #[must_use]
    pub fn from_specification(specification: &ChartSpecification) -> Self {
        let row_count = specification
            .series
            .first()
            .map_or(0, |series| series.point_count());
        let rows = (0..row_count)
            .map(|index| {
                let mut row = Row::with_capacity(specification.series.len() + 1);
                if let (Some(x_column), Some(first)) =
                    (&specification.x_column, specification.series.first())
                {
                    row.insert(x_column.clone(), cell_at(&first.x, index));
                }
                for series in &specification.series {
                    row.insert(series.column.clone(), cell_at(&series.y, index));
                }
                row
            })
            .collect();

        Self {
            rows,
            x_column: specification.x_column.clone(),
            series: specification
                .series
                .iter()
                .map(|series| GenerationSeries {
                    name: series.column.clone(),
                    color: series.style.color,
                })
                .collect(),
            chart_type: specification.chart_type,
        }
    }

    pub fn to_json(&self) -> ChartResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize generation payload: {e}"))
        })
    }
}

/// Ragged series from a foreign specification read as `Null` past their end.
fn cell_at(values: &[CellValue], index: usize) -> CellValue {
    values.get(index).cloned().unwrap_or_default()
}

impl ChartSpecification {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize specification: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSpecificationJsonContractV1 {
            schema_version: CHART_SPECIFICATION_JSON_SCHEMA_V1,
            specification: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!(
                "failed to serialize specification contract v1: {e}"
            ))
        })
    }

    /// Parses either a bare specification or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(specification) = serde_json::from_str::<ChartSpecification>(input) {
            return Ok(specification);
        }
        let payload: ChartSpecificationJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse specification json payload: {e}"))
            })?;
        if payload.schema_version != CHART_SPECIFICATION_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported specification schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.specification)
    }

    /// Parses a collaborator-generated specification and merges user titles.
    pub fn from_generated_json(input: &str, titles: &AxisTitleOverrides) -> ChartResult<Self> {
        Ok(Self::from_json_compat_str(input)?.with_axis_titles(titles))
    }
}
