use thiserror::Error;

use crate::api::AxisRole;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("invalid column `{column}`: {reason}")]
    InvalidColumn { column: String, reason: &'static str },

    #[error("column `{column}` is already bound to the {role} axis")]
    DuplicateBinding { column: String, role: AxisRole },

    #[error("series index {index} is out of range (series count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid export parameter `{field}`: {reason}")]
    InvalidExportParameter { field: &'static str, reason: String },

    #[error("export failed: {0}")]
    ExportFailed(String),

    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("{0}")]
    UploadRejected(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl ChartError {
    /// Returns the export field named by an `InvalidExportParameter` error.
    #[must_use]
    pub fn export_field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidExportParameter { field, .. } => Some(*field),
            _ => None,
        }
    }

    /// Whether the error only degrades capability instead of rejecting work.
    #[must_use]
    pub fn is_degradation(&self) -> bool {
        matches!(self, Self::UpstreamUnavailable(_))
    }
}
