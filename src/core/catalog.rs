use serde::{Deserialize, Serialize};

use crate::core::value::validate_header;
use crate::error::{ChartError, ChartResult};

/// Column names of the current dataset: the only names an axis may bind.
///
/// Replaced wholesale on every new dataset, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnCatalog {
    columns: Vec<String>,
}

impl ColumnCatalog {
    pub fn new(columns: Vec<String>) -> ChartResult<Self> {
        validate_header(&columns)?;
        Ok(Self { columns })
    }

    /// Replaces all columns. On error the previous catalog is kept.
    pub fn replace(&mut self, columns: Vec<String>) -> ChartResult<()> {
        validate_header(&columns)?;
        self.columns = columns;
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Returns `Ok` when `name` is in the catalog, `InvalidColumn` otherwise.
    pub fn require(&self, name: &str) -> ChartResult<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(ChartError::InvalidColumn {
                column: name.to_owned(),
                reason: "column is not in the current dataset",
            })
        }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }
}
