//! Upload collaborator contract and a local CSV/JSON ingestor.

mod parse;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{CellValue, Dataset, Row};
use crate::error::ChartResult;

pub use parse::parse_upload;

/// Successful upload response: header plus rows keyed by column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub columns: Vec<String>,
    pub data: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl UploadResponse {
    /// Converts the raw response into a validated dataset.
    ///
    /// Rows keep their keys in header order; keys outside the header are kept
    /// after them. A repeated header name fails with `InvalidColumn`.
    pub fn into_dataset(self) -> ChartResult<Dataset> {
        let rows = self
            .data
            .iter()
            .map(|record| {
                let mut row = Row::with_capacity(record.len());
                for column in &self.columns {
                    if let Some(value) = record.get(column) {
                        row.insert(column.clone(), CellValue::from_json(value));
                    }
                }
                for (key, value) in record {
                    if !row.contains_key(key) {
                        row.insert(key.clone(), CellValue::from_json(value));
                    }
                }
                row
            })
            .collect();
        Dataset::new(self.columns, rows)
    }
}

/// File ingestion collaborator.
#[async_trait]
pub trait UploadBackend: Send + Sync {
    /// Sends raw file bytes under their declared name.
    ///
    /// Rejections carry the collaborator's message verbatim as
    /// `ChartError::UploadRejected`.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ChartResult<Dataset>;
}

/// In-process ingestor with the same acceptance rules as the upload service.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalIngestor;

#[async_trait]
impl UploadBackend for LocalIngestor {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ChartResult<Dataset> {
        parse_upload(file_name, &bytes)
    }
}
