use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::core::{CellValue, Dataset, Row};
use crate::error::{ChartError, ChartResult};

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonUpload {
    Records(Vec<IndexMap<String, serde_json::Value>>),
    Record(IndexMap<String, serde_json::Value>),
}

/// Parses an uploaded `.csv` or `.json` file into a dataset.
///
/// The extension check is case-insensitive. Failures are reported as
/// `ChartError::UploadRejected` with a user-facing message.
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> ChartResult<Dataset> {
    let lowered = file_name.to_ascii_lowercase();
    let dataset = if lowered.ends_with(".csv") {
        parse_csv(bytes)?
    } else if lowered.ends_with(".json") {
        parse_json(bytes)?
    } else {
        return Err(ChartError::UploadRejected(
            "File must be CSV or JSON".to_owned(),
        ));
    };
    debug!(
        file_name,
        columns = dataset.columns().len(),
        rows = dataset.row_count(),
        "parsed upload"
    );
    Ok(dataset)
}

/// First record is the header; records of a different width are skipped.
fn parse_csv(bytes: &[u8]) -> ChartResult<Dataset> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ChartError::UploadRejected(format!("CSV parsing error: {e}")))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => {
            record.map_err(|e| ChartError::UploadRejected(format!("CSV parsing error: {e}")))?
        }
        None => return Err(ChartError::UploadRejected("Empty CSV".to_owned())),
    };
    let columns: Vec<String> = header.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for record in records {
        let record =
            record.map_err(|e| ChartError::UploadRejected(format!("CSV parsing error: {e}")))?;
        if record.len() != columns.len() {
            skipped += 1;
            continue;
        }
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(column, field)| (column.clone(), CellValue::from_csv_field(field)))
            .collect();
        rows.push(row);
    }
    if skipped > 0 {
        debug!(skipped, "skipped csv records with mismatched width");
    }

    Dataset::new(columns, rows)
}

fn parse_json(bytes: &[u8]) -> ChartResult<Dataset> {
    serde_json::from_slice::<serde::de::IgnoredAny>(bytes)
        .map_err(|_| ChartError::UploadRejected("Invalid JSON format".to_owned()))?;
    let invalid_structure = || ChartError::UploadRejected("Invalid JSON structure".to_owned());
    let parsed: JsonUpload = serde_json::from_slice(bytes).map_err(|_| invalid_structure())?;

    let records = match parsed {
        JsonUpload::Records(records) if !records.is_empty() => records,
        JsonUpload::Records(_) => return Err(invalid_structure()),
        JsonUpload::Record(record) => vec![record],
    };
    let columns: Vec<String> = records[0].keys().cloned().collect();
    let rows = records
        .iter()
        .map(|record| {
            record
                .iter()
                .map(|(key, value)| (key.clone(), CellValue::from_json(value)))
                .collect::<Row>()
        })
        .collect();

    Dataset::new(columns, rows)
}
