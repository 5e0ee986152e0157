use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::{ChartGenerationPayload, ChartSpecification};
use crate::error::ChartResult;

use super::{ExportDimensions, ExportFormat};

pub const DEFAULT_FILENAME_STEM: &str = "scientiflow-graph";

/// Validated, immutable export snapshot. Safe to retry or send concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRequest {
    pub specification: Arc<ChartSpecification>,
    pub quality: String,
    pub format: ExportFormat,
    pub palette: String,
    pub dimensions: ExportDimensions,
    pub custom_width: Option<u32>,
    pub custom_height: Option<u32>,
    pub custom_dpi: Option<u32>,
}

impl ExportRequest {
    /// Query parameters understood by the export collaborator.
    #[must_use]
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("quality", self.quality.clone()),
            ("format", self.format.as_str().to_owned()),
            ("color_palette", self.palette.clone()),
        ];
        if let Some(width) = self.custom_width {
            params.push(("custom_width", width.to_string()));
        }
        if let Some(height) = self.custom_height {
            params.push(("custom_height", height.to_string()));
        }
        if let Some(dpi) = self.custom_dpi {
            params.push(("custom_dpi", dpi.to_string()));
        }
        params
    }

    /// Chart-generation payload sent as the export request body.
    #[must_use]
    pub fn payload(&self) -> ChartGenerationPayload {
        ChartGenerationPayload::from_specification(&self.specification)
    }
}

/// Raw collaborator response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExportResponse {
    pub bytes: Vec<u8>,
    pub suggested_filename: Option<String>,
}

/// Artifact ready for local delivery. Not persisted by this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub format: ExportFormat,
    pub dimensions: ExportDimensions,
}

/// Rendering/export collaborator.
#[async_trait]
pub trait ExportBackend: Send + Sync {
    /// Renders `request`. Transport and server errors are reported as
    /// `ChartError::ExportFailed`.
    async fn export(&self, request: &ExportRequest) -> ChartResult<ExportResponse>;
}

#[async_trait]
impl<T: ExportBackend + ?Sized> ExportBackend for Arc<T> {
    async fn export(&self, request: &ExportRequest) -> ChartResult<ExportResponse> {
        (**self).export(request).await
    }
}

/// Generated filename used when the collaborator does not suggest one.
#[must_use]
pub fn default_export_filename(
    stem: &str,
    quality: &str,
    format: ExportFormat,
    now: DateTime<Utc>,
) -> String {
    format!(
        "{stem}-{quality}-{}.{}",
        now.format("%Y%m%d-%H%M%S"),
        format.extension()
    )
}

/// Strips directory components from a suggested filename.
///
/// Returns `None` when nothing usable is left.
#[must_use]
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches('"');
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_owned())
    }
}

/// Extracts the filename from a `Content-Disposition` header value.
///
/// `filename*=UTF-8''…` wins over a plain `filename=`.
#[must_use]
pub fn parse_content_disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value
                    .trim()
                    .split_once("''")
                    .map_or(value.trim(), |(_, encoded)| encoded);
                extended = percent_decode(encoded);
            }
            "filename" => plain = Some(value.trim().trim_matches('"').to_owned()),
            _ => {}
        }
    }
    extended
        .or(plain)
        .and_then(|name| sanitize_filename(&name))
}

fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hex = input.get(index + 1..index + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            index += 3;
        } else {
            out.push(bytes[index]);
            index += 1;
        }
    }
    String::from_utf8(out).ok()
}
