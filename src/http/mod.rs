//! `reqwest`-backed upload, export and discovery collaborators.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Dataset;
use crate::error::{ChartError, ChartResult};
use crate::export::{
    DiscoveryBackend, DiscoveryResponse, ExportBackend, ExportRequest, ExportResponse,
    parse_content_disposition_filename,
};
use crate::ingest::{UploadBackend, UploadResponse};

/// Endpoint layout of the collaborator service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpCollaboratorConfig {
    pub base_url: String,
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    #[serde(default = "default_export_path")]
    pub export_path: String,
    #[serde(default = "default_discovery_path")]
    pub discovery_path: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl HttpCollaboratorConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            upload_path: default_upload_path(),
            export_path: default_export_path(),
            discovery_path: default_discovery_path(),
            timeout_secs: default_timeout_secs(),
        }
    }

    #[must_use]
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn default_upload_path() -> String {
    "/upload".to_owned()
}

fn default_export_path() -> String {
    "/export".to_owned()
}

fn default_discovery_path() -> String {
    "/export/options".to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

/// HTTP client for all collaborators of one service.
#[derive(Debug, Clone)]
pub struct HttpCollaborator {
    config: HttpCollaboratorConfig,
    client: reqwest::Client,
}

impl HttpCollaborator {
    pub fn new(config: HttpCollaboratorConfig) -> ChartResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChartError::InvalidData(format!("http client error: {e}")))?;
        Ok(Self { config, client })
    }

    #[must_use]
    pub fn config(&self) -> &HttpCollaboratorConfig {
        &self.config
    }
}

/// Reads `{detail}` from an error body, falling back to the raw text.
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorDetail>(&body)
            .map(|error| error.detail)
            .unwrap_or_else(|_| {
                if body.trim().is_empty() {
                    status.to_string()
                } else {
                    body
                }
            }),
        Err(_) => status.to_string(),
    }
}

#[async_trait]
impl UploadBackend for HttpCollaborator {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ChartResult<Dataset> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(self.config.url(&self.config.upload_path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ChartError::UploadRejected(format!("upload request error: {e}")))?;

        if !response.status().is_success() {
            return Err(ChartError::UploadRejected(error_message(response).await));
        }
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ChartError::InvalidData(format!("upload decode error: {e}")))?;
        body.into_dataset()
    }
}

#[async_trait]
impl ExportBackend for HttpCollaborator {
    async fn export(&self, request: &ExportRequest) -> ChartResult<ExportResponse> {
        let response = self
            .client
            .post(self.config.url(&self.config.export_path))
            .query(&request.query_params())
            .json(&request.payload())
            .send()
            .await
            .map_err(|e| ChartError::ExportFailed(format!("export request error: {e}")))?;

        if !response.status().is_success() {
            return Err(ChartError::ExportFailed(error_message(response).await));
        }
        let suggested_filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition_filename);
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ChartError::ExportFailed(format!("export download error: {e}")))?;
        debug!(bytes = bytes.len(), ?suggested_filename, "export response received");
        Ok(ExportResponse {
            bytes: bytes.to_vec(),
            suggested_filename,
        })
    }
}

#[async_trait]
impl DiscoveryBackend for HttpCollaborator {
    async fn discover(&self) -> ChartResult<DiscoveryResponse> {
        let response = self
            .client
            .get(self.config.url(&self.config.discovery_path))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                warn!(error = %e, "discovery collaborator unreachable");
                ChartError::UpstreamUnavailable(format!("discovery request error: {e}"))
            })?;
        response
            .json()
            .await
            .map_err(|e| ChartError::UpstreamUnavailable(format!("discovery decode error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::HttpCollaboratorConfig;

    #[test]
    fn urls_join_without_double_slashes() {
        let config = HttpCollaboratorConfig::new("http://localhost:8000/");
        assert_eq!(config.url(&config.upload_path), "http://localhost:8000/upload");
        assert_eq!(
            config.url(&config.discovery_path),
            "http://localhost:8000/export/options"
        );
    }
}
