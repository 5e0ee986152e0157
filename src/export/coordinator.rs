use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::api::ChartSpecification;
use crate::error::{ChartError, ChartResult};

use super::validation::validate_export_config;
use super::{
    DEFAULT_FILENAME_STEM, DiscoveryBackend, ExportArtifact, ExportBackend, ExportCapabilities,
    ExportConfig, ExportMode, ExportRequest, default_export_filename, sanitize_filename,
};

/// Validates export configs and drives the async export cycle.
///
/// The coordinator never touches session state: a request holds its own
/// specification snapshot, so a failed export can be dispatched again as is
/// and concurrent exports of one specification do not interfere.
pub struct ExportCoordinator<B> {
    backend: B,
    capabilities: ExportCapabilities,
    filename_stem: String,
}

impl<B: ExportBackend> ExportCoordinator<B> {
    /// Coordinator with built-in presets in advanced mode.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            capabilities: ExportCapabilities::builtin(),
            filename_stem: DEFAULT_FILENAME_STEM.to_owned(),
        }
    }

    #[must_use]
    pub fn with_capabilities(mut self, capabilities: ExportCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the stem of generated filenames.
    #[must_use]
    pub fn with_filename_stem(mut self, stem: impl Into<String>) -> Self {
        self.filename_stem = stem.into();
        self
    }

    #[must_use]
    pub fn capabilities(&self) -> &ExportCapabilities {
        &self.capabilities
    }

    #[must_use]
    pub fn mode(&self) -> ExportMode {
        self.capabilities.mode()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Refreshes presets and palettes from `discovery`.
    ///
    /// Any discovery failure degrades to basic mode instead of failing.
    pub async fn refresh_capabilities<D>(&mut self, discovery: &D) -> ExportMode
    where
        D: DiscoveryBackend + ?Sized,
    {
        let discovered = discovery
            .discover()
            .await
            .and_then(ExportCapabilities::from_discovery);
        match discovered {
            Ok(capabilities) => {
                info!(
                    presets = capabilities.presets().count(),
                    palettes = capabilities.palettes().count(),
                    "export capabilities discovered"
                );
                self.capabilities = capabilities;
            }
            Err(err) => {
                warn!(error = %err, "capability discovery failed, export degraded to basic mode");
                self.capabilities = ExportCapabilities::basic();
            }
        }
        self.capabilities.mode()
    }

    /// Validates `config` and snapshots it with `specification`.
    ///
    /// Nothing is sent; an invalid request never reaches the backend.
    pub fn prepare(
        &self,
        specification: Arc<ChartSpecification>,
        config: &ExportConfig,
    ) -> ChartResult<ExportRequest> {
        if specification.is_empty() {
            return Err(ChartError::InvalidExportParameter {
                field: "specification",
                reason: "chart has no series to export".to_owned(),
            });
        }
        let (preset, dimensions) =
            validate_export_config(config, &specification.palette, &self.capabilities)?;
        debug!(
            quality = %preset.name,
            format = %config.format,
            width = dimensions.width,
            height = dimensions.height,
            dpi = dimensions.dpi,
            "prepared export request"
        );
        Ok(ExportRequest {
            palette: specification.palette.clone(),
            specification,
            quality: preset.name.clone(),
            format: config.format,
            dimensions,
            custom_width: config.custom_width,
            custom_height: config.custom_height,
            custom_dpi: config.custom_dpi,
        })
    }

    /// Sends a prepared request and returns the artifact for delivery.
    pub async fn dispatch(&self, request: &ExportRequest) -> ChartResult<ExportArtifact> {
        info!(
            quality = %request.quality,
            format = %request.format,
            series = request.specification.series_len(),
            "dispatching export"
        );
        let response = self.backend.export(request).await.map_err(|err| {
            warn!(error = %err, "export failed");
            match err {
                ChartError::ExportFailed(reason) => ChartError::ExportFailed(reason),
                other => ChartError::ExportFailed(other.to_string()),
            }
        })?;
        if response.bytes.is_empty() {
            warn!("export backend returned an empty artifact");
            return Err(ChartError::ExportFailed(
                "export backend returned an empty artifact".to_owned(),
            ));
        }

        let filename = response
            .suggested_filename
            .as_deref()
            .and_then(sanitize_filename)
            .unwrap_or_else(|| {
                default_export_filename(
                    &self.filename_stem,
                    &request.quality,
                    request.format,
                    Utc::now(),
                )
            });
        debug!(%filename, bytes = response.bytes.len(), "export completed");
        Ok(ExportArtifact {
            bytes: response.bytes,
            filename,
            format: request.format,
            dimensions: request.dimensions,
        })
    }

    /// Validates, then dispatches in one call.
    pub async fn request_export(
        &self,
        specification: Arc<ChartSpecification>,
        config: &ExportConfig,
    ) -> ChartResult<ExportArtifact> {
        let request = self.prepare(specification, config)?;
        self.dispatch(&request).await
    }
}
