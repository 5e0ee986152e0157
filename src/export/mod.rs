//! Export configuration, validation and the async export cycle.

mod capabilities;
mod config;
mod coordinator;
mod preset;
mod request;
mod validation;

pub use capabilities::{
    DiscoveredPalette, DiscoveredPreset, DiscoveryBackend, DiscoveryResponse, ExportCapabilities,
    ExportMode, PaletteInfo,
};
pub use config::ExportConfig;
pub use coordinator::ExportCoordinator;
pub use preset::{
    CUSTOM_DPI_RANGE, CUSTOM_DPI_STEP, CUSTOM_HEIGHT_RANGE, CUSTOM_WIDTH_RANGE,
    DEFAULT_QUALITY_PRESET, ExportDimensions, ExportFormat, QualityPreset,
    builtin_quality_presets,
};
pub use request::{
    DEFAULT_FILENAME_STEM, ExportArtifact, ExportBackend, ExportRequest, ExportResponse,
    default_export_filename, parse_content_disposition_filename, sanitize_filename,
};
