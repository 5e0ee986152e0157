use serde::{Deserialize, Serialize};

use super::{DEFAULT_QUALITY_PRESET, ExportDimensions, ExportFormat};

/// User-selected export options.
///
/// Custom dimensions override the quality preset field by field; unset
/// fields keep the preset's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub custom_width: Option<u32>,
    #[serde(default)]
    pub custom_height: Option<u32>,
    #[serde(default)]
    pub custom_dpi: Option<u32>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self::quick()
    }
}

impl ExportConfig {
    /// Non-parameterized PNG export with the default preset.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            quality: default_quality(),
            format: ExportFormat::Png,
            custom_width: None,
            custom_height: None,
            custom_dpi: None,
        }
    }

    #[must_use]
    pub fn new(quality: impl Into<String>, format: ExportFormat) -> Self {
        Self {
            quality: quality.into(),
            format,
            ..Self::quick()
        }
    }

    #[must_use]
    pub fn with_custom_width(mut self, width: u32) -> Self {
        self.custom_width = Some(width);
        self
    }

    #[must_use]
    pub fn with_custom_height(mut self, height: u32) -> Self {
        self.custom_height = Some(height);
        self
    }

    #[must_use]
    pub fn with_custom_dpi(mut self, dpi: u32) -> Self {
        self.custom_dpi = Some(dpi);
        self
    }

    #[must_use]
    pub fn has_overrides(&self) -> bool {
        self.custom_width.is_some() || self.custom_height.is_some() || self.custom_dpi.is_some()
    }

    /// Merges the overrides over `preset` field by field.
    #[must_use]
    pub fn resolve_dimensions(&self, preset: ExportDimensions) -> ExportDimensions {
        ExportDimensions {
            width: self.custom_width.unwrap_or(preset.width),
            height: self.custom_height.unwrap_or(preset.height),
            dpi: self.custom_dpi.unwrap_or(preset.dpi),
        }
    }
}

fn default_quality() -> String {
    DEFAULT_QUALITY_PRESET.to_owned()
}
