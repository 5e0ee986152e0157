use serde::{Deserialize, Serialize};

use crate::core::{ChartType, ColorPalette, DEFAULT_PALETTE_NAME};
use crate::error::{ChartError, ChartResult};
use crate::export::ExportConfig;

use super::DatasetBindingPolicy;

/// When the chart specification is recomputed after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RecomputePolicy {
    /// Rebuild right after every accepted mutation.
    #[default]
    Eager,
    /// Mark stale and rebuild on the next read, batching rapid mutations.
    Deferred,
}

/// Public session bootstrap configuration.
///
/// Serializable so host applications can keep session defaults in a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default = "default_palette_name")]
    pub palette: String,
    #[serde(default)]
    pub recompute_policy: RecomputePolicy,
    #[serde(default)]
    pub dataset_binding_policy: DatasetBindingPolicy,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            palette: default_palette_name(),
            recompute_policy: RecomputePolicy::default(),
            dataset_binding_policy: DatasetBindingPolicy::default(),
            export: ExportConfig::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial chart type.
    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Sets the initial palette by built-in name.
    #[must_use]
    pub fn with_palette(mut self, palette: impl Into<String>) -> Self {
        self.palette = palette.into();
        self
    }

    #[must_use]
    pub fn with_recompute_policy(mut self, policy: RecomputePolicy) -> Self {
        self.recompute_policy = policy;
        self
    }

    #[must_use]
    pub fn with_dataset_binding_policy(mut self, policy: DatasetBindingPolicy) -> Self {
        self.dataset_binding_policy = policy;
        self
    }

    /// Sets the export configuration a new session starts with.
    #[must_use]
    pub fn with_export(mut self, export: ExportConfig) -> Self {
        self.export = export;
        self
    }

    /// Resolves the configured palette name against the built-in palettes.
    pub fn resolve_palette(&self) -> ChartResult<ColorPalette> {
        ColorPalette::builtin(&self.palette)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown palette `{}`", self.palette)))
    }

    /// Serializes config to pretty JSON for config files.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON; missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_palette_name() -> String {
    DEFAULT_PALETTE_NAME.to_owned()
}
