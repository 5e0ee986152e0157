use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::builtin_palettes;
use crate::error::{ChartError, ChartResult};

use super::{DEFAULT_QUALITY_PRESET, QualityPreset, builtin_quality_presets};

/// Export feature level currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExportMode {
    /// Presets, formats and custom dimensions are all selectable.
    #[default]
    Advanced,
    /// Discovery was unreachable: quick PNG export only.
    Basic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteInfo {
    pub name: String,
    pub description: String,
}

/// One preset as reported by the discovery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredPreset {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredPalette {
    #[serde(default)]
    pub description: String,
}

/// Response body of the palette/preset discovery collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiscoveryResponse {
    #[serde(default)]
    pub quality_presets: IndexMap<String, DiscoveredPreset>,
    #[serde(default)]
    pub color_palettes: IndexMap<String, DiscoveredPalette>,
}

/// Source of valid presets and palettes.
#[async_trait]
pub trait DiscoveryBackend: Send + Sync {
    /// Fetches the enumerated presets and palettes.
    ///
    /// Implementations report an unreachable collaborator as
    /// `ChartError::UpstreamUnavailable`.
    async fn discover(&self) -> ChartResult<DiscoveryResponse>;
}

/// Presets and palettes that drive export choices and validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportCapabilities {
    mode: ExportMode,
    default_preset: String,
    presets: IndexMap<String, QualityPreset>,
    palettes: IndexMap<String, PaletteInfo>,
}

impl Default for ExportCapabilities {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExportCapabilities {
    /// Built-in presets and palettes in advanced mode.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            mode: ExportMode::Advanced,
            default_preset: DEFAULT_QUALITY_PRESET.to_owned(),
            presets: builtin_quality_presets()
                .into_iter()
                .map(|preset| (preset.name.clone(), preset))
                .collect(),
            palettes: builtin_palettes()
                .into_iter()
                .map(|palette| {
                    let name = palette.name().to_owned();
                    let info = PaletteInfo {
                        name: name.clone(),
                        description: palette.description().to_owned(),
                    };
                    (name, info)
                })
                .collect(),
        }
    }

    /// Built-in capabilities restricted to quick export.
    #[must_use]
    pub fn basic() -> Self {
        Self {
            mode: ExportMode::Basic,
            ..Self::builtin()
        }
    }

    /// Capabilities reported by discovery.
    ///
    /// An empty preset or palette list keeps the built-in one. The default
    /// preset stays `web` when offered, else the first reported preset.
    pub fn from_discovery(response: DiscoveryResponse) -> ChartResult<Self> {
        let mut capabilities = Self::builtin();

        if !response.quality_presets.is_empty() {
            let mut presets = IndexMap::with_capacity(response.quality_presets.len());
            for (name, preset) in response.quality_presets {
                let preset = QualityPreset::new(
                    name.clone(),
                    preset.description,
                    preset.width,
                    preset.height,
                    preset.dpi,
                )?;
                presets.insert(name, preset);
            }
            capabilities.default_preset = if presets.contains_key(DEFAULT_QUALITY_PRESET) {
                DEFAULT_QUALITY_PRESET.to_owned()
            } else {
                presets
                    .keys()
                    .next()
                    .cloned()
                    .ok_or_else(|| ChartError::InvalidData("no quality presets".to_owned()))?
            };
            capabilities.presets = presets;
        }

        if !response.color_palettes.is_empty() {
            capabilities.palettes = response
                .color_palettes
                .into_iter()
                .map(|(name, palette)| {
                    let info = PaletteInfo {
                        name: name.clone(),
                        description: palette.description,
                    };
                    (name, info)
                })
                .collect();
        }

        Ok(capabilities)
    }

    #[must_use]
    pub fn mode(&self) -> ExportMode {
        self.mode
    }

    #[must_use]
    pub fn is_basic(&self) -> bool {
        self.mode == ExportMode::Basic
    }

    #[must_use]
    pub fn default_preset(&self) -> &str {
        &self.default_preset
    }

    #[must_use]
    pub fn preset(&self, name: &str) -> Option<&QualityPreset> {
        self.presets.get(name)
    }

    pub fn presets(&self) -> impl Iterator<Item = &QualityPreset> {
        self.presets.values()
    }

    #[must_use]
    pub fn palette(&self, name: &str) -> Option<&PaletteInfo> {
        self.palettes.get(name)
    }

    pub fn palettes(&self) -> impl Iterator<Item = &PaletteInfo> {
        self.palettes.values()
    }
}
