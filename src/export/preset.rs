use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_QUALITY_PRESET: &str = "web";

pub const CUSTOM_WIDTH_RANGE: RangeInclusive<u32> = 400..=4000;
pub const CUSTOM_HEIGHT_RANGE: RangeInclusive<u32> = 300..=3000;
pub const CUSTOM_DPI_RANGE: RangeInclusive<u32> = 150..=600;
/// Recommended, not enforced, DPI granularity.
pub const CUSTOM_DPI_STEP: u32 = 50;

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Pdf,
}

impl ExportFormat {
    pub const ALL: [Self; 3] = [Self::Png, Self::Svg, Self::Pdf];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        self.as_str()
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }

    #[must_use]
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::Svg | Self::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ChartError::InvalidExportParameter {
                field: "format",
                reason: format!("unknown export format `{s}`"),
            })
    }
}

/// Width, height and DPI of an export artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExportDimensions {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl ExportDimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32, dpi: u32) -> Self {
        Self { width, height, dpi }
    }
}

/// Named bundle of default export dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityPreset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

impl QualityPreset {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        width: u32,
        height: u32,
        dpi: u32,
    ) -> ChartResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ChartError::InvalidData(
                "quality preset name must not be empty".to_owned(),
            ));
        }
        if width == 0 || height == 0 || dpi == 0 {
            return Err(ChartError::InvalidData(format!(
                "quality preset `{name}` must have non-zero width, height and dpi"
            )));
        }
        Ok(Self {
            name,
            description: description.into(),
            width,
            height,
            dpi,
        })
    }

    #[must_use]
    pub fn dimensions(&self) -> ExportDimensions {
        ExportDimensions::new(self.width, self.height, self.dpi)
    }
}

fn builtin(name: &str, description: &str, width: u32, height: u32, dpi: u32) -> QualityPreset {
    QualityPreset {
        name: name.to_owned(),
        description: description.to_owned(),
        width,
        height,
        dpi,
    }
}

/// Presets available without a discovery collaborator, default first.
#[must_use]
pub fn builtin_quality_presets() -> Vec<QualityPreset> {
    vec![
        builtin(DEFAULT_QUALITY_PRESET, "Screen sharing and web pages", 1200, 800, 150),
        builtin("draft", "Fast previews", 800, 600, 150),
        builtin("presentation", "Slides at full HD", 1920, 1080, 200),
        builtin("publication", "Journal figures", 2400, 1800, 300),
        builtin("poster", "Large-format print", 3600, 2400, 600),
    ]
}
