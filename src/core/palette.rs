use serde::{Deserialize, Serialize};

use crate::core::RgbColor;
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_PALETTE_NAME: &str = "default";

/// Named, ordered color sequence used to auto-style new series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawColorPalette")]
pub struct ColorPalette {
    name: String,
    description: String,
    colors: Vec<RgbColor>,
}

#[derive(Deserialize)]
struct RawColorPalette {
    name: String,
    #[serde(default)]
    description: String,
    colors: Vec<RgbColor>,
}

impl TryFrom<RawColorPalette> for ColorPalette {
    type Error = ChartError;

    fn try_from(raw: RawColorPalette) -> Result<Self, Self::Error> {
        Self::new(raw.name, raw.description, raw.colors)
    }
}

impl ColorPalette {
    /// Builds a palette. At least one color is required.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        colors: Vec<RgbColor>,
    ) -> ChartResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ChartError::InvalidData(
                "palette name must not be empty".to_owned(),
            ));
        }
        if colors.is_empty() {
            return Err(ChartError::InvalidData(format!(
                "palette `{name}` must contain at least one color"
            )));
        }
        Ok(Self {
            name,
            description: description.into(),
            colors,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn colors(&self) -> &[RgbColor] {
        &self.colors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `slot`, wrapping modulo the palette length.
    #[must_use]
    pub fn color_at(&self, slot: usize) -> RgbColor {
        self.colors[slot % self.colors.len()]
    }

    /// Picks the color for a new series given the colors already in use.
    ///
    /// The first palette entry not in `used` wins. When every entry is taken
    /// the slot is `series_count` modulo the palette length.
    #[must_use]
    pub fn next_color(&self, used: &[RgbColor]) -> RgbColor {
        self.colors
            .iter()
            .copied()
            .find(|color| !used.contains(color))
            .unwrap_or_else(|| self.color_at(used.len()))
    }

    /// Looks up a built-in palette by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        builtin_palettes()
            .into_iter()
            .find(|palette| palette.name == name)
    }

    /// Built-in palette by name, falling back to the default palette.
    #[must_use]
    pub fn builtin_or_default(name: &str) -> Self {
        Self::builtin(name).unwrap_or_default()
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        builtin(
            DEFAULT_PALETTE_NAME,
            "Balanced categorical colors for screen and print",
            &[
                0x3b82f6, 0x10b981, 0xf59e0b, 0xef4444, 0x8b5cf6, 0x06b6d4, 0xec4899, 0x84cc16,
                0xf97316, 0x6b7280,
            ],
        )
    }
}

fn builtin(name: &str, description: &str, packed: &[u32]) -> ColorPalette {
    ColorPalette {
        name: name.to_owned(),
        description: description.to_owned(),
        colors: packed.iter().copied().map(RgbColor::from_packed).collect(),
    }
}

/// All palettes shipped with the crate, default first.
#[must_use]
pub fn builtin_palettes() -> Vec<ColorPalette> {
    vec![
        ColorPalette::default(),
        builtin(
            "colorblind",
            "Okabe-Ito colors distinguishable under common color-vision deficiencies",
            &[
                0x0072b2, 0xe69f00, 0x009e73, 0xcc79a7, 0x56b4e9, 0xd55e00, 0xf0e442, 0x000000,
            ],
        ),
        builtin(
            "viridis",
            "Perceptually uniform sequential colors",
            &[
                0x440154, 0x482878, 0x3e4989, 0x31688e, 0x26828e, 0x1f9e89, 0x35b779, 0x6ece58,
                0xb5de2b, 0xfde725,
            ],
        ),
        builtin(
            "grayscale",
            "Monochrome shades for black-and-white print",
            &[0x000000, 0x404040, 0x737373, 0x969696, 0xbdbdbd],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{ColorPalette, builtin_palettes};
    use crate::core::RgbColor;

    #[test]
    fn next_color_skips_colors_in_use() {
        let palette = ColorPalette::default();
        let used = [palette.color_at(0)];
        assert_eq!(palette.next_color(&used), palette.color_at(1));

        let used = [palette.color_at(1)];
        assert_eq!(palette.next_color(&used), palette.color_at(0));
    }

    #[test]
    fn next_color_cycles_when_palette_is_exhausted() {
        let palette = ColorPalette::builtin("grayscale").expect("builtin");
        let used: Vec<RgbColor> = palette.colors().to_vec();
        assert_eq!(palette.next_color(&used), palette.color_at(0));

        let mut used = used;
        used.push(palette.color_at(0));
        assert_eq!(palette.next_color(&used), palette.color_at(1));
    }

    #[test]
    fn builtin_names_are_unique() {
        let palettes = builtin_palettes();
        for (i, palette) in palettes.iter().enumerate() {
            assert!(!palette.is_empty());
            assert!(palettes[..i].iter().all(|p| p.name() != palette.name()));
        }
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(ColorPalette::new("none", "", Vec::new()).is_err());
        assert!(serde_json::from_str::<ColorPalette>(r#"{"name":"none","colors":[]}"#).is_err());
    }
}
