use std::ops::RangeInclusive;

use tracing::warn;

use crate::error::{ChartError, ChartResult};

use super::{
    CUSTOM_DPI_RANGE, CUSTOM_DPI_STEP, CUSTOM_HEIGHT_RANGE, CUSTOM_WIDTH_RANGE,
    ExportCapabilities, ExportConfig, ExportDimensions, ExportFormat, QualityPreset,
};

/// Checks `config` and the chart's `palette` against `capabilities` and
/// resolves final dimensions.
///
/// Fails fast with `InvalidExportParameter` naming the first offending field.
pub(crate) fn validate_export_config<'a>(
    config: &ExportConfig,
    palette: &str,
    capabilities: &'a ExportCapabilities,
) -> ChartResult<(&'a QualityPreset, ExportDimensions)> {
    if capabilities.is_basic() {
        validate_basic_mode(config, capabilities)?;
    }
    if capabilities.palette(palette).is_none() {
        return Err(ChartError::InvalidExportParameter {
            field: "color_palette",
            reason: format!("palette `{palette}` is not offered by the export service"),
        });
    }

    let preset = capabilities
        .preset(&config.quality)
        .ok_or_else(|| ChartError::InvalidExportParameter {
            field: "quality",
            reason: format!("unknown quality preset `{}`", config.quality),
        })?;

    if let Some(width) = config.custom_width {
        check_range("width", width, CUSTOM_WIDTH_RANGE)?;
    }
    if let Some(height) = config.custom_height {
        check_range("height", height, CUSTOM_HEIGHT_RANGE)?;
    }
    if let Some(dpi) = config.custom_dpi {
        check_range("dpi", dpi, CUSTOM_DPI_RANGE)?;
        if dpi % CUSTOM_DPI_STEP != 0 {
            warn!(dpi, step = CUSTOM_DPI_STEP, "custom dpi is not on the recommended step");
        }
    }

    Ok((preset, config.resolve_dimensions(preset.dimensions())))
}

fn validate_basic_mode(config: &ExportConfig, capabilities: &ExportCapabilities) -> ChartResult<()> {
    const REASON: &str = "advanced export options are unavailable";
    for (field, set) in [
        ("width", config.custom_width.is_some()),
        ("height", config.custom_height.is_some()),
        ("dpi", config.custom_dpi.is_some()),
    ] {
        if set {
            return Err(ChartError::InvalidExportParameter {
                field,
                reason: REASON.to_owned(),
            });
        }
    }
    if config.format != ExportFormat::Png {
        return Err(ChartError::InvalidExportParameter {
            field: "format",
            reason: REASON.to_owned(),
        });
    }
    if config.quality != capabilities.default_preset() {
        return Err(ChartError::InvalidExportParameter {
            field: "quality",
            reason: REASON.to_owned(),
        });
    }
    Ok(())
}

fn check_range(field: &'static str, value: u32, range: RangeInclusive<u32>) -> ChartResult<()> {
    if range.contains(&value) {
        return Ok(());
    }
    Err(ChartError::InvalidExportParameter {
        field,
        reason: format!(
            "{value} is outside [{}, {}]",
            range.start(),
            range.end()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::validate_export_config;
    use crate::export::{ExportCapabilities, ExportConfig, ExportFormat};

    #[test]
    fn range_bounds_are_inclusive() {
        let capabilities = ExportCapabilities::builtin();
        let config = ExportConfig::new("web", ExportFormat::Png)
            .with_custom_width(400)
            .with_custom_height(3000)
            .with_custom_dpi(600);
        let (_, dims) = validate_export_config(&config, "default", &capabilities).expect("valid");
        assert_eq!((dims.width, dims.height, dims.dpi), (400, 3000, 600));
    }

    #[test]
    fn off_step_dpi_is_accepted() {
        let capabilities = ExportCapabilities::builtin();
        let config = ExportConfig::new("web", ExportFormat::Svg).with_custom_dpi(175);
        let (_, dims) = validate_export_config(&config, "default", &capabilities).expect("valid");
        assert_eq!(dims.dpi, 175);
    }

    #[test]
    fn basic_mode_only_accepts_quick_export() {
        let capabilities = ExportCapabilities::basic();
        assert!(validate_export_config(&ExportConfig::quick(), "default", &capabilities).is_ok());

        let err = validate_export_config(
            &ExportConfig::quick().with_custom_width(1200),
            "default",
            &capabilities,
        )
        .expect_err("custom width is advanced");
        assert_eq!(err.export_field(), Some("width"));

        let err = validate_export_config(
            &ExportConfig::new("web", ExportFormat::Pdf),
            "default",
            &capabilities,
        )
        .expect_err("pdf is advanced");
        assert_eq!(err.export_field(), Some("format"));
    }

    #[test]
    fn palette_must_be_offered() {
        let capabilities = ExportCapabilities::builtin();
        assert!(validate_export_config(&ExportConfig::quick(), "viridis", &capabilities).is_ok());

        let err = validate_export_config(&ExportConfig::quick(), "neon", &capabilities)
            .expect_err("unknown palette");
        assert_eq!(err.export_field(), Some("color_palette"));
    }
}
