use scientiflow::api::{ChartSession, DatasetBindingPolicy, RecomputePolicy, SessionConfig};
use scientiflow::core::ChartType;
use scientiflow::export::{ExportConfig, ExportFormat};

#[test]
fn config_round_trips_through_json() {
    let config = SessionConfig::new()
        .with_chart_type(ChartType::Line)
        .with_palette("viridis")
        .with_recompute_policy(RecomputePolicy::Deferred)
        .with_dataset_binding_policy(DatasetBindingPolicy::RetainValid)
        .with_export(ExportConfig::new("poster", ExportFormat::Pdf).with_custom_dpi(300));

    let json = config.to_json_pretty().expect("serialize");
    let parsed = SessionConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn missing_fields_take_defaults() {
    let parsed = SessionConfig::from_json_str(r#"{"chart_type": "bar"}"#).expect("parse");
    assert_eq!(parsed.chart_type, ChartType::Bar);
    assert_eq!(parsed.palette, "default");
    assert_eq!(parsed.recompute_policy, RecomputePolicy::Eager);
    assert_eq!(parsed.dataset_binding_policy, DatasetBindingPolicy::Reset);
    assert_eq!(parsed.export, ExportConfig::quick());
}

#[test]
fn unknown_palette_fails_session_construction() {
    let config = SessionConfig::new().with_palette("neon");
    assert!(config.resolve_palette().is_err());
    assert!(ChartSession::new(config).is_err());
}

#[test]
fn malformed_json_is_invalid_data() {
    let err = SessionConfig::from_json_str("{").expect_err("malformed");
    assert!(err.to_string().starts_with("invalid data"));
}
