use scientiflow::api::{
    AxisBinding, AxisTitleOverrides, CHART_SPECIFICATION_JSON_SCHEMA_V1, ChartGenerationPayload,
    ChartSpecification, build_chart_specification,
};
use scientiflow::core::{ChartType, ColorPalette, ColumnCatalog, RgbColor, row_from_pairs};

fn specification() -> ChartSpecification {
    let catalog = ColumnCatalog::new(vec!["t".to_owned(), "a".to_owned(), "b".to_owned()])
        .expect("catalog");
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding.set_x(&catalog, "t").expect("x");
    binding.add_series(&catalog, "a", None, &palette).expect("a");
    binding
        .add_series(&catalog, "b", Some(RgbColor::new(0x12, 0x34, 0x56)), &palette)
        .expect("b");
    let rows = vec![
        row_from_pairs([("t", 0.0), ("a", 1.0), ("b", 2.0)]),
        row_from_pairs([("t", 1.0), ("a", 3.0), ("b", 4.0)]),
    ];
    build_chart_specification(&rows, &binding, ChartType::Bar, &palette)
}

#[test]
fn contract_v1_round_trips_through_compat_parser() {
    let spec = specification();
    let json = spec.to_json_contract_v1_pretty().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(
        value["schema_version"],
        serde_json::json!(CHART_SPECIFICATION_JSON_SCHEMA_V1)
    );

    let parsed = ChartSpecification::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, spec);

    let bare = spec.to_json_pretty().expect("serialize bare");
    let parsed = ChartSpecification::from_json_compat_str(&bare).expect("parse bare");
    assert_eq!(parsed, spec);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let json = spec_with_version(99);
    let err = ChartSpecification::from_json_compat_str(&json).expect_err("version");
    assert!(err.to_string().contains("unsupported specification schema version"));
}

fn spec_with_version(version: u32) -> String {
    let mut value: serde_json::Value =
        serde_json::from_str(&specification().to_json_contract_v1_pretty().expect("json"))
            .expect("value");
    value["schema_version"] = serde_json::json!(version);
    value.to_string()
}

#[test]
fn specification_json_uses_hex_colors_and_tagged_hints() {
    let spec = specification();
    let value: serde_json::Value =
        serde_json::from_str(&spec.to_json_pretty().expect("json")).expect("value");

    assert_eq!(value["chart_type"], "bar");
    assert_eq!(value["series"][1]["style"]["color"], "#123456");
    assert_eq!(value["series"][0]["style"]["hint"]["mode"], "bars");
    assert_eq!(value["layout"]["bar_grouping"], "group");
}

#[test]
fn generated_specification_takes_user_titles() {
    let json = specification().to_json_pretty().expect("json");
    let titles = AxisTitleOverrides::new(Some("Seconds".to_owned()), None);
    let spec = ChartSpecification::from_generated_json(&json, &titles).expect("parse");
    assert_eq!(spec.layout.axis_titles.x, "Seconds");
    assert_eq!(spec.layout.axis_titles.y, "a, b");
}

#[test]
fn payload_from_specification_restores_bound_rows() {
    let payload = ChartGenerationPayload::from_specification(&specification());
    assert_eq!(payload.rows.len(), 2);
    assert_eq!(
        payload.rows[1].keys().collect::<Vec<_>>(),
        vec!["t", "a", "b"]
    );
    assert_eq!(payload.series[1].color, RgbColor::new(0x12, 0x34, 0x56));

    let value: serde_json::Value =
        serde_json::from_str(&payload.to_json().expect("json")).expect("value");
    assert_eq!(value["xColumn"], "t");
    assert_eq!(value["chartType"], "bar");
    assert_eq!(value["rows"][0]["b"], 2.0);
    assert_eq!(value["series"][0]["name"], "a");
}
