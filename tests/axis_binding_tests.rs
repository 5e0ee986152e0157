use scientiflow::ChartError;
use scientiflow::api::{AxisBinding, AxisRole};
use scientiflow::core::{ColorPalette, ColumnCatalog, RgbColor};

fn catalog(names: &[&str]) -> ColumnCatalog {
    ColumnCatalog::new(names.iter().map(|name| (*name).to_owned()).collect()).expect("catalog")
}

#[test]
fn set_x_rejects_column_outside_catalog() {
    let catalog = catalog(&["t", "a"]);
    let mut binding = AxisBinding::new();
    let err = binding.set_x(&catalog, "missing").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidColumn { ref column, .. } if column == "missing"));
    assert_eq!(binding, AxisBinding::new());
}

#[test]
fn set_x_moves_a_series_column_to_x() {
    let catalog = catalog(&["t", "a", "b"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding.add_series(&catalog, "a", None, &palette).expect("a");
    binding.add_series(&catalog, "b", None, &palette).expect("b");

    binding.set_x(&catalog, "a").expect("move a to x");

    assert_eq!(binding.x_column(), Some("a"));
    assert_eq!(binding.series_len(), 1);
    assert_eq!(binding.series()[0].column, "b");
    assert_eq!(binding.role_of("a"), Some(AxisRole::X));
}

#[test]
fn add_series_rejects_duplicates_of_x_and_series() {
    let catalog = catalog(&["t", "a"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding.set_x(&catalog, "t").expect("x");
    binding.add_series(&catalog, "a", None, &palette).expect("a");
    let before = binding.clone();

    let err = binding
        .add_series(&catalog, "t", None, &palette)
        .expect_err("x column must fail");
    assert_eq!(
        err,
        ChartError::DuplicateBinding {
            column: "t".to_owned(),
            role: AxisRole::X,
        }
    );

    let err = binding
        .add_series(&catalog, "a", None, &palette)
        .expect_err("series column must fail");
    assert_eq!(
        err,
        ChartError::DuplicateBinding {
            column: "a".to_owned(),
            role: AxisRole::Y,
        }
    );
    assert_eq!(binding, before);
}

#[test]
fn add_series_defaults_label_and_assigns_palette_colors_in_order() {
    let catalog = catalog(&["t", "a", "b", "c"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();

    assert_eq!(binding.add_series(&catalog, "a", None, &palette).expect("a"), 0);
    let custom = RgbColor::new(1, 2, 3);
    assert_eq!(
        binding
            .add_series(&catalog, "b", Some(custom), &palette)
            .expect("b"),
        1
    );
    binding.add_series(&catalog, "c", None, &palette).expect("c");

    let series = binding.series();
    assert_eq!(series[0].label, "a");
    assert_eq!(series[0].color, palette.color_at(0));
    assert_eq!(series[1].color, custom);
    assert_eq!(series[2].color, palette.color_at(1));
}

#[test]
fn auto_colors_cycle_past_palette_length() {
    let names: Vec<String> = (0..7).map(|i| format!("c{i}")).collect();
    let catalog = ColumnCatalog::new(names.clone()).expect("catalog");
    let palette = ColorPalette::builtin("grayscale").expect("grayscale");
    let mut binding = AxisBinding::new();
    for name in &names {
        binding.add_series(&catalog, name, None, &palette).expect("add");
    }
    let colors: Vec<RgbColor> = binding.series().iter().map(|s| s.color).collect();
    assert_eq!(colors[5], palette.color_at(0));
    assert_eq!(colors[6], palette.color_at(1));
}

#[test]
fn remove_series_keeps_relative_order() {
    let catalog = catalog(&["a", "b", "c"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    for name in ["a", "b", "c"] {
        binding.add_series(&catalog, name, None, &palette).expect("add");
    }

    let removed = binding.remove_series(1).expect("remove");
    assert_eq!(removed.column, "b");
    let columns: Vec<&str> = binding.series().iter().map(|s| s.column.as_str()).collect();
    assert_eq!(columns, vec!["a", "c"]);

    let err = binding.remove_series(2).expect_err("out of range");
    assert_eq!(err, ChartError::IndexOutOfRange { index: 2, len: 2 });
}

#[test]
fn reassign_resets_default_label() {
    let catalog = catalog(&["temp", "pressure"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding
        .add_series(&catalog, "temp", None, &palette)
        .expect("temp");
    let color = binding.series()[0].color;

    binding
        .reassign_series(&catalog, 0, "pressure")
        .expect("reassign");

    assert_eq!(binding.series()[0].column, "pressure");
    assert_eq!(binding.series()[0].label, "pressure");
    assert_eq!(binding.series()[0].color, color);
}

#[test]
fn reassign_preserves_custom_label() {
    let catalog = catalog(&["temp", "pressure"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding
        .add_series(&catalog, "temp", None, &palette)
        .expect("temp");
    binding.relabel_series(0, "Core Temp").expect("relabel");

    binding
        .reassign_series(&catalog, 0, "pressure")
        .expect("reassign");

    assert_eq!(binding.series()[0].column, "pressure");
    assert_eq!(binding.series()[0].label, "Core Temp");
}

#[test]
fn reassign_rejects_column_bound_elsewhere() {
    let catalog = catalog(&["t", "a", "b"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding.set_x(&catalog, "t").expect("x");
    binding.add_series(&catalog, "a", None, &palette).expect("a");
    binding.add_series(&catalog, "b", None, &palette).expect("b");
    let before = binding.clone();

    assert!(matches!(
        binding.reassign_series(&catalog, 0, "t"),
        Err(ChartError::DuplicateBinding { role: AxisRole::X, .. })
    ));
    assert!(matches!(
        binding.reassign_series(&catalog, 0, "b"),
        Err(ChartError::DuplicateBinding { role: AxisRole::Y, .. })
    ));
    assert!(matches!(
        binding.reassign_series(&catalog, 5, "a"),
        Err(ChartError::IndexOutOfRange { index: 5, len: 2 })
    ));
    assert_eq!(binding, before);

    binding
        .reassign_series(&catalog, 0, "a")
        .expect("reassigning to own column is a no-op");
    assert_eq!(binding, before);
}

#[test]
fn relabel_and_recolor_validate_only_the_index() {
    let catalog = catalog(&["a"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding.add_series(&catalog, "a", None, &palette).expect("a");

    binding.relabel_series(0, "").expect("empty label is allowed");
    assert_eq!(binding.series()[0].display_label(), "a");
    binding
        .recolor_series(0, RgbColor::new(9, 9, 9))
        .expect("recolor");
    assert_eq!(binding.series()[0].color, RgbColor::new(9, 9, 9));

    assert!(binding.relabel_series(1, "x").is_err());
    assert!(binding.recolor_series(1, RgbColor::new(0, 0, 0)).is_err());
}

#[test]
fn available_columns_for_keeps_own_column() {
    let catalog = catalog(&["t", "a", "b", "c"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding.set_x(&catalog, "t").expect("x");
    binding.add_series(&catalog, "a", None, &palette).expect("a");
    binding.add_series(&catalog, "b", None, &palette).expect("b");

    assert_eq!(
        binding.available_columns_for(&catalog, 0).expect("choices"),
        vec!["a".to_owned(), "c".to_owned()]
    );
    assert_eq!(
        binding.available_columns_for(&catalog, 1).expect("choices"),
        vec!["b".to_owned(), "c".to_owned()]
    );
    assert!(binding.available_columns_for(&catalog, 2).is_err());

    binding.set_x(&catalog, "c").expect("live state change");
    assert_eq!(
        binding.available_columns_for(&catalog, 0).expect("choices"),
        vec!["t".to_owned(), "a".to_owned()]
    );
}

#[test]
fn add_next_series_takes_first_unbound_column() {
    let catalog = catalog(&["t", "a", "b"]);
    let palette = ColorPalette::default();
    let mut binding = AxisBinding::new();
    binding.set_x(&catalog, "t").expect("x");

    assert_eq!(binding.add_next_series(&catalog, &palette).expect("next"), Some(0));
    assert_eq!(binding.add_next_series(&catalog, &palette).expect("next"), Some(1));
    assert_eq!(binding.add_next_series(&catalog, &palette).expect("next"), None);

    let columns: Vec<&str> = binding.series().iter().map(|s| s.column.as_str()).collect();
    assert_eq!(columns, vec!["a", "b"]);
    assert!(binding.available_columns_for_new_series(&catalog).is_empty());
}
