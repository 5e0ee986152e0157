use criterion::{Criterion, criterion_group, criterion_main};
use scientiflow::api::{AxisBinding, ChartGenerationPayload, build_chart_specification};
use scientiflow::core::{CellValue, ChartType, ColorPalette, ColumnCatalog, Row, row_from_pairs};
use scientiflow::ingest::parse_upload;
use std::hint::black_box;

const SERIES_COLUMNS: [&str; 4] = ["a", "b", "c", "d"];

fn generated_rows(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            row_from_pairs([
                ("t", CellValue::Number(t)),
                ("a", CellValue::Number((t * 0.01).sin())),
                ("b", CellValue::Number((t * 0.01).cos())),
                ("c", CellValue::Number(t * 0.5)),
                ("d", CellValue::Number(100.0 - t * 0.25)),
            ])
        })
        .collect()
}

fn bound_binding(palette: &ColorPalette) -> AxisBinding {
    let catalog = ColumnCatalog::new(
        std::iter::once("t")
            .chain(SERIES_COLUMNS)
            .map(str::to_owned)
            .collect(),
    )
    .expect("valid catalog");
    let mut binding = AxisBinding::new();
    binding.set_x(&catalog, "t").expect("bind x");
    for column in SERIES_COLUMNS {
        binding
            .add_series(&catalog, column, None, palette)
            .expect("bind series");
    }
    binding
}

fn bench_build_specification_10k(c: &mut Criterion) {
    let rows = generated_rows(10_000);
    let palette = ColorPalette::default();
    let binding = bound_binding(&palette);

    c.bench_function("build_specification_10k_rows_4_series", |b| {
        b.iter(|| {
            let spec = build_chart_specification(
                black_box(&rows),
                black_box(&binding),
                ChartType::Line,
                &palette,
            );
            black_box(spec.series_len());
        })
    });
}

fn bench_generation_payload_10k(c: &mut Criterion) {
    let rows = generated_rows(10_000);
    let palette = ColorPalette::default();
    let binding = bound_binding(&palette);
    let spec = build_chart_specification(&rows, &binding, ChartType::Bar, &palette);

    c.bench_function("generation_payload_10k_rows", |b| {
        b.iter(|| {
            let payload = ChartGenerationPayload::from_specification(black_box(&spec));
            black_box(payload.rows.len());
        })
    });
}

fn bench_parse_csv_10k(c: &mut Criterion) {
    let mut csv = String::from("t,a,b,c,d\n");
    for i in 0..10_000 {
        let t = f64::from(i);
        csv.push_str(&format!("{t},{},{},{},{}\n", t * 0.1, t * 0.2, t * 0.3, t * 0.4));
    }
    let bytes = csv.into_bytes();

    c.bench_function("parse_csv_upload_10k_rows", |b| {
        b.iter(|| {
            let dataset = parse_upload("bench.csv", black_box(&bytes)).expect("valid csv");
            black_box(dataset.row_count());
        })
    });
}

criterion_group!(
    benches,
    bench_build_specification_10k,
    bench_generation_payload_10k,
    bench_parse_csv_10k
);
criterion_main!(benches);
