//! End-to-end pipeline tests: load the fixture export, filter it, aggregate
//! it, and serialize the filtered view — the whole dashboard flow without
//! the UI shell.

use std::collections::BTreeSet;
use std::path::Path;

use serde_json::json;

use contact_dash::data::export::write_csv;
use contact_dash::data::filter::{
    aggregate_by, apply_filters, summary_metrics, ConstraintSet, UNSPECIFIED_BUCKET,
};
use contact_dash::data::loader::{load_file, table_from_values};
use contact_dash::data::model::CellValue;
use contact_dash::data::schema::DashboardSchema;

const SECTOR: &str = "Sector o industria";
const CITY: &str = "Ciudad y país";
const INTEREST: &str = "Nivel de interés en recibir más información";

fn fixture() -> contact_dash::data::model::RecordTable {
    load_file(Path::new("testdata/contacts.csv")).expect("fixture should load")
}

fn constraint(column: &str, values: &[&str]) -> ConstraintSet {
    let mut c = ConstraintSet::new();
    c.insert(
        column.to_string(),
        values
            .iter()
            .map(|v| CellValue::String(v.to_string()))
            .collect::<BTreeSet<_>>(),
    );
    c
}

#[test]
fn fixture_matches_default_schema() {
    let table = fixture();
    assert_eq!(table.len(), 12);
    // The fixture ships the messy trailing-space sector header; after
    // normalization the default schema lines up with it exactly.
    DashboardSchema::default()
        .validate(&table)
        .expect("normalized fixture should satisfy the declared schema");
}

#[test]
fn unfiltered_view_is_the_whole_table() {
    let table = fixture();
    let view = apply_filters(&table, &ConstraintSet::new()).unwrap();
    assert_eq!(view.len(), table.len());
    assert_eq!(view, (0..table.len()).collect::<Vec<_>>());
}

#[test]
fn sector_filter_then_city_aggregate() {
    let table = fixture();
    let view = apply_filters(&table, &constraint(SECTOR, &["Tecnología"])).unwrap();
    assert_eq!(view.len(), 4);

    let agg = aggregate_by(&table, &view, CITY).unwrap();
    assert_eq!(agg.total, 4);
    assert_eq!(agg.counts["Lima, Perú"], 2);
    assert_eq!(agg.counts["Bogotá, Colombia"], 1);
    assert_eq!(agg.counts["Ciudad de México, México"], 1);
}

#[test]
fn stacked_constraints_narrow_monotonically() {
    let table = fixture();

    let by_city = apply_filters(&table, &constraint(CITY, &["Lima, Perú"])).unwrap();
    assert_eq!(by_city.len(), 4);

    let mut both = constraint(CITY, &["Lima, Perú"]);
    both.extend(constraint(SECTOR, &["Tecnología"]));
    let narrowed = apply_filters(&table, &both).unwrap();
    assert_eq!(narrowed.len(), 2);
    assert!(narrowed.len() <= by_city.len());
}

#[test]
fn interest_aggregate_accounts_for_every_row() {
    let table = fixture();
    let view = apply_filters(&table, &ConstraintSet::new()).unwrap();
    let agg = aggregate_by(&table, &view, INTEREST).unwrap();

    assert_eq!(agg.counts["Alto"], 4);
    assert_eq!(agg.counts["Medio"], 3);
    assert_eq!(agg.counts["Bajo"], 2);
    // two empty cells plus the ragged last row
    assert_eq!(agg.counts[UNSPECIFIED_BUCKET], 3);
    assert_eq!(agg.counts.values().sum::<usize>(), view.len());
}

#[test]
fn ragged_row_never_matches_an_active_city_filter() {
    let table = fixture();
    // The last fixture row has no city cell at all; a city filter that
    // accepts every city still excludes it.
    let every_city: Vec<String> = table.unique_values[CITY]
        .iter()
        .map(|v| v.to_string())
        .collect();
    let refs: Vec<&str> = every_city.iter().map(String::as_str).collect();
    let view = apply_filters(&table, &constraint(CITY, &refs)).unwrap();
    assert_eq!(view.len(), table.len() - 1);
}

#[test]
fn metrics_over_filtered_view() {
    let table = fixture();
    let view = apply_filters(&table, &constraint(SECTOR, &["Tecnología"])).unwrap();
    let metrics =
        summary_metrics(&table, &view, &[SECTOR.to_string(), CITY.to_string()]).unwrap();

    assert_eq!(metrics.total_rows, 4);
    assert_eq!(metrics.distinct[SECTOR], 1);
    assert_eq!(metrics.distinct[CITY], 3);
}

#[test]
fn filtered_view_exports_as_csv() {
    let table = fixture();
    let view = apply_filters(&table, &constraint(SECTOR, &["Retail"])).unwrap();

    let mut out = Vec::new();
    write_csv(&table, &view, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    // header + one line per filtered record
    assert_eq!(lines.len(), 1 + view.len());
    assert!(lines[0].starts_with("Nombre completo,"));
    // normalized header, no trailing space
    assert!(lines[0].contains("Sector o industria,"));
    assert!(lines[1].contains("Retail"));
}

#[test]
fn trailing_space_header_changes_nothing() {
    // Two sheet payloads identical except for a trailing space in one header
    // must yield identical filter and aggregate results.
    let clean = vec![
        vec![json!("Sector o industria"), json!("Ciudad y país")],
        vec![json!("Tech"), json!("Lima")],
        vec![json!("Retail"), json!("Lima")],
    ];
    let messy = vec![
        vec![json!("Sector o industria"), json!("Ciudad y país ")],
        vec![json!("Tech"), json!("Lima")],
        vec![json!("Retail"), json!("Lima")],
    ];

    let table_a = table_from_values(&clean);
    let table_b = table_from_values(&messy);
    assert_eq!(table_a.column_names, table_b.column_names);

    let c = constraint("Sector o industria", &["Tech"]);
    let view_a = apply_filters(&table_a, &c).unwrap();
    let view_b = apply_filters(&table_b, &c).unwrap();
    assert_eq!(view_a, view_b);

    let agg_a = aggregate_by(&table_a, &view_a, "Ciudad y país").unwrap();
    let agg_b = aggregate_by(&table_b, &view_b, "Ciudad y país").unwrap();
    assert_eq!(agg_a, agg_b);
}
