use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::config::SheetConfig;
use crate::error::{DashboardError, Result};

use super::model::{normalize_column_name, CellValue, Record, RecordTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a contact table from a local file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, one contact per row
/// * `.json` – records-oriented array: `[{ "col": value, ... }, ...]`
pub fn load_file(path: &Path) -> Result<RecordTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(DashboardError::Parse(format!(
            "unsupported file extension: .{other}"
        ))),
    }
}

/// Fetch the contact sheet from the remote values endpoint.
///
/// One blocking request, no retries: any transport, HTTP-status, or
/// credential failure comes back as [`DashboardError::Connection`] with the
/// underlying detail preserved, and the render cycle stops there.
pub fn fetch_sheet(config: &SheetConfig) -> Result<RecordTable> {
    fetch_values(config).map_err(|e| DashboardError::Connection(format!("{e:#}")))
}

// ---------------------------------------------------------------------------
// Remote sheet
// ---------------------------------------------------------------------------

/// Shape of the values endpoint payload: a row matrix, first row = headers.
/// `values` is absent entirely when the requested range is empty.
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

fn fetch_values(config: &SheetConfig) -> anyhow::Result<RecordTable> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")?;

    let response = client
        .get(config.values_url())
        .send()
        .context("requesting sheet values")?
        .error_for_status()
        .context("sheet values request rejected")?;

    let payload: ValuesResponse = response.json().context("decoding sheet values payload")?;
    Ok(table_from_values(&payload.values))
}

/// Build a [`RecordTable`] from a spreadsheet row matrix.
///
/// The first row supplies the column names (normalized; blank headers are
/// dropped). Data rows may be ragged — short rows simply leave their trailing
/// cells absent from the record, which the filter engine treats as
/// malformed-row territory.
pub fn table_from_values(values: &[Vec<JsonValue>]) -> RecordTable {
    let Some((header_row, data_rows)) = values.split_first() else {
        return RecordTable::default();
    };

    // (cell index, normalized name) for every non-blank header
    let columns: Vec<(usize, String)> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| (i, normalize_column_name(&json_cell_text(cell))))
        .filter(|(_, name)| !name.is_empty())
        .collect();

    let records = data_rows
        .iter()
        .map(|row| {
            let mut rec = Record::default();
            for (idx, name) in &columns {
                if let Some(cell) = row.get(*idx) {
                    rec.fields.insert(name.clone(), json_to_cell(cell));
                }
            }
            rec
        })
        .collect();

    let column_names = columns.into_iter().map(|(_, name)| name).collect();
    RecordTable::new(column_names, records)
}

fn json_cell_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        // The values endpoint serves formatted cells as strings; re-guess the
        // scalar type the same way the CSV loader does.
        JsonValue::String(s) => CellValue::parse(s),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<RecordTable> {
    csv_table(path).map_err(|e| DashboardError::Parse(format!("{e:#}")))
}

fn csv_table(path: &Path) -> anyhow::Result<RecordTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .context("opening CSV")?;

    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(normalize_column_name)
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut rec = Record::default();
        for (col_idx, name) in headers.iter().enumerate() {
            if name.is_empty() {
                continue;
            }
            // Short rows leave trailing cells absent, mirroring ragged
            // spreadsheet exports.
            if let Some(value) = row.get(col_idx) {
                rec.fields.insert(name.clone(), CellValue::parse(value));
            }
        }
        records.push(rec);
    }

    let column_names = headers.into_iter().filter(|h| !h.is_empty()).collect();
    Ok(RecordTable::new(column_names, records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "Sector o industria": "Tech", "Ciudad y país": "Lima, Perú" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<RecordTable> {
    json_table(path).map_err(|e| DashboardError::Parse(format!("{e:#}")))
}

fn json_table(path: &Path) -> anyhow::Result<RecordTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("expected top-level JSON array")?;

    // Column order: first-seen order across records.
    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("row {i} is not a JSON object"))?;

        let mut rec = Record::default();
        for (key, val) in obj {
            let name = normalize_column_name(key);
            if name.is_empty() {
                continue;
            }
            if !column_names.contains(&name) {
                column_names.push(name.clone());
            }
            rec.fields.insert(name, json_to_cell(val));
        }
        records.push(rec);
    }

    Ok(RecordTable::new(column_names, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn values_matrix_becomes_table() {
        let values = vec![
            vec![json!("Sector o industria "), json!("Ciudad y país")],
            vec![json!("Tech"), json!("Lima")],
            vec![json!("Retail"), json!("Bogotá")],
        ];
        let table = table_from_values(&values);

        // trailing-space header normalized away
        assert_eq!(
            table.column_names,
            vec!["Sector o industria", "Ciudad y país"]
        );
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.records[0].get("Sector o industria"),
            Some(&CellValue::String("Tech".to_string()))
        );
    }

    #[test]
    fn ragged_rows_leave_cells_absent() {
        let values = vec![
            vec![json!("sector"), json!("city")],
            vec![json!("Tech")], // short row, no city cell
        ];
        let table = table_from_values(&values);
        assert_eq!(table.records[0].get("city"), None);
    }

    #[test]
    fn blank_headers_are_dropped() {
        let values = vec![
            vec![json!("sector"), json!("  "), json!("city")],
            vec![json!("Tech"), json!("junk"), json!("Lima")],
        ];
        let table = table_from_values(&values);
        assert_eq!(table.column_names, vec!["sector", "city"]);
        assert_eq!(
            table.records[0].get("city"),
            Some(&CellValue::String("Lima".to_string()))
        );
    }

    #[test]
    fn empty_payload_is_an_empty_table() {
        let table = table_from_values(&[]);
        assert!(table.is_empty());
        assert!(table.column_names.is_empty());
    }

    #[test]
    fn sheet_cells_are_type_guessed() {
        assert_eq!(json_to_cell(&json!("12")), CellValue::Integer(12));
        assert_eq!(json_to_cell(&json!(2.5)), CellValue::Float(2.5));
        assert_eq!(json_to_cell(&json!("")), CellValue::Null);
        assert_eq!(json_to_cell(&json!(null)), CellValue::Null);
    }

    #[test]
    fn unsupported_extension_is_a_parse_error() {
        let err = load_file(Path::new("contacts.parquet")).unwrap_err();
        assert!(matches!(err, DashboardError::Parse(_)));
    }

    #[test]
    fn csv_fixture_loads_with_normalized_headers() {
        let table = load_file(Path::new("testdata/contacts.csv")).unwrap();
        assert!(table.has_column("Sector o industria"));
        assert!(table.has_column("Ciudad y país"));
        assert!(table.len() >= 10);
    }
}
