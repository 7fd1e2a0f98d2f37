use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::RecordTable;

// ---------------------------------------------------------------------------
// CSV export of the filtered view
// ---------------------------------------------------------------------------

/// Serialize the filtered view (row indices into `table`) as UTF-8 CSV.
///
/// Header row = column names; one row per record in view order. Cells absent
/// from a record come out as empty fields. The `csv` writer applies standard
/// quoting for values containing the delimiter.
pub fn write_csv<W: Write>(table: &RecordTable, indices: &[usize], writer: W) -> Result<()> {
    let mut w = csv::Writer::from_writer(writer);

    w.write_record(&table.column_names)
        .context("writing CSV header")?;

    for &idx in indices {
        let rec = &table.records[idx];
        let row: Vec<String> = table
            .column_names
            .iter()
            .map(|col| rec.get(col).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        w.write_record(&row)
            .with_context(|| format!("writing CSV row for record {idx}"))?;
    }

    w.flush().context("flushing CSV output")?;
    Ok(())
}

/// Write the filtered view to a file (used by the save dialog).
pub fn export_to_path(table: &RecordTable, indices: &[usize], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, indices, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Record};

    fn table() -> RecordTable {
        RecordTable::new(
            vec!["sector".to_string(), "city".to_string()],
            vec![
                Record {
                    fields: [
                        ("sector".to_string(), CellValue::String("Tech".to_string())),
                        ("city".to_string(), CellValue::String("Lima, Perú".to_string())),
                    ]
                    .into_iter()
                    .collect(),
                },
                Record {
                    // ragged: no city cell
                    fields: [("sector".to_string(), CellValue::String("Retail".to_string()))]
                        .into_iter()
                        .collect(),
                },
            ],
        )
    }

    #[test]
    fn header_then_rows_in_view_order() {
        let table = table();
        let mut out = Vec::new();
        write_csv(&table, &[1, 0], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("sector,city"));
        assert_eq!(lines.next(), Some("Retail,"));
        // embedded delimiter gets standard CSV quoting
        assert_eq!(lines.next(), Some("Tech,\"Lima, Perú\""));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_view_exports_header_only() {
        let table = table();
        let mut out = Vec::new();
        write_csv(&table, &[], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "sector,city\n");
    }
}
