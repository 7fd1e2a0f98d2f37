use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DashboardError, Result};

use super::model::{CellValue, RecordTable};

// ---------------------------------------------------------------------------
// Constraint set: which values are accepted per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column_name → set of accepted values.
/// A column that is absent, or present with an empty set, imposes no
/// constraint (everything passes). Constraints AND across columns and OR
/// within a column's accepted set.
pub type ConstraintSet = BTreeMap<String, BTreeSet<CellValue>>;

/// Bucket label for rows whose cell is empty or absent in an aggregation.
pub const UNSPECIFIED_BUCKET: &str = "(unspecified)";

// ---------------------------------------------------------------------------
// apply_filters
// ---------------------------------------------------------------------------

/// Return indices of records that satisfy every active constraint.
///
/// A record passes a column constraint when:
/// * the accepted set for that column is empty → passes (no constraint)
/// * the record's value for that column is in the accepted set → passes
/// * the record has no value for that column → fails (malformed rows never
///   match an active constraint)
///
/// Constraining a column the table does not have is schema drift and reported
/// as [`DashboardError::UnknownColumn`] rather than silently matching nothing.
pub fn apply_filters(table: &RecordTable, constraints: &ConstraintSet) -> Result<Vec<usize>> {
    for (col, accepted) in constraints {
        if !accepted.is_empty() && !table.has_column(col) {
            return Err(DashboardError::UnknownColumn(col.clone()));
        }
    }

    Ok(table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            constraints.iter().all(|(col, accepted)| {
                if accepted.is_empty() {
                    return true;
                }
                match rec.get(col) {
                    Some(val) => accepted.contains(val),
                    None => false,
                }
            })
        })
        .map(|(i, _)| i)
        .collect())
}

// ---------------------------------------------------------------------------
// aggregate_by
// ---------------------------------------------------------------------------

/// Value→count grouping of a filtered view over one column.
/// No ordering is baked in; chart code sorts as it sees fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub column: String,
    /// Bucket label → number of rows. Empty/absent cells land under
    /// [`UNSPECIFIED_BUCKET`] so every row is accounted for.
    pub counts: BTreeMap<String, usize>,
    /// Total number of rows in the view (equals the sum over `counts`).
    pub total: usize,
}

/// Group the filtered view (given as row indices into `table`) by the value
/// of `column`. Requesting a column the table does not carry is an
/// [`DashboardError::UnknownColumn`] — an empty aggregate would mask a
/// caller/config bug.
pub fn aggregate_by(table: &RecordTable, indices: &[usize], column: &str) -> Result<Aggregate> {
    if !table.has_column(column) {
        return Err(DashboardError::UnknownColumn(column.to_string()));
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for &idx in indices {
        let label = match table.records[idx].get(column) {
            Some(val) if !val.is_missing() => val.to_string(),
            _ => UNSPECIFIED_BUCKET.to_string(),
        };
        *counts.entry(label).or_insert(0) += 1;
    }

    Ok(Aggregate {
        column: column.to_string(),
        counts,
        total: indices.len(),
    })
}

// ---------------------------------------------------------------------------
// summary_metrics
// ---------------------------------------------------------------------------

/// Headline numbers for the metrics strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metrics {
    /// Rows in the filtered view.
    pub total_rows: usize,
    /// Column → count of distinct non-missing values in the view.
    pub distinct: BTreeMap<String, usize>,
}

/// Total row count plus distinct non-missing value counts for the named
/// columns, over the filtered view.
pub fn summary_metrics(
    table: &RecordTable,
    indices: &[usize],
    columns: &[String],
) -> Result<Metrics> {
    let mut distinct = BTreeMap::new();
    for col in columns {
        if !table.has_column(col) {
            return Err(DashboardError::UnknownColumn(col.clone()));
        }
        let values: BTreeSet<&CellValue> = indices
            .iter()
            .filter_map(|&idx| table.records[idx].get(col))
            .filter(|v| !v.is_missing())
            .collect();
        distinct.insert(col.clone(), values.len());
    }
    Ok(Metrics {
        total_rows: indices.len(),
        distinct,
    })
}
