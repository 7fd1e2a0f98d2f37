use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a record
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it comes out of a spreadsheet export.
/// Using `BTreeMap` / `BTreeSet` downstream so `CellValue` must be `Ord`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// Explicitly empty cell (distinct from a cell absent from the row).
    Null,
}

// -- Manual Eq/Ord so we can put CellValue in BTreeSet --

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::String(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Parse a raw spreadsheet cell into the narrowest matching type.
    /// Whitespace-only cells become `Null`.
    pub fn parse(raw: &str) -> CellValue {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::String(s.to_string())
    }

    /// Whether this cell counts as "missing" for aggregation purposes.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Column-name normalization
// ---------------------------------------------------------------------------

/// Canonicalize a column header: strip surrounding whitespace and collapse
/// embedded newlines/whitespace runs to single spaces.
///
/// The source sheets ship otherwise-identical exports where the same column
/// appears as `"Ciudad y país"` in one and `"Ciudad y país "` in another;
/// every loader runs headers through this before the filter engine sees them.
pub fn normalize_column_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Record – one row of the contact table
// ---------------------------------------------------------------------------

/// A single contact record (one row of the source sheet).
/// A column absent from `fields` means the source row was ragged for that
/// column, which is not the same as an explicit empty cell.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }
}

// ---------------------------------------------------------------------------
// RecordTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full loaded table with pre-computed column indices.
#[derive(Debug, Clone, Default)]
pub struct RecordTable {
    /// All records (rows), in source order.
    pub records: Vec<Record>,
    /// Ordered list of (normalized) column names, fixed at load time.
    pub column_names: Vec<String>,
    /// For each column the sorted set of unique values present.
    pub unique_values: BTreeMap<String, BTreeSet<CellValue>>,
}

impl RecordTable {
    /// Build the unique-value index from loaded records. `column_names` must
    /// already be normalized (loaders own that step).
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<CellValue>> = column_names
            .iter()
            .map(|c| (c.clone(), BTreeSet::new()))
            .collect();

        for rec in &records {
            for (col, val) in &rec.fields {
                unique_values
                    .entry(col.clone())
                    .or_default()
                    .insert(val.clone());
            }
        }
        RecordTable {
            records,
            column_names,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the table carries the given (normalized) column.
    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }
}
