use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

use super::model::{normalize_column_name, RecordTable};

// ---------------------------------------------------------------------------
// Declared dashboard schema
// ---------------------------------------------------------------------------

/// How a column's aggregate is visualized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Vertical bar chart, buckets sorted descending by count.
    Bar,
    /// Share-of-total view (rendered as proportion bars with percentages).
    Pie,
}

/// One column of the dashboard schema: whether the user gets a filter widget
/// for it and whether (and how) it is charted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub chart: Option<ChartKind>,
}

/// The declared schema the four original sheet variants shared, collapsed
/// into data. Replaces per-variant hard-coded column strings (with their
/// inconsistent trailing spaces) with normalized names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardSchema {
    pub columns: Vec<ColumnSpec>,
}

impl Default for DashboardSchema {
    fn default() -> Self {
        fn col(name: &str, filterable: bool, chart: Option<ChartKind>) -> ColumnSpec {
            ColumnSpec {
                name: name.to_string(),
                filterable,
                chart,
            }
        }
        DashboardSchema {
            columns: vec![
                col("Sector o industria", true, Some(ChartKind::Bar)),
                col("Ciudad y país", true, Some(ChartKind::Bar)),
                col(
                    "Nivel de interés en recibir más información",
                    true,
                    Some(ChartKind::Pie),
                ),
                col("Canal de contacto preferido", true, Some(ChartKind::Pie)),
                col("Tamaño de tu empresa/proyecto", true, Some(ChartKind::Bar)),
            ],
        }
    }
}

impl DashboardSchema {
    /// Run every declared column name through header normalization, so a
    /// hand-edited config with a stray trailing space behaves like the
    /// equivalent clean one.
    pub fn normalized(mut self) -> Self {
        for col in &mut self.columns {
            col.name = normalize_column_name(&col.name);
        }
        self
    }

    /// Columns the user gets filter widgets for.
    pub fn filterable_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.filterable)
    }

    /// Columns that drive a chart.
    pub fn charted_columns(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter().filter(|c| c.chart.is_some())
    }

    /// Check the loaded table against the declared schema. Any declared
    /// column missing from the table is schema drift and reported up front,
    /// before a filter or chart quietly comes up empty.
    pub fn validate(&self, table: &RecordTable) -> Result<()> {
        for col in &self.columns {
            if !table.has_column(&col.name) {
                return Err(DashboardError::UnknownColumn(col.name.clone()));
            }
        }
        Ok(())
    }
}
