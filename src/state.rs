use crate::config::DashboardConfig;
use crate::data::filter::{apply_filters, ConstraintSet};
use crate::data::model::{CellValue, RecordTable};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Out-of-band configuration (remote sheet credentials + schema).
    pub config: DashboardConfig,

    /// Loaded table (None until the user opens a file or fetches the sheet).
    pub table: Option<RecordTable>,

    /// Per-column accepted-value selections. Empty per-column set (or no
    /// entry at all) means "no constraint" — a freshly loaded table shows
    /// every record.
    pub constraints: ConstraintSet,

    /// Indices of records passing the current constraints (recomputed on
    /// every filter change).
    pub visible_indices: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a load/fetch operation is in progress.
    pub loading: bool,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            table: None,
            constraints: ConstraintSet::default(),
            visible_indices: Vec::new(),
            status_message: None,
            loading: false,
        }
    }

    /// Ingest a newly loaded table: clear constraints, show everything, and
    /// surface schema drift (declared column missing from the table) right
    /// away instead of letting a chart quietly come up empty.
    pub fn set_table(&mut self, table: RecordTable) {
        self.constraints = ConstraintSet::default();
        self.visible_indices = (0..table.len()).collect();
        self.status_message = self
            .config
            .schema
            .validate(&table)
            .err()
            .map(|e| format!("Error: {e}"));
        self.table = Some(table);
        self.loading = false;
    }

    /// Recompute `visible_indices` after a constraint change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            match apply_filters(table, &self.constraints) {
                Ok(indices) => self.visible_indices = indices,
                Err(e) => self.status_message = Some(format!("Error: {e}")),
            }
        }
    }

    /// Toggle a single value in a column's accepted set.
    pub fn toggle_constraint(&mut self, column: &str, value: &CellValue) {
        let accepted = self.constraints.entry(column.to_string()).or_default();
        if accepted.contains(value) {
            accepted.remove(value);
        } else {
            accepted.insert(value.clone());
        }
        self.refilter();
    }

    /// Drop a column's constraint entirely (back to pass-through).
    pub fn clear_constraint(&mut self, column: &str) {
        self.constraints.remove(column);
        self.refilter();
    }

    /// Number of columns with an active (non-empty) constraint.
    pub fn active_constraints(&self) -> usize {
        self.constraints.values().filter(|s| !s.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn state_with_table() -> AppState {
        let table = RecordTable::new(
            vec!["Sector o industria".to_string()],
            vec![
                Record {
                    fields: [(
                        "Sector o industria".to_string(),
                        CellValue::String("Tech".to_string()),
                    )]
                    .into_iter()
                    .collect(),
                },
                Record {
                    fields: [(
                        "Sector o industria".to_string(),
                        CellValue::String("Retail".to_string()),
                    )]
                    .into_iter()
                    .collect(),
                },
            ],
        );
        let mut state = AppState::new(DashboardConfig::default());
        state.set_table(table);
        state
    }

    #[test]
    fn fresh_table_shows_everything() {
        let state = state_with_table();
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.active_constraints(), 0);
        // default schema declares columns this little table lacks
        assert!(state.status_message.is_some());
    }

    #[test]
    fn toggling_narrows_and_clearing_restores() {
        let mut state = state_with_table();
        let tech = CellValue::String("Tech".to_string());

        state.toggle_constraint("Sector o industria", &tech);
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.active_constraints(), 1);

        // toggling the same value off empties the set → pass-through again
        state.toggle_constraint("Sector o industria", &tech);
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.active_constraints(), 0);

        state.toggle_constraint("Sector o industria", &tech);
        state.clear_constraint("Sector o industria");
        assert_eq!(state.visible_indices, vec![0, 1]);
    }
}
