use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Data table (bottom panel)
// ---------------------------------------------------------------------------

/// Render the filtered records as a scrollable table, header row = column
/// names in source order.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.label("No contacts loaded.");
        return;
    };

    if table.column_names.is_empty() {
        ui.label("The loaded table has no columns.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(90.0).clip(true), table.column_names.len())
        .header(22.0, |mut header| {
            for col in &table.column_names {
                header.col(|ui| {
                    ui.strong(col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let rec = &table.records[state.visible_indices[row.index()]];
                for col in &table.column_names {
                    row.col(|ui| {
                        ui.label(rec.get(col).map(|v| v.to_string()).unwrap_or_default());
                    });
                }
            });
        });
}
