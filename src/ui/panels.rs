use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::{export, loader};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one collapsible checkbox list per
/// filterable schema column. Checking values activates a constraint; an
/// empty selection means "show all" (matching the sheet dashboard's empty
/// multiselect behaviour).
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No contacts loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let columns: Vec<String> = state
        .config
        .schema
        .filterable_columns()
        .map(|c| c.name.clone())
        .collect();
    let unique = table.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in &columns {
                // Schema drift is already surfaced in the status bar; just
                // skip the widget for a column the table doesn't have.
                let Some(all_values) = unique.get(col) else {
                    continue;
                };

                let n_selected = state
                    .constraints
                    .get(col)
                    .map(|s| s.len())
                    .unwrap_or(0);
                let header_text = if n_selected == 0 {
                    format!("{col}  (all)")
                } else {
                    format!("{col}  ({n_selected} selected)")
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col)
                    .default_open(false)
                    .show(ui, |ui: &mut Ui| {
                        if ui.small_button("Clear").clicked() {
                            state.clear_constraint(col);
                        }

                        let accepted = state.constraints.entry(col.clone()).or_default();
                        let mut changed = false;

                        for val in all_values {
                            let label = val.to_string();
                            let mut checked = accepted.contains(val);
                            if ui.checkbox(&mut checked, label).changed() {
                                if checked {
                                    accepted.insert(val.clone());
                                } else {
                                    accepted.remove(val);
                                }
                                changed = true;
                            }
                        }

                        if changed {
                            state.refilter();
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let fetch = ui
                .add_enabled(state.config.sheet.is_some(), egui::Button::new("Fetch sheet"))
                .on_disabled_hover_text("No sheet configured (see contact-dash.json)");
            if fetch.clicked() {
                fetch_sheet(state);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(state.table.is_some(), egui::Button::new("Export filtered…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} contacts loaded, {} visible, {} filter(s) active",
                table.len(),
                state.visible_indices.len(),
                state.active_constraints()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Dialogs and load actions
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open contact data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match loader::load_file(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} contacts with columns {:?}",
                    table.len(),
                    table.column_names
                );
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

/// One blocking fetch of the configured sheet. Connection failures are
/// terminal for this cycle: reported, not retried.
pub fn fetch_sheet(state: &mut AppState) {
    let Some(sheet) = state.config.sheet.clone() else {
        state.status_message = Some("Error: no sheet configured".to_string());
        return;
    };

    state.loading = true;
    match loader::fetch_sheet(&sheet) {
        Ok(table) => {
            log::info!(
                "Fetched {} contacts with columns {:?}",
                table.len(),
                table.column_names
            );
            state.set_table(table);
        }
        Err(e) => {
            log::error!("Sheet fetch failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            state.loading = false;
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(table) = &state.table else {
        return;
    };

    let file = rfd::FileDialog::new()
        .set_title("Export filtered contacts")
        .add_filter("CSV", &["csv"])
        .set_file_name("contacts_filtered.csv")
        .save_file();

    if let Some(path) = file {
        match export::export_to_path(table, &state.visible_indices, &path) {
            Ok(()) => {
                log::info!(
                    "Exported {} contacts to {}",
                    state.visible_indices.len(),
                    path.display()
                );
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
