use eframe::egui;

use crate::config::DashboardConfig;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ContactDashApp {
    pub state: AppState,
}

impl ContactDashApp {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl eframe::App for ContactDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: data table ----
        egui::TopBottomPanel::bottom("table_panel")
            .resizable(true)
            .default_height(240.0)
            .show(ctx, |ui| {
                table::data_table(ui, &self.state);
            });

        // ---- Central panel: metrics + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            charts::metrics_strip(ui, &self.state);
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::chart_grid(ui, &self.state);
                });
        });
    }
}
