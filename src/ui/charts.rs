use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::ColorMap;
use crate::data::filter::{aggregate_by, summary_metrics};
use crate::data::model::RecordTable;
use crate::data::schema::ChartKind;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Metrics strip
// ---------------------------------------------------------------------------

/// Headline numbers above the charts: visible rows plus distinct-value
/// counts for every charted column the table actually has.
pub fn metrics_strip(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        return;
    };

    let columns: Vec<String> = state
        .config
        .schema
        .charted_columns()
        .filter(|c| table.has_column(&c.name))
        .map(|c| c.name.clone())
        .collect();

    match summary_metrics(table, &state.visible_indices, &columns) {
        Ok(metrics) => {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label(RichText::new(format!("{}", metrics.total_rows)).heading());
                ui.label("contacts");
                for (col, n) in &metrics.distinct {
                    ui.separator();
                    ui.label(format!("{n} × {col}"));
                }
            });
        }
        Err(e) => {
            ui.colored_label(Color32::RED, format!("Error: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Chart grid
// ---------------------------------------------------------------------------

/// Render one chart per charted schema column, two per row.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a contact export or fetch the sheet  (File menu)");
        });
        return;
    };

    let charts: Vec<(String, ChartKind)> = state
        .config
        .schema
        .charted_columns()
        .filter_map(|c| c.chart.map(|kind| (c.name.clone(), kind)))
        .collect();

    for pair in charts.chunks(2) {
        ui.columns(pair.len(), |cols| {
            for (i, (column, kind)) in pair.iter().enumerate() {
                draw_chart(&mut cols[i], table, &state.visible_indices, column, *kind);
            }
        });
        ui.add_space(8.0);
    }
}

fn draw_chart(ui: &mut Ui, table: &RecordTable, indices: &[usize], column: &str, kind: ChartKind) {
    ui.strong(column);

    let agg = match aggregate_by(table, indices, column) {
        Ok(agg) => agg,
        Err(e) => {
            // Schema drift: say so in the chart slot instead of rendering an
            // empty chart.
            ui.colored_label(Color32::RED, format!("Error: {e}"));
            return;
        }
    };

    // The engine hands back an unordered grouping; sorting descending by
    // count (ties by label) is this adapter's choice.
    let mut buckets: Vec<(&str, usize)> = agg
        .counts
        .iter()
        .map(|(label, &count)| (label.as_str(), count))
        .collect();
    buckets.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    let colors = ColorMap::new(buckets.iter().map(|(label, _)| *label));

    match kind {
        ChartKind::Bar => bar_chart(ui, column, &buckets, &colors),
        ChartKind::Pie => proportion_bars(ui, &buckets, &colors, agg.total),
    }
}

fn bar_chart(ui: &mut Ui, column: &str, buckets: &[(&str, usize)], colors: &ColorMap) {
    Plot::new(format!("chart_{column}"))
        .legend(Legend::default())
        .height(200.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, (label, count)) in buckets.iter().enumerate() {
                let bar = Bar::new(i as f64, *count as f64).width(0.7);
                let chart = BarChart::new(vec![bar])
                    .name(*label)
                    .color(colors.color_for(label));
                plot_ui.bar_chart(chart);
            }
        });
}

/// Share-of-total rendering for `ChartKind::Pie` columns: one proportion bar
/// per bucket with its percentage of the filtered view.
fn proportion_bars(ui: &mut Ui, buckets: &[(&str, usize)], colors: &ColorMap, total: usize) {
    if total == 0 {
        ui.weak("No matching contacts.");
        return;
    }
    for (label, count) in buckets {
        let fraction = *count as f32 / total as f32;
        ui.add(
            egui::ProgressBar::new(fraction)
                .fill(colors.color_for(label))
                .text(format!("{label} – {count} ({:.0}%)", fraction * 100.0)),
        );
    }
}
