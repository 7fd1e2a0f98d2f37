/// egui shell: filter side panel, top bar, chart grid, and data table.
pub mod charts;
pub mod panels;
pub mod table;
