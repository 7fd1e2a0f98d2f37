use contact_dash::app::ContactDashApp;
use contact_dash::config::DashboardConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = DashboardConfig::load_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Contact Dash – Contact Analytics",
        options,
        Box::new(|_cc| Ok(Box::new(ContactDashApp::new(config)))),
    )
}
