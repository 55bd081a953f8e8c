use anyhow::Context;
use drive_drop::app::DriveDropApp;
use drive_drop::{logging, Config};
use eframe::CreationContext;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    logging::init_tracing(&config.log_level).context("Failed to initialize logging")?;

    info!(
        store_url = %config.store_url,
        shortener_url = %config.shortener_url,
        timeout_secs = ?config.request_timeout_secs,
        "Starting Drive Drop"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([520.0, 600.0])
            .with_min_inner_size([400.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Drive Drop",
        options,
        Box::new(move |cc: &CreationContext| Box::new(DriveDropApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to open window: {}", e))
}
