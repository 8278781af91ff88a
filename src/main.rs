//! Entry point for the revsense review window.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use revsense::egui_app::ui::{DEFAULT_VIEWPORT_SIZE, EguiApp, MIN_VIEWPORT_SIZE, WINDOW_TITLE};
use revsense::{config, logging, startup};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = config::load_or_default().inspect_err(|err| {
        tracing::error!("Failed to load config: {err}");
    })?;
    let base = std::env::current_dir()?;
    let paths = config.artifacts.resolved_against(&base);
    let artifacts = startup::load(&paths).inspect_err(|err| {
        tracing::error!("Startup failed: {err}");
    })?;
    tracing::info!("Model and icons loaded, opening window");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(DEFAULT_VIEWPORT_SIZE)
            .with_min_inner_size(MIN_VIEWPORT_SIZE)
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(artifacts, config)))),
    )?;
    Ok(())
}
