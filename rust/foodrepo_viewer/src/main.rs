mod app;
mod cli;
mod error;
mod file_loader;
mod plot_renderer;
mod ui;

use clap::Parser;
use eframe::egui;
use foodrepo::HttpPeakClient;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::subscriber::set_global_default;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;

use crate::app::{
    ViewerApp,
    ViewerConfig,
};
use crate::cli::Cli;
use crate::error::ViewerError;

#[cfg(target_os = "windows")]
use mimalloc::MiMalloc;

#[cfg(target_os = "windows")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<(), ViewerError> {
    let args = Cli::parse();

    // Set up logging
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_log_level()));
    let subscriber = Registry::default()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_span_events(FmtSpan::CLOSE));

    set_global_default(subscriber).expect("Setting default subscriber failed");

    let session_log: Option<Box<dyn Write + Send + Sync>> = match &args.session_log {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| ViewerError::SessionLog {
                    path: path.clone(),
                    source,
                })?;
            tracing::info!("Logging session commands to {}", path.display());
            Some(Box::new(file))
        }
        None => None,
    };

    let client = HttpPeakClient::new(args.base_url);
    tracing::info!("Fetching peak lists from {}", client.base_url());

    let config = ViewerConfig {
        catalog_path: args.catalog,
        merge_width: args.merge_width,
        mode: args.mode,
    };
    let app = ViewerApp::new(config, Box::new(client), session_log);

    // Configure native window options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Food Repository Viewer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}
