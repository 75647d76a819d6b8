mod api;
mod app;
mod config;
mod documents;
mod notify;
mod session;
mod upload;
mod utils;

use clap::Parser;
use eframe::CreationContext;
use tracing_subscriber::EnvFilter;

use crate::app::{PdfManager, SystemBrowser};
use crate::config::Settings;

fn main() {
    let settings = Settings::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    tracing::info!("PDF manager starting v{}", env!("CARGO_PKG_VERSION"));

    let session = match settings.session() {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([480.0, 520.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        "PDF Manager",
        options,
        Box::new(move |_cc: &CreationContext| {
            Box::new(PdfManager::new(
                settings,
                session,
                Some(handle),
                Box::new(SystemBrowser),
            ))
        }),
    );

    if let Err(e) = result {
        tracing::error!("UI exited with error: {}", e);
    }
    runtime.shutdown_background();
}
