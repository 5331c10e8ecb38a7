//! Silsilah desktop client: fetches the family roster from the
//! spreadsheet-backed remote store and renders it as a node-link tree next
//! to a plain data table.

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use url::Url;

use crate::backend_bridge::commands::BackendCommand;
use crate::backend_bridge::runtime::{self, BackendConfig};
use crate::controller::events::UiEvent;
use crate::ui::app::FamilyTreeApp;
use client_core::{DEFAULT_ENDPOINT, DEFAULT_ORIGIN};

#[derive(Parser, Debug)]
#[command(name = "silsilah", about = "Family tree viewer for the shared genealogy sheet")]
struct Args {
    /// Remote store endpoint, reached through the CORS relay.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: Url,
    /// Origin header value the relay requires on forwarded requests.
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    origin: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    runtime::launch(
        BackendConfig {
            endpoint: args.endpoint,
            origin: args.origin,
        },
        cmd_rx,
        ui_tx,
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Silsilah Keluarga")
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([1080.0, 680.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Silsilah Keluarga",
        options,
        Box::new(|_cc| Ok(Box::new(FamilyTreeApp::new(cmd_tx, ui_rx)))),
    )
}
