mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context};
use clap::Parser;
use client_core::{load_settings, UiState};
use crossbeam_channel::bounded;
use eframe::egui;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::SearchFormApp;

#[derive(Parser, Debug)]
#[command(about = "Search users by email and optional number")]
struct Args {
    /// Root URL of the search service; overrides search.toml and environment.
    #[arg(long)]
    service_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let mut settings = load_settings().context("failed to load search settings")?;
    if let Some(service_url) = args.service_url.as_deref() {
        settings = settings
            .with_service_url(service_url)
            .context("invalid --service-url")?;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    let (state_tx, state_rx) = watch::channel(UiState::default());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("User Search")
            .with_inner_size([520.0, 680.0])
            .with_min_inner_size([460.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "User Search",
        options,
        Box::new(move |cc| {
            backend_bridge::runtime::launch(
                settings,
                cmd_rx,
                ui_tx,
                state_tx,
                cc.egui_ctx.clone(),
            );
            Ok(Box::new(SearchFormApp::bootstrap(cmd_tx, ui_rx, state_rx)))
        }),
    )
    .map_err(|err| anyhow!("desktop gui exited with error: {err}"))
}
