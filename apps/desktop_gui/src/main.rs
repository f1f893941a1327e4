mod controller;
mod ui;

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use storage::Storage;
use tracing_subscriber::EnvFilter;
use tracker_core::{
    config::{load_settings_from, prepare_data_dir, CONFIG_FILE_NAME},
    CustomerDirectory, InventoryStore, ShareTarget,
};

use crate::ui::TrackerApp;

#[derive(Parser, Debug)]
#[command(name = "desktop_gui", about = "Cylinder tracker desktop app")]
struct Args {
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = load_settings_from(&args.config, |name| std::env::var(name).ok());
    let mut settings = loaded.settings;
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Some(err) = &loaded.file_error {
        tracing::warn!(%err, "config file skipped");
    }

    let data_dir = prepare_data_dir(&settings.data_dir)?;
    let storage = Storage::open(&data_dir)
        .with_context(|| format!("failed to open storage in '{}'", data_dir.display()))?;
    let store = InventoryStore::open(storage);
    let customers = CustomerDirectory::load(&settings.customers_path())?;
    let share_target = ShareTarget::parse(&settings.share_base_url)?;
    tracing::info!(
        data_dir = %data_dir.display(),
        customers = customers.len(),
        "starting desktop gui"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Cylinder Tracker")
            .with_inner_size([720.0, 860.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Cylinder Tracker",
        options,
        Box::new(move |_cc| Ok(Box::new(TrackerApp::new(store, customers, share_target)))),
    )
    .map_err(|err| anyhow!("desktop gui exited with an error: {err}"))
}
