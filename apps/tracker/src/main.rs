use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use storage::Storage;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracker_core::{
    config::{load_settings_from, prepare_data_dir, Settings, CONFIG_FILE_NAME},
    CustomerDirectory, InventoryStore, ShareTarget,
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "tracker", about = "Track gas cylinder pickups and deliveries")]
struct Cli {
    /// Directory holding the inventory and history files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stock counts and total delivered.
    Status,
    /// List cylinders currently in stock.
    Inventory {
        /// Only show one type (small or big).
        #[arg(long)]
        kind: Option<String>,
    },
    Pickup(PickupArgs),
    Deliver(DeliverArgs),
    History {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        oldest: bool,
    },
    /// Rebuild the message for a past delivery.
    Resend {
        id_prefix: String,
        #[command(flatten)]
        output: ShareArgs,
    },
    Customers,
    /// End-of-day reset: wipes inventory and history after an arithmetic check.
    Reset,
}

#[derive(Args, Debug)]
struct PickupArgs {
    /// Small cylinder numbers, comma separated.
    #[arg(long, value_delimiter = ',')]
    small: Vec<String>,
    /// Big cylinder numbers, comma separated.
    #[arg(long, value_delimiter = ',')]
    big: Vec<String>,
    /// Print the message without adding anything to inventory.
    #[arg(long, conflicts_with = "copy")]
    preview: bool,
    /// Copy the message to the clipboard without adding to inventory.
    #[arg(long)]
    copy: bool,
    #[command(flatten)]
    share: LinkArgs,
}

#[derive(Args, Debug)]
struct DeliverArgs {
    /// Prefill name and address from the customer directory.
    #[arg(long)]
    customer_id: Option<String>,
    #[arg(long)]
    customer: Option<String>,
    #[arg(long)]
    address: Option<String>,
    /// Cylinder numbers to deliver.
    #[arg(required = true, value_delimiter = ',')]
    numbers: Vec<String>,
    /// Record the delivery and remove the cylinders from inventory.
    #[arg(long)]
    complete: bool,
    #[command(flatten)]
    output: ShareArgs,
}

#[derive(Args, Debug, Default)]
struct LinkArgs {
    /// Print the messaging link.
    #[arg(long)]
    share: bool,
    /// Open the messaging link in the default browser.
    #[arg(long)]
    open: bool,
}

#[derive(Args, Debug, Default)]
struct ShareArgs {
    #[arg(long)]
    copy: bool,
    #[command(flatten)]
    link: LinkArgs,
}

pub(crate) struct App {
    pub store: InventoryStore,
    pub settings: Settings,
}

impl App {
    pub fn share_target(&self) -> Result<ShareTarget> {
        Ok(ShareTarget::parse(&self.settings.share_base_url)?)
    }

    pub fn customers(&self) -> Result<CustomerDirectory> {
        CustomerDirectory::load(&self.settings.customers_path())
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_settings_from(&cli.config, |name| std::env::var(name).ok());
    let mut settings = loaded.settings;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    init_tracing(&settings);
    if let Some(err) = &loaded.file_error {
        warn!(%err, "config file skipped");
    }

    let data_dir = prepare_data_dir(&settings.data_dir)?;
    let storage = Storage::open(&data_dir)
        .with_context(|| format!("failed to open storage in '{}'", data_dir.display()))?;
    let mut app = App {
        store: InventoryStore::open(storage),
        settings,
    };

    match cli.command {
        Command::Status => commands::status(&app),
        Command::Inventory { kind } => commands::inventory(&app, kind.as_deref()),
        Command::Pickup(args) => commands::pickup(&mut app, args),
        Command::Deliver(args) => commands::deliver(&mut app, args),
        Command::History { search, oldest } => commands::history(&app, search, oldest),
        Command::Resend { id_prefix, output } => commands::resend(&app, &id_prefix, &output),
        Command::Customers => commands::customers(&app),
        Command::Reset => commands::reset(&mut app),
    }
}
