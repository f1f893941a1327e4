use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use shared::domain::{CylinderKind, CylinderNumber};
use tracing::info;
use tracker_core::{
    message::{self, history_timestamp, join_numbers},
    share::open_external,
    DeliveryDraft, HistoryQuery, PickupDraft, ResetChallenge, SortOrder,
};

use crate::{App, DeliverArgs, LinkArgs, PickupArgs, ShareArgs};

pub fn status(app: &App) -> Result<()> {
    let summary = app.store.summary();
    println!("Small in stock:  {}", summary.small_stock);
    println!("Big in stock:    {}", summary.big_stock);
    println!("Total delivered: {}", summary.total_delivered);
    Ok(())
}

pub fn inventory(app: &App, kind: Option<&str>) -> Result<()> {
    let kinds = match kind {
        Some(raw) => vec![raw.parse::<CylinderKind>()?],
        None => CylinderKind::ALL.to_vec(),
    };
    for kind in kinds {
        let numbers: Vec<CylinderNumber> = app.store.cylinders_of(kind).map(|c| c.number).collect();
        println!("{} ({}): {}", kind.label(), numbers.len(), join_numbers(&numbers));
    }
    Ok(())
}

pub fn pickup(app: &mut App, args: PickupArgs) -> Result<()> {
    let inventory = app.store.inventory_numbers();
    let mut draft = PickupDraft::default();
    for (kind, raw) in [
        (CylinderKind::Small, &args.small),
        (CylinderKind::Big, &args.big),
    ] {
        for input in raw.iter().filter(|s| !s.trim().is_empty()) {
            if let Err(rejection) = draft.try_add(kind, input, &inventory) {
                bail!("{} {}: {rejection}", kind.label(), input.trim());
            }
        }
    }
    if draft.is_empty() {
        bail!("Add at least one cylinder number with --small or --big.");
    }

    let text = message::pickup_message(
        draft.numbers(CylinderKind::Small),
        draft.numbers(CylinderKind::Big),
        message::now_local(),
    );

    if args.preview {
        println!("{text}");
        return Ok(());
    }
    if args.copy {
        copy_to_clipboard(&text)?;
        println!("Message copied to clipboard.");
        return Ok(());
    }

    let added = app.store.complete_pickup(&draft)?;
    println!("{text}");
    println!();
    println!("Added {} cylinder(s) to inventory.", added.len());
    share_link(app, &text, &args.share)
}

pub fn deliver(app: &mut App, args: DeliverArgs) -> Result<()> {
    let directory = app.customers()?;
    let mut draft = DeliveryDraft::default();
    if let Some(id) = args.customer_id.as_deref() {
        if directory.get(id).is_none() {
            bail!("unknown customer id '{id}'");
        }
        draft.select_customer(&directory, Some(id));
    }
    if let Some(name) = args.customer {
        draft.customer_name = name;
    }
    if let Some(address) = args.address {
        draft.address = address;
    }

    for raw in args.numbers.iter().filter(|s| !s.trim().is_empty()) {
        let number: CylinderNumber = raw.parse()?;
        let cylinder = app
            .store
            .find_by_number(number)
            .with_context(|| format!("cylinder {number} is not in inventory"))?;
        draft.select(cylinder.id);
    }

    let text = draft.preview(app.store.inventory(), message::now_local())?;
    println!("{text}");

    if args.output.copy {
        copy_to_clipboard(&text)?;
        println!("Message copied to clipboard.");
    }
    share_link(app, &text, &args.output.link)?;

    if args.complete {
        let record = app.store.deliver(&draft)?;
        println!();
        println!(
            "Delivery {} recorded: {} cylinder(s) removed from inventory.",
            record.id,
            record.total_delivered()
        );
    }
    Ok(())
}

pub fn history(app: &App, search: String, oldest: bool) -> Result<()> {
    let query = HistoryQuery {
        search,
        order: if oldest {
            SortOrder::OldestFirst
        } else {
            SortOrder::NewestFirst
        },
    };
    let records = query.apply(app.store.history());
    println!("{} deliveries ({})", records.len(), query.order.label());

    for record in records {
        let id = record.id.to_string();
        println!();
        println!(
            "{}  {}  {}",
            &id[..8],
            record.customer_name,
            history_timestamp(record.timestamp)
        );
        if !record.address.is_empty() {
            println!("    {}", record.address);
        }
        for kind in CylinderKind::ALL {
            let numbers = record.delivered(kind);
            if !numbers.is_empty() {
                println!("    {}: {}", kind.label(), join_numbers(numbers));
            }
        }
    }
    Ok(())
}

pub fn resend(app: &App, id_prefix: &str, output: &ShareArgs) -> Result<()> {
    let record = app.store.find_delivery(id_prefix)?;
    let text = message::record_message(record);
    println!("{text}");
    if output.copy {
        copy_to_clipboard(&text)?;
        println!("Message copied to clipboard.");
    }
    share_link(app, &text, &output.link)
}

pub fn customers(app: &App) -> Result<()> {
    let path = app.settings.customers_path();
    let directory = app.customers()?;
    if directory.is_empty() {
        println!("No customers configured in '{}'.", path.display());
        return Ok(());
    }
    for customer in directory.iter() {
        let address = if customer.address.is_empty() {
            "-"
        } else {
            customer.address.as_str()
        };
        println!("{:<16} {:<24} {}", customer.id, customer.name, address);
    }
    Ok(())
}

pub fn reset(app: &mut App) -> Result<()> {
    let challenge = ResetChallenge::random();
    let answer = prompt_answer(&challenge)?;
    app.store.reset_all(&challenge, &answer)?;
    println!("Inventory and delivery history cleared.");
    Ok(())
}

fn prompt_answer(challenge: &ResetChallenge) -> Result<String> {
    println!("This will delete all inventory and delivery history.");
    print!("{} ", challenge.prompt());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read answer")?;
    Ok(line)
}

fn share_link(app: &App, text: &str, link: &LinkArgs) -> Result<()> {
    if !link.share && !link.open {
        return Ok(());
    }
    let url = app.share_target()?.link(text);
    if link.share {
        println!();
        println!("{url}");
    }
    if link.open {
        open_external(&url)?;
        info!("opened messaging link");
    }
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
    clipboard
        .set_text(text.to_owned())
        .context("failed to copy message to clipboard")
}
