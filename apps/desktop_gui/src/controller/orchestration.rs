//! Side effects triggered from the panels: clipboard, messaging links, store writes.

use arboard::Clipboard;
use tracing::{debug, info};
use tracker_core::{share::open_external, ShareTarget};

use crate::controller::events::{UiError, UiErrorContext};

pub fn copy_message(text: &str) -> Result<(), UiError> {
    let mut clipboard = Clipboard::new()
        .map_err(|err| UiError::from_message(UiErrorContext::Clipboard, err.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|err| UiError::from_message(UiErrorContext::Clipboard, err.to_string()))?;
    debug!(chars = text.len(), "message copied to clipboard");
    Ok(())
}

pub fn open_share_link(target: &ShareTarget, text: &str) -> Result<(), UiError> {
    let link = target.link(text);
    open_external(&link).map_err(|err| UiError::from_tracker(UiErrorContext::Share, &err))?;
    info!("opened messaging link");
    Ok(())
}
