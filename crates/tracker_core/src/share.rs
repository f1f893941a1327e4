//! Deep links into the messaging app and the platform opener that launches them.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use shared::error::{TrackerError, TrackerResult};
use tracing::{debug, warn};
use url::Url;

pub const DEFAULT_SHARE_BASE_URL: &str = "https://wa.me/";

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Where shared messages are sent, e.g. `https://wa.me/` or `https://wa.me/15551234567`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTarget {
    base: Url,
}

impl ShareTarget {
    pub fn parse(base: &str) -> TrackerResult<Self> {
        let base = Url::parse(base.trim()).map_err(|err| {
            TrackerError::validation(format!("invalid share base url '{base}': {err}"))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(TrackerError::validation(format!(
                "share base url must be http(s), got '{}'",
                base.scheme()
            )));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(TrackerError::validation(
                "share base url must not carry a query or fragment",
            ));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Link that opens the messaging app with `text` pre-filled.
    pub fn link(&self, text: &str) -> String {
        format!("{}?text={}", self.base, encode_uri_component(text))
    }
}

pub fn share_link(base: &str, text: &str) -> TrackerResult<String> {
    Ok(ShareTarget::parse(base)?.link(text))
}

/// Hands `link` to the platform's URL opener; the messaging app or browser takes it from there.
pub fn open_external(link: &str) -> TrackerResult<()> {
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd")
        .args(["/C", "start", "", link])
        .spawn();

    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(link).spawn();

    #[cfg(all(unix, not(target_os = "macos")))]
    let result = std::process::Command::new("xdg-open").arg(link).spawn();

    match result {
        Ok(_) => {
            debug!(link_len = link.len(), "opened share link");
            Ok(())
        }
        Err(err) => {
            warn!(%err, "failed to launch external opener");
            Err(TrackerError::new(
                shared::error::ErrorCode::Internal,
                format!("Failed to open messaging link: {err}"),
            ))
        }
    }
}
