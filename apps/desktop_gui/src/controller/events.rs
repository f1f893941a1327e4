//! Notices and error modeling for the desktop GUI controller.

use shared::error::{ErrorCode, TrackerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Duplicate,
    NotFound,
    Verification,
    Storage,
    Unknown,
}

impl From<ErrorCode> for UiErrorCategory {
    fn from(code: ErrorCode) -> Self {
        match code {
            ErrorCode::Validation => Self::Validation,
            ErrorCode::Duplicate => Self::Duplicate,
            ErrorCode::NotFound => Self::NotFound,
            ErrorCode::Verification => Self::Verification,
            ErrorCode::Storage => Self::Storage,
            ErrorCode::Internal => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Pickup,
    Delivery,
    Reset,
    Clipboard,
    Share,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
    inline: bool,
}

impl UiError {
    pub fn from_tracker(context: UiErrorContext, err: &TrackerError) -> Self {
        Self {
            category: err.code.into(),
            context,
            message: err.message.clone(),
            inline: err.is_user_facing(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        Self {
            category: UiErrorCategory::Unknown,
            context,
            message: message.into(),
            inline: false,
        }
    }

    /// Input problems are shown next to the field; everything else gets the banner.
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Error,
}

/// Dismissable banner shown above the active panel.
#[derive(Debug, Clone)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            message: message.into(),
        }
    }

    pub fn error(err: &UiError) -> Self {
        let prefix = match err.context() {
            UiErrorContext::Pickup => "Pickup",
            UiErrorContext::Delivery => "Delivery",
            UiErrorContext::Reset => "Reset",
            UiErrorContext::Clipboard => "Clipboard",
            UiErrorContext::Share => "WhatsApp",
        };
        Self {
            severity: NoticeSeverity::Error,
            message: format!("{prefix}: {}", err.message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::EntryRejection;

    #[test]
    fn storage_failures_go_to_the_banner() {
        let err = UiError::from_tracker(
            UiErrorContext::Delivery,
            &TrackerError::storage("failed to access 'delivery_history.json'"),
        );
        assert_eq!(err.category(), UiErrorCategory::Storage);
        assert!(!err.is_inline());

        let notice = Notice::error(&err);
        assert_eq!(notice.severity, NoticeSeverity::Error);
        assert!(notice.message.starts_with("Delivery: "));
    }

    #[test]
    fn keypad_rejections_stay_inline() {
        let err = UiError::from_tracker(
            UiErrorContext::Pickup,
            &EntryRejection::DuplicateInOtherList.into(),
        );
        assert_eq!(err.category(), UiErrorCategory::Duplicate);
        assert_eq!(err.context(), UiErrorContext::Pickup);
        assert!(err.is_inline());
        assert_eq!(err.message(), "Number already in the other list");
    }
}
