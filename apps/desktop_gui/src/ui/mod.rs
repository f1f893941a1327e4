//! UI layer for the desktop GUI: app shell, per-view panels, and shared widgets.

pub mod app;
pub mod panels;
pub mod widgets;

pub use app::TrackerApp;
