//! One module per view; each adds a `show_*` method to `TrackerApp`.

mod dashboard;
mod delivery;
mod history;
mod pickup;
mod reset;
