use std::time::{Duration, Instant};

use shared::domain::CylinderKind;
use tracker_core::{
    CustomerDirectory, DeliveryDraft, EntryRejection, HistoryQuery, InventoryStore, PickupDraft,
    ResetChallenge, ShareTarget,
};

use crate::controller::events::{Notice, NoticeSeverity, UiError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Pickup,
    Delivery,
    History,
    Reset,
}

impl View {
    pub const TABS: [View; 4] = [View::Dashboard, View::Pickup, View::Delivery, View::History];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Pickup => "Pickup",
            Self::Delivery => "Delivery",
            Self::History => "History",
            Self::Reset => "End of Day Reset",
        }
    }
}

#[derive(Default)]
pub struct PickupState {
    pub draft: PickupDraft,
    pub message: Option<String>,
    pub rejection: Option<(CylinderKind, EntryRejection)>,
}

#[derive(Default)]
pub struct DeliveryState {
    pub draft: DeliveryDraft,
    pub message: Option<String>,
    pub error: Option<String>,
}

pub struct ResetState {
    pub challenge: ResetChallenge,
    pub answer: String,
    pub error_until: Option<Instant>,
}

impl ResetState {
    pub fn new() -> Self {
        Self {
            challenge: ResetChallenge::random(),
            answer: String::new(),
            error_until: None,
        }
    }

    pub fn is_flashing(&self, now: Instant) -> bool {
        self.error_until.is_some_and(|until| now < until)
    }
}

/// Everything the window shows. Panels live in `ui::panels` as `impl` blocks on this type.
pub struct TrackerApp {
    pub(crate) store: InventoryStore,
    pub(crate) customers: CustomerDirectory,
    pub(crate) share_target: ShareTarget,
    pub(crate) view: View,
    pub(crate) pickup: PickupState,
    pub(crate) delivery: DeliveryState,
    pub(crate) history: HistoryQuery,
    pub(crate) reset: ResetState,
    pub(crate) notice: Option<Notice>,
}

impl TrackerApp {
    pub fn new(
        store: InventoryStore,
        customers: CustomerDirectory,
        share_target: ShareTarget,
    ) -> Self {
        Self {
            store,
            customers,
            share_target,
            view: View::Dashboard,
            pickup: PickupState::default(),
            delivery: DeliveryState::default(),
            history: HistoryQuery::default(),
            reset: ResetState::new(),
            notice: None,
        }
    }

    pub(crate) fn navigate(&mut self, view: View) {
        if view == View::Reset && self.view != View::Reset {
            self.reset = ResetState::new();
        }
        self.view = view;
    }

    pub(crate) fn report(&mut self, err: UiError) {
        tracing::warn!(context = ?err.context(), category = ?err.category(), "{}", err.message());
        self.notice = Some(Notice::error(&err));
    }

    pub(crate) fn inform(&mut self, message: impl Into<String>) {
        self.notice = Some(Notice::info(message));
    }

    fn show_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("Cylinder Tracker");
                ui.separator();
                for tab in View::TABS {
                    let selected = self.view == tab;
                    if ui.add(egui::Button::new(tab.title()).selected(selected)).clicked() {
                        self.navigate(tab);
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let reset = egui::RichText::new("Reset").color(egui::Color32::from_rgb(200, 60, 60));
                    if ui.button(reset).on_hover_text("End of day reset").clicked() {
                        self.navigate(View::Reset);
                    }
                });
            });
            ui.add_space(4.0);
        });
    }

    fn show_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.notice.clone() else {
            return;
        };
        let fill = match notice.severity {
            NoticeSeverity::Info => egui::Color32::from_rgb(45, 90, 60),
            NoticeSeverity::Error => egui::Color32::from_rgb(111, 53, 53),
        };
        egui::Frame::new()
            .fill(fill)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(&notice.message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.notice = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }
}

impl eframe::App for TrackerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_top_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_notice(ui);
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.view {
                    View::Dashboard => self.show_dashboard(ui),
                    View::Pickup => self.show_pickup(ui),
                    View::Delivery => self.show_delivery(ui),
                    View::History => self.show_history(ui),
                    View::Reset => self.show_reset(ui),
                });
        });

        if self.view == View::Reset && self.reset.is_flashing(Instant::now()) {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}
