use shared::domain::CylinderKind;
use tracker_core::message;

use crate::{
    controller::{
        events::{UiError, UiErrorContext},
        orchestration,
    },
    ui::{
        app::{TrackerApp, View},
        widgets,
    },
};

impl TrackerApp {
    pub(crate) fn show_pickup(&mut self, ui: &mut egui::Ui) {
        if let Some(text) = self.pickup.message.clone() {
            self.show_pickup_message(ui, &text);
            return;
        }

        for kind in CylinderKind::ALL {
            self.show_pickup_field(ui, kind);
            ui.add_space(10.0);
        }

        let total = self.pickup.draft.total();
        let generate = egui::Button::new(format!("Generate Message ({total})"));
        if ui.add_enabled(total > 0, generate).clicked() {
            let draft = &self.pickup.draft;
            self.pickup.message = Some(message::pickup_message(
                draft.numbers(CylinderKind::Small),
                draft.numbers(CylinderKind::Big),
                message::now_local(),
            ));
            self.pickup.draft.set_active(None);
            self.pickup.rejection = None;
        }
    }

    fn show_pickup_field(&mut self, ui: &mut egui::Ui, kind: CylinderKind) {
        let active = self.pickup.draft.active() == Some(kind);
        let count = self.pickup.draft.numbers(kind).len();

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let title = egui::RichText::new(format!("{kind} Cylinders ({count})"))
                    .strong()
                    .color(widgets::kind_color(kind));
                if ui.add(egui::Button::new(title).selected(active)).clicked() {
                    self.pickup.draft.set_active((!active).then_some(kind));
                }
            });

            if let Some(index) = widgets::number_chips(ui, kind, self.pickup.draft.numbers(kind)) {
                self.pickup.draft.remove(kind, index);
            }

            if !active {
                return;
            }

            ui.add_space(6.0);
            let entry = self.pickup.draft.entry(kind).clone();
            let rejection = self
                .pickup
                .rejection
                .as_ref()
                .filter(|(rejected_kind, _)| *rejected_kind == kind)
                .map(|(_, rejection)| rejection.to_string());
            let shown = if entry.is_empty() { "-" } else { entry.as_str() };
            let color = if rejection.is_some() {
                widgets::error_color()
            } else {
                ui.visuals().strong_text_color()
            };
            ui.label(egui::RichText::new(shown).size(26.0).monospace().color(color));
            if let Some(message) = rejection {
                ui.colored_label(widgets::error_color(), message);
            }

            let keypad_id = format!("pickup_keypad_{kind}");
            if let Some(key) = widgets::keypad(ui, &keypad_id, &entry) {
                let inventory = self.store.inventory_numbers();
                match self.pickup.draft.press(kind, key, &inventory) {
                    Ok(_) => self.pickup.rejection = None,
                    Err(rejection) => {
                        tracing::debug!(kind = %kind, %rejection, "pickup entry rejected");
                        self.pickup.rejection = Some((kind, rejection));
                    }
                }
            }
        });
    }

    fn show_pickup_message(&mut self, ui: &mut egui::Ui, text: &str) {
        widgets::section_title(ui, "Pickup Message");
        widgets::message_preview(ui, text);
        ui.add_space(10.0);

        ui.horizontal_wrapped(|ui| {
            if ui.button("Open WhatsApp & Add to Inventory").clicked() && self.confirm_pickup() {
                if let Err(err) = orchestration::open_share_link(&self.share_target, text) {
                    self.report(err);
                }
            }
            if ui.button("Confirm & Add to Inventory").clicked() {
                self.confirm_pickup();
            }
            if ui.button("Copy Message Only").clicked() {
                match orchestration::copy_message(text) {
                    Ok(()) => self.inform("Message copied to clipboard!"),
                    Err(err) => self.report(err),
                }
            }
            if ui.button("Edit").clicked() {
                self.pickup.message = None;
                self.pickup.draft.set_active(Some(CylinderKind::Small));
            }
        });
    }

    /// Adds the pending numbers to inventory and returns to the dashboard.
    fn confirm_pickup(&mut self) -> bool {
        match self.store.complete_pickup(&self.pickup.draft) {
            Ok(added) => {
                self.inform(format!("Added {} cylinder(s) to inventory.", added.len()));
                self.pickup = Default::default();
                self.navigate(View::Dashboard);
                true
            }
            Err(err) => {
                self.report(UiError::from_tracker(UiErrorContext::Pickup, &err));
                false
            }
        }
    }
}
