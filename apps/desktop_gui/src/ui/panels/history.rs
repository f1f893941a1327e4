use shared::domain::CylinderKind;
use tracker_core::message::{self, history_timestamp, join_numbers};

use crate::{
    controller::orchestration,
    ui::{app::TrackerApp, widgets},
};

impl TrackerApp {
    pub(crate) fn show_history(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.history.search)
                    .hint_text("Search customer or address")
                    .desired_width(280.0),
            );
            let order = format!("Sort: {}", self.history.order.label());
            if ui.button(order).clicked() {
                self.history.order = self.history.order.toggled();
            }
        });

        let records = self.history.apply(self.store.history());
        ui.weak(format!(
            "{} deliveries found · Sorted by Date ({})",
            records.len(),
            self.history.order.label()
        ));
        ui.add_space(8.0);

        if records.is_empty() {
            ui.weak("No deliveries recorded yet.");
            return;
        }

        let mut resend = None;
        for record in records {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(&record.customer_name).strong());
                    ui.weak(history_timestamp(record.timestamp));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Resend").clicked() {
                            resend = Some(message::record_message(record));
                        }
                    });
                });
                if !record.address.is_empty() {
                    ui.label(&record.address);
                }
                for kind in CylinderKind::ALL {
                    let numbers = record.delivered(kind);
                    if numbers.is_empty() {
                        continue;
                    }
                    ui.label(
                        egui::RichText::new(format!(
                            "{kind} ({}): {}",
                            numbers.len(),
                            join_numbers(numbers)
                        ))
                        .color(widgets::kind_color(kind)),
                    );
                }
            });
            ui.add_space(6.0);
        }

        if let Some(text) = resend {
            if let Err(err) = orchestration::open_share_link(&self.share_target, &text) {
                self.report(err);
            }
        }
    }
}
