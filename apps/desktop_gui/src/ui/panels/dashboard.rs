use shared::domain::CylinderKind;
use tracker_core::message::join_numbers;

use crate::ui::{
    app::{TrackerApp, View},
    widgets,
};

impl TrackerApp {
    pub(crate) fn show_dashboard(&mut self, ui: &mut egui::Ui) {
        let summary = self.store.summary();

        ui.horizontal_wrapped(|ui| {
            widgets::stat_card(
                ui,
                "Small in stock",
                summary.small_stock,
                widgets::kind_color(CylinderKind::Small),
            );
            widgets::stat_card(
                ui,
                "Big in stock",
                summary.big_stock,
                widgets::kind_color(CylinderKind::Big),
            );
            widgets::stat_card(
                ui,
                "Total delivered",
                summary.total_delivered,
                egui::Color32::from_rgb(22, 163, 74),
            );
        });

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if ui.button("New Pickup").clicked() {
                self.navigate(View::Pickup);
            }
            if ui.button("New Delivery").clicked() {
                self.navigate(View::Delivery);
            }
            if ui.button("View History").clicked() {
                self.navigate(View::History);
            }
        });

        ui.add_space(12.0);
        widgets::section_title(ui, "In stock");
        for kind in CylinderKind::ALL {
            let numbers: Vec<_> = self.store.cylinders_of(kind).map(|c| c.number).collect();
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(format!("{kind}:")).color(widgets::kind_color(kind)));
                if numbers.is_empty() {
                    ui.weak("none");
                } else {
                    ui.label(join_numbers(&numbers));
                }
            });
        }
    }
}
