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
    pub(crate) fn show_delivery(&mut self, ui: &mut egui::Ui) {
        self.delivery.draft.retain_available(self.store.inventory());

        if self.store.inventory().is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.heading("No cylinders in inventory");
                ui.weak("Record a pickup before making a delivery.");
                ui.add_space(10.0);
                if ui.button("Go to Pickup").clicked() {
                    self.navigate(View::Pickup);
                }
            });
            return;
        }

        self.show_customer_fields(ui);
        ui.add_space(10.0);

        for kind in CylinderKind::ALL {
            self.show_cylinder_grid(ui, kind);
            ui.add_space(8.0);
        }

        if let Some(error) = &self.delivery.error {
            ui.colored_label(widgets::error_color(), error);
        }

        let selected = self.delivery.draft.selection_len();
        if ui
            .button(format!("Generate Message ({selected} selected)"))
            .clicked()
        {
            match self
                .delivery
                .draft
                .preview(self.store.inventory(), message::now_local())
            {
                Ok(text) => {
                    self.delivery.message = Some(text);
                    self.delivery.error = None;
                }
                Err(err) => {
                    self.delivery.message = None;
                    self.delivery.error = Some(err.message);
                }
            }
        }

        if let Some(text) = self.delivery.message.clone() {
            ui.add_space(10.0);
            self.show_delivery_message(ui, &text);
        }
    }

    fn show_customer_fields(&mut self, ui: &mut egui::Ui) {
        widgets::section_title(ui, "Customer");

        if !self.customers.is_empty() {
            let current = self
                .delivery
                .draft
                .customer_id
                .as_deref()
                .and_then(|id| self.customers.get(id))
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Select a customer".to_string());
            let mut choice = self.delivery.draft.customer_id.clone();
            egui::ComboBox::from_id_salt("delivery_customer")
                .selected_text(current)
                .width(260.0)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut choice, None, "Walk-in / other");
                    for customer in self.customers.iter() {
                        ui.selectable_value(
                            &mut choice,
                            Some(customer.id.clone()),
                            customer.name.as_str(),
                        );
                    }
                });
            if choice != self.delivery.draft.customer_id {
                self.delivery
                    .draft
                    .select_customer(&self.customers, choice.as_deref());
                self.delivery.message = None;
            }
        }

        egui::Grid::new("delivery_customer_fields")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("Name");
                let name = egui::TextEdit::singleline(&mut self.delivery.draft.customer_name)
                    .hint_text("Customer name")
                    .desired_width(260.0);
                if ui.add(name).changed() {
                    self.delivery.message = None;
                }
                ui.end_row();

                ui.label("Address");
                let address = egui::TextEdit::singleline(&mut self.delivery.draft.address)
                    .hint_text("Optional")
                    .desired_width(260.0);
                if ui.add(address).changed() {
                    self.delivery.message = None;
                }
                ui.end_row();
            });
    }

    fn show_cylinder_grid(&mut self, ui: &mut egui::Ui, kind: CylinderKind) {
        let cylinders: Vec<_> = self
            .store
            .cylinders_of(kind)
            .map(|c| (c.id, c.number))
            .collect();
        let title = egui::RichText::new(format!("{kind} Cylinders ({})", cylinders.len()))
            .strong()
            .color(widgets::kind_color(kind));
        ui.label(title);

        if cylinders.is_empty() {
            ui.weak("None in stock");
            return;
        }

        ui.horizontal_wrapped(|ui| {
            for (id, number) in cylinders {
                let selected = self.delivery.draft.is_selected(id);
                let button = egui::Button::new(number.to_string())
                    .selected(selected)
                    .min_size(egui::vec2(48.0, 36.0));
                if ui.add(button).clicked() {
                    self.delivery.draft.toggle(id);
                    self.delivery.message = None;
                }
            }
        });
    }

    fn show_delivery_message(&mut self, ui: &mut egui::Ui, text: &str) {
        widgets::section_title(ui, "Delivery Message");
        widgets::message_preview(ui, text);
        ui.add_space(8.0);

        ui.horizontal_wrapped(|ui| {
            if ui.button("Copy").clicked() {
                match orchestration::copy_message(text) {
                    Ok(()) => self.inform("Message copied to clipboard!"),
                    Err(err) => self.report(err),
                }
            }
            if ui.button("WhatsApp").clicked() {
                if let Err(err) = orchestration::open_share_link(&self.share_target, text) {
                    self.report(err);
                }
            }
            let complete = egui::RichText::new("Complete Delivery").strong();
            if ui.button(complete).clicked() {
                self.complete_delivery();
            }
        });
    }

    fn complete_delivery(&mut self) {
        match self.store.deliver(&self.delivery.draft) {
            Ok(record) => {
                self.inform(format!(
                    "Delivery to {} recorded ({} cylinder(s)).",
                    record.customer_name,
                    record.total_delivered()
                ));
                self.delivery = Default::default();
                self.navigate(View::Dashboard);
            }
            Err(err) => {
                let err = UiError::from_tracker(UiErrorContext::Delivery, &err);
                if err.is_inline() {
                    self.delivery.error = Some(err.message().to_string());
                } else {
                    self.report(err);
                }
            }
        }
    }
}
