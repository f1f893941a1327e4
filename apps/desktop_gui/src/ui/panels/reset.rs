use std::time::Instant;

use tracker_core::reset::ERROR_FLASH;

use crate::{
    controller::events::{UiError, UiErrorContext},
    ui::{
        app::{TrackerApp, View},
        widgets,
    },
};

impl TrackerApp {
    pub(crate) fn show_reset(&mut self, ui: &mut egui::Ui) {
        let flashing = self.reset.is_flashing(Instant::now());

        ui.vertical_centered(|ui| {
            ui.set_max_width(360.0);
            ui.add_space(24.0);
            ui.heading("End of Day Reset");
            ui.label(
                "This will permanently delete all inventory and delivery history. \
                 This action cannot be undone.",
            );
            ui.add_space(16.0);

            ui.label(egui::RichText::new(self.reset.challenge.prompt()).strong());
            let mut answer = egui::TextEdit::singleline(&mut self.reset.answer)
                .hint_text("?")
                .horizontal_align(egui::Align::Center)
                .font(egui::TextStyle::Heading)
                .desired_width(120.0);
            if flashing {
                answer = answer.text_color(widgets::error_color());
            }
            let response = ui.add(answer);
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if flashing {
                ui.colored_label(widgets::error_color(), "Incorrect answer");
            }

            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    self.navigate(View::Dashboard);
                }
                let has_answer = !self.reset.answer.trim().is_empty();
                let confirm = egui::Button::new(
                    egui::RichText::new("Confirm Delete").color(egui::Color32::WHITE),
                )
                .fill(widgets::error_color());
                let clicked = ui.add_enabled(has_answer, confirm).clicked();
                if clicked || (submitted && has_answer) {
                    self.confirm_reset();
                }
            });
        });
    }

    fn confirm_reset(&mut self) {
        let challenge = self.reset.challenge;
        match self.store.reset_all(&challenge, &self.reset.answer) {
            Ok(()) => {
                self.pickup = Default::default();
                self.delivery = Default::default();
                self.inform("Inventory and delivery history cleared.");
                self.navigate(View::Dashboard);
            }
            Err(err) => {
                let err = UiError::from_tracker(UiErrorContext::Reset, &err);
                if err.is_inline() {
                    self.reset.answer.clear();
                    self.reset.error_until = Some(Instant::now() + ERROR_FLASH);
                } else {
                    self.report(err);
                }
            }
        }
    }
}
