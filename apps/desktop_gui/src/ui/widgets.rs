//! Small reusable pieces shared by the panels.

use shared::domain::{CylinderKind, CylinderNumber};
use tracker_core::{KeypadEntry, KeypadKey};

pub const KEY_SIZE: [f32; 2] = [64.0, 44.0];

pub fn kind_color(kind: CylinderKind) -> egui::Color32 {
    match kind {
        CylinderKind::Small => egui::Color32::from_rgb(59, 130, 246),
        CylinderKind::Big => egui::Color32::from_rgb(234, 88, 12),
    }
}

pub fn error_color() -> egui::Color32 {
    egui::Color32::from_rgb(220, 38, 38)
}

pub fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).strong().size(16.0));
}

/// Four-column keypad in `KeypadKey::LAYOUT` order. Returns the key pressed this frame, if any.
pub fn keypad(ui: &mut egui::Ui, id: &str, entry: &KeypadEntry) -> Option<KeypadKey> {
    let mut pressed = None;
    egui::Grid::new(id)
        .num_columns(KeypadKey::PER_ROW)
        .spacing([6.0, 6.0])
        .show(ui, |ui| {
            for (index, key) in KeypadKey::LAYOUT.iter().copied().enumerate() {
                let enabled = entry.is_key_enabled(key);
                let label = match key {
                    KeypadKey::Add => egui::RichText::new(key.label()).strong(),
                    _ => egui::RichText::new(key.label()).size(18.0),
                };
                let button = egui::Button::new(label).min_size(KEY_SIZE.into());
                if ui.add_enabled(enabled, button).clicked() {
                    pressed = Some(key);
                }
                if index % KeypadKey::PER_ROW == KeypadKey::PER_ROW - 1 {
                    ui.end_row();
                }
            }
        });
    pressed
}

/// Pending numbers as chips; returns the index whose remove button was clicked.
pub fn number_chips(
    ui: &mut egui::Ui,
    kind: CylinderKind,
    numbers: &[CylinderNumber],
) -> Option<usize> {
    let mut removed = None;
    if numbers.is_empty() {
        ui.weak("No numbers added yet");
        return None;
    }
    ui.horizontal_wrapped(|ui| {
        for (index, number) in numbers.iter().enumerate() {
            let text = egui::RichText::new(format!("{number}  ✕")).color(kind_color(kind));
            if ui.button(text).on_hover_text("Remove").clicked() {
                removed = Some(index);
            }
        }
    });
    removed
}

pub fn message_preview(ui: &mut egui::Ui, message: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(message).monospace());
    });
}

pub fn stat_card(ui: &mut egui::Ui, label: &str, value: usize, color: egui::Color32) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(140.0);
        ui.vertical(|ui| {
            ui.weak(label);
            ui.label(egui::RichText::new(value.to_string()).size(28.0).strong().color(color));
        });
    });
}
