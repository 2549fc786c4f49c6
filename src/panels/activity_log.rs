//! Chronological status messages from the search process.

use egui::{Color32, RichText};

use crate::model::StatusUpdate;

pub fn activity_log_ui(ui: &mut egui::Ui, updates: &[StatusUpdate]) {
    if updates.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("No activity yet").italics());
        });
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("activity_log")
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for update in updates {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("[{:7.1}s]", update.timestamp))
                            .monospace()
                            .size(11.0)
                            .color(Color32::GRAY),
                    );
                    ui.label(&update.message);
                });
            }
        });
}
