//! Final specification panel.

use egui::{Color32, RichText};

use crate::model::FinalSpecification;

pub fn specification_ui(ui: &mut egui::Ui, spec: Option<&FinalSpecification>) {
    let Some(spec) = spec else {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("No specification data available").italics());
        });
        return;
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new("Specification").strong());
        ui.label(
            RichText::new(format!(
                "{} rules • {} nodes used • found at {:.3}s",
                spec.rule_count,
                spec.used_node_ids.len(),
                spec.timestamp
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
    });
    ui.separator();

    egui::ScrollArea::both()
        .id_salt("specification_rules")
        .show(ui, |ui| {
            ui.label(RichText::new(&spec.rules).monospace());
        });
}
