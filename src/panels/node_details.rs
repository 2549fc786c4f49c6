//! Selected-node detail and tiling panels.

use egui::{Color32, RichText};

use crate::model::SearchNode;

fn detail_row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(RichText::new(label).strong().size(11.0).color(Color32::GRAY));
    ui.label(value);
    ui.end_row();
}

pub fn node_details_ui(ui: &mut egui::Ui, node: Option<&SearchNode>) {
    ui.label(RichText::new("Node Details").strong());
    ui.separator();

    let Some(node) = node else {
        ui.label(RichText::new("Select a node to view details").italics());
        return;
    };

    egui::Grid::new("node_details_grid")
        .num_columns(2)
        .spacing([12.0, 4.0])
        .show(ui, |ui| {
            detail_row(ui, "Node ID", node.id.to_string());
            detail_row(ui, "Level", node.level.to_string());
            detail_row(
                ui,
                "Strategy Applied",
                node.strategy().unwrap_or("None").to_string(),
            );
            detail_row(ui, "Status", node.status().as_str().to_string());
            detail_row(ui, "Timestamp", format!("{:.3}s", node.timestamp));
        });
}

pub fn tiling_ui(ui: &mut egui::Ui, node: Option<&SearchNode>) {
    ui.label(RichText::new("Tiling").strong());
    ui.separator();

    let Some(node) = node else {
        ui.label(RichText::new("No tiling selected").italics());
        return;
    };
    let tiling = &node.tiling;

    egui::ScrollArea::both()
        .id_salt("tiling_ascii")
        .max_height(160.0)
        .show(ui, |ui| {
            ui.label(RichText::new(&tiling.ascii_repr).monospace());
        });

    ui.add_space(8.0);
    ui.label(format!(
        "Dimensions: {} × {}",
        tiling.dimensions.0, tiling.dimensions.1
    ));
    ui.label(format!("Obstructions: {}", tiling.obstructions.len()));
    ui.label(format!("Requirements: {}", tiling.requirements.len()));
    ui.label(format!("Active Cells: {}", tiling.active_cells.len()));
    if !tiling.assumptions.is_empty() {
        ui.label(format!("Assumptions: {}", tiling.assumptions.len()));
    }
    if !tiling.empty_cells.is_empty() {
        ui.label(format!("Empty Cells: {}", tiling.empty_cells.len()));
    }
}
