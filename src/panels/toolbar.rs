//! Header toolbar: search controls, summary stats, status line.

use egui::{Color32, RichText};

use crate::poll::SearchPhase;
use crate::tree::SearchStats;

/// What the operator asked for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    OpenStartForm,
    TogglePause,
    RequestStop,
}

pub fn toolbar_ui(
    ui: &mut egui::Ui,
    phase: SearchPhase,
    stats: &SearchStats,
    status: &str,
    busy: bool,
) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        match phase {
            SearchPhase::Idle => {
                let start = egui::Button::new(RichText::new("▶ Start Search").color(Color32::WHITE))
                    .fill(Color32::from_rgb(22, 101, 52));
                if ui.add(start).clicked() {
                    action = ToolbarAction::OpenStartForm;
                }
            }
            SearchPhase::Running => {
                let pause = egui::Button::new(RichText::new("⏸ Pause").color(Color32::BLACK))
                    .fill(Color32::from_rgb(251, 191, 36));
                if ui.add(pause).clicked() {
                    action = ToolbarAction::TogglePause;
                }
            }
            SearchPhase::Paused => {
                let resume = egui::Button::new(RichText::new("▶ Resume").color(Color32::WHITE))
                    .fill(Color32::from_rgb(22, 101, 52));
                if ui.add(resume).clicked() {
                    action = ToolbarAction::TogglePause;
                }
            }
        }

        if phase.is_active() {
            let stop = egui::Button::new(RichText::new("⏹ Stop").color(Color32::WHITE))
                .fill(Color32::from_rgb(153, 27, 27));
            if ui.add(stop).clicked() {
                action = ToolbarAction::RequestStop;
            }
            ui.label(
                RichText::new(match phase {
                    SearchPhase::Paused => "● Search paused",
                    _ => "● Search running",
                })
                .color(Color32::from_rgb(74, 222, 128))
                .size(11.0),
            );
        }

        ui.separator();

        ui.label(format!("Nodes: {}", stats.node_count));
        ui.label(format!("Strategies: {}", stats.strategy_count));
        ui.label(format!("Max Depth: {}", stats.max_depth));

        if busy {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(status).size(11.0).color(Color32::GRAY));
        });
    });

    action
}
