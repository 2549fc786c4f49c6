//! Stop confirmation modal.
//!
//! Stopping shuts down the remote search process, so the request is gated
//! behind an explicit confirmation step.

use egui::{Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmStopResult {
    None,
    Confirmed,
    Cancelled,
}

#[derive(Default)]
pub struct ConfirmStopModal {
    open: bool,
}

impl ConfirmStopModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> ConfirmStopResult {
        if !self.open {
            return ConfirmStopResult::None;
        }

        let mut result = ConfirmStopResult::None;
        let mut should_close = false;

        egui::Window::new("Stop Search Process")
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("This will shut down the search process.");
                ui.label(
                    RichText::new("The dashboard will stop receiving updates.")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(8.0);

                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));
                if enter {
                    result = ConfirmStopResult::Confirmed;
                    should_close = true;
                }
                if escape {
                    result = ConfirmStopResult::Cancelled;
                    should_close = true;
                }

                ui.horizontal(|ui| {
                    let stop = egui::Button::new(RichText::new("Stop process").color(Color32::WHITE))
                        .fill(Color32::from_rgb(153, 27, 27));
                    if ui.add(stop).clicked() {
                        result = ConfirmStopResult::Confirmed;
                        should_close = true;
                    }
                    if ui.button("Cancel").clicked() {
                        result = ConfirmStopResult::Cancelled;
                        should_close = true;
                    }
                });
            });

        if should_close {
            self.close();
        }

        result
    }
}
