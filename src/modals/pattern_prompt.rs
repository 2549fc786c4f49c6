//! Pattern input modal.
//!
//! An explicit form with its own state rather than a blocking prompt:
//! cancelling or submitting nothing leaves the dashboard Idle.

use egui::{Color32, RichText, TextEdit};

const DEFAULT_PATTERN: &str = "132";

/// Result from the pattern prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternPromptResult {
    /// No action taken.
    None,
    /// User submitted a non-empty pattern.
    Submitted(String),
    /// User closed the form without starting a search.
    Cancelled,
}

pub struct PatternPromptModal {
    open: bool,
    pattern: String,
}

impl Default for PatternPromptModal {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternPromptModal {
    pub fn new() -> Self {
        Self {
            open: false,
            pattern: String::new(),
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.pattern = DEFAULT_PATTERN.to_string();
    }

    pub fn close(&mut self) {
        self.open = false;
        self.pattern.clear();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The pattern as it would be submitted; `None` when blank.
    fn normalized_pattern(&self) -> Option<String> {
        let trimmed = self.pattern.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> PatternPromptResult {
        if !self.open {
            return PatternPromptResult::None;
        }

        let mut result = PatternPromptResult::None;
        let mut should_close = false;

        egui::Window::new("Start Search")
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Enter a permutation pattern to analyze:");
                ui.label(
                    RichText::new("e.g. \"123\", \"321\", \"1324\"")
                        .size(11.0)
                        .color(Color32::GRAY),
                );
                ui.add_space(6.0);

                let response = ui.add(
                    TextEdit::singleline(&mut self.pattern)
                        .hint_text("pattern")
                        .desired_width(ui.available_width()),
                );
                if !response.has_focus() {
                    response.request_focus();
                }

                let submit = self.normalized_pattern();

                let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
                let escape = ui.input(|i| i.key_pressed(egui::Key::Escape));

                if escape {
                    result = PatternPromptResult::Cancelled;
                    should_close = true;
                }
                if enter {
                    if let Some(pattern) = submit.clone() {
                        result = PatternPromptResult::Submitted(pattern);
                        should_close = true;
                    }
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(submit.is_some(), egui::Button::new("Start"))
                        .clicked()
                    {
                        if let Some(pattern) = submit {
                            result = PatternPromptResult::Submitted(pattern);
                            should_close = true;
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        result = PatternPromptResult::Cancelled;
                        should_close = true;
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new("Enter Start • Esc Cancel")
                                .size(10.0)
                                .color(Color32::GRAY),
                        );
                    });
                });
            });

        if should_close {
            self.close();
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_with_default_pattern() {
        let mut modal = PatternPromptModal::new();
        assert!(!modal.is_open());
        modal.open();
        assert!(modal.is_open());
        assert_eq!(modal.normalized_pattern().as_deref(), Some(DEFAULT_PATTERN));
    }

    #[test]
    fn blank_pattern_cannot_be_submitted() {
        let mut modal = PatternPromptModal::new();
        modal.open();
        modal.pattern = "   ".to_string();
        assert_eq!(modal.normalized_pattern(), None);
    }

    #[test]
    fn pattern_is_trimmed() {
        let mut modal = PatternPromptModal::new();
        modal.open();
        modal.pattern = "  1324 ".to_string();
        assert_eq!(modal.normalized_pattern().as_deref(), Some("1324"));
    }

    #[test]
    fn close_resets_state() {
        let mut modal = PatternPromptModal::new();
        modal.open();
        modal.close();
        assert!(!modal.is_open());
        assert_eq!(modal.normalized_pattern(), None);
    }
}
