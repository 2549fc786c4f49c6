//! Modal dialogs.

mod confirm_stop;
mod pattern_prompt;

pub use confirm_stop::{ConfirmStopModal, ConfirmStopResult};
pub use pattern_prompt::{PatternPromptModal, PatternPromptResult};
