//! Side and header panels.

mod activity_log;
mod node_details;
mod specification;
mod toolbar;

pub use activity_log::activity_log_ui;
pub use node_details::{node_details_ui, tiling_ui};
pub use specification::specification_ui;
pub use toolbar::{toolbar_ui, ToolbarAction};
