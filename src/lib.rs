//! Tiling Search Dashboard
//!
//! Desktop client for a running tiling search process: polls the backend's
//! JSON snapshot endpoint and renders the search tree, a strategy timeline,
//! the selected node's tiling, and the final derived specification.

pub mod api;
pub mod app;
pub mod error;
pub mod modals;
pub mod model;
pub mod panels;
pub mod poll;
pub mod timeline_view;
pub mod tree;
pub mod tree_view;

pub use api::ApiClient;
pub use app::DashboardApp;
