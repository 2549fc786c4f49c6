//! Error types for the dashboard client.
//!
//! Background request failures become status-line strings at the spawn
//! site; snapshot validation failures are kept structured so the tree view
//! can render an error state instead of a partial tree.

use thiserror::Error;

/// Failures talking to the search process backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response; the status text is the user-facing message.
    #[error("HTTP {0}")]
    Http(reqwest::StatusCode),
}

/// Structural problems in a snapshot, detected when (re)building the tree.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("snapshot has no root node (id 0)")]
    MissingRoot,

    #[error("cyclic parent chain involving node {node_id}")]
    CycleDetected { node_id: u64 },
}
