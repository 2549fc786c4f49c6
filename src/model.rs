//! Snapshot data model for the search process JSON feed.
//!
//! These types mirror the JSON the backend writes after every expansion
//! step. The feed is read-only input: each poll replaces the previous
//! snapshot wholesale, so nothing here is ever mutated in place.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Node id of the search root. The node with this id is treated as the
/// root regardless of its `is_root` flag.
pub const ROOT_ID: u64 = 0;

/// Full state of the search process at one point in time.
///
/// The producer serializes node ids as decimal string keys; `BTreeMap<u64, _>`
/// parses them back and keeps the map in ascending-id order, which is what
/// downstream child ordering relies on.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSnapshot {
    /// Epoch seconds when the search started.
    #[serde(default)]
    pub start_time: Option<f64>,

    #[serde(default)]
    pub nodes: BTreeMap<u64, SearchNode>,

    /// Parent/child records, labelled with the strategy that produced
    /// the child. Used for link labels in the tree view.
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,

    #[serde(default)]
    pub strategies_applied: Vec<StrategyApplication>,

    /// Present once the search has derived a specification.
    #[serde(default)]
    pub final_specification: Option<FinalSpecification>,

    /// Chronological messages emitted by the search process.
    #[serde(default)]
    pub status_updates: Vec<StatusUpdate>,
}

/// One explored state in the backend's search.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchNode {
    pub id: u64,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub level: u32,
    /// Name of the strategy that produced this node. The producer emits
    /// `""` for the root; use [`SearchNode::strategy`] for display.
    #[serde(default)]
    pub strategy_applied: Option<String>,
    /// Seconds since search start.
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_expanded: bool,
    /// Absent until the search completes.
    #[serde(default)]
    pub used_in_specification: bool,
    #[serde(default)]
    pub tiling: Tiling,
}

impl SearchNode {
    /// Strategy name, with the producer's empty-string placeholder
    /// normalized away.
    pub fn strategy(&self) -> Option<&str> {
        self.strategy_applied.as_deref().filter(|s| !s.is_empty())
    }

    pub fn status(&self) -> NodeStatus {
        NodeStatus::of(self)
    }
}

/// Derived status label. Precedence is fixed: Root > Verified > Expanded,
/// otherwise Active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    Root,
    Verified,
    Expanded,
    Active,
}

impl NodeStatus {
    pub fn of(node: &SearchNode) -> Self {
        if node.is_root {
            NodeStatus::Root
        } else if node.is_verified {
            NodeStatus::Verified
        } else if node.is_expanded {
            NodeStatus::Expanded
        } else {
            NodeStatus::Active
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeStatus::Root => "Root",
            NodeStatus::Verified => "Verified",
            NodeStatus::Expanded => "Expanded",
            NodeStatus::Active => "Active",
        }
    }
}

/// Gridded permutation embedded in a tiling's obstructions/requirements.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GriddedPerm {
    #[serde(default)]
    pub pattern: String,
    #[serde(default)]
    pub positions: Vec<(usize, usize)>,
}

/// Tiling attached to every node.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tiling {
    #[serde(default)]
    pub ascii_repr: String,
    /// (width, height) in cells.
    #[serde(default)]
    pub dimensions: (usize, usize),
    #[serde(default)]
    pub obstructions: Vec<GriddedPerm>,
    #[serde(default)]
    pub requirements: Vec<Vec<GriddedPerm>>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    #[serde(default)]
    pub active_cells: Vec<(usize, usize)>,
    #[serde(default)]
    pub empty_cells: Vec<(usize, usize)>,
}

/// One strategy application step, with the children it produced.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyApplication {
    pub strategy_name: String,
    #[serde(default)]
    pub parent_id: Option<u64>,
    #[serde(default)]
    pub parent_tiling: Option<String>,
    /// Seconds since search start.
    #[serde(default)]
    pub timestamp: f64,
    /// Ids of the nodes this application produced.
    #[serde(default)]
    pub children: Vec<u64>,
}

/// Parent/child link record.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeRecord {
    pub parent: u64,
    pub child: u64,
    #[serde(default)]
    pub strategy: Option<String>,
}

/// The search's final derived result.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalSpecification {
    #[serde(default)]
    pub rules: String,
    #[serde(default)]
    pub rule_count: usize,
    #[serde(default)]
    pub used_node_ids: Vec<u64>,
    #[serde(default)]
    pub timestamp: f64,
}

/// Status message from the search process.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdate {
    #[serde(default)]
    pub timestamp: f64,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: u64) -> SearchNode {
        SearchNode {
            id,
            parent_id: None,
            level: 0,
            strategy_applied: None,
            timestamp: 0.0,
            is_root: false,
            is_verified: false,
            is_expanded: false,
            used_in_specification: false,
            tiling: Tiling::default(),
        }
    }

    #[test]
    fn parses_producer_shaped_snapshot() {
        // String node keys, "" strategy on the root, optional fields missing.
        let raw = r#"{
            "start_time": 1723022431.5,
            "nodes": {
                "0": {
                    "id": 0,
                    "tiling": {
                        "dimensions": [1, 1],
                        "obstructions": [{"pattern": "132", "positions": [[0,0],[0,0],[0,0]]}],
                        "requirements": [],
                        "assumptions": [],
                        "active_cells": [[0, 0]],
                        "empty_cells": [],
                        "ascii_repr": "+-+\n|1|\n+-+"
                    },
                    "parent_id": null,
                    "strategy_applied": "",
                    "timestamp": 0.01,
                    "level": 0,
                    "is_root": true,
                    "is_verified": false,
                    "is_expanded": false
                },
                "1": {
                    "id": 1,
                    "tiling": {"ascii_repr": "", "dimensions": [2, 1]},
                    "parent_id": 0,
                    "strategy_applied": "point placement",
                    "timestamp": 0.52,
                    "level": 1,
                    "is_root": false,
                    "is_verified": false,
                    "is_expanded": false
                }
            },
            "edges": [{"parent": 0, "child": 1, "strategy": "point placement"}],
            "search_tree": [],
            "strategies_applied": [
                {"strategy_name": "point placement", "parent_tiling": "+-+", "parent_id": 0,
                 "timestamp": 0.5, "children": [1]}
            ],
            "final_specification": null,
            "status_updates": [{"timestamp": 0.0, "message": "Starting auto search..."}]
        }"#;

        let snapshot: SearchSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.strategies_applied.len(), 1);
        assert_eq!(snapshot.edges.len(), 1);
        assert_eq!(snapshot.status_updates.len(), 1);
        assert!(snapshot.final_specification.is_none());

        let root = &snapshot.nodes[&0];
        assert!(root.is_root);
        assert_eq!(root.strategy(), None, "empty strategy string is normalized");
        assert!(!root.used_in_specification, "missing flag defaults to false");
        assert_eq!(root.tiling.dimensions, (1, 1));
        assert_eq!(root.tiling.obstructions.len(), 1);
        assert_eq!(root.tiling.obstructions[0].pattern, "132");

        let child = &snapshot.nodes[&1];
        assert_eq!(child.parent_id, Some(0));
        assert_eq!(child.strategy(), Some("point placement"));
    }

    #[test]
    fn minimal_snapshot_defaults() {
        let snapshot: SearchSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.nodes.is_empty());
        assert!(snapshot.strategies_applied.is_empty());
        assert!(snapshot.final_specification.is_none());
        assert!(snapshot.status_updates.is_empty());
    }

    #[test]
    fn specification_tolerates_missing_counts() {
        let raw = r#"{"final_specification": {"rules": "0 -> (1, 2)"}}"#;
        let snapshot: SearchSnapshot = serde_json::from_str(raw).unwrap();
        let spec = snapshot.final_specification.unwrap();
        assert_eq!(spec.rules, "0 -> (1, 2)");
        assert_eq!(spec.rule_count, 0);
        assert!(spec.used_node_ids.is_empty());
    }

    #[test]
    fn status_precedence_root_wins() {
        let mut n = node(0);
        n.is_root = true;
        n.is_verified = true;
        n.is_expanded = true;
        assert_eq!(NodeStatus::of(&n), NodeStatus::Root);
    }

    #[test]
    fn status_precedence_verified_over_expanded() {
        let mut n = node(3);
        n.is_verified = true;
        n.is_expanded = true;
        assert_eq!(NodeStatus::of(&n), NodeStatus::Verified);
    }

    #[test]
    fn status_expanded_then_active() {
        let mut n = node(4);
        n.is_expanded = true;
        assert_eq!(NodeStatus::of(&n), NodeStatus::Expanded);

        let n = node(5);
        assert_eq!(NodeStatus::of(&n), NodeStatus::Active);
        assert_eq!(NodeStatus::of(&n).as_str(), "Active");
    }
}
