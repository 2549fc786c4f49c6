//! Snapshot-to-views integration test
//!
//! Exercises the full data path the dashboard runs on every poll tick,
//! without a UI or a live backend:
//!
//! 1. Deserialize producer-shaped snapshot JSON
//! 2. Build the rooted hierarchy and summary stats
//! 3. Classify successive snapshots the way the poll loop does
//! 4. Capture the final specification and stop

use tilescope_dash::model::{NodeStatus, SearchSnapshot};
use tilescope_dash::poll::{classify_snapshot, PollAction, PollState};
use tilescope_dash::tree::{build_tree, compute_stats};

fn snapshot(raw: &str) -> SearchSnapshot {
    serde_json::from_str(raw).expect("fixture JSON must parse")
}

const FIRST_TICK: &str = r#"{
    "start_time": 1723022431.2,
    "nodes": {
        "0": {
            "id": 0, "parent_id": null, "level": 0,
            "strategy_applied": "", "timestamp": 0.01,
            "is_root": true, "is_verified": false, "is_expanded": true,
            "tiling": {
                "dimensions": [1, 1],
                "obstructions": [{"pattern": "132", "positions": [[0,0],[0,0],[0,0]]}],
                "requirements": [],
                "active_cells": [[0,0]],
                "ascii_repr": "+-+\n|1|\n+-+"
            }
        },
        "1": {
            "id": 1, "parent_id": 0, "level": 1,
            "strategy_applied": "point placement", "timestamp": 0.48,
            "is_root": false, "is_verified": false, "is_expanded": false,
            "tiling": {"dimensions": [2, 2], "ascii_repr": ""}
        }
    },
    "edges": [{"parent": 0, "child": 1, "strategy": "point placement"}],
    "strategies_applied": [
        {"strategy_name": "point placement", "parent_id": 0, "timestamp": 0.5, "children": [1]}
    ],
    "final_specification": null,
    "status_updates": [{"timestamp": 0.0, "message": "Starting auto search..."}]
}"#;

const SECOND_TICK: &str = r#"{
    "nodes": {
        "0": {"id": 0, "parent_id": null, "level": 0, "is_root": true, "is_expanded": true,
              "timestamp": 0.01, "tiling": {"dimensions": [1, 1], "ascii_repr": ""}},
        "1": {"id": 1, "parent_id": 0, "level": 1, "is_verified": true,
              "timestamp": 0.48, "tiling": {"dimensions": [2, 2], "ascii_repr": ""}},
        "2": {"id": 2, "parent_id": 0, "level": 1,
              "timestamp": 1.1, "tiling": {"dimensions": [2, 1], "ascii_repr": ""}},
        "3": {"id": 3, "parent_id": 2, "level": 2,
              "timestamp": 1.9, "tiling": {"dimensions": [3, 2], "ascii_repr": ""}}
    },
    "strategies_applied": [
        {"strategy_name": "point placement", "parent_id": 0, "timestamp": 0.5, "children": [1]},
        {"strategy_name": "factor", "parent_id": 0, "timestamp": 1.2, "children": [2, 3]}
    ],
    "final_specification": null
}"#;

const FINAL_TICK: &str = r#"{
    "nodes": {
        "0": {"id": 0, "parent_id": null, "level": 0, "is_root": true, "is_expanded": true,
              "used_in_specification": true, "timestamp": 0.01,
              "tiling": {"dimensions": [1, 1], "ascii_repr": ""}},
        "1": {"id": 1, "parent_id": 0, "level": 1, "is_verified": true,
              "used_in_specification": true, "timestamp": 0.48,
              "tiling": {"dimensions": [2, 2], "ascii_repr": ""}},
        "2": {"id": 2, "parent_id": 0, "level": 1, "timestamp": 1.1,
              "tiling": {"dimensions": [2, 1], "ascii_repr": ""}},
        "3": {"id": 3, "parent_id": 2, "level": 2, "timestamp": 1.9,
              "tiling": {"dimensions": [3, 2], "ascii_repr": ""}}
    },
    "strategies_applied": [
        {"strategy_name": "point placement", "parent_id": 0, "timestamp": 0.5, "children": [1]},
        {"strategy_name": "factor", "parent_id": 0, "timestamp": 1.2, "children": [2, 3]}
    ],
    "final_specification": {
        "rules": "0 -> (1)\n1 -> ()",
        "rule_count": 2,
        "used_node_ids": [0, 1],
        "timestamp": 2.4
    }
}"#;

#[test]
fn first_snapshot_builds_tree_and_stats() {
    let snap = snapshot(FIRST_TICK);

    let stats = compute_stats(&snap);
    assert_eq!(stats.node_count, 2);
    assert_eq!(stats.strategy_count, 1);
    assert_eq!(stats.max_depth, 1);

    let tree = build_tree(&snap.nodes).expect("fixture snapshot is well formed");
    assert_eq!(tree.root(), 0);
    assert_eq!(tree.children_of(0), &[1]);
    assert_eq!(tree.reachable_count(), 2);

    let root = &snap.nodes[&0];
    assert_eq!(root.status(), NodeStatus::Root);
    assert_eq!(root.strategy(), None);
    assert_eq!(root.tiling.obstructions.len(), 1);
}

#[test]
fn growth_then_specification_drives_the_poll_loop() {
    let mut poll = PollState::new();
    poll.begin_search();

    // tick 1: first data arrives
    let first = snapshot(FIRST_TICK);
    let token = poll.issue(0.0);
    assert!(poll.accept(token));
    assert_eq!(classify_snapshot(0, &first), PollAction::Reload);
    let mut known = first.nodes.len();

    // tick 2: strictly more nodes, exactly one reload
    let second = snapshot(SECOND_TICK);
    let token = poll.issue(1.5);
    assert!(poll.accept(token));
    assert_eq!(classify_snapshot(known, &second), PollAction::Reload);
    known = second.nodes.len();
    assert_eq!(
        classify_snapshot(known, &second),
        PollAction::Skip,
        "reloading the same snapshot again must be a no-op"
    );

    // tick 3: specification present, reload once more and go idle
    let last = snapshot(FINAL_TICK);
    let token = poll.issue(3.0);
    assert!(poll.accept(token));
    assert_eq!(classify_snapshot(known, &last), PollAction::Complete);
    poll.complete();
    assert!(!poll.is_polling());
    assert!(
        !poll.should_issue(100.0, 1.5),
        "no further fetches after completion"
    );

    let spec = last.final_specification.as_ref().expect("spec captured");
    assert_eq!(spec.rule_count, 2);
    assert_eq!(spec.used_node_ids, vec![0, 1]);

    let used: Vec<u64> = last
        .nodes
        .values()
        .filter(|n| n.used_in_specification)
        .map(|n| n.id)
        .collect();
    assert_eq!(used, vec![0, 1]);
}

#[test]
fn second_snapshot_replaces_the_first_wholesale() {
    let first = snapshot(FIRST_TICK);
    let second = snapshot(SECOND_TICK);

    let tree = build_tree(&second.nodes).expect("well formed");
    assert_eq!(tree.children_of(0), &[1, 2]);
    assert_eq!(tree.children_of(2), &[3]);
    assert_eq!(tree.reachable_count(), 4);

    // nothing from the first snapshot leaks into the rebuilt hierarchy
    let stats = compute_stats(&second);
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.max_depth, 2);
    assert_ne!(stats.node_count, first.nodes.len());
}
