//! Snapshot-to-hierarchy transform and summary statistics.
//!
//! The backend emits a flat id → node mapping; the views need a rooted
//! tree. The tree is rebuilt from scratch on every load — no incremental
//! update — by single-pass grouping on `parent_id`. Nodes whose parent is
//! missing from the mapping are dropped from the hierarchy along with
//! their descendants; a missing root or a cyclic parent chain is a
//! structured error rather than a silently partial render.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::TreeError;
use crate::model::{SearchNode, SearchSnapshot, ROOT_ID};

/// Rooted hierarchy over the snapshot's node mapping.
///
/// Holds adjacency only; node payloads stay in the snapshot. Children are
/// in ascending-id order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTree {
    children: BTreeMap<u64, Vec<u64>>,
}

impl SearchTree {
    pub fn root(&self) -> u64 {
        ROOT_ID
    }

    pub fn children_of(&self, id: u64) -> &[u64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids reachable from the root, parents before children.
    pub fn preorder(&self) -> Vec<u64> {
        let mut out = Vec::with_capacity(self.children.len());
        let mut stack = vec![ROOT_ID];
        while let Some(id) = stack.pop() {
            out.push(id);
            // reversed so the first child is visited first
            for &child in self.children_of(id).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Number of nodes reachable from the root.
    pub fn reachable_count(&self) -> usize {
        self.preorder().len()
    }
}

/// Build the hierarchy from the flat node mapping.
///
/// The node with id 0 is the root unconditionally; a `parent_id` on the
/// root itself is ignored when attaching children.
pub fn build_tree(nodes: &BTreeMap<u64, SearchNode>) -> Result<SearchTree, TreeError> {
    if !nodes.contains_key(&ROOT_ID) {
        return Err(TreeError::MissingRoot);
    }
    if let Some(node_id) = find_parent_cycle(nodes) {
        return Err(TreeError::CycleDetected { node_id });
    }

    let mut children: BTreeMap<u64, Vec<u64>> = BTreeMap::new();
    for (&id, node) in nodes {
        if id == ROOT_ID {
            continue;
        }
        match node.parent_id {
            Some(parent) if nodes.contains_key(&parent) => {
                children.entry(parent).or_default().push(id);
            }
            Some(parent) => {
                debug!(node = id, parent, "dropping orphan node: parent not in snapshot");
            }
            None => {
                debug!(node = id, "dropping orphan node: no parent and not the root");
            }
        }
    }

    Ok(SearchTree { children })
}

/// Walk every parent chain looking for a revisit before the chain
/// terminates (at the root, at a parentless node, or at a dangling
/// reference). Returns a node on the cycle if one exists.
fn find_parent_cycle(nodes: &BTreeMap<u64, SearchNode>) -> Option<u64> {
    use std::collections::HashSet;

    let mut cleared: HashSet<u64> = HashSet::new();
    let mut path: Vec<u64> = Vec::new();

    for &start in nodes.keys() {
        if cleared.contains(&start) {
            continue;
        }
        path.clear();
        let mut current = start;
        loop {
            if current == ROOT_ID || cleared.contains(&current) {
                break;
            }
            if path.contains(&current) {
                return Some(current);
            }
            path.push(current);
            match nodes.get(&current).and_then(|n| n.parent_id) {
                Some(parent) if nodes.contains_key(&parent) => current = parent,
                // dangling or absent parent terminates the chain
                _ => break,
            }
        }
        cleared.extend(path.iter().copied());
    }
    None
}

/// Summary numbers shown in the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub node_count: usize,
    pub strategy_count: usize,
    pub max_depth: u32,
}

pub fn compute_stats(snapshot: &SearchSnapshot) -> SearchStats {
    SearchStats {
        node_count: snapshot.nodes.len(),
        strategy_count: snapshot.strategies_applied.len(),
        max_depth: snapshot.nodes.values().map(|n| n.level).max().unwrap_or(0),
    }
}
