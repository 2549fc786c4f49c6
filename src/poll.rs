//! Search control state machine and poll-tick decision logic.
//!
//! The remote search is driven through four control requests; the dashboard
//! itself only ever transitions between Idle, Running and Paused. Polling
//! runs in Running *and* Paused — pausing affects the remote search, not
//! the dashboard. Responses carry a request token so a slow response from
//! an earlier tick can never clobber a newer one.

use crate::model::SearchSnapshot;

/// Dashboard-side view of the remote search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

impl SearchPhase {
    /// Polling is active in both non-idle phases.
    pub fn is_active(self) -> bool {
        matches!(self, SearchPhase::Running | SearchPhase::Paused)
    }
}

/// What a poll response means for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollAction {
    /// Nothing new; wait for the next tick.
    Skip,
    /// The search grew: reload views and report progress.
    Reload,
    /// A final specification exists: reload once more, then go Idle and
    /// stop polling.
    Complete,
}

/// Pure decision for one poll response, given how many nodes the dashboard
/// currently knows about.
pub fn classify_snapshot(known_nodes: usize, snapshot: &SearchSnapshot) -> PollAction {
    if snapshot.final_specification.is_some() {
        PollAction::Complete
    } else if snapshot.nodes.len() > known_nodes {
        PollAction::Reload
    } else {
        PollAction::Skip
    }
}

/// Polling bookkeeping: phase, cadence, and the stale-response guard.
#[derive(Debug, Default)]
pub struct PollState {
    phase: SearchPhase,
    next_token: u64,
    latest_token: Option<u64>,
    in_flight: bool,
    last_issue_time: Option<f64>,
}

impl PollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn is_polling(&self) -> bool {
        self.phase.is_active()
    }

    /// Idle → Running, entered when a start request succeeds.
    pub fn begin_search(&mut self) {
        self.phase = SearchPhase::Running;
        self.in_flight = false;
        self.latest_token = None;
        self.last_issue_time = None;
    }

    /// Running → Paused. No-op unless currently Running.
    pub fn pause_acknowledged(&mut self) {
        if self.phase == SearchPhase::Running {
            self.phase = SearchPhase::Paused;
        }
    }

    /// Paused → Running. No-op unless currently Paused.
    pub fn resume_acknowledged(&mut self) {
        if self.phase == SearchPhase::Paused {
            self.phase = SearchPhase::Running;
        }
    }

    /// Search finished (specification captured): back to Idle, polling off.
    pub fn complete(&mut self) {
        self.teardown();
    }

    /// Explicit teardown: clears the polling timer and all request state.
    /// Safe from any phase; used on completion, stop, and app exit.
    pub fn teardown(&mut self) {
        self.phase = SearchPhase::Idle;
        self.in_flight = false;
        self.latest_token = None;
        self.last_issue_time = None;
    }

    /// Whether a new poll request should be issued at time `now` (seconds).
    /// At most one request is in flight at a time.
    pub fn should_issue(&self, now: f64, interval_secs: f64) -> bool {
        self.is_polling()
            && !self.in_flight
            && self
                .last_issue_time
                .map_or(true, |t| now - t >= interval_secs)
    }

    /// Record a newly issued request and return its token.
    pub fn issue(&mut self, now: f64) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        self.latest_token = Some(token);
        self.in_flight = true;
        self.last_issue_time = Some(now);
        token
    }

    /// Record a response arrival. Returns true when the response belongs to
    /// the most recent request issued; stale responses must be dropped.
    pub fn accept(&mut self, token: u64) -> bool {
        if self.latest_token == Some(token) {
            self.in_flight = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FinalSpecification, SearchNode, Tiling};
    use std::collections::BTreeMap;

    fn snapshot_with_nodes(count: u64) -> SearchSnapshot {
        let nodes: BTreeMap<u64, SearchNode> = (0..count)
            .map(|id| {
                (
                    id,
                    SearchNode {
                        id,
                        parent_id: if id == 0 { None } else { Some(0) },
                        level: u32::from(id != 0),
                        strategy_applied: None,
                        timestamp: 0.0,
                        is_root: id == 0,
                        is_verified: false,
                        is_expanded: false,
                        used_in_specification: false,
                        tiling: Tiling::default(),
                    },
                )
            })
            .collect();
        SearchSnapshot {
            nodes,
            ..Default::default()
        }
    }

    #[test]
    fn growth_triggers_reload() {
        let snapshot = snapshot_with_nodes(3);
        assert_eq!(classify_snapshot(2, &snapshot), PollAction::Reload);
    }

    #[test]
    fn unchanged_count_is_skipped() {
        let snapshot = snapshot_with_nodes(3);
        assert_eq!(classify_snapshot(3, &snapshot), PollAction::Skip);
        assert_eq!(classify_snapshot(4, &snapshot), PollAction::Skip);
    }

    #[test]
    fn specification_completes_even_without_growth() {
        let mut snapshot = snapshot_with_nodes(3);
        snapshot.final_specification = Some(FinalSpecification {
            rules: "0 -> (1, 2)".to_string(),
            rule_count: 1,
            used_node_ids: vec![0, 1, 2],
            timestamp: 4.2,
        });
        assert_eq!(classify_snapshot(3, &snapshot), PollAction::Complete);
        assert_eq!(classify_snapshot(0, &snapshot), PollAction::Complete);
    }

    #[test]
    fn lifecycle_transitions() {
        let mut poll = PollState::new();
        assert_eq!(poll.phase(), SearchPhase::Idle);
        assert!(!poll.is_polling());

        poll.begin_search();
        assert_eq!(poll.phase(), SearchPhase::Running);

        poll.pause_acknowledged();
        assert_eq!(poll.phase(), SearchPhase::Paused);
        assert!(poll.is_polling(), "polling continues while paused");

        poll.resume_acknowledged();
        assert_eq!(poll.phase(), SearchPhase::Running);

        poll.complete();
        assert_eq!(poll.phase(), SearchPhase::Idle);
    }

    #[test]
    fn pause_only_applies_when_running() {
        let mut poll = PollState::new();
        poll.pause_acknowledged();
        assert_eq!(poll.phase(), SearchPhase::Idle);

        poll.begin_search();
        poll.resume_acknowledged();
        assert_eq!(poll.phase(), SearchPhase::Running);
    }

    #[test]
    fn issue_cadence_respects_interval_and_in_flight() {
        let mut poll = PollState::new();
        poll.begin_search();

        assert!(poll.should_issue(0.0, 1.5), "first tick fires immediately");
        let token = poll.issue(0.0);

        assert!(!poll.should_issue(10.0, 1.5), "in-flight request blocks new ticks");
        assert!(poll.accept(token));

        assert!(!poll.should_issue(1.0, 1.5), "interval not elapsed");
        assert!(poll.should_issue(1.6, 1.5));
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut poll = PollState::new();
        poll.begin_search();

        let old = poll.issue(0.0);
        // teardown + restart invalidates the outstanding request
        poll.teardown();
        poll.begin_search();
        let fresh = poll.issue(2.0);

        assert!(!poll.accept(old), "response from a previous search is stale");
        assert!(poll.accept(fresh));
    }

    #[test]
    fn idle_never_issues() {
        let poll = PollState::new();
        assert!(!poll.should_issue(100.0, 1.5));
    }

    #[test]
    fn teardown_clears_polling() {
        let mut poll = PollState::new();
        poll.begin_search();
        poll.issue(0.0);
        poll.teardown();
        assert!(!poll.is_polling());
        assert!(!poll.should_issue(100.0, 1.5));
    }
}
