//! Dashboard application.
//!
//! Layout:
//! ┌──────────────────────────────────┬───────────────┐
//! │ Toolbar: controls, stats, status │               │
//! ├──────────────────────────────────┤  Node Details │
//! │ Tabs: Search Tree | Timeline |   │  Tiling       │
//! │       Specification | Activity   │               │
//! └──────────────────────────────────┴───────────────┘
//!
//! All network work runs on a tokio runtime owned by the app; each request
//! completes into an `Arc<Mutex<Option<Result<..>>>>` slot that the UI
//! thread drains at the top of every frame.

use std::sync::{Arc, Mutex};

use eframe::egui;
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::{ApiError, TreeError};
use crate::modals::{ConfirmStopModal, ConfirmStopResult, PatternPromptModal, PatternPromptResult};
use crate::model::SearchSnapshot;
use crate::panels::{self, ToolbarAction};
use crate::poll::{classify_snapshot, PollAction, PollState, SearchPhase};
use crate::timeline_view::TimelineView;
use crate::tree::{build_tree, compute_stats, SearchStats, SearchTree};
use crate::tree_view::TreeView;

type Pending<T> = Arc<Mutex<Option<Result<T, String>>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    SearchTree,
    Timeline,
    Specification,
    Activity,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::SearchTree, Tab::Timeline, Tab::Specification, Tab::Activity];

    fn label(self) -> &'static str {
        match self {
            Tab::SearchTree => "Search Tree",
            Tab::Timeline => "Timeline",
            Tab::Specification => "Specification",
            Tab::Activity => "Activity",
        }
    }
}

/// Main application state.
pub struct DashboardApp {
    // API client
    api: ApiClient,
    poll_interval_secs: f64,

    // Current snapshot and what is derived from it
    snapshot: Option<SearchSnapshot>,
    tree: Option<Result<SearchTree, TreeError>>,
    stats: SearchStats,
    selected_node: Option<u64>,

    // Views
    tree_view: TreeView,
    timeline_view: TimelineView,
    active_tab: Tab,

    // Modal dialogs
    pattern_prompt: PatternPromptModal,
    confirm_stop: ConfirmStopModal,

    // Search control + polling
    poll: PollState,
    status: String,
    loading: bool,
    server_stopped: bool,

    // Async result holders
    pending_initial: Option<Pending<SearchSnapshot>>,
    pending_poll: Option<(u64, Pending<SearchSnapshot>)>,
    pending_start: Option<Pending<()>>,
    // bool is true for pause, false for resume
    pending_pause: Option<(bool, Pending<()>)>,
    pending_stop: Option<Pending<()>>,

    runtime: Arc<tokio::runtime::Runtime>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, base_url: &str, poll_interval_ms: u64) -> Self {
        let runtime = Arc::new(
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Failed to create tokio runtime"),
        );

        let mut app = Self {
            api: ApiClient::new(base_url),
            poll_interval_secs: poll_interval_ms as f64 / 1000.0,
            snapshot: None,
            tree: None,
            stats: SearchStats::default(),
            selected_node: None,
            tree_view: TreeView::new(),
            timeline_view: TimelineView::new(),
            active_tab: Tab::default(),
            pattern_prompt: PatternPromptModal::new(),
            confirm_stop: ConfirmStopModal::new(),
            poll: PollState::new(),
            status: String::new(),
            loading: false,
            server_stopped: false,
            pending_initial: None,
            pending_poll: None,
            pending_start: None,
            pending_pause: None,
            pending_stop: None,
            runtime,
        };

        app.load_initial();
        app
    }

    // =========================================================================
    // API CALLS
    // =========================================================================

    fn spawn_request<T, F>(&self, fut: F) -> Pending<T>
    where
        T: Send + 'static,
        F: std::future::Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let slot: Pending<T> = Arc::new(Mutex::new(None));
        let out = slot.clone();
        self.runtime.spawn(async move {
            let res = fut.await.map_err(|e| e.to_string());
            *out.lock().unwrap() = Some(res);
        });
        slot
    }

    /// One-shot snapshot request at startup. Absence of data is non-fatal.
    fn load_initial(&mut self) {
        self.loading = true;
        self.status = "Loading visualization data...".to_string();
        let api = self.api.clone();
        self.pending_initial = Some(self.spawn_request(async move { api.fetch_snapshot().await }));
    }

    fn start_search(&mut self, pattern: String) {
        info!(pattern = %pattern, "starting search");
        self.status = format!("Starting search for pattern {pattern}...");
        let api = self.api.clone();
        self.pending_start =
            Some(self.spawn_request(async move { api.start_search(&pattern).await }));
    }

    fn toggle_pause(&mut self) {
        if self.pending_pause.is_some() {
            return;
        }
        let api = self.api.clone();
        match self.poll.phase() {
            SearchPhase::Running => {
                self.pending_pause =
                    Some((true, self.spawn_request(async move { api.pause_search().await })));
            }
            SearchPhase::Paused => {
                self.pending_pause =
                    Some((false, self.spawn_request(async move { api.resume_search().await })));
            }
            SearchPhase::Idle => {}
        }
    }

    fn request_stop(&mut self) {
        self.status = "Stopping search process...".to_string();
        let api = self.api.clone();
        self.pending_stop = Some(self.spawn_request(async move { api.stop_server().await }));
    }

    // =========================================================================
    // ASYNC RESULT HANDLING
    // =========================================================================

    fn check_pending_requests(&mut self) {
        if let Some(slot) = self.pending_initial.take() {
            match slot.try_lock().ok().and_then(|mut g| g.take()) {
                Some(Ok(snapshot)) => {
                    self.load_snapshot(snapshot);
                    self.status = "Snapshot loaded".to_string();
                    self.loading = false;
                }
                Some(Err(e)) => {
                    info!(error = %e, "no snapshot available at startup");
                    self.status = "No data yet - start a search to begin".to_string();
                    self.loading = false;
                }
                None => self.pending_initial = Some(slot),
            }
        }

        if let Some(slot) = self.pending_start.take() {
            match slot.try_lock().ok().and_then(|mut g| g.take()) {
                Some(Ok(())) => {
                    info!("search started; polling for updates");
                    self.status = "Search started - polling for updates...".to_string();
                    self.poll.begin_search();
                }
                Some(Err(e)) => {
                    warn!(error = %e, "failed to start search");
                    self.status = format!("Error: failed to start search: {e}");
                    self.poll.teardown();
                }
                None => self.pending_start = Some(slot),
            }
        }

        if let Some((pausing, slot)) = self.pending_pause.take() {
            match slot.try_lock().ok().and_then(|mut g| g.take()) {
                Some(Ok(())) => {
                    if pausing {
                        self.poll.pause_acknowledged();
                        self.status = "Search paused".to_string();
                    } else {
                        self.poll.resume_acknowledged();
                        self.status = "Search resumed".to_string();
                    }
                }
                Some(Err(e)) => {
                    // state deliberately unchanged; next click retries
                    warn!(error = %e, pausing, "pause/resume request failed");
                }
                None => self.pending_pause = Some((pausing, slot)),
            }
        }

        if let Some(slot) = self.pending_stop.take() {
            match slot.try_lock().ok().and_then(|mut g| g.take()) {
                Some(Ok(())) => {
                    info!("search process stopped");
                    self.status = "Search process stopped".to_string();
                    self.server_stopped = true;
                    self.teardown();
                }
                Some(Err(e)) => {
                    warn!(error = %e, "failed to stop search process");
                    self.status = format!("Failed to stop search process: {e}");
                }
                None => self.pending_stop = Some(slot),
            }
        }

        if let Some((token, slot)) = self.pending_poll.take() {
            match slot.try_lock().ok().and_then(|mut g| g.take()) {
                Some(result) => {
                    if self.poll.accept(token) {
                        match result {
                            Ok(snapshot) => self.handle_poll_snapshot(snapshot),
                            Err(e) => {
                                warn!(error = %e, "poll fetch failed; retrying on next tick");
                            }
                        }
                    } else {
                        debug!(token, "dropping stale poll response");
                    }
                }
                None => self.pending_poll = Some((token, slot)),
            }
        }
    }

    fn handle_poll_snapshot(&mut self, snapshot: SearchSnapshot) {
        let known = self.snapshot.as_ref().map_or(0, |s| s.nodes.len());
        match classify_snapshot(known, &snapshot) {
            PollAction::Reload => {
                let count = snapshot.nodes.len();
                self.load_snapshot(snapshot);
                self.status = format!("Search update: {count} nodes explored");
            }
            PollAction::Complete => {
                // load once more so the specification is captured
                self.load_snapshot(snapshot);
                self.status = "Search completed - specification found!".to_string();
                self.poll.complete();
                info!("search completed; polling stopped");
            }
            PollAction::Skip => {}
        }
    }

    // =========================================================================
    // SNAPSHOT LIFECYCLE
    // =========================================================================

    /// Replace the current snapshot wholesale and rebuild everything derived
    /// from it. Loading the same snapshot twice yields the same state.
    fn load_snapshot(&mut self, snapshot: SearchSnapshot) {
        self.stats = compute_stats(&snapshot);
        let tree = build_tree(&snapshot.nodes);
        if let Err(e) = &tree {
            warn!(error = %e, "snapshot failed validation");
        }
        self.tree = Some(tree);
        self.tree_view.invalidate();

        if let Some(id) = self.selected_node {
            if !snapshot.nodes.contains_key(&id) {
                self.selected_node = None;
            }
        }
        self.snapshot = Some(snapshot);
        self.status = "Visualization ready".to_string();
    }

    /// Explicit teardown: cancels polling and forgets outstanding requests.
    /// Called on completion, stop, and window close.
    pub fn teardown(&mut self) {
        self.poll.teardown();
        self.pending_initial = None;
        self.pending_poll = None;
        self.pending_start = None;
        self.pending_pause = None;
    }

    fn has_pending(&self) -> bool {
        self.pending_initial.is_some()
            || self.pending_poll.is_some()
            || self.pending_start.is_some()
            || self.pending_pause.is_some()
            || self.pending_stop.is_some()
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_pending_requests();

        if self.server_stopped {
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.35);
                    ui.heading("Search Process Stopped");
                    ui.label("The search process has been shut down.");
                    ui.label("You can close this window.");
                });
            });
            return;
        }

        // Poll tick: at most one request in flight, stale responses dropped
        let now = ctx.input(|i| i.time);
        if self.pending_poll.is_none() && self.poll.should_issue(now, self.poll_interval_secs) {
            let token = self.poll.issue(now);
            let api = self.api.clone();
            let slot = self.spawn_request(async move { api.fetch_snapshot_fresh().await });
            self.pending_poll = Some((token, slot));
            debug!(token, "poll tick issued");
        }

        // Keep frames coming while anything is outstanding
        if self.loading
            || self.has_pending()
            || self.poll.is_polling()
            || self.pattern_prompt.is_open()
            || self.confirm_stop.is_open()
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(200));
        }

        // Modals (before the main UI so they appear on top)
        match self.pattern_prompt.ui(ctx) {
            PatternPromptResult::Submitted(pattern) => self.start_search(pattern),
            PatternPromptResult::Cancelled => {
                self.status = "Search start cancelled".to_string();
            }
            PatternPromptResult::None => {}
        }
        match self.confirm_stop.ui(ctx) {
            ConfirmStopResult::Confirmed => self.request_stop(),
            ConfirmStopResult::Cancelled | ConfirmStopResult::None => {}
        }

        // =====================================================================
        // TOP PANEL - controls, stats, status
        // =====================================================================
        let mut action = ToolbarAction::None;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            action = panels::toolbar_ui(
                ui,
                self.poll.phase(),
                &self.stats,
                &self.status,
                self.loading || self.pending_start.is_some() || self.pending_stop.is_some(),
            );
        });
        match action {
            ToolbarAction::OpenStartForm => self.pattern_prompt.open(),
            ToolbarAction::TogglePause => self.toggle_pause(),
            ToolbarAction::RequestStop => self.confirm_stop.open(),
            ToolbarAction::None => {}
        }

        // =====================================================================
        // RIGHT PANEL - node details + tiling
        // =====================================================================
        egui::SidePanel::right("details")
            .default_width(300.0)
            .show(ctx, |ui| {
                let node = self
                    .selected_node
                    .and_then(|id| self.snapshot.as_ref().and_then(|s| s.nodes.get(&id)));
                panels::node_details_ui(ui, node);
                ui.add_space(16.0);
                panels::tiling_ui(ui, node);
            });

        // =====================================================================
        // CENTRAL PANEL - tabbed views
        // =====================================================================
        let mut clicked_node: Option<u64> = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::ALL {
                    if ui
                        .selectable_label(self.active_tab == tab, tab.label())
                        .clicked()
                    {
                        self.active_tab = tab;
                    }
                }
            });
            ui.separator();

            match self.active_tab {
                Tab::SearchTree => match (self.snapshot.as_ref(), self.tree.as_ref()) {
                    (Some(snapshot), Some(tree)) => {
                        clicked_node =
                            self.tree_view.ui(ui, snapshot, tree, self.selected_node);
                    }
                    _ => {
                        ui.centered_and_justified(|ui| {
                            ui.label("No data yet - start a search to begin");
                        });
                    }
                },
                Tab::Timeline => match self.snapshot.as_ref() {
                    Some(snapshot) => self.timeline_view.ui(ui, &snapshot.strategies_applied),
                    None => {
                        ui.centered_and_justified(|ui| {
                            ui.label("No data yet - start a search to begin");
                        });
                    }
                },
                Tab::Specification => {
                    let spec = self
                        .snapshot
                        .as_ref()
                        .and_then(|s| s.final_specification.as_ref());
                    panels::specification_ui(ui, spec);
                }
                Tab::Activity => {
                    let updates = self
                        .snapshot
                        .as_ref()
                        .map(|s| s.status_updates.as_slice())
                        .unwrap_or(&[]);
                    panels::activity_log_ui(ui, updates);
                }
            }
        });

        if let Some(id) = clicked_node {
            debug!(node = id, "node selected");
            self.selected_node = Some(id);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.teardown();
        info!("dashboard teardown complete");
    }
}
