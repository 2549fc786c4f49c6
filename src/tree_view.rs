//! Search tree visualization with pan/zoom.
//!
//! Top-to-bottom node-link diagram: x positions come from leaf-slot
//! counting within subtrees, y from depth below the root. The pan/zoom
//! transform lives on the view and survives snapshot reloads, so the
//! viewport does not reset while a search is streaming in.

use std::collections::HashMap;

use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::error::TreeError;
use crate::model::{NodeStatus, SearchSnapshot};
use crate::tree::SearchTree;

const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 3.0;
const NODE_RADIUS: f32 = 8.0;
const MARGIN: Vec2 = Vec2::new(50.0, 50.0);
/// Used when the container reports no size.
const FALLBACK_SIZE: Vec2 = Vec2::new(800.0, 600.0);
/// Link strategy labels appear from this zoom level up.
const EDGE_LABEL_ZOOM: f32 = 1.2;

/// Tooltip fade times, seconds.
const TOOLTIP_FADE_IN: f32 = 0.2;
const TOOLTIP_FADE_OUT: f32 = 0.5;

pub struct TreeView {
    offset: Vec2,
    zoom: f32,

    // Layout cache, rebuilt when the snapshot or the container changes
    positions: HashMap<u64, Pos2>,
    layout_size: Vec2,

    // Last hovered node, kept around while the tooltip fades out
    hover: Option<(Pos2, String)>,
}

impl Default for TreeView {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeView {
    pub fn new() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            positions: HashMap::new(),
            layout_size: Vec2::ZERO,
            hover: None,
        }
    }

    /// Drop the cached layout. The pan/zoom transform is deliberately
    /// retained.
    pub fn invalidate(&mut self) {
        self.positions.clear();
        self.layout_size = Vec2::ZERO;
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub(crate) fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub(crate) fn apply_scroll_zoom(&mut self, scroll_y: f32) {
        if scroll_y != 0.0 {
            let factor = 1.0 + scroll_y * 0.001;
            self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    /// Render the tree. Returns the node clicked this frame, if any.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        snapshot: &SearchSnapshot,
        tree: &Result<SearchTree, TreeError>,
        selected: Option<u64>,
    ) -> Option<u64> {
        let tree = match tree {
            Ok(tree) => tree,
            Err(err) => {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(
                        Color32::from_rgb(239, 68, 68),
                        format!("Cannot render search tree: {err}"),
                    );
                });
                return None;
            }
        };

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        let mut size = rect.size();
        if size.x < 1.0 || size.y < 1.0 {
            size = FALLBACK_SIZE;
        }
        let inner = (size - MARGIN * 2.0).max(Vec2::new(1.0, 1.0));

        if self.positions.is_empty() || (inner - self.layout_size).length() > 1.0 {
            self.positions = compute_layout(tree, inner);
            self.layout_size = inner;
        }

        // Pan/zoom input
        if response.dragged() {
            self.pan_by(response.drag_delta());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            self.apply_scroll_zoom(scroll);
        }

        let origin = rect.min + MARGIN;
        let transform = |pos: Pos2| -> Pos2 { origin + (pos.to_vec2() + self.offset) * self.zoom };

        // Links below nodes
        let link_stroke = Stroke::new(1.5 * self.zoom, Color32::from_rgb(100, 100, 100));
        let edge_labels: HashMap<u64, &str> = snapshot
            .edges
            .iter()
            .filter_map(|e| e.strategy.as_deref().map(|s| (e.child, s)))
            .collect();

        for &parent in self.positions.keys() {
            let Some(from) = self.positions.get(&parent).copied() else {
                continue;
            };
            for &child in tree.children_of(parent) {
                let Some(to) = self.positions.get(&child).copied() else {
                    continue;
                };
                let a = transform(from);
                let b = transform(to);
                painter.line_segment([a, b], link_stroke);

                if self.zoom >= EDGE_LABEL_ZOOM {
                    let label = edge_labels
                        .get(&child)
                        .copied()
                        .or_else(|| snapshot.nodes.get(&child).and_then(|n| n.strategy()));
                    if let Some(label) = label {
                        let mid = Pos2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
                        painter.text(
                            mid,
                            egui::Align2::CENTER_CENTER,
                            label,
                            FontId::proportional(9.0 * self.zoom),
                            Color32::GRAY,
                        );
                    }
                }
            }
        }

        // Nodes
        let pointer = response.hover_pos();
        let mut clicked: Option<u64> = None;
        let mut hovered_now = false;

        for id in tree.preorder() {
            let Some(node) = snapshot.nodes.get(&id) else {
                continue;
            };
            let Some(pos) = self.positions.get(&id).copied() else {
                continue;
            };
            let screen = transform(pos);
            let radius = NODE_RADIUS * self.zoom;

            let fill = node_fill(node.status());
            painter.circle_filled(screen, radius, fill);

            if node.used_in_specification {
                painter.circle_stroke(
                    screen,
                    radius + 3.0 * self.zoom,
                    Stroke::new(2.0 * self.zoom, Color32::from_rgb(139, 92, 246)),
                );
            }
            if selected == Some(id) {
                painter.circle_stroke(
                    screen,
                    radius + 1.5 * self.zoom,
                    Stroke::new(2.5 * self.zoom, Color32::WHITE),
                );
            }

            // Label above expanded nodes, below leaves
            if self.zoom >= 0.5 {
                let label_dy = if tree.children_of(id).is_empty() {
                    16.0
                } else {
                    -16.0
                };
                painter.text(
                    screen + Vec2::new(0.0, label_dy * self.zoom),
                    egui::Align2::CENTER_CENTER,
                    format!("Node {id}"),
                    FontId::proportional(11.0 * self.zoom),
                    Color32::from_rgb(200, 200, 200),
                );
            }

            let hit = pointer.is_some_and(|p| p.distance(screen) <= radius.max(6.0));
            if hit {
                hovered_now = true;
                self.hover = Some((
                    screen,
                    format!(
                        "Node {id}\nLevel: {}\nStrategy: {}\nStatus: {}",
                        node.level,
                        node.strategy().unwrap_or("None"),
                        node.status().as_str()
                    ),
                ));
                if response.clicked() {
                    clicked = Some(id);
                }
            }
        }

        self.draw_tooltip(ui, &painter, rect, hovered_now);

        painter.text(
            rect.left_bottom() + Vec2::new(10.0, -10.0),
            egui::Align2::LEFT_BOTTOM,
            format!(
                "Zoom: {:.0}%  |  Drag to pan, scroll to zoom",
                self.zoom * 100.0
            ),
            FontId::proportional(11.0),
            Color32::GRAY,
        );

        clicked
    }

    fn draw_tooltip(&mut self, ui: &egui::Ui, painter: &egui::Painter, rect: Rect, hovered: bool) {
        let target = if hovered { 1.0 } else { 0.0 };
        let fade = if hovered {
            TOOLTIP_FADE_IN
        } else {
            TOOLTIP_FADE_OUT
        };
        let alpha = ui
            .ctx()
            .animate_value_with_time(egui::Id::new("tree_view_tooltip"), target, fade);

        if alpha <= 0.01 {
            if !hovered {
                self.hover = None;
            }
            return;
        }
        let Some((anchor, text)) = self.hover.as_ref() else {
            return;
        };
        let anchor = *anchor;

        let galley = painter.layout_no_wrap(
            text.clone(),
            FontId::proportional(12.0),
            Color32::WHITE.gamma_multiply(alpha),
        );
        let pad = Vec2::new(8.0, 6.0);
        let mut tip_rect = Rect::from_min_size(
            anchor + Vec2::new(12.0, -28.0),
            galley.size() + pad * 2.0,
        );
        // keep the tooltip inside the canvas
        tip_rect = tip_rect.translate(Vec2::new(
            (rect.right() - tip_rect.right()).min(0.0),
            (rect.top() - tip_rect.top()).max(0.0),
        ));

        painter.rect_filled(
            tip_rect,
            4.0,
            Color32::from_rgb(20, 20, 28).gamma_multiply(alpha * 0.95),
        );
        painter.rect_stroke(
            tip_rect,
            4.0,
            Stroke::new(1.0, Color32::from_rgb(80, 80, 100).gamma_multiply(alpha)),
        );
        painter.galley(tip_rect.min + pad, galley, Color32::WHITE.gamma_multiply(alpha));
    }
}

fn node_fill(status: NodeStatus) -> Color32 {
    match status {
        NodeStatus::Root => Color32::from_rgb(245, 158, 11),     // Amber
        NodeStatus::Verified => Color32::from_rgb(34, 197, 94),  // Green
        NodeStatus::Expanded => Color32::from_rgb(59, 130, 246), // Blue
        NodeStatus::Active => Color32::from_rgb(107, 114, 128),  // Gray
    }
}

/// Tiered layout: leaves get successive x slots, inner nodes sit midway
/// over their children, y grows with depth. Positions span the given inner
/// size.
pub(crate) fn compute_layout(tree: &SearchTree, inner: Vec2) -> HashMap<u64, Pos2> {
    // (id, depth, x-slot) in leaf-slot units
    let mut slots: HashMap<u64, (usize, f32)> = HashMap::new();
    let mut next_leaf = 0.0_f32;
    let mut max_depth = 0usize;
    place(tree, tree.root(), 0, &mut next_leaf, &mut max_depth, &mut slots);

    let leaf_span = (next_leaf - 1.0).max(1.0);
    let depth_span = max_depth.max(1) as f32;

    slots
        .into_iter()
        .map(|(id, (depth, slot))| {
            let x = if next_leaf <= 1.0 {
                inner.x / 2.0
            } else {
                slot / leaf_span * inner.x
            };
            let y = depth as f32 / depth_span * inner.y;
            (id, Pos2::new(x, y))
        })
        .collect()
}

fn place(
    tree: &SearchTree,
    id: u64,
    depth: usize,
    next_leaf: &mut f32,
    max_depth: &mut usize,
    slots: &mut HashMap<u64, (usize, f32)>,
) -> f32 {
    *max_depth = (*max_depth).max(depth);
    let children = tree.children_of(id);
    let x = if children.is_empty() {
        let x = *next_leaf;
        *next_leaf += 1.0;
        x
    } else {
        let mut first = f32::MAX;
        let mut last = f32::MIN;
        for &child in children {
            let cx = place(tree, child, depth + 1, next_leaf, max_depth, slots);
            first = first.min(cx);
            last = last.max(cx);
        }
        (first + last) / 2.0
    };
    slots.insert(id, (depth, x));
    x
}
