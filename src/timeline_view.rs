//! Strategy application timeline: one point per application,
//! x = timestamp, y = number of children produced.

use egui::{Color32, FontId, Pos2, Rect, Sense, Stroke, Vec2};

use crate::model::StrategyApplication;

// Fixed margins around the plotting area
const MARGIN_TOP: f32 = 20.0;
const MARGIN_RIGHT: f32 = 30.0;
const MARGIN_BOTTOM: f32 = 40.0;
const MARGIN_LEFT: f32 = 50.0;

const POINT_RADIUS: f32 = 4.0;
const TICK_COUNT: usize = 5;

const TOOLTIP_FADE_IN: f32 = 0.2;
const TOOLTIP_FADE_OUT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TimelinePoint {
    pub timestamp: f64,
    pub strategy: String,
    pub children: usize,
}

pub(crate) fn collect_points(strategies: &[StrategyApplication]) -> Vec<TimelinePoint> {
    strategies
        .iter()
        .map(|s| TimelinePoint {
            timestamp: s.timestamp,
            strategy: s.strategy_name.clone(),
            children: s.children.len(),
        })
        .collect()
}

/// x domain is [min, max] timestamp, y domain is [0, max children].
/// A degenerate x domain is widened so a single event still renders.
pub(crate) fn domains(points: &[TimelinePoint]) -> ((f64, f64), (f64, f64)) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_max = 0.0_f64;
    for p in points {
        x_min = x_min.min(p.timestamp);
        x_max = x_max.max(p.timestamp);
        y_max = y_max.max(p.children as f64);
    }
    if !x_min.is_finite() {
        x_min = 0.0;
        x_max = 1.0;
    }
    if x_max - x_min < f64::EPSILON {
        x_max = x_min + 1.0;
    }
    ((x_min, x_max), (0.0, y_max.max(1.0)))
}

pub(crate) fn scale(domain: (f64, f64), range: (f32, f32), value: f64) -> f32 {
    let t = ((value - domain.0) / (domain.1 - domain.0)) as f32;
    range.0 + t * (range.1 - range.0)
}

pub struct TimelineView {
    hover: Option<(Pos2, String)>,
}

impl Default for TimelineView {
    fn default() -> Self {
        Self::new()
    }
}

impl TimelineView {
    pub fn new() -> Self {
        Self { hover: None }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, strategies: &[StrategyApplication]) {
        let points = collect_points(strategies);
        if points.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label("No strategy applications yet");
            });
            return;
        }

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;

        let plot = Rect::from_min_max(
            rect.min + Vec2::new(MARGIN_LEFT, MARGIN_TOP),
            rect.max - Vec2::new(MARGIN_RIGHT, MARGIN_BOTTOM),
        );
        if plot.width() < 1.0 || plot.height() < 1.0 {
            return;
        }

        let (x_domain, y_domain) = domains(&points);
        let x_range = (plot.left(), plot.right());
        // screen y grows downward
        let y_range = (plot.bottom(), plot.top());

        let axis_color = Color32::from_rgb(150, 150, 170);
        let axis_stroke = Stroke::new(1.0, axis_color);
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis_stroke);
        painter.line_segment([plot.left_top(), plot.left_bottom()], axis_stroke);

        // Ticks and numeric labels
        for i in 0..=TICK_COUNT {
            let f = i as f64 / TICK_COUNT as f64;

            let xv = x_domain.0 + f * (x_domain.1 - x_domain.0);
            let x = scale(x_domain, x_range, xv);
            painter.line_segment(
                [
                    Pos2::new(x, plot.bottom()),
                    Pos2::new(x, plot.bottom() + 4.0),
                ],
                axis_stroke,
            );
            painter.text(
                Pos2::new(x, plot.bottom() + 6.0),
                egui::Align2::CENTER_TOP,
                format!("{xv:.1}"),
                FontId::proportional(10.0),
                axis_color,
            );

            let yv = y_domain.0 + f * (y_domain.1 - y_domain.0);
            let y = scale(y_domain, y_range, yv);
            painter.line_segment(
                [Pos2::new(plot.left() - 4.0, y), Pos2::new(plot.left(), y)],
                axis_stroke,
            );
            painter.text(
                Pos2::new(plot.left() - 6.0, y),
                egui::Align2::RIGHT_CENTER,
                format!("{yv:.0}"),
                FontId::proportional(10.0),
                axis_color,
            );
        }

        // Axis titles
        painter.text(
            Pos2::new(plot.center().x, rect.bottom() - 4.0),
            egui::Align2::CENTER_BOTTOM,
            "Time (seconds)",
            FontId::proportional(12.0),
            axis_color,
        );
        let y_title = painter.layout_no_wrap(
            "Children Generated".to_string(),
            FontId::proportional(12.0),
            axis_color,
        );
        let y_title_pos = Pos2::new(
            rect.left() + 4.0,
            plot.center().y + y_title.size().x / 2.0,
        );
        painter.add(
            egui::epaint::TextShape::new(y_title_pos, y_title, axis_color)
                .with_angle(-std::f32::consts::FRAC_PI_2),
        );

        // Event points
        let pointer = response.hover_pos();
        let point_color = Color32::from_rgb(59, 130, 246);
        let mut hovered_now = false;

        for p in &points {
            let center = Pos2::new(
                scale(x_domain, x_range, p.timestamp),
                scale(y_domain, y_range, p.children as f64),
            );
            painter.circle_filled(center, POINT_RADIUS, point_color);

            if pointer.is_some_and(|ptr| ptr.distance(center) <= POINT_RADIUS + 3.0) {
                hovered_now = true;
                painter.circle_stroke(
                    center,
                    POINT_RADIUS + 2.0,
                    Stroke::new(1.5, Color32::WHITE),
                );
                self.hover = Some((
                    center,
                    format!(
                        "Strategy: {}\nChildren: {}\nTime: {:.3}s",
                        p.strategy, p.children, p.timestamp
                    ),
                ));
            }
        }

        self.draw_tooltip(ui, &painter, rect, hovered_now);
    }

    fn draw_tooltip(&mut self, ui: &egui::Ui, painter: &egui::Painter, rect: Rect, hovered: bool) {
        let target = if hovered { 1.0 } else { 0.0 };
        let fade = if hovered {
            TOOLTIP_FADE_IN
        } else {
            TOOLTIP_FADE_OUT
        };
        let alpha =
            ui.ctx()
                .animate_value_with_time(egui::Id::new("timeline_tooltip"), target, fade);

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
        let mut tip_rect =
            Rect::from_min_size(anchor + Vec2::new(10.0, -28.0), galley.size() + pad * 2.0);
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
