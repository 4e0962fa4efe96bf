use eframe::egui::{
    Align2, Color32, FontId, Id, Painter, Pos2, Rect, Sense, Stroke, Ui, pos2, vec2,
};

use crate::util::format_tick;

use super::super::ViewModel;
use super::super::engine::{Bounds, LayoutEngine, MetricAxis, PAD};
use super::super::render_utils::{blend_color, ramp_color};
use super::overlay::draw_radar_overlay;

const HOVER_HIT_RADIUS: f32 = 16.0;
const HOVER_SCALE: f32 = 1.25;
const DIM_OPACITY: f32 = 0.15;
const HOVER_FADE_SECS: f32 = 0.18;
const SPACING_WHEEL_STEP: f32 = 0.12;

const BACKGROUND: Color32 = Color32::from_rgb(248, 244, 236);
const INK: Color32 = Color32::from_rgb(43, 33, 22);

const LEGEND_LEVELS: [(&str, f32); 3] = [("Low", 0.18), ("Moderate", 0.50), ("High", 0.85)];

impl ViewModel {
    pub(in crate::app) fn draw_canvas(&mut self, ui: &mut Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, BACKGROUND);

        if self.engine.is_none() {
            self.engine = Some(LayoutEngine::new(
                self.rows.clone(),
                self.schema.clone(),
                rect.width(),
                rect.height(),
                &mut self.rng,
            ));
        }
        let Some(engine) = &mut self.engine else {
            return;
        };

        if engine.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No data rows in the survey file.",
                FontId::proportional(15.0),
                INK,
            );
            return;
        }

        engine.set_surface_width(rect.width(), &mut self.rng);

        let dt = ui.input(|input| input.stable_dt).min(0.1);
        engine.update(dt, &mut self.rng);

        if response.hovered() && engine.mode().is_sorted() {
            let scroll = ui.input(|input| input.raw_scroll_delta.y);
            if scroll.abs() > f32::EPSILON {
                let direction = if scroll > 0.0 { 1.0 } else { -1.0 };
                engine.adjust_spacing(direction * SPACING_WHEEL_STEP, &mut self.rng);
            }
        }

        let pointer = if response.hovered() {
            ui.input(|input| input.pointer.hover_pos())
        } else {
            None
        };
        let hit = pointer.and_then(|pointer| {
            engine
                .particles()
                .iter()
                .filter_map(|particle| {
                    let distance = (rect.min + particle.pos).distance(pointer);
                    (distance <= HOVER_HIT_RADIUS).then_some((particle.id, distance))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(id, _)| id)
        });
        engine.set_hover(hit);

        let focus = engine.hovered();
        let dim_target = if focus.is_some() { DIM_OPACITY } else { 1.0 };
        let dim = ui
            .ctx()
            .animate_value_with_time(Id::new("avatar_dim"), dim_target, HOVER_FADE_SECS);

        if let Some(axis) = engine.axis() {
            draw_metric_axis(&painter, rect, engine.bounds(), axis);
        }
        draw_legend(&painter, rect, engine.bounds());

        for particle in engine.particles() {
            if focus != Some(particle.id) {
                draw_walker(&painter, rect.min + particle.pos, 1.0, particle.color, dim);
            }
        }
        if let Some(id) = focus
            && let Some(particle) = engine.particle(id)
        {
            draw_walker(
                &painter,
                rect.min + particle.pos,
                HOVER_SCALE,
                particle.color,
                1.0,
            );
        }

        if let Some((id, anchor)) = engine.overlay_anchor()
            && let Some(particle) = engine.particle(id)
        {
            draw_radar_overlay(
                &painter,
                rect.min + anchor,
                engine.row_for(particle),
                engine.schema(),
            );
        }

        if engine.is_animating() {
            ui.ctx().request_repaint();
        }
    }
}

fn draw_walker(painter: &Painter, origin: Pos2, scale: f32, color: Color32, opacity: f32) {
    let s = 0.92 * scale;
    let color = color.gamma_multiply(opacity);
    let head_stroke = blend_color(color, Color32::from_rgb(51, 51, 51).gamma_multiply(opacity), 0.35);
    let stroke = Stroke::new(2.4 * s, color);
    let at = |x: f32, y: f32| origin + vec2(x * s, y * s);

    painter.circle(at(0.0, -20.0), 8.0 * s, color, Stroke::new(2.4 * s, head_stroke));
    painter.line_segment([at(0.0, -12.0), at(0.0, 18.0)], stroke);
    painter.line_segment([at(0.0, -2.0), at(-11.0, 8.0)], stroke);
    painter.line_segment([at(0.0, -2.0), at(11.0, 8.0)], stroke);
    painter.line_segment([at(0.0, 18.0), at(-9.0, 30.0)], stroke);
    painter.line_segment([at(0.0, 18.0), at(9.0, 30.0)], stroke);
}

fn draw_metric_axis(painter: &Painter, rect: Rect, bounds: Bounds, axis: &MetricAxis) {
    let y = rect.top() + bounds.bottom + PAD - 24.0;
    let (r0, r1) = axis.scale.range();
    let faint = Color32::from_rgba_unmultiplied(0, 0, 0, 90);

    painter.line_segment(
        [pos2(rect.left() + r0, y), pos2(rect.left() + r1, y)],
        Stroke::new(1.0, faint),
    );
    for tick in axis.scale.ticks(6) {
        let x = rect.left() + axis.scale.position(tick);
        painter.line_segment([pos2(x, y), pos2(x, y + 4.0)], Stroke::new(1.0, faint));
        painter.text(
            pos2(x, y + 6.0),
            Align2::CENTER_TOP,
            format_tick(tick),
            FontId::proportional(11.0),
            INK,
        );
    }
    painter.text(
        pos2(rect.left() + (r0 + r1) / 2.0, y - 10.0),
        Align2::CENTER_BOTTOM,
        axis.label,
        FontId::proportional(12.0),
        INK,
    );
}

fn draw_legend(painter: &Painter, rect: Rect, bounds: Bounds) {
    let origin = pos2(
        rect.left() + PAD + 6.0,
        rect.top() + bounds.bottom + PAD - 80.0,
    );
    painter.text(
        origin,
        Align2::LEFT_BOTTOM,
        "Stick figure color = combined severity",
        FontId::proportional(11.0),
        INK,
    );

    for (index, (label, t)) in LEGEND_LEVELS.into_iter().enumerate() {
        let y = origin.y + 16.0 + (index as f32 * 18.0);
        painter.circle(
            pos2(origin.x + 6.0, y - 4.0),
            6.0,
            ramp_color(1.0 - t),
            Stroke::new(0.8, Color32::from_gray(51)),
        );
        painter.text(
            pos2(origin.x + 18.0, y - 4.0),
            Align2::LEFT_CENTER,
            format!("{label} severity"),
            FontId::proportional(10.5),
            INK,
        );
    }
}
