use std::f32::consts::TAU;

use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Shape, Stroke, vec2};

use crate::data::{DataRow, Schema, radar_metrics, wellbeing_score};

use super::super::render_utils::wellbeing_color;

const RADAR_RADIUS: f32 = 90.0;
const LABEL_RADIUS: f32 = RADAR_RADIUS + 16.0;

pub(super) fn draw_radar_overlay(painter: &Painter, center: Pos2, row: &DataRow, schema: &Schema) {
    let color = wellbeing_color(wellbeing_score(row, schema));
    let metrics = radar_metrics(row, schema);

    let spoke = |index: usize, radius: f32| {
        let angle = (index as f32 / metrics.len() as f32) * TAU - TAU / 4.0;
        center + vec2(angle.cos(), angle.sin()) * radius
    };

    painter.circle(
        center,
        RADAR_RADIUS + 12.0,
        Color32::from_rgba_unmultiplied(255, 255, 255, 245),
        Stroke::new(1.6, Color32::from_rgba_unmultiplied(0, 0, 0, 20)),
    );
    for ring in 1..=4 {
        painter.circle_stroke(
            center,
            (RADAR_RADIUS / 4.0) * ring as f32,
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(68, 68, 68, 36)),
        );
    }
    for index in 0..metrics.len() {
        painter.line_segment(
            [center, spoke(index, RADAR_RADIUS)],
            Stroke::new(1.0, Color32::from_rgba_unmultiplied(68, 68, 68, 41)),
        );
    }

    let points = metrics
        .iter()
        .enumerate()
        .map(|(index, metric)| spoke(index, metric.value * RADAR_RADIUS))
        .collect::<Vec<_>>();
    painter.add(Shape::convex_polygon(
        points,
        color.gamma_multiply(0.3),
        Stroke::new(2.2, color),
    ));

    for (index, metric) in metrics.iter().enumerate() {
        painter.text(
            spoke(index, LABEL_RADIUS),
            Align2::CENTER_CENTER,
            metric.label,
            FontId::proportional(10.5),
            Color32::from_rgb(34, 34, 34),
        );
    }
}
