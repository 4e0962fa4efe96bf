mod binned;
mod particles;
mod roam;
mod scale;

use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::data::{DataRow, MetricKind, Schema, severity_score};

pub(in crate::app) use particles::{Particle, SAMPLE_CAP};
pub(in crate::app) use scale::LinearScale;

pub(in crate::app) const PAD: f32 = 18.0;
pub(in crate::app) const COLLIDE_RADIUS: f32 = 12.0;
pub(in crate::app) const MIN_SURFACE_HEIGHT: f32 = 520.0;
pub(in crate::app) const OVERLAY_MARGIN: f32 = 40.0;

const SORT_TRANSITION_SECS: f32 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct Bounds {
    pub(in crate::app) left: f32,
    pub(in crate::app) right: f32,
    pub(in crate::app) top: f32,
    pub(in crate::app) bottom: f32,
}

impl Bounds {
    pub(in crate::app) fn from_surface(width: f32, height: f32) -> Self {
        Self {
            left: PAD,
            right: (width - PAD).max(PAD + COLLIDE_RADIUS * 2.0),
            top: PAD,
            bottom: (height - PAD).max(PAD + COLLIDE_RADIUS * 2.0),
        }
    }

    pub(in crate::app) fn width(&self) -> f32 {
        self.right - self.left
    }

    pub(in crate::app) fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub(in crate::app) fn mid_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }

    pub(in crate::app) fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    pub(in crate::app) fn clamp(&self, point: Vec2) -> Vec2 {
        vec2(
            point.x.clamp(self.left, self.right),
            point.y.clamp(self.top, self.bottom),
        )
    }

    fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        vec2(
            rng.random_range(self.left..=self.right),
            rng.random_range(self.top..=self.bottom),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum LayoutMode {
    Roam,
    Sleep,
    Exercise,
    Severity,
}

impl LayoutMode {
    pub(in crate::app) const ALL: [LayoutMode; 4] =
        [Self::Roam, Self::Sleep, Self::Exercise, Self::Severity];

    pub(in crate::app) fn label(self) -> &'static str {
        match self {
            Self::Roam => "Roam",
            Self::Sleep => "Sleep",
            Self::Exercise => "Exercise",
            Self::Severity => "Severity",
        }
    }

    pub(in crate::app) fn is_sorted(self) -> bool {
        self != Self::Roam
    }

    fn axis_label(self) -> &'static str {
        match self {
            Self::Roam => "",
            Self::Sleep => "Sleep (hours)",
            Self::Exercise => "Exercise (hours/week)",
            Self::Severity => "Combined severity (0-10)",
        }
    }
}

pub(in crate::app) struct MetricAxis {
    pub(in crate::app) scale: LinearScale,
    pub(in crate::app) label: &'static str,
}

struct Transition {
    elapsed: f32,
    from: Vec<Vec2>,
}

pub(in crate::app) struct LayoutEngine {
    rows: Vec<DataRow>,
    schema: Schema,
    particles: Vec<Particle>,
    bounds: Bounds,
    mode: LayoutMode,
    spacing_factor: f32,
    hovered: Option<usize>,
    sim: roam::RoamSim,
    transition: Option<Transition>,
    axis: Option<MetricAxis>,
}

impl LayoutEngine {
    pub(in crate::app) fn new(
        rows: Vec<DataRow>,
        schema: Schema,
        surface_width: f32,
        surface_height: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let bounds = Bounds::from_surface(surface_width, surface_height.max(MIN_SURFACE_HEIGHT));
        let particles = particles::build_particles(&rows, &schema, SAMPLE_CAP, bounds, rng);

        let mut engine = Self {
            rows,
            schema,
            particles,
            bounds,
            mode: LayoutMode::Roam,
            spacing_factor: 1.0,
            hovered: None,
            sim: roam::RoamSim::new(),
            transition: None,
            axis: None,
        };
        engine.set_mode(LayoutMode::Roam, rng);
        engine
    }

    pub(in crate::app) fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(in crate::app) fn particle(&self, id: usize) -> Option<&Particle> {
        self.particles.iter().find(|particle| particle.id == id)
    }

    pub(in crate::app) fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub(in crate::app) fn row_for(&self, particle: &Particle) -> &DataRow {
        &self.rows[particle.row]
    }

    pub(in crate::app) fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(in crate::app) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(in crate::app) fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub(in crate::app) fn spacing_factor(&self) -> f32 {
        self.spacing_factor
    }

    pub(in crate::app) fn axis(&self) -> Option<&MetricAxis> {
        self.axis.as_ref()
    }

    pub(in crate::app) fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub(in crate::app) fn is_animating(&self) -> bool {
        (self.mode == LayoutMode::Roam && self.sim.is_active()) || self.transition.is_some()
    }

    pub(in crate::app) fn overlay_anchor(&self) -> Option<(usize, Vec2)> {
        let id = self.hovered?;
        let particle = self.particle(id)?;
        let anchor = vec2(
            particle
                .pos
                .x
                .clamp(OVERLAY_MARGIN, self.bounds.right + PAD - OVERLAY_MARGIN),
            particle
                .pos
                .y
                .clamp(OVERLAY_MARGIN, self.bounds.bottom + PAD - OVERLAY_MARGIN),
        );
        Some((id, anchor))
    }

    pub(in crate::app) fn set_mode(&mut self, mode: LayoutMode, rng: &mut impl Rng) {
        self.mode = mode;
        self.axis = None;
        self.transition = None;

        if mode == LayoutMode::Roam {
            for particle in &mut self.particles {
                particle.target = self.bounds.random_point(rng);
                particle.slot = None;
            }
            self.sim.restart();
        } else {
            self.sim.stop();
            self.relayout_sorted(rng);
        }
    }

    pub(in crate::app) fn update(&mut self, dt: f32, rng: &mut impl Rng) {
        if self.mode == LayoutMode::Roam {
            roam::tick_jitter(&mut self.sim, &mut self.particles, self.bounds, dt, rng);
            roam::step(&mut self.sim, &mut self.particles, self.bounds, dt);
            return;
        }

        let Some(transition) = &mut self.transition else {
            return;
        };
        transition.elapsed += dt;
        let t = (transition.elapsed / SORT_TRANSITION_SECS).min(1.0);
        let eased = 1.0 - (1.0 - t).powi(3);
        for (particle, from) in self.particles.iter_mut().zip(&transition.from) {
            particle.pos = *from + (particle.target - *from) * eased;
        }
        if t >= 1.0 {
            for particle in &mut self.particles {
                particle.pos = particle.target;
            }
            self.transition = None;
        }
    }

    pub(in crate::app) fn set_hover(&mut self, id: Option<usize>) {
        let id = id.filter(|id| self.particle(*id).is_some());
        if id == self.hovered {
            return;
        }
        self.hovered = id;
        if self.mode == LayoutMode::Roam {
            self.sim.reenergize(roam::HOVER_ALPHA);
        }
    }

    pub(in crate::app) fn adjust_spacing(&mut self, delta: f32, rng: &mut impl Rng) {
        if !self.mode.is_sorted() {
            return;
        }
        let next = (self.spacing_factor + delta).clamp(0.5, 3.0);
        if (next - self.spacing_factor).abs() <= f32::EPSILON {
            return;
        }
        self.spacing_factor = next;
        self.relayout_sorted(rng);
    }

    pub(in crate::app) fn set_surface_width(&mut self, width: f32, rng: &mut impl Rng) {
        let next = Bounds::from_surface(width, self.bounds.bottom + PAD);
        if (next.right - self.bounds.right).abs() < 0.5 {
            return;
        }
        self.bounds.right = next.right;

        if self.mode == LayoutMode::Roam {
            for particle in &mut self.particles {
                particle.target = self.bounds.clamp(particle.target);
                particle.pos = self.bounds.clamp(particle.pos);
            }
        } else {
            self.relayout_sorted(rng);
        }
    }

    fn metric_value(&self, particle: &Particle) -> Option<f32> {
        let row = &self.rows[particle.row];
        match self.mode {
            LayoutMode::Roam => None,
            LayoutMode::Sleep => self.schema.value(row, MetricKind::Sleep),
            LayoutMode::Exercise => self.schema.value(row, MetricKind::Exercise),
            LayoutMode::Severity => Some(severity_score(row, &self.schema)),
        }
    }

    fn relayout_sorted(&mut self, rng: &mut impl Rng) {
        let values = self
            .particles
            .iter()
            .map(|particle| self.metric_value(particle))
            .collect::<Vec<_>>();
        let from = self.particles.iter().map(|particle| particle.pos).collect();

        let scale = binned::apply(
            &mut self.particles,
            &values,
            self.bounds,
            self.spacing_factor,
            rng,
        );
        self.axis = Some(MetricAxis {
            scale,
            label: self.mode.axis_label(),
        });
        self.transition = Some(Transition { elapsed: 0.0, from });
    }
}

#[cfg(test)]
pub(super) mod tests {
    use std::collections::HashMap;

    use eframe::egui::Color32;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    pub(super) fn bounds_800x520() -> Bounds {
        Bounds::from_surface(800.0, 520.0)
    }

    pub(super) fn sample_rows(count: usize) -> Vec<DataRow> {
        (0..count)
            .map(|index| {
                let fields = [
                    ("sleep_hours", format!("{}", 3 + index % 7)),
                    ("exercise_hours", format!("{}", index % 12)),
                    ("stress", format!("{}", index % 11)),
                    ("anxiety", format!("{}", (index * 3) % 11)),
                    ("depression", format!("{}", (index * 7) % 11)),
                ]
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect::<HashMap<_, _>>();
                DataRow::new(fields)
            })
            .collect()
    }

    pub(super) fn roam_particles(
        count: usize,
        bounds: Bounds,
        rng: &mut impl Rng,
    ) -> Vec<Particle> {
        (0..count)
            .map(|id| {
                let target = bounds.random_point(rng);
                Particle {
                    id,
                    row: id,
                    color: Color32::GRAY,
                    pos: target,
                    target,
                    vel: Vec2::ZERO,
                    slot: None,
                }
            })
            .collect()
    }

    fn engine_with(rows: usize) -> (LayoutEngine, StdRng) {
        let rows = sample_rows(rows);
        let schema = Schema::resolve(&rows);
        let mut rng = StdRng::seed_from_u64(17);
        let engine = LayoutEngine::new(rows, schema, 800.0, 520.0, &mut rng);
        (engine, rng)
    }

    #[test]
    fn hover_is_exclusive_and_clears_on_none() {
        let (mut engine, _) = engine_with(10);

        engine.set_hover(Some(3));
        assert_eq!(engine.hovered(), Some(3));
        engine.set_hover(Some(7));
        assert_eq!(engine.hovered(), Some(7));
        engine.set_hover(None);
        assert_eq!(engine.hovered(), None);

        engine.set_hover(Some(999));
        assert_eq!(engine.hovered(), None);
    }

    #[test]
    fn sorted_transition_settles_on_layout_positions() {
        let (mut engine, mut rng) = engine_with(60);
        engine.set_mode(LayoutMode::Sleep, &mut rng);

        engine.update(0.2, &mut rng);
        engine.update(1.0, &mut rng);

        for particle in engine.particles() {
            assert_eq!(particle.pos, particle.target);
            assert!(engine.bounds().contains(particle.pos));
        }
        assert!(engine.axis().is_some());
    }

    #[test]
    fn roam_entry_randomizes_targets_and_restarts_the_sim() {
        let (mut engine, mut rng) = engine_with(40);
        engine.set_mode(LayoutMode::Severity, &mut rng);
        engine.update(1.0, &mut rng);
        let sorted_positions = engine
            .particles()
            .iter()
            .map(|particle| particle.pos)
            .collect::<Vec<_>>();

        engine.set_mode(LayoutMode::Roam, &mut rng);
        assert!(engine.axis().is_none());
        for _ in 0..120 {
            engine.update(1.0 / 60.0, &mut rng);
        }

        let moved = engine
            .particles()
            .iter()
            .zip(&sorted_positions)
            .filter(|(particle, before)| particle.pos != **before)
            .count();
        assert!(moved > 0);
        for particle in engine.particles() {
            assert!(engine.bounds().contains(particle.pos));
        }
    }

    #[test]
    fn shrinking_width_reclamps_without_touching_height() {
        let (mut engine, mut rng) = engine_with(80);
        let bottom_before = engine.bounds().bottom;

        engine.set_surface_width(400.0, &mut rng);
        assert_eq!(engine.bounds().bottom, bottom_before);
        assert_eq!(engine.bounds().right, 400.0 - PAD);
        for particle in engine.particles() {
            assert!(engine.bounds().contains(particle.target));
            assert!(engine.bounds().contains(particle.pos));
        }
    }

    #[test]
    fn shrinking_width_in_sorted_mode_recomputes_the_layout() {
        let (mut engine, mut rng) = engine_with(80);
        engine.set_mode(LayoutMode::Severity, &mut rng);
        engine.update(1.0, &mut rng);

        engine.set_surface_width(500.0, &mut rng);
        engine.update(1.0, &mut rng);
        for particle in engine.particles() {
            assert!(engine.bounds().contains(particle.pos));
        }
        let (_, r1) = engine.axis().unwrap().scale.range();
        assert_eq!(r1, 500.0 - PAD);
    }

    #[test]
    fn spacing_gesture_is_ignored_while_roaming_and_clamped_when_sorted() {
        let (mut engine, mut rng) = engine_with(40);
        engine.adjust_spacing(0.5, &mut rng);
        assert_eq!(engine.spacing_factor(), 1.0);

        engine.set_mode(LayoutMode::Sleep, &mut rng);
        for _ in 0..40 {
            engine.adjust_spacing(0.12, &mut rng);
        }
        assert_eq!(engine.spacing_factor(), 3.0);
        for _ in 0..40 {
            engine.adjust_spacing(-0.12, &mut rng);
        }
        assert_eq!(engine.spacing_factor(), 0.5);
    }

    #[test]
    fn missing_exercise_alias_degrades_to_fallback_placement() {
        let rows = (0..20)
            .map(|index| {
                let fields = [("sleep_hours", format!("{}", 4 + index % 5))]
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value))
                    .collect::<HashMap<_, _>>();
                DataRow::new(fields)
            })
            .collect::<Vec<_>>();
        let schema = Schema::resolve(&rows);
        let mut rng = StdRng::seed_from_u64(71);
        let mut engine = LayoutEngine::new(rows, schema, 800.0, 520.0, &mut rng);

        engine.set_mode(LayoutMode::Exercise, &mut rng);
        engine.update(1.0, &mut rng);

        assert!(engine.axis().is_some(), "axis renders a degenerate domain");
        for particle in engine.particles() {
            assert_eq!(particle.slot, None);
            assert!(engine.bounds().contains(particle.pos));
        }
    }

    #[test]
    fn empty_dataset_reports_no_particles() {
        let mut rng = StdRng::seed_from_u64(1);
        let engine = LayoutEngine::new(Vec::new(), Schema::resolve(&[]), 800.0, 520.0, &mut rng);
        assert!(engine.is_empty());
    }

    #[test]
    fn overlay_anchor_is_pulled_inside_the_surface() {
        let (mut engine, mut rng) = engine_with(10);
        engine.set_mode(LayoutMode::Sleep, &mut rng);
        engine.update(1.0, &mut rng);

        let id = engine.particles()[0].id;
        engine.set_hover(Some(id));
        let (anchor_id, anchor) = engine.overlay_anchor().unwrap();
        assert_eq!(anchor_id, id);
        assert!(anchor.x >= OVERLAY_MARGIN);
        assert!(anchor.y >= OVERLAY_MARGIN);
        assert!(anchor.x <= engine.bounds().right + PAD - OVERLAY_MARGIN);
        assert!(anchor.y <= engine.bounds().bottom + PAD - OVERLAY_MARGIN);
    }
}
