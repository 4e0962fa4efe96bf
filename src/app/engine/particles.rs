use eframe::egui::{Color32, Vec2};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::{DataRow, Schema, severity_score};

use super::super::render_utils::severity_color;
use super::Bounds;

pub(in crate::app) const SAMPLE_CAP: usize = 250;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) struct BinSlot {
    pub(in crate::app) bin: usize,
    pub(in crate::app) column: usize,
    pub(in crate::app) row: usize,
}

pub(in crate::app) struct Particle {
    pub(in crate::app) id: usize,
    pub(in crate::app) row: usize,
    pub(in crate::app) color: Color32,
    pub(in crate::app) pos: Vec2,
    pub(in crate::app) target: Vec2,
    pub(in crate::app) vel: Vec2,
    pub(in crate::app) slot: Option<BinSlot>,
}

pub(super) fn build_particles(
    rows: &[DataRow],
    schema: &Schema,
    sample_cap: usize,
    bounds: Bounds,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let mut order = (0..rows.len()).collect::<Vec<_>>();
    order.shuffle(rng);
    order.truncate(sample_cap);

    order
        .into_iter()
        .enumerate()
        .map(|(id, row_index)| {
            let target = bounds.random_point(rng);
            Particle {
                id,
                row: row_index,
                color: severity_color(severity_score(&rows[row_index], schema)),
                pos: target,
                target,
                vel: Vec2::ZERO,
                slot: None,
            }
        })
        .collect()
}
