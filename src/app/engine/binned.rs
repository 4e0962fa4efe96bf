use eframe::egui::{Vec2, vec2};
use rand::Rng;

use super::particles::{BinSlot, Particle};
use super::scale::LinearScale;
use super::{Bounds, COLLIDE_RADIUS};

pub(super) const BIN_COUNT: usize = 18;
pub(super) const BASE_ROW_GAP: f32 = 14.0;
const COLUMN_OFFSET: f32 = COLLIDE_RADIUS * 2.6;
const FALLBACK_JITTER: f32 = 40.0;

pub(super) fn apply(
    particles: &mut [Particle],
    values: &[Option<f32>],
    bounds: Bounds,
    spacing_factor: f32,
    rng: &mut impl Rng,
) -> LinearScale {
    debug_assert_eq!(particles.len(), values.len());

    let numeric = values.iter().filter_map(|value| *value).collect::<Vec<_>>();
    let min = numeric.iter().copied().fold(f32::INFINITY, f32::min);
    let max = numeric.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let (min, max) = if numeric.is_empty() { (0.0, 1.0) } else { (min, max) };

    let scale = LinearScale::new((min, max), (bounds.left, bounds.right)).nice(10);
    let span = if (max - min).abs() <= f32::EPSILON {
        1.0
    } else {
        max - min
    };

    let mut bin_counts = [0usize; BIN_COUNT];
    let mut bins = vec![None::<usize>; particles.len()];
    for (index, value) in values.iter().enumerate() {
        let Some(value) = value else {
            continue;
        };
        let t = ((value - min) / span).clamp(0.0, 0.999_999);
        let bin = (t * BIN_COUNT as f32) as usize;
        bins[index] = Some(bin);
        bin_counts[bin] += 1;
    }

    let row_gap = BASE_ROW_GAP * spacing_factor;
    let max_rows = ((bounds.height() / row_gap).floor() as usize).max(1);
    let mid_y = bounds.mid_y();

    let mut bin_y_start = [0.0f32; BIN_COUNT];
    for (bin, count) in bin_counts.iter().enumerate() {
        let rows_in_bin = (*count).min(max_rows);
        let total_height = rows_in_bin.saturating_sub(1) as f32 * row_gap;
        bin_y_start[bin] = mid_y - total_height / 2.0;
    }

    let mut assigned = [0usize; BIN_COUNT];
    for (particle, bin) in particles.iter_mut().zip(&bins) {
        particle.vel = Vec2::ZERO;

        let Some(bin) = *bin else {
            particle.slot = None;
            particle.target = vec2(
                rng.random_range(bounds.left..=bounds.right),
                mid_y + rng.random_range(-FALLBACK_JITTER..=FALLBACK_JITTER),
            );
            continue;
        };

        let order = assigned[bin];
        assigned[bin] += 1;

        let columns = bin_counts[bin].div_ceil(max_rows).max(1);
        let column = order / max_rows;
        let row = order % max_rows;

        let bin_center_value = min + ((bin as f32 + 0.5) / BIN_COUNT as f32) * span;
        let column_shift = (column as f32 - (columns as f32 - 1.0) / 2.0) * COLUMN_OFFSET;

        let x = (scale.position(bin_center_value) + column_shift)
            .clamp(bounds.left + COLLIDE_RADIUS, bounds.right - COLLIDE_RADIUS);
        let y = (bin_y_start[bin] + row as f32 * row_gap)
            .clamp(bounds.top + COLLIDE_RADIUS, bounds.bottom - COLLIDE_RADIUS);

        particle.target = vec2(x, y);
        particle.slot = Some(BinSlot { bin, column, row });
    }

    scale
}
