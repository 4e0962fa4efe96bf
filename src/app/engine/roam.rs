use eframe::egui::{Vec2, vec2};
use rand::Rng;

use super::particles::Particle;
use super::{Bounds, COLLIDE_RADIUS};

const SPRING_STRENGTH: f32 = 0.06;
const VELOCITY_DECAY: f32 = 0.25;
const ALPHA_DECAY: f32 = 0.02;
const ALPHA_FLOOR: f32 = 0.001;
const REPULSION_STRENGTH: f32 = 6.0;
const REPULSION_SOFTENING: f32 = 40.0;

pub(super) const JITTER_PERIOD_SECS: f32 = 3.0;
pub(super) const JITTER_AMPLITUDE: f32 = 90.0;
pub(super) const JITTER_CHANCE: f64 = 0.5;
pub(super) const JITTER_ALPHA: f32 = 0.6;
pub(super) const HOVER_ALPHA: f32 = 0.3;

pub(super) struct RoamSim {
    pub(super) alpha: f32,
    jitter_clock: f32,
    active: bool,
}

impl RoamSim {
    pub(super) fn new() -> Self {
        Self {
            alpha: 0.0,
            jitter_clock: 0.0,
            active: false,
        }
    }

    pub(super) fn restart(&mut self) {
        self.alpha = 1.0;
        self.jitter_clock = 0.0;
        self.active = true;
    }

    pub(super) fn stop(&mut self) {
        self.active = false;
    }

    pub(super) fn is_active(&self) -> bool {
        self.active
    }

    pub(super) fn reenergize(&mut self, alpha: f32) {
        if self.active {
            self.alpha = self.alpha.max(alpha);
        }
    }
}

pub(super) fn step(sim: &mut RoamSim, particles: &mut [Particle], bounds: Bounds, dt: f32) {
    if !sim.is_active() || particles.is_empty() {
        return;
    }

    let time_scale = (dt * 60.0).clamp(0.25, 3.0);
    sim.alpha *= (1.0 - ALPHA_DECAY).powf(time_scale);
    if sim.alpha < ALPHA_FLOOR {
        sim.alpha = 0.0;
    }

    let min_distance = COLLIDE_RADIUS * 2.0;
    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let delta = particles[i].pos - particles[j].pos;
            let distance_sq = delta.length_sq();
            let distance = distance_sq.sqrt();
            let direction = if distance > 0.0001 {
                delta / distance
            } else {
                let angle = ((i as f32) * 0.618_034 + (j as f32) * 0.414_214)
                    * std::f32::consts::TAU;
                vec2(angle.cos(), angle.sin())
            };

            let repulsion =
                (REPULSION_STRENGTH * sim.alpha) / (distance_sq + REPULSION_SOFTENING);
            particles[i].vel += direction * repulsion;
            particles[j].vel -= direction * repulsion;

            if distance < min_distance {
                let push = (min_distance - distance) * 0.5;
                particles[i].vel += direction * push;
                particles[j].vel -= direction * push;
            }
        }
    }

    let damping = (1.0 - VELOCITY_DECAY).powf(time_scale);
    for particle in particles.iter_mut() {
        let spring = (particle.target - particle.pos) * (SPRING_STRENGTH * sim.alpha);
        particle.vel = (particle.vel + spring) * damping;
        particle.pos = bounds.clamp(particle.pos + particle.vel * time_scale);
    }
}

pub(super) fn tick_jitter(
    sim: &mut RoamSim,
    particles: &mut [Particle],
    bounds: Bounds,
    dt: f32,
    rng: &mut impl Rng,
) {
    if !sim.is_active() {
        return;
    }

    sim.jitter_clock += dt;
    while sim.jitter_clock >= JITTER_PERIOD_SECS {
        sim.jitter_clock -= JITTER_PERIOD_SECS;

        for particle in particles.iter_mut() {
            if rng.random_bool(JITTER_CHANCE) {
                let nudge = vec2(
                    rng.random_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE),
                    rng.random_range(-JITTER_AMPLITUDE..=JITTER_AMPLITUDE),
                );
                particle.target = bounds.clamp(particle.target + nudge);
            }
        }

        sim.reenergize(JITTER_ALPHA);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::super::tests::{bounds_800x520, roam_particles};
    use super::*;

    #[test]
    fn positions_stay_inside_bounds_after_many_ticks() {
        let bounds = bounds_800x520();
        let mut rng = StdRng::seed_from_u64(5);
        let mut particles = roam_particles(80, bounds, &mut rng);
        let mut sim = RoamSim::new();
        sim.restart();

        for _ in 0..300 {
            step(&mut sim, &mut particles, bounds, 1.0 / 60.0);
        }

        for particle in &particles {
            assert!(bounds.contains(particle.pos), "escaped: {:?}", particle.pos);
        }
    }

    #[test]
    fn relaxation_pulls_toward_targets() {
        let bounds = bounds_800x520();
        let mut rng = StdRng::seed_from_u64(11);
        let mut particles = roam_particles(2, bounds, &mut rng);
        particles[0].pos = vec2(100.0, 100.0);
        particles[0].target = vec2(600.0, 400.0);
        particles[1].pos = vec2(700.0, 80.0);
        particles[1].target = vec2(700.0, 80.0);

        let mut sim = RoamSim::new();
        sim.restart();
        let start_distance = (particles[0].target - particles[0].pos).length();
        for _ in 0..120 {
            step(&mut sim, &mut particles, bounds, 1.0 / 60.0);
        }
        let end_distance = (particles[0].target - particles[0].pos).length();
        assert!(end_distance < start_distance * 0.5);
    }

    #[test]
    fn jitter_moves_targets_but_keeps_them_bounded() {
        let bounds = bounds_800x520();
        let mut rng = StdRng::seed_from_u64(23);
        let mut particles = roam_particles(60, bounds, &mut rng);
        let initial_targets = particles.iter().map(|p| p.target).collect::<Vec<_>>();

        let mut sim = RoamSim::new();
        sim.restart();
        sim.alpha = 0.01;
        tick_jitter(
            &mut sim,
            &mut particles,
            bounds,
            JITTER_PERIOD_SECS,
            &mut rng,
        );

        let moved = particles
            .iter()
            .zip(&initial_targets)
            .filter(|(particle, initial)| particle.target != **initial)
            .count();
        assert!(moved > 0, "at least one target should wander");
        for particle in &particles {
            assert!(bounds.contains(particle.target));
        }
        assert!(sim.alpha >= JITTER_ALPHA, "jitter re-energizes the sim");
    }

    #[test]
    fn stopped_sim_never_writes_positions() {
        let bounds = bounds_800x520();
        let mut rng = StdRng::seed_from_u64(31);
        let mut particles = roam_particles(10, bounds, &mut rng);
        let mut sim = RoamSim::new();
        sim.restart();
        sim.stop();

        let before = particles.iter().map(|p| (p.pos, p.target)).collect::<Vec<_>>();
        step(&mut sim, &mut particles, bounds, 1.0 / 30.0);
        tick_jitter(&mut sim, &mut particles, bounds, 10.0, &mut rng);
        let after = particles.iter().map(|p| (p.pos, p.target)).collect::<Vec<_>>();
        assert_eq!(before, after);
    }
}
