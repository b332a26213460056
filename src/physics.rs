// Per-tick particle update shared by the scattered field and the hero grid.
// One tick is one frame: explicit Euler with no delta time.

use crate::config::PhysicsParams;
use crate::particle::Particle;
use vecmath::Vector2;

// Impulse pushing a particle away from the pointer, or `None` when the
// pointer is out of range or sitting exactly on the particle.
pub fn repulsion(
    pos: Vector2<f64>,
    pointer: Vector2<f64>,
    params: &PhysicsParams,
) -> Option<Vector2<f64>> {
    let away = vecmath::vec2_sub(pos, pointer);
    let distance = vecmath::vec2_len(away);
    // Also false for NaN
    if !(distance > 0.0 && distance < params.proximity_radius) {
        return None;
    }
    let strength = (params.proximity_radius - distance) / params.proximity_radius;
    Some(vecmath::vec2_scale(
        away,
        strength * params.dispersion_force / distance,
    ))
}

// Linear spring back towards the rest position.
pub fn spring(pos: Vector2<f64>, rest: Vector2<f64>, return_force: f64) -> Vector2<f64> {
    vecmath::vec2_scale(vecmath::vec2_sub(rest, pos), return_force)
}

pub fn clamp_to_bounds(pos: Vector2<f64>, width: f64, height: f64) -> Vector2<f64> {
    [pos[0].max(0.0).min(width), pos[1].max(0.0).min(height)]
}

pub fn step(
    particle: &mut Particle,
    pointer: Option<Vector2<f64>>,
    params: &PhysicsParams,
    width: f64,
    height: f64,
) {
    if let Some(push) = pointer.and_then(|pointer| repulsion(particle.pos, pointer, params)) {
        particle.vel = vecmath::vec2_add(particle.vel, push);
    }
    particle.vel = vecmath::vec2_add(
        particle.vel,
        spring(particle.pos, particle.rest, params.return_force),
    );
    particle.vel = vecmath::vec2_scale(particle.vel, params.friction);
    particle.pos = vecmath::vec2_add(particle.pos, particle.vel);
    particle.pos = clamp_to_bounds(particle.pos, width, height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FieldConfig;

    fn params() -> PhysicsParams {
        FieldConfig::scatter().physics
    }

    fn displaced(rest: Vector2<f64>, offset: Vector2<f64>) -> Particle {
        let mut p = Particle::at_rest(0, rest, 2.0, 0.5);
        p.pos = vecmath::vec2_add(rest, offset);
        p
    }

    #[test]
    fn repulsion_points_away_from_pointer() {
        let params = params();
        let pointer = [250.0, 250.0];
        for &offset in &[
            [10.0, 0.0],
            [-30.0, 5.0],
            [0.5, -80.0],
            [60.0, 60.0],
            [-0.001, 0.001],
        ] {
            let pos = vecmath::vec2_add(pointer, offset);
            let push = repulsion(pos, pointer, &params).expect("inside radius");
            assert!(vecmath::vec2_dot(push, offset) > 0.0);
        }
    }

    #[test]
    fn repulsion_fades_with_distance() {
        let params = params();
        let near = repulsion([10.0, 0.0], [0.0, 0.0], &params).unwrap();
        let far = repulsion([100.0, 0.0], [0.0, 0.0], &params).unwrap();
        assert!(vecmath::vec2_len(near) > vecmath::vec2_len(far));
        let expected = (120.0 - 10.0) / 120.0 * 0.8;
        assert!((vecmath::vec2_len(near) - expected).abs() < 1e-12);
    }

    #[test]
    fn no_repulsion_outside_radius() {
        let params = params();
        assert_eq!(repulsion([120.0, 0.0], [0.0, 0.0], &params), None);
        assert_eq!(repulsion([500.0, 500.0], [0.0, 0.0], &params), None);
        assert_eq!(repulsion([1.0, 1.0], [f64::NAN, 0.0], &params), None);
    }

    #[test]
    fn pointer_on_particle_only_applies_spring() {
        let params = params();
        let mut p = displaced([100.0, 100.0], [3.0, -4.0]);
        p.vel = [0.5, 0.25];
        let pointer = p.pos;

        let expected_vel = vecmath::vec2_scale(
            vecmath::vec2_add(p.vel, spring(p.pos, p.rest, params.return_force)),
            params.friction,
        );
        step(&mut p, Some(pointer), &params, 500.0, 500.0);

        assert_eq!(p.vel, expected_vel);
        assert!(p.pos[0].is_finite() && p.pos[1].is_finite());
    }

    #[test]
    fn settles_back_to_rest_without_pointer() {
        let params = params();
        let mut p = displaced([250.0, 250.0], [80.0, -60.0]);
        let mut window_peaks = Vec::new();
        for _ in 0..5 {
            let mut peak: f64 = 0.0;
            for _ in 0..200 {
                step(&mut p, None, &params, 500.0, 500.0);
                peak = peak.max(p.distance_to_rest());
            }
            window_peaks.push(peak);
        }
        for pair in window_peaks.windows(2) {
            assert!(pair[1] < pair[0], "{:?}", window_peaks);
        }
        assert!(p.distance_to_rest() < 1e-6);
    }

    #[test]
    fn stays_inside_bounds_for_any_pointer() {
        let params = FieldConfig::hero_grid().physics;
        let mut p = displaced([1.0, 499.0], [0.0, 0.0]);
        let pointers = [
            [-50.0, 520.0],
            [1.0, 499.0],
            [-1.0e6, 1.0e6],
            [2.0, 498.0],
            [0.0, 0.0],
            [f64::NAN, f64::INFINITY],
        ];
        for tick in 0..600 {
            let pointer = pointers[tick % pointers.len()];
            step(&mut p, Some(pointer), &params, 500.0, 500.0);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 500.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 500.0);
        }
    }

    #[test]
    fn clamp_pins_to_edges() {
        assert_eq!(clamp_to_bounds([-3.0, 12.0], 10.0, 10.0), [0.0, 10.0]);
        assert_eq!(clamp_to_bounds([4.0, 5.0], 10.0, 10.0), [4.0, 5.0]);
    }
}
