// Simple particle struct to keep track of individual rest position,
// position, velocity, size and opacity

use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub rest: Vector2<f64>,
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub opacity: f64,
}

impl Particle {
    // Anything further than this from rest counts as dispersed
    pub const DISPERSED_THRESHOLD: f64 = 1.0;

    pub fn at_rest(id: usize, pos: Vector2<f64>, size: f64, opacity: f64) -> Particle {
        Particle {
            id,
            rest: pos,
            pos,
            vel: [0.0, 0.0],
            size,
            opacity,
        }
    }

    pub fn distance_to_rest(&self) -> f64 {
        vecmath::vec2_len(vecmath::vec2_sub(self.pos, self.rest))
    }

    pub fn is_dispersed(&self) -> bool {
        let offset = vecmath::vec2_sub(self.pos, self.rest);
        offset[0].abs() > Particle::DISPERSED_THRESHOLD
            || offset[1].abs() > Particle::DISPERSED_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest_without_velocity() {
        let p = Particle::at_rest(3, [10.0, 20.0], 2.0, 0.5);
        assert_eq!(p.pos, p.rest);
        assert_eq!(p.vel, [0.0, 0.0]);
        assert_eq!(p.distance_to_rest(), 0.0);
        assert!(!p.is_dispersed());
    }

    #[test]
    fn dispersed_once_either_axis_leaves_threshold() {
        let mut p = Particle::at_rest(0, [0.0, 0.0], 1.0, 1.0);
        p.pos = [0.9, -0.9];
        assert!(!p.is_dispersed());
        p.pos = [0.0, -1.5];
        assert!(p.is_dispersed());
    }
}
