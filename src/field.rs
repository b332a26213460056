// The particle field owned by one mounted animation: surface size, the
// particles laid out for that size, and the last pointer position.
// Nothing here touches the DOM.

use crate::config::{FieldConfig, Layout};
use crate::particle::Particle;
use crate::physics;
use rand::Rng;
use vecmath::Vector2;

pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    pointer: Option<Vector2<f64>>,
}

impl ParticleField {
    pub fn new(config: FieldConfig) -> ParticleField {
        ParticleField {
            config,
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            pointer: None,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    // Last write wins; coordinates outside the surface are fine
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = Some([x, y]);
    }

    pub fn clear_pointer(&mut self) {
        self.pointer = None;
    }

    // Rebuilds every particle if the dimensions changed. Returns whether a
    // rebuild happened.
    pub fn resize(&mut self, width: f64, height: f64) -> bool {
        let mut rng = rand::thread_rng();
        self.resize_with(width, height, &mut rng)
    }

    pub fn resize_with<R: Rng>(&mut self, width: f64, height: f64, rng: &mut R) -> bool {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        let height = if height.is_finite() { height.max(0.0) } else { 0.0 };
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.rebuild(rng);
        true
    }

    fn rebuild<R: Rng>(&mut self, rng: &mut R) {
        self.particles.clear();
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        let positions = match self.config.layout {
            Layout::Scatter => scatter_positions(self.width, self.height, self.config.count, rng),
            Layout::Grid => grid_positions(self.width, self.height, self.config.spacing),
        };
        self.particles.reserve(positions.len());
        for (id, pos) in positions.into_iter().enumerate() {
            let size = sample(rng, self.config.size_min, self.config.size_max);
            let opacity = sample(rng, self.config.opacity_min, self.config.opacity_max);
            self.particles.push(Particle::at_rest(id, pos, size, opacity));
        }
    }

    pub fn tick(&mut self) {
        let pointer = self.pointer;
        let params = self.config.physics;
        for particle in &mut self.particles {
            physics::step(particle, pointer, &params, self.width, self.height);
        }
    }
}

// Uniform in [min, max); collapses to min for an empty range
fn sample<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen::<f64>() * (max - min) + min
    } else {
        min
    }
}

fn scatter_positions<R: Rng>(width: f64, height: f64, count: u32, rng: &mut R) -> Vec<Vector2<f64>> {
    (0..count)
        .map(|_| [rng.gen::<f64>() * width, rng.gen::<f64>() * height])
        .collect()
}

// Lattice points `spacing` apart, centered on the surface. Row-major, so a
// particle's id maps back to `(id / columns, id % columns)`.
pub fn grid_positions(width: f64, height: f64, spacing: f64) -> Vec<Vector2<f64>> {
    if !(spacing > 0.0) {
        return Vec::new();
    }
    let columns = (width / spacing).floor() as usize;
    let rows = (height / spacing).floor() as usize;
    if columns == 0 || rows == 0 {
        return Vec::new();
    }
    let offset_x = (width - (columns - 1) as f64 * spacing) / 2.0;
    let offset_y = (height - (rows - 1) as f64 * spacing) / 2.0;
    let mut positions = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            positions.push([
                offset_x + column as f64 * spacing,
                offset_y + row as f64 * spacing,
            ]);
        }
    }
    positions
}
