// Tunables for a particle field. Both structs are exported to JS so the
// page can tweak a preset before mounting.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    // Uniformly random rest positions, fixed count
    Scatter = 0,
    // Centered lattice, count follows the surface size
    Grid = 1,
}

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicsParams {
    pub proximity_radius: f64,
    pub dispersion_force: f64,
    pub return_force: f64,
    pub friction: f64,
}

#[wasm_bindgen]
impl PhysicsParams {
    #[wasm_bindgen(constructor)]
    pub fn new(
        proximity_radius: f64,
        dispersion_force: f64,
        return_force: f64,
        friction: f64,
    ) -> PhysicsParams {
        PhysicsParams {
            proximity_radius,
            dispersion_force,
            return_force,
            friction,
        }
    }
}

impl PhysicsParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.proximity_radius > 0.0 && self.proximity_radius.is_finite()) {
            return Err(format!(
                "proximity radius must be positive and finite, got {}",
                self.proximity_radius
            ));
        }
        if !(self.dispersion_force >= 0.0 && self.dispersion_force.is_finite()) {
            return Err(format!(
                "dispersion force must be finite and not negative, got {}",
                self.dispersion_force
            ));
        }
        if !(self.return_force >= 0.0 && self.return_force < 1.0) {
            return Err(format!(
                "return force must be in [0, 1), got {}",
                self.return_force
            ));
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(format!(
                "friction must be in (0, 1), got {}",
                self.friction
            ));
        }
        Ok(())
    }
}

#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub layout: Layout,
    pub count: u32,
    pub spacing: f64,
    pub physics: PhysicsParams,
    pub size_min: f64,
    pub size_max: f64,
    pub opacity_min: f64,
    pub opacity_max: f64,
}

#[wasm_bindgen]
impl FieldConfig {
    pub fn scatter() -> FieldConfig {
        FieldConfig {
            layout: Layout::Scatter,
            count: 150,
            spacing: 40.0,
            physics: PhysicsParams::new(120.0, 0.8, 0.02, 0.95),
            size_min: 1.0,
            size_max: 4.0,
            opacity_min: 0.2,
            opacity_max: 0.8,
        }
    }

    pub fn hero_grid() -> FieldConfig {
        FieldConfig {
            layout: Layout::Grid,
            count: 0,
            spacing: 40.0,
            physics: PhysicsParams::new(100.0, 1.5, 0.1, 0.8),
            size_min: 3.0,
            size_max: 3.0,
            opacity_min: 0.4,
            opacity_max: 0.4,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig::scatter()
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.physics.validate()?;
        if !valid_range(self.size_min, self.size_max) {
            return Err(format!(
                "size range [{}, {}] is invalid",
                self.size_min, self.size_max
            ));
        }
        if !valid_range(self.opacity_min, self.opacity_max) {
            return Err(format!(
                "opacity range [{}, {}] is invalid",
                self.opacity_min, self.opacity_max
            ));
        }
        if self.layout == Layout::Grid && !(self.spacing > 0.0 && self.spacing.is_finite()) {
            return Err(format!("grid spacing must be positive and finite, got {}", self.spacing));
        }
        Ok(())
    }
}

// Also false for NaN
fn valid_range(min: f64, max: f64) -> bool {
    min >= 0.0 && min <= max && max.is_finite()
}
