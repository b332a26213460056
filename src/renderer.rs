// Renderer struct that handles Canvas 2d calls. Scattered particles are
// filled circles with a purple-pink-blue radial gradient and a purple glow;
// hero grid dots are flat, faint purple-to-pink circles.

use crate::color::{BLUE, PINK, PINK_400, PURPLE, PURPLE_400};
use crate::config::Layout;
use crate::particle::Particle;
use std::f64::consts::PI;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    pub const GLOW_BLUR: f64 = 10.0;
    // Grid colours are drawn at a fifth of the dot's opacity
    pub const GRID_TINT: f64 = 0.2;

    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(JsValue::from)?;
        Ok(Renderer { context })
    }

    pub fn clear_screen(&self, width: f64, height: f64) {
        self.context.clear_rect(0.0, 0.0, width, height);
    }

    pub fn render_particles(&self, particles: &[Particle], layout: Layout) -> Result<(), JsValue> {
        for p in particles {
            let (radius, opacity) = appearance(p, layout);
            match layout {
                Layout::Scatter => self.render_particle(p.pos[0], p.pos[1], radius, opacity)?,
                Layout::Grid => self.render_grid_dot(p.pos[0], p.pos[1], radius, opacity)?,
            }
        }
        Ok(())
    }

    #[allow(deprecated)]
    fn render_particle(&self, x: f64, y: f64, radius: f64, opacity: f64) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.begin_path();
        ctx.arc(x, y, radius, 0.0, PI * 2.0)?;

        let gradient = ctx.create_radial_gradient(x, y, 0.0, x, y, radius * 2.0)?;
        gradient.add_color_stop(0.0, &PURPLE.css_with_alpha(opacity))?;
        gradient.add_color_stop(0.5, &PINK.css_with_alpha(opacity * 0.7))?;
        gradient.add_color_stop(1.0, &BLUE.css_with_alpha(opacity * 0.3))?;
        ctx.set_fill_style(&gradient);
        ctx.fill();

        ctx.set_shadow_blur(Renderer::GLOW_BLUR);
        ctx.set_shadow_color(&PURPLE.css_with_alpha(opacity * 0.5));
        ctx.fill();
        ctx.set_shadow_blur(0.0);
        Ok(())
    }

    #[allow(deprecated)]
    fn render_grid_dot(&self, x: f64, y: f64, radius: f64, opacity: f64) -> Result<(), JsValue> {
        let ctx = &self.context;
        ctx.begin_path();
        ctx.arc(x, y, radius, 0.0, PI * 2.0)?;

        let alpha = grid_alpha(opacity);
        let gradient = ctx.create_linear_gradient(x - radius, y, x + radius, y);
        gradient.add_color_stop(0.0, &PURPLE_400.css_with_alpha(alpha))?;
        gradient.add_color_stop(1.0, &PINK_400.css_with_alpha(alpha))?;
        ctx.set_fill_style(&gradient);
        ctx.fill();
        Ok(())
    }
}

pub fn grid_alpha(opacity: f64) -> f64 {
    opacity * Renderer::GRID_TINT
}

// Grid dots swell and brighten while pushed away from their lattice point
pub fn appearance(p: &Particle, layout: Layout) -> (f64, f64) {
    match layout {
        Layout::Grid if p.is_dispersed() => (p.size * 2.0, 0.8),
        _ => (p.size, p.opacity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scattered_particles_draw_as_configured() {
        let mut p = Particle::at_rest(0, [5.0, 5.0], 2.5, 0.3);
        p.pos = [50.0, 50.0];
        assert_eq!(appearance(&p, Layout::Scatter), (2.5, 0.3));
    }

    #[test]
    fn dispersed_grid_dots_swell() {
        let mut p = Particle::at_rest(0, [5.0, 5.0], 3.0, 0.4);
        assert_eq!(appearance(&p, Layout::Grid), (3.0, 0.4));
        p.pos = [9.0, 5.0];
        assert_eq!(appearance(&p, Layout::Grid), (6.0, 0.8));
    }

    #[test]
    fn grid_dots_stay_faint() {
        let config = crate::config::FieldConfig::hero_grid();
        let resting = grid_alpha(config.opacity_min);
        let dispersed = grid_alpha(0.8);
        assert!((resting - 0.08).abs() < 1e-12);
        assert!((dispersed - 0.16).abs() < 1e-12);
        assert_eq!(config.size_min * 2.0, 6.0);
    }
}
