// Simple color struct, created from an unsigned 32 representing RRGGBBAA.
// Particles only ever vary the alpha, so the canvas side asks for css
// strings with an explicit opacity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const PURPLE: Color = Color::from_u32(0xa855f7ff);
pub const PINK: Color = Color::from_u32(0xec4899ff);
pub const BLUE: Color = Color::from_u32(0x3b82f6ff);
// Lighter pair used by the hero grid
pub const PURPLE_400: Color = Color::from_u32(0xc084fcff);
pub const PINK_400: Color = Color::from_u32(0xf472b6ff);

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Css `rgba()` string, ignoring the stored alpha byte
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        let alpha = if alpha.is_finite() {
            alpha.max(0.0).min(1.0)
        } else {
            0.0
        };
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}
