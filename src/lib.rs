use wasm_bindgen::prelude::*;
use web_sys::console;

// A macro to provide `println!(..)`-style syntax for `console.log` logging.
macro_rules! log {
    ( $( $t:tt )* ) => {
        web_sys::console::log_1(&format!( $( $t )* ).into());
    }
}

mod animation;
mod color;
mod config;
mod field;
mod particle;
mod physics;
mod renderer;
mod scroll;
mod utils;

pub use animation::DotsAnimation;
pub use config::{FieldConfig, Layout, PhysicsParams};
pub use field::ParticleField;
pub use particle::Particle;
pub use scroll::{active_section, is_scrolled, ScrollSpy, SectionBounds};

// Use `wee_alloc` as the global allocator when the feature is enabled.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

// Wraps console.time/timeEnd around a scope
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
