// Start/stop controller for one particle field mounted on a canvas. It owns
// the frame loop and every listener it installs; unmounting (or dropping
// the handle) cancels the pending frame and removes the listeners.

use crate::config::{FieldConfig, Layout};
use crate::field::ParticleField;
use crate::renderer::Renderer;
use crate::Timer;
use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent};

struct Inner {
    canvas: HtmlCanvasElement,
    field: RefCell<ParticleField>,
    renderer: RefCell<Option<Renderer>>,
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
    warned_no_context: Cell<bool>,
}

impl Inner {
    fn measure(&self) {
        let rect = self.canvas.get_bounding_client_rect();
        let width = rect.width().floor();
        let height = rect.height().floor();
        {
            let field = self.field.borrow();
            if field.width() == width && field.height() == height {
                return;
            }
        }
        let _timer = Timer::new("DotsAnimation::rebuild");
        if self.field.borrow_mut().resize(width, height) {
            // Resizing the backing store also resets the 2d context state
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            log!(
                "particle field rebuilt at {}x{} with {} particles",
                width,
                height,
                self.field.borrow().particles().len()
            );
        }
    }

    fn track_pointer(&self, event: &MouseEvent) {
        let rect = self.canvas.get_bounding_client_rect();
        let x = event.client_x() as f64 - rect.left();
        let y = event.client_y() as f64 - rect.top();
        self.field.borrow_mut().set_pointer(x, y);
    }

    fn draw_frame(&self) -> Result<(), JsValue> {
        let mut field = self.field.borrow_mut();
        if field.is_empty() {
            return Ok(());
        }
        field.tick();

        let mut renderer = self.renderer.borrow_mut();
        if renderer.is_none() {
            match Renderer::new(&self.canvas) {
                Ok(created) => *renderer = Some(created),
                Err(err) => {
                    if !self.warned_no_context.replace(true) {
                        web_sys::console::warn_2(&"skipping frame, no drawing surface:".into(), &err);
                    }
                    return Ok(());
                }
            }
        }
        if let Some(renderer) = renderer.as_ref() {
            renderer.clear_screen(field.width(), field.height());
            renderer.render_particles(field.particles(), field.config().layout)?;
        }
        Ok(())
    }

    fn schedule(self: &Rc<Self>) {
        let inner = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            inner.frame.borrow_mut().take();
            if !inner.running.get() {
                return;
            }
            // Canvas may not have been laid out yet at mount time
            if inner.field.borrow().is_empty() {
                inner.measure();
            }
            if let Err(err) = inner.draw_frame() {
                web_sys::console::error_2(&"particle frame failed:".into(), &err);
            }
            inner.schedule();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn stop(&self) {
        self.running.set(false);
        // Dropping the handle cancels the pending frame and releases the
        // closure holding the other Rc
        self.frame.borrow_mut().take();
    }
}

#[wasm_bindgen]
pub struct DotsAnimation {
    inner: Rc<Inner>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl DotsAnimation {
    pub fn mount(canvas: HtmlCanvasElement) -> Result<DotsAnimation, JsValue> {
        DotsAnimation::mount_with_config(canvas, FieldConfig::scatter())
    }

    pub fn mount_hero_grid(canvas: HtmlCanvasElement) -> Result<DotsAnimation, JsValue> {
        DotsAnimation::mount_with_config(canvas, FieldConfig::hero_grid())
    }

    pub fn mount_with_config(
        canvas: HtmlCanvasElement,
        config: FieldConfig,
    ) -> Result<DotsAnimation, JsValue> {
        config.validate().map_err(|err| JsValue::from_str(&err))?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

        let inner = Rc::new(Inner {
            canvas,
            field: RefCell::new(ParticleField::new(config)),
            renderer: RefCell::new(None),
            frame: RefCell::new(None),
            running: Cell::new(true),
            warned_no_context: Cell::new(false),
        });
        inner.measure();

        let mut listeners = Vec::new();

        let state = Rc::clone(&inner);
        listeners.push(EventListener::new(&window, "resize", move |_| {
            state.measure();
        }));

        // The hero grid sits under the page content, so it follows the
        // pointer anywhere in the window
        let pointer_target: &EventTarget = match config.layout {
            Layout::Scatter => inner.canvas.as_ref(),
            Layout::Grid => window.as_ref(),
        };
        let state = Rc::clone(&inner);
        listeners.push(EventListener::new(pointer_target, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<MouseEvent>() {
                state.track_pointer(event);
            }
        }));
        if config.layout == Layout::Scatter {
            let state = Rc::clone(&inner);
            listeners.push(EventListener::new(pointer_target, "mouseleave", move |_| {
                state.field.borrow_mut().clear_pointer();
            }));
        }

        inner.schedule();
        Ok(DotsAnimation { inner, listeners })
    }

    pub fn unmount(&mut self) {
        self.inner.stop();
        self.listeners.clear();
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    // Listeners still attached to the canvas or window
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn particle_count(&self) -> usize {
        self.inner.field.borrow().particles().len()
    }

    // Feeds a pointer position in surface coordinates, same as a mousemove
    pub fn set_pointer(&self, x: f64, y: f64) {
        self.inner.field.borrow_mut().set_pointer(x, y);
    }

    pub fn clear_pointer(&self) {
        self.inner.field.borrow_mut().clear_pointer();
    }

    // Re-reads the canvas size; the window resize listener calls the same
    pub fn remeasure(&self) {
        self.inner.measure();
    }
}

impl Drop for DotsAnimation {
    fn drop(&mut self) {
        self.unmount();
    }
}
