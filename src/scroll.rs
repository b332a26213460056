// Navigation scroll spy: which section sits under a marker line near the
// top of the viewport, and whether the page has scrolled past the header.

use gloo::events::EventListener;
use js_sys::{Array, Function};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, Window};

pub const ACTIVE_LINE_OFFSET: f64 = 100.0;
pub const SCROLLED_THRESHOLD: f64 = 50.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub bottom: f64,
}

// First section (in page order) spanning the active line.
pub fn active_section(sections: &[SectionBounds], line: f64) -> Option<&str> {
    sections
        .iter()
        .find(|section| section.top <= line && section.bottom >= line)
        .map(|section| section.id.as_str())
}

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

struct SpyState {
    window: Window,
    document: Document,
    ids: Vec<String>,
    active: RefCell<String>,
    scrolled: Cell<bool>,
    on_change: Option<Function>,
}

impl SpyState {
    fn measure_sections(&self) -> Vec<SectionBounds> {
        self.ids
            .iter()
            .filter_map(|id| {
                let rect = self.document.get_element_by_id(id)?.get_bounding_client_rect();
                Some(SectionBounds {
                    id: id.clone(),
                    top: rect.top(),
                    bottom: rect.bottom(),
                })
            })
            .collect()
    }

    fn refresh(&self) {
        self.scrolled
            .set(is_scrolled(self.window.scroll_y().unwrap_or(0.0)));

        let sections = self.measure_sections();
        let current = match active_section(&sections, ACTIVE_LINE_OFFSET) {
            Some(id) => id,
            None => return,
        };
        if *self.active.borrow() == current {
            return;
        }
        self.active.replace(current.to_owned());
        if let Some(callback) = &self.on_change {
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_str(current)) {
                web_sys::console::error_2(&"scroll spy callback failed:".into(), &err);
            }
        }
    }
}

#[wasm_bindgen]
pub struct ScrollSpy {
    state: Rc<SpyState>,
    listener: Option<EventListener>,
}

#[wasm_bindgen]
impl ScrollSpy {
    // `section_ids` are element ids in page order; the first is active until
    // the page scrolls. `on_change` receives the new id.
    pub fn attach(section_ids: Array, on_change: Option<Function>) -> Result<ScrollSpy, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let ids: Vec<String> = section_ids.iter().filter_map(|id| id.as_string()).collect();
        let first = ids.first().cloned().unwrap_or_default();

        let state = Rc::new(SpyState {
            window,
            document,
            ids,
            active: RefCell::new(first),
            scrolled: Cell::new(false),
            on_change,
        });

        let listening = Rc::clone(&state);
        let listener = EventListener::new(&state.window, "scroll", move |_| {
            listening.refresh();
        });
        state.refresh();
        log!("scroll spy tracking {} sections", state.ids.len());

        Ok(ScrollSpy {
            state,
            listener: Some(listener),
        })
    }

    pub fn active_section(&self) -> String {
        self.state.active.borrow().clone()
    }

    pub fn is_scrolled(&self) -> bool {
        self.state.scrolled.get()
    }

    // Re-reads section positions without waiting for a scroll event
    pub fn refresh(&self) {
        self.state.refresh();
    }

    // Smooth-scrolls to the section; false when no element has that id.
    pub fn scroll_to(&self, id: &str) -> bool {
        match self.state.document.get_element_by_id(id) {
            Some(element) => {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                element.scroll_into_view_with_scroll_into_view_options(&options);
                true
            }
            None => false,
        }
    }

    pub fn detach(&mut self) {
        self.listener.take();
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, top: f64, bottom: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_owned(),
            top,
            bottom,
        }
    }

    #[test]
    fn picks_section_under_active_line() {
        let sections = vec![
            section("hero", -900.0, 40.0),
            section("skills", 40.0, 600.0),
            section("experience", 600.0, 1400.0),
        ];
        assert_eq!(active_section(&sections, ACTIVE_LINE_OFFSET), Some("skills"));
    }

    #[test]
    fn shared_edge_goes_to_earlier_section() {
        let sections = vec![section("hero", -500.0, 100.0), section("skills", 100.0, 700.0)];
        assert_eq!(active_section(&sections, ACTIVE_LINE_OFFSET), Some("hero"));
    }

    #[test]
    fn nothing_under_active_line() {
        let sections = vec![section("hero", 200.0, 900.0)];
        assert_eq!(active_section(&sections, ACTIVE_LINE_OFFSET), None);
        assert_eq!(active_section(&[], ACTIVE_LINE_OFFSET), None);
    }

    #[test]
    fn scrolled_past_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }
}
