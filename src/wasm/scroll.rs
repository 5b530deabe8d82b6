use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{AddEventListenerOptions, Document, WheelEvent, Window};

use crate::driver::ScrollTimeline;
use crate::error::Result;
use crate::smooth_scroll::SmoothScroll;

/// Window scrolling with eased wheel input.
pub struct WindowScroll {
    window: Window,
    document: Document,
    smooth: Rc<RefCell<SmoothScroll>>,
}

impl WindowScroll {
    /// Hook wheel and native scroll events on `window`.
    pub fn attach(window: &Window, document: &Document, lerp: f64) -> Result<Self> {
        let smooth = Rc::new(RefCell::new(SmoothScroll::new(lerp)));
        smooth
            .borrow_mut()
            .sync(window.scroll_y().unwrap_or(0.0));

        let on_wheel = {
            let smooth = smooth.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move |e: WheelEvent| {
                let viewport = viewport_height(&window);
                if smooth
                    .borrow_mut()
                    .on_wheel(e.delta_y(), e.delta_mode(), viewport)
                {
                    e.prevent_default();
                }
            }) as Box<dyn FnMut(WheelEvent)>)
        };
        let opts = AddEventListenerOptions::new();
        opts.set_passive(false);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            on_wheel.as_ref().unchecked_ref(),
            &opts,
        )?;
        on_wheel.forget();

        let on_scroll = {
            let smooth = smooth.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                if let Ok(y) = window.scroll_y() {
                    smooth.borrow_mut().sync(y);
                }
            }) as Box<dyn FnMut()>)
        };
        window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
        on_scroll.forget();

        log::debug!("smooth wheel scrolling attached (lerp {})", lerp);
        Ok(Self {
            window: window.clone(),
            document: document.clone(),
            smooth,
        })
    }

    /// Shared handle, used to pause smoothing while a dialog is open.
    pub fn handle(&self) -> Rc<RefCell<SmoothScroll>> {
        self.smooth.clone()
    }

    fn scroll_limit(&self) -> f64 {
        let content = self
            .document
            .document_element()
            .map(|el| el.scroll_height() as f64)
            .unwrap_or(0.0);
        content - viewport_height(&self.window)
    }
}

impl ScrollTimeline for WindowScroll {
    fn advance(&mut self, now_ms: f64) -> f64 {
        let limit = self.scroll_limit();
        let mut smooth = self.smooth.borrow_mut();
        smooth.set_limit(limit);
        let was_animating = smooth.is_animating();
        let offset = smooth.step(now_ms);
        if was_animating {
            self.window.scroll_to_with_x_and_y(0.0, offset);
        }
        offset
    }
}

pub fn viewport_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}
