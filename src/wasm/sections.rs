//! Scroll-linked page sections: in-view toggles, the word reveal and the
//! product catalog. Each one is optional and switches itself off when its
//! elements are missing.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Document, Element, Event, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use super::dom::{split_into_spans, DomPort};
use crate::catalog::{grid_markup, CatalogController, PRODUCTS};
use crate::config::SiteConfig;
use crate::driver::Frame;
use crate::error::{Result, SiteError};
use crate::port::PresentationPort;
use crate::trigger::ScrollTrigger;
use crate::visibility::Region;
use crate::words::WordRevealController;

type Port = Rc<RefCell<DomPort>>;

const SECTIONS: [&str; 3] = [".cats", ".aboutt", ".contact-section"];
const USAGE: &str = ".usage";

pub fn observe_regions(document: &Document, port: &Port, config: &SiteConfig) {
    let regions = SECTIONS
        .into_iter()
        .map(|s| Region::new(s, config.section_threshold))
        .chain(std::iter::once(Region::new(USAGE, config.usage_threshold)));

    for region in regions {
        let selector = region.selector;
        match observe(document, port, region) {
            Ok(()) => log::debug!("observing {}", selector),
            Err(err) => log::warn!("{} reveal disabled: {}", selector, err),
        }
    }
}

fn observe(document: &Document, port: &Port, mut region: Region) -> Result<()> {
    let el = document
        .query_selector(region.selector)?
        .ok_or_else(|| SiteError::MissingElement(region.selector.into()))?;

    let threshold = region.toggle.threshold();
    let port = port.clone();
    let callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if let Some(in_view) = region.toggle.observe(entry.intersection_ratio()) {
                port.borrow_mut().set_in_view(region.selector, in_view);
            }
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
    observer.observe(&el);
    callback.forget();
    Ok(())
}

/// Word-by-word reveal of `.reveal-words`, tracked against `.hero-content`.
pub struct WordReveal {
    window: Window,
    trigger_el: Element,
    trigger: ScrollTrigger,
    controller: WordRevealController,
    port: Port,
}

impl WordReveal {
    pub fn mount(window: &Window, document: &Document, port: &Port, config: &SiteConfig) -> Result<Self> {
        let heading = document
            .query_selector(".reveal-words")?
            .ok_or_else(|| SiteError::MissingElement(".reveal-words".into()))?;
        let trigger_el = document
            .query_selector(".hero-content")?
            .ok_or_else(|| SiteError::MissingElement(".hero-content".into()))?;

        let spans = split_into_spans(document, &heading)?;
        let controller = WordRevealController::new(spans.len(), config.word_fade_seconds);
        log::info!("word reveal over {} words", spans.len());
        port.borrow_mut().set_words(spans);

        Ok(Self {
            window: window.clone(),
            trigger_el,
            trigger: ScrollTrigger::new(config.word_trigger_start, config.word_trigger_end),
            controller,
            port: port.clone(),
        })
    }

    pub fn update(&mut self, frame: &Frame) {
        let rect = self.trigger_el.get_bounding_client_rect();
        let page_y = self.window.scroll_y().unwrap_or(frame.scroll);
        let viewport = super::scroll::viewport_height(&self.window);

        if let Some(p) = self
            .trigger
            .update(frame.scroll, rect.top() + page_y, rect.height(), viewport)
        {
            self.controller.apply_progress(p);
        }

        let mut port = self.port.borrow_mut();
        self.controller
            .tick(frame.delta_seconds as f32, |i, opacity| port.set_word_opacity(i, opacity));
    }
}

/// Render the product grid and wire the detail dialog.
pub fn mount_catalog(document: &Document, port: &Port) -> Result<()> {
    let grid = document
        .get_element_by_id("catsGrid")
        .ok_or_else(|| SiteError::MissingElement("#catsGrid".into()))?;
    grid.set_inner_html(&grid_markup(PRODUCTS));

    if !port.borrow().has_modal() {
        return Ok(());
    }

    let controller = Rc::new(RefCell::new(CatalogController::new(PRODUCTS)));

    let on_click = {
        let controller = controller.clone();
        let port = port.clone();
        Closure::wrap(Box::new(move |e: Event| {
            let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            let mut port = port.borrow_mut();
            if let Ok(Some(open)) = target.closest("[data-open]") {
                if let Some(id) = open.get_attribute("data-open") {
                    controller.borrow_mut().open(&id, &mut *port);
                }
                return;
            }
            if let Ok(Some(_)) = target.closest("[data-close]") {
                controller.borrow_mut().close(&mut *port);
            }
        }) as Box<dyn FnMut(Event)>)
    };
    document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    let on_key = {
        let port = port.clone();
        Closure::wrap(Box::new(move |e: KeyboardEvent| {
            controller
                .borrow_mut()
                .handle_key(&e.key(), &mut *port.borrow_mut());
        }) as Box<dyn FnMut(KeyboardEvent)>)
    };
    document.add_event_listener_with_callback("keydown", on_key.as_ref().unchecked_ref())?;
    on_key.forget();

    log::info!("catalog mounted with {} products", PRODUCTS.len());
    Ok(())
}
