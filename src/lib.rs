//! Front-end of the MAG Agro site, compiled to WebAssembly.
//!
//! The hero banner dissolves in with scroll through a noise-perturbed wipe
//! drawn by WebGL2, wheel scrolling is eased, the hero heading reveals word
//! by word, page sections toggle an in-view class and the product catalog
//! opens a detail dialog.
//!
//! Everything that decides *what* happens lives in plain modules that build
//! and test on the host. The browser bindings sit in a private `wasm`
//! module compiled only for `wasm32`.

pub mod catalog;
pub mod color;
pub mod config;
pub mod dissolve;
pub mod driver;
pub mod error;
pub mod noise;
pub mod port;
pub mod progress;
pub mod shaders;
pub mod smooth_scroll;
pub mod trigger;
pub mod visibility;
pub mod words;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;

    use crate::config::SiteConfig;
    use crate::error::SiteError;

    mod dom;
    mod render;
    mod scroll;
    mod sections;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or(SiteError::MissingWindow)?;
        let document = window.document().ok_or(SiteError::MissingDocument)?;
        let config = SiteConfig::default();

        let scroll = scroll::WindowScroll::attach(&window, &document, config.scroll_lerp)?;
        let port = Rc::new(RefCell::new(dom::DomPort::new(&document, scroll.handle())));

        sections::observe_regions(&document, &port, &config);
        if let Err(err) = sections::mount_catalog(&document, &port) {
            log::warn!("catalog disabled: {}", err);
        }
        let words = match sections::WordReveal::mount(&window, &document, &port, &config) {
            Ok(words) => Some(words),
            Err(err) => {
                log::warn!("word reveal disabled: {}", err);
                None
            }
        };

        render::start(&window, &document, &config, scroll, words)?;
        log::info!("site started");
        Ok(())
    }
}
