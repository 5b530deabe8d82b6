use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use crate::catalog::{benefits_markup, Product};
use crate::error::{Result, SiteError};
use crate::port::PresentationPort;
use crate::smooth_scroll::SmoothScroll;
use crate::words::split_words;

const IN_VIEW: &str = "is-inview";
const OPEN: &str = "is-open";

/// Elements of the product detail dialog.
struct Modal {
    root: Element,
    title: Element,
    subtitle: Element,
    description: Element,
    benefits: Element,
    usage: Element,
    image: HtmlImageElement,
}

impl Modal {
    fn find(document: &Document) -> Result<Self> {
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| SiteError::MissingElement(format!("#{id}")))
        };
        Ok(Self {
            root: by_id("cmodal")?,
            title: by_id("cmodalTitle")?,
            subtitle: by_id("cmodalSub")?,
            description: by_id("cmodalDesc")?,
            benefits: by_id("cmodalList")?,
            usage: by_id("cmodalHow")?,
            image: by_id("cmodalImg")?
                .dyn_into::<HtmlImageElement>()
                .map_err(|_| SiteError::MissingElement("img#cmodalImg".into()))?,
        })
    }
}

/// [`PresentationPort`] over the live document.
pub struct DomPort {
    document: Document,
    modal: Option<Modal>,
    words: Vec<HtmlElement>,
    last_focus: Option<HtmlElement>,
    scroll: Rc<RefCell<SmoothScroll>>,
}

impl DomPort {
    pub fn new(document: &Document, scroll: Rc<RefCell<SmoothScroll>>) -> Self {
        let modal = match Modal::find(document) {
            Ok(modal) => Some(modal),
            Err(err) => {
                log::warn!("product dialog disabled: {}", err);
                None
            }
        };
        Self {
            document: document.clone(),
            modal,
            words: Vec::new(),
            last_focus: None,
            scroll,
        }
    }

    pub fn has_modal(&self) -> bool {
        self.modal.is_some()
    }

    pub fn set_words(&mut self, words: Vec<HtmlElement>) {
        self.words = words;
    }

    fn set_body_overflow(&self, hidden: bool) {
        let Some(body) = self.document.body() else {
            return;
        };
        let style = body.style();
        let res = if hidden {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        warn_on_err("body overflow", res);
    }
}

fn warn_on_err<T>(what: &str, res: std::result::Result<T, JsValue>) {
    if let Err(e) = res {
        log::warn!("{}: {:?}", what, e);
    }
}

impl PresentationPort for DomPort {
    fn set_in_view(&mut self, region: &str, in_view: bool) {
        let Ok(Some(el)) = self.document.query_selector(region) else {
            return;
        };
        let classes = el.class_list();
        let res = if in_view {
            classes.add_1(IN_VIEW)
        } else {
            classes.remove_1(IN_VIEW)
        };
        if let Err(e) = res {
            log::warn!("{}: class toggle failed: {:?}", region, e);
        }
    }

    fn open_detail(&mut self, product: &Product) {
        let Some(modal) = self.modal.as_ref() else {
            return;
        };
        self.last_focus = self
            .document
            .active_element()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        modal.title.set_text_content(Some(product.title));
        modal.subtitle.set_text_content(Some(product.subtitle));
        modal.description.set_text_content(Some(product.description));
        modal.usage.set_text_content(Some(product.usage));
        modal.image.set_src(product.image);
        modal.image.set_alt(product.title);
        modal.benefits.set_inner_html(&benefits_markup(product));

        warn_on_err("dialog open class", modal.root.class_list().add_1(OPEN));
        warn_on_err("dialog aria-hidden", modal.root.set_attribute("aria-hidden", "false"));
        self.set_body_overflow(true);
        self.scroll.borrow_mut().stop();

        if let Ok(Some(close)) = modal.root.query_selector(".cmodal__close") {
            if let Ok(close) = close.dyn_into::<HtmlElement>() {
                warn_on_err("dialog focus", close.focus());
            }
        }
        log::debug!("opened product {}", product.id);
    }

    fn close_detail(&mut self) {
        let Some(modal) = self.modal.as_ref() else {
            return;
        };
        warn_on_err("dialog open class", modal.root.class_list().remove_1(OPEN));
        warn_on_err("dialog aria-hidden", modal.root.set_attribute("aria-hidden", "true"));
        self.set_body_overflow(false);
        self.scroll.borrow_mut().start();

        if let Some(el) = self.last_focus.take() {
            warn_on_err("focus restore", el.focus());
        }
    }

    fn set_word_opacity(&mut self, index: usize, opacity: f32) {
        if let Some(word) = self.words.get(index) {
            warn_on_err("word opacity", word.style().set_property("opacity", &opacity.to_string()));
        }
    }
}

/// Replace the text of `el` with one `span.word` per word, separated by
/// single spaces. Every word starts fully transparent.
pub fn split_into_spans(document: &Document, el: &Element) -> Result<Vec<HtmlElement>> {
    let text = el.text_content().unwrap_or_default();
    let parts = split_words(&text);

    el.set_text_content(Some(""));
    let mut spans = Vec::with_capacity(parts.len());
    for (i, word) in parts.iter().enumerate() {
        let span = document
            .create_element("span")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| SiteError::Js("span is not an HtmlElement".into()))?;
        span.set_class_name("word");
        span.set_text_content(Some(word));
        span.style().set_property("opacity", "0")?;
        el.append_child(&span)?;
        if i + 1 != parts.len() {
            el.append_child(&document.create_text_node(" "))?;
        }
        spans.push(span);
    }
    Ok(spans)
}

#[cfg(test)]
mod tests {
    use wasm_bindgen_test::*;

    use super::*;
    use crate::catalog::PRODUCTS;

    wasm_bindgen_test_configure!(run_in_browser);

    const DIALOG: &str = r#"<div id="cmodal" aria-hidden="true"><button class="cmodal__close" data-close></button><h3 id="cmodalTitle"></h3><p id="cmodalSub"></p><p id="cmodalDesc"></p><ul id="cmodalList"></ul><p id="cmodalHow"></p><img id="cmodalImg"></div>"#;

    #[wasm_bindgen_test]
    fn detail_dialog_opens_and_closes() {
        let document = web_sys::window().unwrap().document().unwrap();
        let host = document.create_element("div").unwrap();
        host.set_inner_html(DIALOG);
        document.body().unwrap().append_child(&host).unwrap();

        let scroll = Rc::new(RefCell::new(SmoothScroll::default()));
        let mut port = DomPort::new(&document, scroll.clone());
        assert!(port.has_modal());

        port.open_detail(&PRODUCTS[0]);
        let root = document.get_element_by_id("cmodal").unwrap();
        assert!(root.class_list().contains(OPEN));
        assert_eq!(root.get_attribute("aria-hidden").as_deref(), Some("false"));
        assert_eq!(
            document.get_element_by_id("cmodalList").unwrap().child_element_count() as usize,
            PRODUCTS[0].benefits.len()
        );
        assert!(!scroll.borrow_mut().on_wheel(120.0, 0, 800.0));

        port.close_detail();
        assert!(!root.class_list().contains(OPEN));
        assert_eq!(root.get_attribute("aria-hidden").as_deref(), Some("true"));

        host.remove();
    }
}
