//! Presentation port: every visible side effect of the page logic goes
//! through this trait. The browser build implements it over the DOM.

use crate::catalog::Product;

pub trait PresentationPort {
    /// Mark a tracked section as in or out of view.
    fn set_in_view(&mut self, region: &str, in_view: bool);

    /// Show the detail dialog for `product`, remembering the focused element.
    fn open_detail(&mut self, product: &Product);

    /// Hide the detail dialog and restore the remembered focus.
    fn close_detail(&mut self);

    fn set_word_opacity(&mut self, index: usize, opacity: f32);
}
