//! Renderers that apply a view tree to an output surface.
//!
//! The view layer only describes what to show; a [`Renderer`] decides how.
//! [`HtmlRenderer`] produces markup for a browser, [`TerminalRenderer`]
//! prints the table for a terminal session.

mod html;
mod terminal;

pub use html::{HtmlRenderer, to_html};
pub use terminal::TerminalRenderer;

use eventlist_core::EventListResult;

use crate::view::Node;

pub trait Renderer {
    /// Replace whatever is currently shown with `tree`.
    fn render(&mut self, tree: &Node) -> EventListResult<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, tree: &Node) -> EventListResult<()> {
        (**self).render(tree)
    }
}
