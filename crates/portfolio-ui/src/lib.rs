//! Portfolio UI
//!
//! Browser-side content window controller. On load it finds every paginated
//! section the page composer rendered, shows page 1 and wires the arrows.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init from '/pkg/portfolio_ui.js';
//! init();
//! ```

pub mod controller;
pub mod dom;

use std::{cell::RefCell, rc::Rc};

pub use controller::ContentWindowController;
pub use dom::{Affordance, SectionDom, WebSection};
use log::{info, warn};
use portfolio_pagination::{PaginationError, Section};
use thiserror::Error;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Document, Element, Event};

/// Controller errors.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Invalid pagination parameters.
    #[error("pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// A node the section needs is not in the document.
    #[error("{section}: no element matches `{selector}`")]
    MissingNode { section: Section, selector: String },

    /// A DOM call threw.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl ControllerError {
    pub(crate) fn from_js(value: JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }
}

/// Result type for controller operations.
pub type Result<T> = std::result::Result<T, ControllerError>;

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        warn!("no document, pagination disabled");
        return;
    };

    let wired = wire_sections(&document);
    info!("pagination ready for {wired} section(s)");
}

/// Wire every section present in `document`. Sections with missing nodes are
/// skipped. Returns the number wired.
pub fn wire_sections(document: &Document) -> usize {
    Section::ALL
        .into_iter()
        .filter(|section| match wire_section(document, *section) {
            Ok(()) => true,
            Err(e) => {
                warn!("skipping section: {e}");
                false
            }
        })
        .count()
}

fn wire_section(document: &Document, section: Section) -> Result<()> {
    let dom = WebSection::locate(document, section)?;
    let items_per_page = dom
        .items_per_page()
        .unwrap_or_else(|| section.default_items_per_page());
    let published = dom.published_total_pages();
    let previous = dom.previous().clone();
    let next = dom.next().clone();

    let controller = ContentWindowController::initialize(section, dom, items_per_page)?;
    if let Some(published) = published
        && published != controller.total_pages()
    {
        warn!(
            "{section}: data-total-pages is {published} but {} pages were found",
            controller.total_pages()
        );
    }

    let controller = Rc::new(RefCell::new(controller));

    let back = Rc::clone(&controller);
    on_click(&previous, move || {
        back.borrow_mut().previous();
    })?;

    let forward = Rc::clone(&controller);
    on_click(&next, move || {
        forward.borrow_mut().next();
    })?;

    Ok(())
}

fn on_click(target: &Element, mut handler: impl FnMut() + 'static) -> Result<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| handler());
    target
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(ControllerError::from_js)?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}
