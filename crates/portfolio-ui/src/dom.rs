//! DOM access for a paginated section.
//!
//! [`SectionDom`] is everything the controller needs from the page;
//! [`WebSection`] implements it over `web-sys` elements found by the class
//! contract in `portfolio-pagination`.

use log::warn;
use portfolio_pagination::{Section, classes};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element};

use crate::{ControllerError, Result};

/// An arrow control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Previous,
    Next,
}

/// The nodes of one section, as the controller sees them.
pub trait SectionDom {
    /// Number of item nodes, in document order.
    fn item_count(&self) -> usize;

    /// Show or hide the item at `index`.
    fn set_item_visible(&mut self, index: usize, visible: bool);

    /// Mark an arrow as clickable or at its boundary.
    fn set_affordance(&mut self, affordance: Affordance, enabled: bool);

    /// Replace the counter text.
    fn set_counter(&mut self, text: &str);
}

/// A section located in the live document.
#[derive(Debug, Clone)]
pub struct WebSection {
    section: Section,
    root: Element,
    items: Vec<Element>,
    previous: Element,
    next: Element,
    counter: Element,
}

impl WebSection {
    /// Find the section's wrapper and every node the controller touches.
    ///
    /// Any missing node is an error naming the selector that matched nothing.
    /// A section with no items is valid.
    pub fn locate(document: &Document, section: Section) -> Result<Self> {
        let root = find(document, &section.root_selector(), section)?;

        let list = root
            .query_selector_all(&section.item_selector())
            .map_err(ControllerError::from_js)?;
        let items: Vec<Element> = (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();

        let previous = find(&root, &section.previous_selector(), section)?;
        let next = find(&root, &section.next_selector(), section)?;
        let counter = find(&root, &section.counter_selector(), section)?;

        Ok(Self {
            section,
            root,
            items,
            previous,
            next,
            counter,
        })
    }

    /// Page size published on the wrapper, if present and positive.
    pub fn items_per_page(&self) -> Option<usize> {
        self.data_attribute(classes::DATA_ITEMS_PER_PAGE, page_size)
    }

    /// Page count published on the wrapper at build time.
    pub fn published_total_pages(&self) -> Option<usize> {
        self.data_attribute(classes::DATA_TOTAL_PAGES, page_count)
    }

    pub fn previous(&self) -> &Element {
        &self.previous
    }

    pub fn next(&self) -> &Element {
        &self.next
    }

    fn data_attribute(&self, name: &str, parse: fn(&str) -> Option<usize>) -> Option<usize> {
        let value = self.root.get_attribute(name)?;
        let parsed = parse(&value);
        if parsed.is_none() {
            warn!("{}: ignoring malformed {name}=\"{value}\"", self.section);
        }
        parsed
    }
}

fn page_count(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}

/// A page size of zero cannot paginate and counts as malformed.
fn page_size(value: &str) -> Option<usize> {
    page_count(value).filter(|n| *n > 0)
}

impl SectionDom for WebSection {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn set_item_visible(&mut self, index: usize, visible: bool) {
        let Some(item) = self.items.get(index) else {
            return;
        };
        let (add, remove) = if visible {
            (classes::VISIBLE, classes::HIDDEN)
        } else {
            (classes::HIDDEN, classes::VISIBLE)
        };
        swap_class(item, add, remove);
    }

    fn set_affordance(&mut self, affordance: Affordance, enabled: bool) {
        let element = match affordance {
            Affordance::Previous => &self.previous,
            Affordance::Next => &self.next,
        };
        let (add, remove) = if enabled {
            (classes::ACTIVE, classes::DISABLED)
        } else {
            (classes::DISABLED, classes::ACTIVE)
        };
        swap_class(element, add, remove);
        let disabled = if enabled { "false" } else { "true" };
        if let Err(e) = element.set_attribute("aria-disabled", disabled) {
            warn!("failed to set aria-disabled: {e:?}");
        }
    }

    fn set_counter(&mut self, text: &str) {
        self.counter.set_text_content(Some(text));
    }
}

/// Anything `querySelector` can be called on.
trait Query {
    fn query(&self, selector: &str) -> std::result::Result<Option<Element>, JsValue>;
}

impl Query for Document {
    fn query(&self, selector: &str) -> std::result::Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
}

impl Query for Element {
    fn query(&self, selector: &str) -> std::result::Result<Option<Element>, JsValue> {
        self.query_selector(selector)
    }
}

fn find(scope: &impl Query, selector: &str, section: Section) -> Result<Element> {
    scope
        .query(selector)
        .map_err(ControllerError::from_js)?
        .ok_or_else(|| ControllerError::MissingNode {
            section,
            selector: selector.to_string(),
        })
}

fn swap_class(element: &Element, add: &str, remove: &str) {
    let list = element.class_list();
    if let Err(e) = list.remove_1(remove).and_then(|()| list.add_1(add)) {
        warn!("failed to update classes: {e:?}");
    }
}
