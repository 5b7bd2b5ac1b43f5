//! The per-section navigation state machine, bound to a DOM.

use log::debug;
use portfolio_pagination::{Section, WindowState};

use crate::{
    Result,
    dom::{Affordance, SectionDom},
};

/// Drives one paginated section: item visibility, arrow state and counter.
#[derive(Debug)]
pub struct ContentWindowController<D> {
    section: Section,
    dom: D,
    state: WindowState,
}

impl<D: SectionDom> ContentWindowController<D> {
    /// Count the section's items, compute its pages and show page 1.
    pub fn initialize(section: Section, dom: D, items_per_page: usize) -> Result<Self> {
        let state = WindowState::new(dom.item_count(), items_per_page)?;
        let mut controller = Self {
            section,
            dom,
            state,
        };
        controller.apply();

        debug!(
            "{section}: {} items, {} pages",
            controller.dom.item_count(),
            controller.total_pages()
        );
        Ok(controller)
    }

    /// Show `page`. Pages outside `1..=total_pages` leave everything as is
    /// and return `false`.
    pub fn show_page(&mut self, page: usize) -> bool {
        if !self.state.show(page) {
            debug!("{}: ignoring out-of-range page {page}", self.section);
            return false;
        }
        self.apply();
        true
    }

    /// Handle a click on the "previous" arrow.
    pub fn previous(&mut self) -> bool {
        self.state.has_previous() && self.show_page(self.state.current_page() - 1)
    }

    /// Handle a click on the "next" arrow.
    pub fn next(&mut self) -> bool {
        self.state.has_next() && self.show_page(self.state.current_page() + 1)
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    fn apply(&mut self) {
        let range = self.state.visible_range();
        for index in 0..self.dom.item_count() {
            self.dom.set_item_visible(index, range.contains(&index));
        }
        self.dom
            .set_affordance(Affordance::Previous, self.state.has_previous());
        self.dom.set_affordance(Affordance::Next, self.state.has_next());
        self.dom.set_counter(&self.state.counter_label());
    }
}
