//! Per-section navigation state.
//!
//! States are the pages `1..=total_pages`; transitions are explicit page
//! requests or single steps from the arrows. There is no terminal state.

use std::ops::Range;

use crate::{PagePartition, Result, counter_label};

/// Current page of one section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    partition: PagePartition,
    current_page: usize,
}

impl WindowState {
    /// Start on page 1.
    pub fn new(total_items: usize, items_per_page: usize) -> Result<Self> {
        Ok(Self::from_partition(PagePartition::new(
            total_items,
            items_per_page,
        )?))
    }

    /// Start on page 1 of an existing partition.
    #[must_use]
    pub fn from_partition(partition: PagePartition) -> Self {
        Self {
            partition,
            current_page: 1,
        }
    }

    /// The underlying partition.
    #[must_use]
    pub fn partition(&self) -> &PagePartition {
        &self.partition
    }

    /// Current 1-indexed page.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.partition.total_pages()
    }

    /// Indices visible on the current page.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        self.partition.range(self.current_page).unwrap_or(0..0)
    }

    /// Move to `page`. Returns `false` and leaves the state untouched when
    /// `page` is outside `1..=total_pages`.
    pub fn show(&mut self, page: usize) -> bool {
        if !self.partition.contains_page(page) {
            return false;
        }
        self.current_page = page;
        true
    }

    /// Step back one page, if there is one.
    pub fn previous(&mut self) -> bool {
        self.has_previous() && self.show(self.current_page - 1)
    }

    /// Step forward one page, if there is one.
    pub fn next(&mut self) -> bool {
        self.has_next() && self.show(self.current_page + 1)
    }

    /// Whether the "previous" affordance is enabled.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the "next" affordance is enabled.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Counter text for the current page.
    #[must_use]
    pub fn counter_label(&self) -> String {
        counter_label(self.current_page, self.total_pages())
    }
}
