//! Build-time page composition for paginated sections.
//!
//! The composer emits the exact markup the browser controller selects on:
//! page 1 is visible, every other item is hidden, and the arrows and counter
//! reflect page 1. The controller recomputes the same partition from the
//! rendered nodes, so both sides agree on what page 1 contains.

use std::fmt::Write;

use portfolio_pagination::{PagePartition, Result, Section, WindowState, classes};
use tracing::debug;

use crate::components::Component;

/// One rendered item and its initial visibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedItem {
    /// Position in the section's ordered list.
    pub index: usize,
    /// Whether the item is on page 1.
    pub visible: bool,
    /// The item's own markup.
    pub html: String,
}

/// A paginated section ready to be placed in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedSection {
    pub section: Section,
    pub partition: PagePartition,
    pub items: Vec<ComposedItem>,
}

/// Composes paginated sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageComposer;

impl PageComposer {
    /// Render `items` as a section, marking page 1 visible.
    ///
    /// Fails only when `items_per_page` is zero. The input is not modified.
    pub fn compose<T: Component>(
        section: Section,
        items: &[T],
        items_per_page: usize,
    ) -> Result<ComposedSection> {
        let partition = PagePartition::new(items.len(), items_per_page)?;

        let items = items
            .iter()
            .enumerate()
            .map(|(index, item)| ComposedItem {
                index,
                visible: partition.is_visible(1, index),
                html: item.render(),
            })
            .collect();

        debug!(
            section = %section,
            total_items = partition.total_items(),
            total_pages = partition.total_pages(),
            "composed section"
        );

        Ok(ComposedSection {
            section,
            partition,
            items,
        })
    }
}

impl ComposedSection {
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.partition.total_pages()
    }

    /// Indices of the items marked visible.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .filter(|item| item.visible)
            .map(|item| item.index)
            .collect()
    }

    /// Arrow affordances and page counter in their page-1 state.
    #[must_use]
    pub fn controls_html(&self) -> String {
        let state = WindowState::from_partition(self.partition);
        let section = self.section;

        format!(
            r#"<nav class="pagination" aria-label="{id} pages">
    {previous}
    {next}
    <span class="pagination-line" aria-hidden="true"></span>
    <span class="pagination-counter {counter_class}">{counter}</span>
</nav>"#,
            id = section.id(),
            previous = arrow(
                &section.previous_class(),
                "Previous page",
                "&larr;",
                state.has_previous()
            ),
            next = arrow(&section.next_class(), "Next page", "&rarr;", state.has_next()),
            counter_class = section.counter_class(),
            counter = state.counter_label(),
        )
    }

    /// Full section markup: wrapper, item nodes and controls.
    #[must_use]
    pub fn to_html(&self) -> String {
        let section = self.section;
        let mut html = format!(
            "<div class=\"{root}\" {data_section}=\"{id}\" {data_total}=\"{total}\" {data_per_page}=\"{per_page}\">\n<div class=\"items items-{id}\">\n",
            root = classes::SECTION_ROOT,
            data_section = classes::DATA_SECTION,
            data_total = classes::DATA_TOTAL_PAGES,
            data_per_page = classes::DATA_ITEMS_PER_PAGE,
            id = section.id(),
            total = self.total_pages(),
            per_page = self.partition.items_per_page(),
        );

        for item in &self.items {
            let state = if item.visible {
                classes::VISIBLE
            } else {
                classes::HIDDEN
            };
            let _ = writeln!(
                html,
                "<div class=\"{} {} {state}\" data-index=\"{}\">\n{}\n</div>",
                classes::ITEM,
                section.item_class(),
                item.index,
                item.html
            );
        }

        html.push_str("</div>\n");
        html.push_str(&self.controls_html());
        html.push_str("\n</div>");
        html
    }
}

fn arrow(class: &str, label: &str, glyph: &str, enabled: bool) -> String {
    let state = if enabled {
        classes::ACTIVE
    } else {
        classes::DISABLED
    };
    format!(
        r#"<button type="button" class="pagination-arrow {class} {state}" aria-label="{label}" aria-disabled="{disabled}">{glyph}</button>"#,
        disabled = !enabled,
    )
}
