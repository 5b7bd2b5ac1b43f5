//! Paginated sections and the class names that tie markup to behavior.
//!
//! Every class or attribute the controller selects on is produced here, so
//! the composer and the controller cannot drift apart.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::PaginationError;

/// Section-independent class and attribute names.
pub mod classes {
    /// Carried by every paginated item node.
    pub const ITEM: &str = "item";

    /// Item belongs to the current page.
    pub const VISIBLE: &str = "page-visible";

    /// Item is outside the current page.
    pub const HIDDEN: &str = "hidden";

    /// Affordance can be clicked.
    pub const ACTIVE: &str = "page-active";

    /// Affordance is at a boundary.
    pub const DISABLED: &str = "page-disabled";

    /// Wrapper around a section's items and controls.
    pub const SECTION_ROOT: &str = "paginated-section";

    /// Attribute naming the section on its wrapper.
    pub const DATA_SECTION: &str = "data-section";

    /// Attribute holding the build-time page count.
    pub const DATA_TOTAL_PAGES: &str = "data-total-pages";

    /// Attribute holding the build-time page size.
    pub const DATA_ITEMS_PER_PAGE: &str = "data-items-per-page";
}

/// An independent paginated grouping of items on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Project cards on the home page.
    Projects,
    /// Log entry rows on the home page.
    Logs,
}

impl Section {
    /// All sections, in page order.
    pub const ALL: [Section; 2] = [Section::Projects, Section::Logs];

    /// Stable identifier used to scope class names.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Logs => "logs",
        }
    }

    /// Class carried by each item of this section.
    #[must_use]
    pub fn item_class(self) -> &'static str {
        match self {
            Self::Projects => "project-item",
            Self::Logs => "log-item",
        }
    }

    /// Page size used when configuration does not say otherwise.
    #[must_use]
    pub fn default_items_per_page(self) -> usize {
        match self {
            Self::Projects => 4,
            Self::Logs => 3,
        }
    }

    /// Class of the "previous" arrow.
    #[must_use]
    pub fn previous_class(self) -> String {
        format!("pagination-left-{}", self.id())
    }

    /// Class of the "next" arrow.
    #[must_use]
    pub fn next_class(self) -> String {
        format!("pagination-right-{}", self.id())
    }

    /// Class of the page counter.
    #[must_use]
    pub fn counter_class(self) -> String {
        format!("pagination-counter-{}", self.id())
    }

    /// CSS selector matching this section's wrapper.
    #[must_use]
    pub fn root_selector(self) -> String {
        format!(
            ".{}[{}=\"{}\"]",
            classes::SECTION_ROOT,
            classes::DATA_SECTION,
            self.id()
        )
    }

    /// CSS selector matching this section's items.
    #[must_use]
    pub fn item_selector(self) -> String {
        format!(".{}.{}", classes::ITEM, self.item_class())
    }

    /// CSS selector matching the "previous" arrow.
    #[must_use]
    pub fn previous_selector(self) -> String {
        format!(".{}", self.previous_class())
    }

    /// CSS selector matching the "next" arrow.
    #[must_use]
    pub fn next_selector(self) -> String {
        format!(".{}", self.next_class())
    }

    /// CSS selector matching the page counter.
    #[must_use]
    pub fn counter_selector(self) -> String {
        format!(".{}", self.counter_class())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| PaginationError::UnknownSection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_ids() {
        assert_eq!(Section::Projects.id(), "projects");
        assert_eq!(Section::Logs.id(), "logs");
        assert_eq!(Section::Logs.to_string(), "logs");
    }

    #[test]
    fn test_default_items_per_page() {
        assert_eq!(Section::Projects.default_items_per_page(), 4);
        assert_eq!(Section::Logs.default_items_per_page(), 3);
    }

    #[test]
    fn test_scoped_classes_do_not_collide() {
        let projects = Section::Projects;
        let logs = Section::Logs;

        assert_ne!(projects.previous_class(), logs.previous_class());
        assert_ne!(projects.next_class(), logs.next_class());
        assert_ne!(projects.counter_class(), logs.counter_class());
        assert_ne!(projects.item_class(), logs.item_class());
    }

    #[test]
    fn test_selectors() {
        assert_eq!(
            Section::Logs.root_selector(),
            ".paginated-section[data-section=\"logs\"]"
        );
        assert_eq!(Section::Logs.item_selector(), ".item.log-item");
        assert_eq!(Section::Logs.previous_selector(), ".pagination-left-logs");
        assert_eq!(Section::Projects.next_selector(), ".pagination-right-projects");
        assert_eq!(
            Section::Projects.counter_selector(),
            ".pagination-counter-projects"
        );
    }

    #[test]
    fn test_from_str() {
        assert_eq!("projects".parse::<Section>(), Ok(Section::Projects));
        assert_eq!("logs".parse::<Section>(), Ok(Section::Logs));
        assert_eq!(
            "blog".parse::<Section>(),
            Err(PaginationError::UnknownSection("blog".to_string()))
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Section::Projects).unwrap();
        assert_eq!(json, "\"projects\"");

        let section: Section = serde_json::from_str("\"logs\"").unwrap();
        assert_eq!(section, Section::Logs);
    }
}
