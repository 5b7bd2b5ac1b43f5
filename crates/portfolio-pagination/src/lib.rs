//! Portfolio Pagination
//!
//! The contract between the build-time page composer and the view-time
//! content window controller.
//!
//! # Modules
//!
//! - [`section`] - Typed section identifiers and their scoped class names
//! - [`partition`] - Page arithmetic over an ordered list of items
//! - [`window`] - The per-section navigation state machine

pub mod partition;
pub mod section;
pub mod window;

pub use partition::PagePartition;
pub use section::{Section, classes};
use thiserror::Error;
pub use window::WindowState;

/// Pagination errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// A page cannot hold zero items.
    #[error("items per page must be at least 1")]
    ZeroItemsPerPage,

    /// A section identifier that no section answers to.
    #[error("unknown section: {0}")]
    UnknownSection(String),
}

/// Result type for pagination operations.
pub type Result<T> = std::result::Result<T, PaginationError>;

/// Format a page number the way counters display it (`1` -> `01`).
#[must_use]
pub fn pad_page(page: usize) -> String {
    format!("{page:02}")
}

/// Counter text for a section, e.g. `page 02 / 05`.
#[must_use]
pub fn counter_label(page: usize, total_pages: usize) -> String {
    format!("page {} / {}", pad_page(page), pad_page(total_pages))
}
