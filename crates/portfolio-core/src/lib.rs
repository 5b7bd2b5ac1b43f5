//! Portfolio Core Library
//!
//! Core types, catalog, configuration, and error handling for the portfolio
//! site generator.

pub mod catalog;
pub mod config;
pub mod content;
pub mod error;

pub use catalog::{Catalog, Item, LogEntry, Project};
pub use config::Config;
pub use content::{ArticleSource, ContentType, ParsedContent, TocEntry};
pub use error::{CoreError, Result};
