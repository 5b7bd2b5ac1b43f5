//! Portfolio Generator Library
//!
//! Static site generation for the portfolio.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`components`] - Header, footer, hero, cards and other shared fragments
//! - [`composer`] - Paginated section markup
//! - [`article`] - Article title, lead and table of contents helpers
//! - [`html`] - Page generation for every route
//! - [`assets`] - Static asset copying and generated stylesheets
//! - [`build`] - Build orchestration

pub mod article;
pub mod assets;
pub mod build;
pub mod components;
pub mod composer;
pub mod html;
pub mod template;

pub use assets::AssetProcessor;
pub use build::{BuildError, BuildStats, Builder};
pub use components::Component;
pub use composer::{ComposedItem, ComposedSection, PageComposer};
pub use html::{HtmlGenerator, Route};
pub use template::{Template, TemplateContext, TemplateRegistry};
