//! Portfolio CLI Library
//!
//! Command implementations for the `portfolio` binary, exposed as a library
//! so they can be driven from tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, check)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use portfolio::cmd::build::{self, BuildArgs};
//!
//! build::run(Path::new("portfolio.toml"), &BuildArgs::default()).unwrap();
//! ```

pub mod cmd;

pub use portfolio_core::{Catalog, Config};
pub use portfolio_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// `verbose` maps 0 to WARN, 1 to INFO, 2 to DEBUG and anything higher to
/// TRACE. `RUST_LOG` directives are honoured on top.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
