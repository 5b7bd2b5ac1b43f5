//! Build orchestration.
//!
//! Writes every route of the site into the output directory. Article pages
//! are rendered in parallel; each writes its own file.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use portfolio_core::{ArticleSource, Catalog, Config, LogEntry, ParsedContent};
use portfolio_parser::ParserRegistry;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assets::{AssetError, AssetProcessor, write_file},
    html::{HtmlError, HtmlGenerator, Route},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTML generation error.
    #[error("HTML error: {0}")]
    Html(#[from] HtmlError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default)]
pub struct BuildStats {
    /// HTML pages written, articles included.
    pub pages: usize,

    /// Article pages rendered from a content file.
    pub articles: usize,

    /// Article pages that fell back to the placeholder.
    pub placeholders: usize,

    /// Static files copied plus generated stylesheets.
    pub assets: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    catalog: Catalog,
    content_dir: PathBuf,
    output_dir: PathBuf,
    static_dir: Option<PathBuf>,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(
        config: Config,
        catalog: Catalog,
        content_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            catalog,
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
            static_dir: None,
        }
    }

    /// Set the static assets directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Execute the full build process.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        let mut stats = BuildStats::default();

        info!(
            content = %self.content_dir.display(),
            output = %self.output_dir.display(),
            projects = self.catalog.projects.len(),
            logs = self.catalog.logs.len(),
            "starting build"
        );

        self.clean_output()?;

        let generator = HtmlGenerator::new(self.config.clone());

        self.write_route(&Route::Home, &generator.generate_home(&self.catalog)?)?;
        self.write_route(&Route::Contact, &generator.generate_contact()?)?;
        self.write_route(
            &Route::LogsIndex,
            &generator.generate_logs_index(&self.catalog)?,
        )?;
        stats.pages = 3;

        let (articles, placeholders) = self.generate_articles(&generator)?;
        stats.articles = articles;
        stats.placeholders = placeholders;
        stats.pages += articles + placeholders;

        let assets = AssetProcessor::new();
        stats.assets = assets.write_stylesheets(&self.output_dir)?;
        if let Some(ref static_dir) = self.static_dir {
            stats.assets += assets.process(static_dir, &self.output_dir)?;
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            articles = stats.articles,
            placeholders = stats.placeholders,
            assets = stats.assets,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        if self.output_dir.exists() {
            debug!(dir = %self.output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(&self.output_dir)?;
        }
        fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }

    /// Render every article page. Returns `(rendered, placeholders)`.
    fn generate_articles(&self, generator: &HtmlGenerator) -> Result<(usize, usize)> {
        let parsers = ParserRegistry::with_theme(&self.config.build.syntax_theme);

        info!(count = self.catalog.logs.len(), "generating article pages");

        let rendered = self
            .catalog
            .logs
            .par_iter()
            .map(|entry| {
                let content = self.load_article(&parsers, entry);
                let html = generator.generate_article(entry, content.as_ref())?;
                self.write_route(&Route::Article(entry.slug.clone()), &html)?;
                Ok(content.is_some())
            })
            .collect::<Result<Vec<bool>>>()?;

        let articles = rendered.iter().filter(|r| **r).count();
        Ok((articles, rendered.len() - articles))
    }

    /// Resolve and render an article's content file. `None` means the
    /// placeholder is shown.
    fn load_article(&self, parsers: &ParserRegistry, entry: &LogEntry) -> Option<ParsedContent> {
        let source = match ArticleSource::resolve(&self.content_dir, &entry.slug) {
            Ok(Some(source)) => source,
            Ok(None) => {
                debug!(slug = %entry.slug, "no content file, using placeholder");
                return None;
            }
            Err(e) => {
                warn!(slug = %entry.slug, error = %e, "failed to read content file, using placeholder");
                return None;
            }
        };

        match parsers.parse_source(&source) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!(
                    slug = %entry.slug,
                    path = %source.path.display(),
                    error = %e,
                    "failed to render content file, using placeholder"
                );
                None
            }
        }
    }

    fn write_route(&self, route: &Route, html: &str) -> Result<()> {
        let path = self.output_dir.join(route.output_path());
        write_file(&path, html)?;
        debug!(path = %path.display(), "wrote page");
        Ok(())
    }

    /// Output directory pages are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}
