//! Site configuration management.

use std::path::{Path, PathBuf};

use portfolio_pagination::{PagePartition, Section};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure.
///
/// Every section has defaults, so an empty file (or no file at all) yields
/// the built-in site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,

    /// Per-section page sizes.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Where the catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site name, appended to every page title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    pub base_url: String,

    /// Site description for meta tags.
    pub description: Option<String>,

    /// Site author name.
    pub author: Option<String>,

    /// Keywords for meta tags.
    pub keywords: Vec<String>,

    /// Document language.
    pub locale: String,

    /// Separator between page title and site title.
    pub title_separator: String,

    /// External stylesheets linked from every page.
    pub stylesheets: Vec<String>,

    /// Address the contact form posts to.
    pub contact_email: String,

    /// Code hosting profile linked from the header.
    pub github_url: String,
}

/// Build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory for generated site.
    pub output_dir: String,

    /// Directory holding article sources (`{slug}.md` / `{slug}.typ`).
    pub content_dir: String,

    /// Directory copied verbatim into the output.
    pub static_dir: String,

    /// Syntax highlighting theme name.
    pub syntax_theme: String,

    /// URL of the pagination controller module.
    pub controller_script: String,
}

/// Items per page for each paginated section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Project cards per page.
    pub projects_per_page: usize,

    /// Log rows per page.
    pub logs_per_page: usize,
}

/// Catalog source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML file with `[[projects]]` and `[[logs]]`; built-in list when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Mac Long".to_string(),
            base_url: "https://maclong.dev".to_string(),
            description: Some(
                "Full Stack Swift specialising in Web Services, CLI Tools, Embedded and Native Apple Applications."
                    .to_string(),
            ),
            author: Some("Mac Long".to_string()),
            keywords: [
                "Swift",
                "SwiftUI",
                "Hummingbird",
                "iOS",
                "macOS",
                "Full Stack",
                "POSIX",
                "UNIX",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            locale: "en".to_string(),
            title_separator: " | ".to_string(),
            stylesheets: vec![
                "https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@300;400;500;600;700;800&display=swap"
                    .to_string(),
            ],
            contact_email: "hi@maclong.dev".to_string(),
            github_url: "https://github.com/mac9sb".to_string(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: "public".to_string(),
            content_dir: "content".to_string(),
            static_dir: "static".to_string(),
            syntax_theme: "InspiredGitHub".to_string(),
            controller_script: "/pkg/portfolio_ui.js".to_string(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            projects_per_page: Section::Projects.default_items_per_page(),
            logs_per_page: Section::Logs.default_items_per_page(),
        }
    }
}

impl PaginationConfig {
    /// Page size for a section.
    #[must_use]
    pub fn items_per_page(&self, section: Section) -> usize {
        match section {
            Section::Projects => self.projects_per_page,
            Section::Logs => self.logs_per_page,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to the built-in site when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!(path = %path.display(), "no configuration file, using built-in site");
            Ok(Self::default())
        }
    }

    /// Load configuration with `PORTFOLIO__SECTION__KEY` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("PORTFOLIO").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.base_url.is_empty() {
            return Err(CoreError::config("site.base_url cannot be empty"));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        for section in Section::ALL {
            PagePartition::new(0, self.pagination.items_per_page(section))?;
        }

        Ok(())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Full `<title>` text for a page title.
    pub fn page_title(&self, title: &str) -> String {
        if title.is_empty() || title == self.site.title {
            return self.site.title.clone();
        }
        format!("{title}{}{}", self.site.title_separator, self.site.title)
    }
}
