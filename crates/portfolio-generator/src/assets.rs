//! Static asset copying and generated stylesheets.

use std::{
    fs,
    path::{Path, PathBuf},
};

use portfolio_pagination::classes;
use portfolio_parser::ContentTheme;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::html::{CONTENT_CSS, SITE_CSS};

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory walk failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Invalid asset path.
    #[error("invalid asset path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Layout rules shared by every page.
const SITE_BASE_CSS: &str = r#"*, *::before, *::after { box-sizing: border-box; }
body {
  margin: 0;
  font-family: 'Space Grotesk', system-ui, sans-serif;
  color: #111817;
  background: #ffffff;
  line-height: 1.5;
}
a { color: inherit; text-decoration: none; }
.site-header, .site-footer, .page-main { max-width: 64rem; margin: 0 auto; padding: 1.5rem; }
.site-header { display: flex; justify-content: space-between; align-items: center; }
.brand { display: inline-flex; gap: 0.5rem; align-items: center; font-weight: 600; }
.site-nav { display: flex; gap: 1.5rem; text-transform: uppercase; font-size: 0.875rem; }
.site-footer { display: grid; grid-template-columns: repeat(3, 1fr); font-size: 0.75rem; letter-spacing: 0.05em; }
.layout-section { margin: 3rem 0; }
.section-header { display: flex; justify-content: space-between; font-size: 0.75rem; letter-spacing: 0.1em; border-bottom: 1px solid #e5e7eb; padding-bottom: 0.5rem; margin-bottom: 1.5rem; }
.hero-heading { font-size: 1.875rem; font-weight: 600; }
.hero-facts { display: flex; gap: 2rem; }
.hero-facts div { display: flex; gap: 0.5rem; }
.hero-facts dd { margin: 0; }
.items-projects { display: grid; grid-template-columns: repeat(auto-fill, minmax(14rem, 1fr)); gap: 1rem; }
.project-card { display: block; height: 100%; padding: 1.25rem; border: 1px solid #e5e7eb; }
.project-card:hover { border-color: #14b8aa; }
.project-description { font-size: 0.75rem; color: #4b5563; }
.log-row { display: grid; grid-template-columns: 7rem 1fr auto auto; gap: 1rem; align-items: center; padding: 0.75rem 0; border-bottom: 1px solid #e5e7eb; }
.log-date, .log-category { font-size: 0.75rem; color: #4b5563; }
.pagination { display: flex; gap: 0.75rem; align-items: center; margin-top: 1rem; }
.pagination-arrow { background: none; border: 1px solid currentColor; padding: 0.25rem 0.75rem; cursor: pointer; }
.pagination-line { flex: 1; height: 1px; background: #e5e7eb; }
.pagination-counter { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.1em; }
.article-header { margin-bottom: 2rem; }
.article-category, .article-published { font-size: 0.75rem; letter-spacing: 0.1em; color: #4b5563; }
.article-lead { font-size: 1.125rem; }
.toc { font-size: 0.875rem; margin-bottom: 2rem; }
.toc-level-3 { padding-left: 1rem; }
.contact-form { display: grid; gap: 0.75rem; max-width: 32rem; }
.contact-form input, .contact-form textarea { font: inherit; padding: 0.5rem; border: 1px solid #e5e7eb; }
.logs-index-list { font-family: ui-monospace, monospace; list-style: none; padding: 0; }
.logs-index-list li { display: flex; justify-content: space-between; max-width: 32rem; }
@media (prefers-color-scheme: dark) {
  body { color: #ffffff; background: #111817; }
  .section-header, .project-card, .log-row, .pagination-line { border-color: #374151; }
}
"#;

/// Site stylesheet, including the visibility and affordance rules the
/// pagination controller toggles.
pub fn site_stylesheet() -> String {
    format!(
        "{SITE_BASE_CSS}.{hidden} {{ display: none !important; }}\n\
.{disabled} {{ opacity: 0.3; cursor: default; pointer-events: none; }}\n\
.{active} {{ opacity: 1; }}\n",
        hidden = classes::HIDDEN,
        disabled = classes::DISABLED,
        active = classes::ACTIVE,
    )
}

/// Copies static files and writes the generated stylesheets.
#[derive(Debug, Default)]
pub struct AssetProcessor {
    theme: ContentTheme,
}

impl AssetProcessor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom article typography theme.
    #[must_use]
    pub fn with_theme(mut self, theme: ContentTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Copy every non-hidden file under `source_dir` into `dest_dir`,
    /// preserving relative paths. Returns the number of files copied.
    pub fn process(&self, source_dir: &Path, dest_dir: &Path) -> Result<usize> {
        if !source_dir.exists() {
            debug!(source = %source_dir.display(), "static directory does not exist, skipping");
            return Ok(0);
        }

        info!(
            source = %source_dir.display(),
            dest = %dest_dir.display(),
            "copying static assets"
        );

        let mut count = 0;
        let walker = WalkDir::new(source_dir)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        for entry in walker {
            let entry = entry.map_err(|source| AssetError::Walk {
                path: source_dir.to_path_buf(),
                source,
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(source_dir)
                .map_err(|_| AssetError::InvalidPath(entry.path().to_path_buf()))?;
            let dest = dest_dir.join(relative);
            Self::copy_file(entry.path(), &dest)?;
            debug!(src = %entry.path().display(), dest = %dest.display(), "copied asset");
            count += 1;
        }

        info!(count, "static assets copied");
        Ok(count)
    }

    /// Write `styles/site.css` and `styles/markdown.css` under `dest_dir`.
    pub fn write_stylesheets(&self, dest_dir: &Path) -> Result<usize> {
        write_file(&dest_dir.join(SITE_CSS), &site_stylesheet())?;
        write_file(&dest_dir.join(CONTENT_CSS), &self.theme.render())?;
        debug!(dest = %dest_dir.display(), "stylesheets written");
        Ok(2)
    }

    /// Copy a single file, creating parent directories.
    pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, dest)?;
        Ok(())
    }
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_process_copies_tree() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        fs::write(source.path().join("favicon.ico"), b"icon").unwrap();
        fs::create_dir_all(source.path().join("images")).unwrap();
        fs::write(source.path().join("images/me.png"), b"png").unwrap();

        let count = AssetProcessor::new()
            .process(source.path(), dest.path())
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read(dest.path().join("favicon.ico")).unwrap(), b"icon");
        assert!(dest.path().join("images/me.png").exists());
    }

    #[test]
    fn test_process_skips_hidden() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();

        fs::write(source.path().join(".DS_Store"), b"x").unwrap();
        fs::create_dir_all(source.path().join(".git")).unwrap();
        fs::write(source.path().join(".git/config"), b"x").unwrap();
        fs::write(source.path().join("robots.txt"), b"ok").unwrap();

        let count = AssetProcessor::new()
            .process(source.path(), dest.path())
            .unwrap();

        assert_eq!(count, 1);
        assert!(!dest.path().join(".DS_Store").exists());
        assert!(!dest.path().join(".git").exists());
    }

    #[test]
    fn test_missing_source_is_skipped() {
        let dest = TempDir::new().unwrap();
        let count = AssetProcessor::new()
            .process(&dest.path().join("missing"), dest.path())
            .unwrap();

        assert_eq!(count, 0);
    }

    #[test]
    fn test_write_stylesheets() {
        let dest = TempDir::new().unwrap();
        AssetProcessor::new().write_stylesheets(dest.path()).unwrap();

        let site = fs::read_to_string(dest.path().join("styles/site.css")).unwrap();
        assert!(site.contains(".hidden { display: none !important; }"));
        assert!(site.contains(".page-disabled"));

        let content = fs::read_to_string(dest.path().join("styles/markdown.css")).unwrap();
        assert!(content.contains(".markdown-content h1"));
    }
}
