//! Article content sources.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::Result;

/// Type of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Markdown content (.md files).
    Markdown,
    /// Typst content (.typ files).
    Typst,
}

impl ContentType {
    /// Lookup order when resolving an article by slug.
    pub const PRECEDENCE: [ContentType; 2] = [ContentType::Markdown, ContentType::Typst];

    /// Determine content type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "typ" | "typst" => Some(Self::Typst),
            _ => None,
        }
    }

    /// Get the file extension for this content type.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Typst => "typ",
        }
    }
}

/// Table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,

    /// Heading text.
    pub text: String,

    /// Anchor ID for linking.
    pub id: String,
}

/// Rendered article body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedContent {
    /// Rendered HTML content.
    pub html: String,

    /// Table of contents extracted from headings.
    pub toc: Vec<TocEntry>,
}

/// An article's source file, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSource {
    /// File the body was read from.
    pub path: PathBuf,

    /// How to render the body.
    pub content_type: ContentType,

    /// Raw source text.
    pub body: String,
}

impl ArticleSource {
    /// Find and read `{slug}.md` or `{slug}.typ` under `content_dir`.
    ///
    /// `Ok(None)` means no source exists for the slug.
    pub fn resolve(content_dir: &Path, slug: &str) -> Result<Option<Self>> {
        match Self::locate(content_dir, slug) {
            Some((path, content_type)) => {
                let body = std::fs::read_to_string(&path)?;
                Ok(Some(Self {
                    path,
                    content_type,
                    body,
                }))
            }
            None => Ok(None),
        }
    }

    /// Path and type of the source for `slug`, without reading it.
    pub fn locate(content_dir: &Path, slug: &str) -> Option<(PathBuf, ContentType)> {
        ContentType::PRECEDENCE.into_iter().find_map(|content_type| {
            let path = content_dir.join(format!("{slug}.{}", content_type.extension()));
            trace!(path = %path.display(), "probing article source");
            path.is_file().then_some((path, content_type))
        })
    }
}
