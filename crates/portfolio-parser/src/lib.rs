//! Portfolio Parser Library
//!
//! Renders article sources (Markdown and Typst) to HTML and generates the
//! stylesheet for rendered content.

pub mod markdown;
pub mod stylesheet;
pub mod syntax;
pub mod typst;

pub use markdown::MarkdownParser;
use portfolio_core::{ArticleSource, ContentType, ParsedContent};
pub use stylesheet::ContentTheme;
pub use syntax::{SyntaxHighlighter, is_known_theme};
use thiserror::Error;
pub use typst::TypstParser;

/// Deepest heading level listed in a table of contents.
pub const DEFAULT_TOC_DEPTH: u8 = 3;

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Markdown parsing error.
    #[error("markdown error: {0}")]
    Markdown(#[from] markdown::MarkdownError),

    /// Typst parsing error.
    #[error("typst error: {0}")]
    Typst(#[from] typst::TypstError),
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Trait for content parsers.
pub trait ContentParser {
    /// Render a source body to HTML.
    fn parse(&self, content: &str) -> Result<ParsedContent>;
}

impl ContentParser for MarkdownParser {
    fn parse(&self, content: &str) -> Result<ParsedContent> {
        Ok(self.parse(content)?)
    }
}

impl ContentParser for TypstParser {
    fn parse(&self, content: &str) -> Result<ParsedContent> {
        Ok(self.parse(content)?)
    }
}

/// Registry for content parsers, dispatching on content type.
#[derive(Debug)]
pub struct ParserRegistry {
    markdown: MarkdownParser,
    typst: TypstParser,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    /// Create a new parser registry with default parsers.
    pub fn new() -> Self {
        Self {
            markdown: MarkdownParser::new(),
            typst: TypstParser::new(),
        }
    }

    /// Create a parser registry with a custom syntax theme.
    pub fn with_theme(theme: &str) -> Self {
        Self {
            markdown: MarkdownParser::with_theme(theme),
            typst: TypstParser::with_theme(theme),
        }
    }

    /// Render `content` with the parser for `content_type`.
    pub fn parse(&self, content: &str, content_type: ContentType) -> Result<ParsedContent> {
        match content_type {
            ContentType::Markdown => Ok(self.markdown.parse(content)?),
            ContentType::Typst => Ok(self.typst.parse(content)?),
        }
    }

    /// Render a resolved article source.
    pub fn parse_source(&self, source: &ArticleSource) -> Result<ParsedContent> {
        self.parse(&source.body, source.content_type)
    }

    /// Get the markdown parser.
    pub fn markdown(&self) -> &MarkdownParser {
        &self.markdown
    }

    /// Get the typst parser.
    pub fn typst(&self) -> &TypstParser {
        &self.typst
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Convert text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out unique heading anchors within one document.
#[derive(Debug, Default)]
pub(crate) struct AnchorSet {
    seen: std::collections::HashMap<String, usize>,
}

impl AnchorSet {
    /// Slug for `text`, suffixed with `-N` when already taken.
    pub(crate) fn claim(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }

        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        if *count == 1 {
            base
        } else {
            format!("{base}-{}", *count - 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_markdown() {
        let registry = ParserRegistry::new();
        let result = registry
            .parse("# Hello\n\nWorld.", ContentType::Markdown)
            .unwrap();

        assert!(result.html.contains("<h1 id=\"hello\">Hello</h1>"));
        assert_eq!(result.toc.len(), 1);
    }

    #[test]
    fn test_registry_typst() {
        let registry = ParserRegistry::new();
        let result = registry
            .parse("= Hello\n\nWorld.", ContentType::Typst)
            .unwrap();

        assert!(result.html.contains("<h1 id=\"hello\">Hello</h1>"));
        assert!(result.html.contains("<p>World.</p>"));
    }

    #[test]
    fn test_registry_parse_source() {
        let registry = ParserRegistry::new();
        let source = ArticleSource {
            path: "content/hello.md".into(),
            content_type: ContentType::Markdown,
            body: "Plain *text*.".to_string(),
        };

        let result = registry.parse_source(&source).unwrap();
        assert!(result.html.contains("<em>text</em>"));
    }

    #[test]
    fn test_content_parser_trait() {
        let parser = MarkdownParser::new();
        let result: Result<ParsedContent> = ContentParser::parse(&parser, "Content");
        assert!(result.is_ok());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test 123 Post"), "test-123-post");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
    }

    #[test]
    fn test_anchor_set_deduplicates() {
        let mut anchors = AnchorSet::default();

        assert_eq!(anchors.claim("Setup"), "setup");
        assert_eq!(anchors.claim("Setup"), "setup-1");
        assert_eq!(anchors.claim("Setup"), "setup-2");
        assert_eq!(anchors.claim("!!!"), "section");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape(r#"a & "b" 'c'"#), "a &amp; &quot;b&quot; &#39;c&#39;");
    }
}
