//! Typst markup renderer.
//!
//! Walks the untyped syntax tree produced by `typst-syntax` and emits HTML
//! for the markup subset used by articles: headings, paragraphs, strong and
//! emphasis, raw text and blocks, lists, term lists, links and line breaks.
//! Code expressions (`#set`, `#let`, function calls) and comments produce no
//! output.

use portfolio_core::{ParsedContent, TocEntry};
use thiserror::Error;
use tracing::trace;
use typst_syntax::{SyntaxKind, SyntaxNode};

use crate::{AnchorSet, DEFAULT_TOC_DEPTH, html_escape, syntax::SyntaxHighlighter};

/// Typst parsing errors.
#[derive(Debug, Error)]
pub enum TypstError {
    /// The source has syntax errors.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// The document has no content.
    #[error("document is empty")]
    Empty,
}

/// Result type for Typst operations.
pub type Result<T> = std::result::Result<T, TypstError>;

/// Typst markup renderer with syntax highlighting for raw blocks.
#[derive(Debug)]
pub struct TypstParser {
    highlighter: SyntaxHighlighter,
    toc_depth: u8,
}

impl Default for TypstParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TypstParser {
    /// Create a new Typst parser.
    pub fn new() -> Self {
        Self {
            highlighter: SyntaxHighlighter::default(),
            toc_depth: DEFAULT_TOC_DEPTH,
        }
    }

    /// Create a parser with a custom syntax theme for raw blocks.
    pub fn with_theme(theme: &str) -> Self {
        Self {
            highlighter: SyntaxHighlighter::new(theme),
            ..Self::new()
        }
    }

    /// Limit the table of contents to headings at or above `depth`.
    #[must_use]
    pub fn with_toc_depth(mut self, depth: u8) -> Self {
        self.toc_depth = depth;
        self
    }

    /// Render a Typst document.
    pub fn parse(&self, content: &str) -> Result<ParsedContent> {
        if content.trim().is_empty() {
            return Err(TypstError::Empty);
        }

        let root = typst_syntax::parse(content);
        if root.erroneous() {
            let message = root
                .errors()
                .into_iter()
                .map(|error| error.message.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(TypstError::Syntax(message));
        }

        let mut renderer = Renderer::new(&self.highlighter, self.toc_depth);
        renderer.markup(&root);
        Ok(renderer.finish())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Numbered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            Self::Bullet => "ul",
            Self::Numbered => "ol",
        }
    }
}

struct Renderer<'a> {
    highlighter: &'a SyntaxHighlighter,
    toc_depth: u8,
    anchors: AnchorSet,
    toc: Vec<TocEntry>,
    html: String,
    paragraph: String,
    list: Option<(ListKind, Vec<String>)>,
}

impl<'a> Renderer<'a> {
    fn new(highlighter: &'a SyntaxHighlighter, toc_depth: u8) -> Self {
        Self {
            highlighter,
            toc_depth,
            anchors: AnchorSet::default(),
            toc: Vec::new(),
            html: String::new(),
            paragraph: String::new(),
            list: None,
        }
    }

    fn finish(mut self) -> ParsedContent {
        self.flush_paragraph();
        self.flush_list();
        ParsedContent {
            html: self.html,
            toc: self.toc,
        }
    }

    /// Block-level pass over a markup node.
    fn markup(&mut self, node: &SyntaxNode) {
        let mut after_hash = false;
        for child in node.children() {
            if after_hash {
                after_hash = false;
                continue;
            }

            match child.kind() {
                SyntaxKind::Hash => after_hash = true,
                SyntaxKind::LineComment | SyntaxKind::BlockComment | SyntaxKind::Label => {}
                SyntaxKind::Heading => self.heading(child),
                SyntaxKind::ListItem => self.list_item(child, ListKind::Bullet),
                SyntaxKind::EnumItem => self.list_item(child, ListKind::Numbered),
                SyntaxKind::TermItem => self.term_item(child),
                SyntaxKind::Parbreak => {
                    self.flush_paragraph();
                    self.flush_list();
                }
                SyntaxKind::Space => {
                    if self.list.is_none() && !self.paragraph.is_empty() {
                        self.paragraph.push(' ');
                    }
                }
                SyntaxKind::Raw if is_block_raw(child) => self.raw_block(child),
                _ => {
                    self.flush_list();
                    let rendered = inline(child);
                    self.paragraph.push_str(&rendered);
                }
            }
        }
    }

    fn heading(&mut self, node: &SyntaxNode) {
        self.flush_paragraph();
        self.flush_list();

        let level = node
            .children()
            .find(|c| c.kind() == SyntaxKind::HeadingMarker)
            .map_or(1, |marker| marker.text().len())
            .clamp(1, 6) as u8;
        let body = child_markup(node).map(inline).unwrap_or_default();
        let text = child_markup(node).map(plain_text).unwrap_or_default();
        let text = text.trim();
        let id = self.anchors.claim(text);

        if level <= self.toc_depth {
            self.toc.push(TocEntry {
                level,
                text: text.to_string(),
                id: id.clone(),
            });
        }

        trace!(level, id = %id, "typst heading");
        self.html.push_str(&format!(
            "<h{level} id=\"{}\">{}</h{level}>\n",
            html_escape(&id),
            body.trim()
        ));
    }

    fn list_item(&mut self, node: &SyntaxNode, kind: ListKind) {
        self.flush_paragraph();
        if self.list.as_ref().is_some_and(|(open, _)| *open != kind) {
            self.flush_list();
        }

        let body = child_markup(node).map(inline).unwrap_or_default();
        self.list
            .get_or_insert_with(|| (kind, Vec::new()))
            .1
            .push(body.trim().to_string());
    }

    fn term_item(&mut self, node: &SyntaxNode) {
        self.flush_paragraph();
        self.flush_list();

        let mut parts = node.children().filter(|c| c.kind() == SyntaxKind::Markup);
        let term = parts.next().map(inline).unwrap_or_default();
        let description = parts.next().map(inline).unwrap_or_default();
        self.html.push_str(&format!(
            "<dl><dt>{}</dt><dd>{}</dd></dl>\n",
            term.trim(),
            description.trim()
        ));
    }

    fn raw_block(&mut self, node: &SyntaxNode) {
        self.flush_paragraph();
        self.flush_list();

        let source = node.clone().into_text();
        let raw = split_raw(&source);
        self.html
            .push_str(&self.highlighter.render_block(&raw.code, raw.lang.as_deref()));
    }

    fn flush_paragraph(&mut self) {
        let text = std::mem::take(&mut self.paragraph);
        let text = text.trim();
        if !text.is_empty() {
            self.html.push_str(&format!("<p>{text}</p>\n"));
        }
    }

    fn flush_list(&mut self) {
        if let Some((kind, items)) = self.list.take() {
            let tag = kind.tag();
            self.html.push_str(&format!("<{tag}>\n"));
            for item in items {
                self.html.push_str(&format!("<li>{item}</li>\n"));
            }
            self.html.push_str(&format!("</{tag}>\n"));
        }
    }
}

/// The `Markup` child of a heading, list item or strong/emph node.
fn child_markup(node: &SyntaxNode) -> Option<&SyntaxNode> {
    node.children().find(|c| c.kind() == SyntaxKind::Markup)
}

/// Render a node as inline HTML.
fn inline(node: &SyntaxNode) -> String {
    match node.kind() {
        SyntaxKind::Text => html_escape(node.text()),
        SyntaxKind::Space => " ".to_string(),
        SyntaxKind::Linebreak => "<br />".to_string(),
        SyntaxKind::Escape => html_escape(&unescape(node.text())),
        SyntaxKind::Shorthand => shorthand(node.text()).to_string(),
        SyntaxKind::SmartQuote => html_escape(node.text()),
        SyntaxKind::Strong => format!(
            "<strong>{}</strong>",
            child_markup(node).map(inline).unwrap_or_default()
        ),
        SyntaxKind::Emph => format!(
            "<em>{}</em>",
            child_markup(node).map(inline).unwrap_or_default()
        ),
        SyntaxKind::Raw => {
            let source = node.clone().into_text();
            format!("<code>{}</code>", html_escape(&split_raw(&source).code))
        }
        SyntaxKind::Link => {
            let url = html_escape(node.text());
            format!("<a href=\"{url}\">{url}</a>")
        }
        SyntaxKind::Ref => {
            let source = node.clone().into_text();
            let target = html_escape(source.trim_start_matches('@'));
            format!("<a href=\"#{target}\">{target}</a>")
        }
        SyntaxKind::Equation => format!(
            "<span class=\"math inline\">{}</span>",
            html_escape(node.clone().into_text().trim_matches('$').trim())
        ),
        SyntaxKind::Label | SyntaxKind::LineComment | SyntaxKind::BlockComment => String::new(),
        SyntaxKind::Markup => {
            let mut out = String::new();
            let mut after_hash = false;
            for child in node.children() {
                if after_hash {
                    after_hash = false;
                    continue;
                }
                if child.kind() == SyntaxKind::Hash {
                    after_hash = true;
                    continue;
                }
                out.push_str(&inline(child));
            }
            out
        }
        _ if node.children().len() == 0 => html_escape(node.text()),
        _ => node.children().map(inline).collect(),
    }
}

/// Plain text of a node, used for heading anchors and the table of contents.
fn plain_text(node: &SyntaxNode) -> String {
    match node.kind() {
        SyntaxKind::Space => " ".to_string(),
        SyntaxKind::Escape => unescape(node.text()),
        SyntaxKind::Shorthand => shorthand(node.text()).to_string(),
        SyntaxKind::Raw => split_raw(&node.clone().into_text()).code,
        SyntaxKind::Star
        | SyntaxKind::Underscore
        | SyntaxKind::Hash
        | SyntaxKind::Label
        | SyntaxKind::LineComment
        | SyntaxKind::BlockComment => String::new(),
        _ if node.children().len() == 0 => node.text().to_string(),
        _ => node.children().map(plain_text).collect(),
    }
}

fn is_block_raw(node: &SyntaxNode) -> bool {
    node.clone().into_text().starts_with("```")
}

/// Raw text split into language tag and code.
#[derive(Debug, PartialEq, Eq)]
struct RawText {
    lang: Option<String>,
    code: String,
}

/// Split raw source (including its backtick delimiters) into language and
/// code, trimming the delimiter lines and common indentation of blocks.
fn split_raw(source: &str) -> RawText {
    let fence = source.chars().take_while(|c| *c == '`').count();
    let inner = if source.len() >= fence * 2 {
        &source[fence..source.len() - fence]
    } else {
        ""
    };

    if fence < 3 {
        return RawText {
            lang: None,
            code: inner.to_string(),
        };
    }

    let lang_len = inner
        .find(|c: char| c.is_whitespace() || c == '`')
        .unwrap_or(inner.len());
    let lang = (lang_len > 0).then(|| inner[..lang_len].to_string());
    let mut body = &inner[lang_len..];

    if let Some(newline) = body.find('\n')
        && body[..newline].trim().is_empty()
    {
        body = &body[newline + 1..];
    }
    if let Some(newline) = body.rfind('\n')
        && body[newline + 1..].trim().is_empty()
    {
        body = &body[..newline];
    }

    RawText {
        lang,
        code: dedent(body),
    }
}

/// Strip whitespace indentation shared by every non-blank line.
fn dedent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve a backslash escape (`\#`, `\u{1F600}`).
fn unescape(text: &str) -> String {
    let rest = text.strip_prefix('\\').unwrap_or(text);
    if let Some(hex) = rest
        .strip_prefix("u{")
        .and_then(|hex| hex.strip_suffix('}'))
        && let Some(c) = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    {
        return c.to_string();
    }
    rest.to_string()
}

fn shorthand(text: &str) -> &str {
    match text {
        "~" => "\u{a0}",
        "---" => "\u{2014}",
        "--" => "\u{2013}",
        "-?" => "\u{ad}",
        "..." => "\u{2026}",
        other => other,
    }
}
