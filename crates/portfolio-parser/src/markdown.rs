//! Markdown parser using pulldown-cmark.

use portfolio_core::{ParsedContent, TocEntry};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use thiserror::Error;

use crate::{AnchorSet, DEFAULT_TOC_DEPTH, html_escape, syntax::SyntaxHighlighter};

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// The document has no content.
    #[error("document is empty")]
    Empty,
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Markdown parser with syntax highlighting support.
#[derive(Debug)]
pub struct MarkdownParser {
    highlighter: SyntaxHighlighter,
    options: Options,
    toc_depth: u8,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self {
            highlighter: SyntaxHighlighter::default(),
            options,
            toc_depth: DEFAULT_TOC_DEPTH,
        }
    }

    /// Create a parser with a custom syntax theme.
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

    /// Render a markdown document.
    pub fn parse(&self, content: &str) -> Result<ParsedContent> {
        if content.trim().is_empty() {
            return Err(MarkdownError::Empty);
        }

        let (html, toc) = self.render_markdown(content);
        Ok(ParsedContent { html, toc })
    }

    /// Render markdown to HTML with TOC extraction.
    fn render_markdown(&self, content: &str) -> (String, Vec<TocEntry>) {
        let parser = Parser::new_ext(content, self.options);
        let mut anchors = AnchorSet::default();
        let mut toc = Vec::new();
        let mut html = String::new();

        // (level, explicit id, plain text, offset of the heading body in `html`)
        let mut current_heading: Option<(u8, Option<String>, String, usize)> = None;
        let mut code_block_lang: Option<Option<String>> = None;
        let mut code_block_content = String::new();
        let mut image_alt: Option<String> = None;

        for event in parser {
            match event {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    let explicit = id.map(|i| i.to_string());
                    current_heading = Some((level as u8, explicit, String::new(), html.len()));
                }

                Event::End(TagEnd::Heading(_)) => {
                    if let Some((lvl, explicit, text, start)) = current_heading.take() {
                        let body = html.split_off(start);
                        let id = explicit.unwrap_or_else(|| anchors.claim(&text));
                        if lvl <= self.toc_depth {
                            toc.push(TocEntry {
                                level: lvl,
                                text: text.trim().to_string(),
                                id: id.clone(),
                            });
                        }
                        html.push_str(&format!(
                            "<h{lvl} id=\"{}\">{body}</h{lvl}>\n",
                            html_escape(&id)
                        ));
                    }
                }

                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block_lang = Some(match kind {
                        CodeBlockKind::Fenced(lang) => {
                            let lang = lang.split_whitespace().next().unwrap_or_default();
                            if lang.is_empty() {
                                None
                            } else {
                                Some(lang.to_string())
                            }
                        }
                        CodeBlockKind::Indented => None,
                    });
                    code_block_content.clear();
                }

                Event::End(TagEnd::CodeBlock) => {
                    let lang = code_block_lang.take().flatten();
                    html.push_str(
                        &self
                            .highlighter
                            .render_block(&code_block_content, lang.as_deref()),
                    );
                    code_block_content.clear();
                }

                Event::Text(text) if code_block_lang.is_some() => {
                    code_block_content.push_str(&text);
                }

                Event::Text(text) if image_alt.is_some() => {
                    if let Some(alt) = image_alt.as_mut() {
                        alt.push_str(&text);
                    }
                }

                Event::Text(text) => {
                    if let Some((_, _, ref mut heading_text, _)) = current_heading {
                        heading_text.push_str(&text);
                    }
                    html.push_str(&html_escape(&text));
                }

                Event::Code(code) => {
                    if let Some((_, _, ref mut heading_text, _)) = current_heading {
                        heading_text.push_str(&code);
                    }
                    html.push_str(&format!("<code>{}</code>", html_escape(&code)));
                }

                Event::SoftBreak => {
                    html.push('\n');
                }

                Event::HardBreak => {
                    html.push_str("<br />\n");
                }

                Event::Start(Tag::Image {
                    dest_url, title, ..
                }) => {
                    let title_attr = if title.is_empty() {
                        String::new()
                    } else {
                        format!(" title=\"{}\"", html_escape(&title))
                    };
                    html.push_str(&format!(
                        "<img src=\"{}\"{title_attr}",
                        html_escape(&dest_url)
                    ));
                    image_alt = Some(String::new());
                }

                Event::End(TagEnd::Image) => {
                    let alt = image_alt.take().unwrap_or_default();
                    html.push_str(&format!(" alt=\"{}\" />", html_escape(&alt)));
                }

                Event::Start(tag) => {
                    html.push_str(&tag_to_html_start(&tag));
                }

                Event::End(tag) => {
                    html.push_str(&tag_to_html_end(&tag));
                }

                Event::Html(raw) | Event::InlineHtml(raw) => {
                    html.push_str(&raw);
                }

                Event::FootnoteReference(name) => {
                    html.push_str(&format!(
                        "<sup class=\"footnote-ref\"><a href=\"#fn-{name}\">[{name}]</a></sup>"
                    ));
                }

                Event::Rule => {
                    html.push_str("<hr />\n");
                }

                Event::TaskListMarker(checked) => {
                    let checkbox = if checked {
                        "<input type=\"checkbox\" checked disabled />"
                    } else {
                        "<input type=\"checkbox\" disabled />"
                    };
                    html.push_str(checkbox);
                }

                Event::InlineMath(math) => {
                    html.push_str(&format!(
                        "<span class=\"math inline\">\\({}\\)</span>",
                        html_escape(&math)
                    ));
                }

                Event::DisplayMath(math) => {
                    html.push_str(&format!(
                        "<div class=\"math display\">\\[{}\\]</div>",
                        html_escape(&math)
                    ));
                }
            }
        }

        (html, toc)
    }
}

/// Convert a pulldown-cmark tag to HTML opening tag.
fn tag_to_html_start(tag: &Tag) -> String {
    match tag {
        Tag::Paragraph => "<p>".to_string(),
        // Headings, code blocks and images are handled by the event loop.
        Tag::Heading { .. } | Tag::CodeBlock(_) | Tag::Image { .. } => String::new(),
        Tag::BlockQuote(_) => "<blockquote>".to_string(),
        Tag::List(Some(1)) => "<ol>".to_string(),
        Tag::List(Some(start)) => format!("<ol start=\"{start}\">"),
        Tag::List(None) => "<ul>".to_string(),
        Tag::Item => "<li>".to_string(),
        Tag::FootnoteDefinition(name) => {
            format!("<div class=\"footnote\" id=\"fn-{name}\">")
        }
        Tag::Table(_) => "<table>".to_string(),
        Tag::TableHead => "<thead><tr>".to_string(),
        Tag::TableRow => "<tr>".to_string(),
        Tag::TableCell => "<td>".to_string(),
        Tag::Emphasis => "<em>".to_string(),
        Tag::Strong => "<strong>".to_string(),
        Tag::Strikethrough => "<del>".to_string(),
        Tag::Link {
            dest_url, title, ..
        } => {
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(" title=\"{}\"", html_escape(title))
            };
            format!("<a href=\"{}\"{}>", html_escape(dest_url), title_attr)
        }
        Tag::HtmlBlock => String::new(),
        Tag::MetadataBlock(_) => String::new(),
        Tag::DefinitionList => "<dl>".to_string(),
        Tag::DefinitionListTitle => "<dt>".to_string(),
        Tag::DefinitionListDefinition => "<dd>".to_string(),
        Tag::Superscript => "<sup>".to_string(),
        Tag::Subscript => "<sub>".to_string(),
    }
}

/// Convert a pulldown-cmark tag end to HTML closing tag.
fn tag_to_html_end(tag: &TagEnd) -> String {
    match tag {
        TagEnd::Paragraph => "</p>\n".to_string(),
        TagEnd::Heading(_) | TagEnd::CodeBlock | TagEnd::Image => String::new(),
        TagEnd::BlockQuote(_) => "</blockquote>\n".to_string(),
        TagEnd::List(ordered) => {
            if *ordered {
                "</ol>\n".to_string()
            } else {
                "</ul>\n".to_string()
            }
        }
        TagEnd::Item => "</li>\n".to_string(),
        TagEnd::FootnoteDefinition => "</div>\n".to_string(),
        TagEnd::Table => "</table>\n".to_string(),
        TagEnd::TableHead => "</tr></thead>\n".to_string(),
        TagEnd::TableRow => "</tr>\n".to_string(),
        TagEnd::TableCell => "</td>".to_string(),
        TagEnd::Emphasis => "</em>".to_string(),
        TagEnd::Strong => "</strong>".to_string(),
        TagEnd::Strikethrough => "</del>".to_string(),
        TagEnd::Link => "</a>".to_string(),
        TagEnd::HtmlBlock => String::new(),
        TagEnd::MetadataBlock(_) => String::new(),
        TagEnd::DefinitionList => "</dl>\n".to_string(),
        TagEnd::DefinitionListTitle => "</dt>\n".to_string(),
        TagEnd::DefinitionListDefinition => "</dd>\n".to_string(),
        TagEnd::Superscript => "</sup>".to_string(),
        TagEnd::Subscript => "</sub>".to_string(),
    }
}
