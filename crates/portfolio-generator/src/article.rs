//! Article presentation helpers.

use std::sync::LazyLock;

use portfolio_core::TocEntry;
use regex::Regex;

use crate::components::escape;

/// Body shown when an article has no renderable content.
pub const PLACEHOLDER: &str =
    "Coming soon — this article is currently being written. Check back later for the full content.";

static FIRST_PARAGRAPH: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)<p[^>]*>(.*?)</p>").ok());

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]+>").ok());

/// Title and optional subtitle of a log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleTitle {
    pub title: String,
    pub subtitle: Option<String>,
}

/// Strip `**` emphasis and split on the first `": "`.
pub fn split_title(raw: &str) -> ArticleTitle {
    let clean = raw.replace("**", "");
    match clean.split_once(": ") {
        Some((title, subtitle)) if !subtitle.trim().is_empty() => ArticleTitle {
            title: title.trim().to_string(),
            subtitle: Some(subtitle.trim().to_string()),
        },
        _ => ArticleTitle {
            title: clean.trim().to_string(),
            subtitle: None,
        },
    }
}

/// First paragraph of rendered HTML with its inline tags stripped.
///
/// The result is still HTML text: entities from the renderer are kept, so it
/// can be inserted as-is.
pub fn lead_paragraph(html: &str) -> Option<String> {
    let paragraph = FIRST_PARAGRAPH.as_ref()?.captures(html)?.get(1)?.as_str();
    let text = match TAG.as_ref() {
        Some(tag) => tag.replace_all(paragraph, "").into_owned(),
        None => paragraph.to_string(),
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Nested-by-indent table of contents, or `None` when there are no entries.
pub fn toc_html(toc: &[TocEntry]) -> Option<String> {
    if toc.is_empty() {
        return None;
    }

    let mut html = String::from("<nav class=\"toc\" aria-label=\"Contents\">\n<ul>\n");
    for entry in toc {
        html.push_str(&format!(
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>\n",
            entry.level,
            escape(&entry.id),
            escape(&entry.text)
        ));
    }
    html.push_str("</ul>\n</nav>");
    Some(html)
}

/// Placeholder body in the same wrapper markup as rendered content.
pub fn placeholder_html() -> String {
    format!("<p class=\"article-placeholder\">{PLACEHOLDER}</p>")
}
