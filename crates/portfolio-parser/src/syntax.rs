//! Highlighted, copyable code blocks.

use std::sync::LazyLock;

use syntect::{
    highlighting::{Theme, ThemeSet},
    html::highlighted_html_for_string,
    parsing::{SyntaxReference, SyntaxSet},
};
use tracing::warn;

use crate::html_escape;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "InspiredGitHub";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Whether `name` is one of the bundled syntect themes.
pub fn is_known_theme(name: &str) -> bool {
    THEMES.themes.contains_key(name)
}

/// Renders fenced code as a `.code-block` with a copy button.
///
/// Syntax and theme sets are loaded once per process and shared by every
/// highlighter, so parsers can be built per build run without reloading them.
#[derive(Debug, Clone)]
pub struct SyntaxHighlighter {
    theme: &'static str,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl SyntaxHighlighter {
    /// Highlighter for `theme`. Unknown themes fall back to [`DEFAULT_THEME`].
    pub fn new(theme: &str) -> Self {
        match THEMES.themes.get_key_value(theme) {
            Some((name, _)) => Self {
                theme: name.as_str(),
            },
            None => {
                warn!(theme, fallback = DEFAULT_THEME, "unknown syntax theme");
                Self {
                    theme: DEFAULT_THEME,
                }
            }
        }
    }

    /// Name of the active theme.
    pub fn theme(&self) -> &str {
        self.theme
    }

    /// Highlighted code wrapped in the copyable container.
    pub fn render_block(&self, code: &str, lang: Option<&str>) -> String {
        let lang_attr = lang
            .map(|l| format!(" data-lang=\"{}\"", html_escape(l)))
            .unwrap_or_default();
        format!(
            "<div class=\"code-block\"{lang_attr}>\
<button type=\"button\" class=\"copy-btn\" aria-label=\"Copy code\">Copy</button>\
{}</div>\n",
            self.highlight(code, lang)
        )
    }

    /// Highlighted `<pre>` for `code`, or a plain escaped block when syntect
    /// cannot handle it.
    pub fn highlight(&self, code: &str, lang: Option<&str>) -> String {
        let highlighted = match (syntax_for(lang), self.resolve_theme()) {
            (Some(syntax), Some(theme)) => {
                highlighted_html_for_string(code, &SYNTAXES, syntax, theme).ok()
            }
            _ => None,
        };
        highlighted.unwrap_or_else(|| plain_block(code, lang))
    }

    fn resolve_theme(&self) -> Option<&'static Theme> {
        THEMES
            .themes
            .get(self.theme)
            .or_else(|| THEMES.themes.values().next())
    }
}

fn syntax_for(lang: Option<&str>) -> Option<&'static SyntaxReference> {
    lang.and_then(|l| SYNTAXES.find_syntax_by_token(l))
        .or_else(|| SYNTAXES.find_syntax_by_extension("txt"))
}

fn plain_block(code: &str, lang: Option<&str>) -> String {
    let class = lang
        .map(|l| format!(" class=\"language-{}\"", html_escape(l)))
        .unwrap_or_default();
    format!("<pre><code{class}>{}</code></pre>", html_escape(code))
}
