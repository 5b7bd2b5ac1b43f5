//! Stylesheet for rendered article content.
//!
//! Every rule is scoped under [`CONTENT_CLASS`], the wrapper the article page
//! places around rendered HTML, so article typography never leaks into the
//! surrounding layout.

use std::fmt::Write;

/// Class of the element wrapping rendered content.
pub const CONTENT_CLASS: &str = "markdown-content";

/// A colour with an optional dark-mode override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shade {
    pub light: String,
    pub dark: Option<String>,
}

impl Shade {
    /// Same colour in both schemes.
    pub fn fixed(color: &str) -> Self {
        Self {
            light: color.to_string(),
            dark: None,
        }
    }

    /// Colour with a dark-mode override.
    pub fn adaptive(light: &str, dark: &str) -> Self {
        Self {
            light: light.to_string(),
            dark: Some(dark.to_string()),
        }
    }
}

/// Typography and colour settings for article content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTheme {
    pub heading_font: String,
    pub code_font: String,
    pub heading: Shade,
    pub accent: Shade,
    pub inline_code_background: Shade,
    pub code_block_background: Shade,
    pub blockquote: Shade,
    pub table_header_background: Shade,
    pub border: Shade,
}

impl Default for ContentTheme {
    fn default() -> Self {
        Self {
            heading_font: "'Space Grotesk'".to_string(),
            code_font: "ui-monospace, SFMono-Regular, monospace".to_string(),
            heading: Shade::adaptive("#111817", "#ffffff"),
            accent: Shade::fixed("#14b8aa"),
            inline_code_background: Shade::adaptive("#e5e7eb", "#1f2937"),
            code_block_background: Shade::adaptive("#f3f4f6", "#1f2937"),
            blockquote: Shade::adaptive("#4b5563", "#9ca3af"),
            table_header_background: Shade::adaptive("#f3f4f6", "#1f2937"),
            border: Shade::adaptive("#e5e7eb", "#374151"),
        }
    }
}

/// One CSS rule, selector not yet scoped.
struct Rule {
    selector: &'static str,
    declarations: Vec<(&'static str, Value)>,
}

enum Value {
    Literal(String),
    Color(Shade),
}

impl ContentTheme {
    /// Render the stylesheet, light rules first then a
    /// `prefers-color-scheme: dark` block with the overrides.
    pub fn render(&self) -> String {
        let rules = self.rules();
        let mut css = String::from("/* Generated article content styles. */\n");

        for rule in &rules {
            let _ = writeln!(css, "{} {{", scoped(rule.selector));
            for (property, value) in &rule.declarations {
                let value = match value {
                    Value::Literal(v) => v.as_str(),
                    Value::Color(shade) => shade.light.as_str(),
                };
                let _ = writeln!(css, "  {property}: {value};");
            }
            css.push_str("}\n\n");
        }

        let mut dark = String::new();
        for rule in &rules {
            let overrides: Vec<_> = rule
                .declarations
                .iter()
                .filter_map(|(property, value)| match value {
                    Value::Color(Shade {
                        dark: Some(color), ..
                    }) => Some((property, color)),
                    _ => None,
                })
                .collect();
            if overrides.is_empty() {
                continue;
            }
            let _ = writeln!(dark, "  {} {{", scoped(rule.selector));
            for (property, value) in overrides {
                let _ = writeln!(dark, "    {property}: {value};");
            }
            dark.push_str("  }\n");
        }

        if !dark.is_empty() {
            css.push_str("@media (prefers-color-scheme: dark) {\n");
            css.push_str(&dark);
            css.push_str("}\n");
        }

        css
    }

    fn rules(&self) -> Vec<Rule> {
        let lit = |v: &str| Value::Literal(v.to_string());
        let color = |s: &Shade| Value::Color(s.clone());

        vec![
            Rule {
                selector: "h1, h2, h3, h4, h5, h6",
                declarations: vec![
                    ("font-family", lit(&self.heading_font)),
                    ("font-weight", lit("600")),
                    ("color", color(&self.heading)),
                    ("margin-top", lit("2.5rem")),
                    ("margin-bottom", lit("1rem")),
                ],
            },
            Rule {
                selector: "h1",
                declarations: vec![("font-size", lit("1.875rem"))],
            },
            Rule {
                selector: "h2",
                declarations: vec![("font-size", lit("1.5rem"))],
            },
            Rule {
                selector: "h3",
                declarations: vec![("font-size", lit("1rem"))],
            },
            Rule {
                selector: "p",
                declarations: vec![("margin-bottom", lit("1rem"))],
            },
            Rule {
                selector: ":not(pre) > code",
                declarations: vec![
                    ("font-family", lit(&self.code_font)),
                    ("font-size", lit("0.8125rem")),
                    ("color", color(&self.accent)),
                    ("background", color(&self.inline_code_background)),
                    ("padding", lit("0.2em 0.4em")),
                    ("border-radius", lit("0.25rem")),
                ],
            },
            Rule {
                selector: ".code-block",
                declarations: vec![
                    ("position", lit("relative")),
                    ("margin-bottom", lit("1.5rem")),
                ],
            },
            Rule {
                selector: ".code-block pre",
                declarations: vec![
                    ("font-family", lit(&self.code_font)),
                    ("background", color(&self.code_block_background)),
                    ("padding", lit("1rem")),
                    ("border-radius", lit("0.5rem")),
                    ("overflow-x", lit("auto")),
                ],
            },
            Rule {
                selector: ".copy-btn",
                declarations: vec![
                    ("position", lit("absolute")),
                    ("top", lit("0.5rem")),
                    ("right", lit("0.5rem")),
                    ("font-size", lit("0.75rem")),
                    ("color", color(&self.accent)),
                    ("background", lit("transparent")),
                    ("border", lit("1px solid currentColor")),
                    ("border-radius", lit("0.25rem")),
                    ("cursor", lit("pointer")),
                ],
            },
            Rule {
                selector: "blockquote",
                declarations: vec![
                    ("color", color(&self.blockquote)),
                    ("padding-left", lit("1.5rem")),
                    ("border-left", lit(&format!("3px solid {}", self.accent.light))),
                    ("margin", lit("1.5rem 0")),
                ],
            },
            Rule {
                selector: "a",
                declarations: vec![("color", color(&self.accent))],
            },
            Rule {
                selector: "ol, ul",
                declarations: vec![
                    ("padding-left", lit("1.5rem")),
                    ("margin-bottom", lit("1rem")),
                ],
            },
            Rule {
                selector: "li",
                declarations: vec![("margin-bottom", lit("0.75rem"))],
            },
            Rule {
                selector: "table",
                declarations: vec![("margin", lit("1rem 0"))],
            },
            Rule {
                selector: "th, thead td",
                declarations: vec![
                    ("font-weight", lit("600")),
                    ("background", color(&self.table_header_background)),
                    ("padding", lit("0.5rem 0.75rem")),
                    ("border", lit("1px solid")),
                    ("border-color", color(&self.border)),
                ],
            },
            Rule {
                selector: "td",
                declarations: vec![
                    ("padding", lit("0.5rem 0.75rem")),
                    ("border", lit("1px solid")),
                    ("border-color", color(&self.border)),
                ],
            },
        ]
    }
}

/// Prefix every selector in a comma list with the content wrapper class.
fn scoped(selector: &str) -> String {
    selector
        .split(',')
        .map(|part| format!(".{CONTENT_CLASS} {}", part.trim()))
        .collect::<Vec<_>>()
        .join(", ")
}
