//! HTML template system for page generation.
//!
//! Templates are plain strings with `{{ name }}` placeholders. A trailing `?`
//! (`{{ name? }}`) marks a placeholder as optional; missing optional values
//! render as nothing. Substituted values are never rescanned, so rendered
//! article bodies may contain braces freely.

use std::collections::HashMap;

use thiserror::Error;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Missing required variable.
    #[error("template `{template}` is missing required variable `{name}`")]
    MissingVariable { template: String, name: String },

    /// Template not found.
    #[error("template not found: {0}")]
    NotFound(String),

    /// Invalid template syntax.
    #[error("invalid template syntax in `{template}`: {message}")]
    InvalidSyntax { template: String, message: String },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Template context with variables for interpolation.
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    variables: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable into the context.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    /// Insert a variable only when a value is present.
    pub fn insert_opt(&mut self, key: impl Into<String>, value: Option<impl Into<String>>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get a variable value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Check if a variable exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.variables.contains_key(key)
    }
}

/// A named template.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    content: String,
}

impl Template {
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render the template with the given context.
    pub fn render(&self, context: &TemplateContext) -> Result<String> {
        let mut result = self.content.clone();
        let mut pos = 0;

        while let Some(start) = result[pos..].find("{{") {
            let start = pos + start;
            let end = result[start..]
                .find("}}")
                .ok_or_else(|| TemplateError::InvalidSyntax {
                    template: self.name.clone(),
                    message: "unclosed {{ delimiter".to_string(),
                })?;
            let end = start + end + 2;

            let var_name = result[start + 2..end - 2].trim();
            let (var_name, optional) = match var_name.strip_suffix('?') {
                Some(stripped) => (stripped.trim_end(), true),
                None => (var_name, false),
            };

            let value = match context.get(var_name) {
                Some(v) => v.to_string(),
                None if optional => String::new(),
                None => {
                    return Err(TemplateError::MissingVariable {
                        template: self.name.clone(),
                        name: var_name.to_string(),
                    });
                }
            };

            result.replace_range(start..end, &value);
            pos = start + value.len();
        }

        Ok(result)
    }
}

/// Registry of templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, Template>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register(Template::new("base", BASE_TEMPLATE));
        registry.register(Template::new("home", HOME_TEMPLATE));
        registry.register(Template::new("article", ARTICLE_TEMPLATE));
        registry.register(Template::new("contact", CONTACT_TEMPLATE));
        registry.register(Template::new("logs_index", LOGS_INDEX_TEMPLATE));
        registry
    }

    /// Register a template, replacing any with the same name.
    pub fn register(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Render a named template with the given context.
    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        template.render(context)
    }
}

/// Document shell shared by every page.
pub const BASE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{{ title }}</title>
    <meta name="description" content="{{ description? }}">
    <meta name="author" content="{{ author? }}">
    <meta name="keywords" content="{{ keywords? }}">
    <meta property="og:title" content="{{ title }}">
    <meta property="og:description" content="{{ description? }}">
    <meta property="og:type" content="{{ og_type }}">
    <meta property="og:url" content="{{ canonical_url }}">
    <link rel="canonical" href="{{ canonical_url }}">
{{ stylesheets }}
</head>
<body class="{{ body_class }}">
{{ header }}
<main class="page-main">
{{ content }}
</main>
{{ footer }}
{{ scripts? }}
</body>
</html>
"#;

/// Home page body.
pub const HOME_TEMPLATE: &str = r#"{{ hero }}
{{ projects }}
{{ logs }}"#;

/// Article page body.
pub const ARTICLE_TEMPLATE: &str = r#"<article class="article">
    <header class="article-header">
        <p class="article-category">{{ category }}</p>
        <h1 class="article-title">{{ title }}</h1>
        {{ subtitle? }}
        <p class="article-published">PUBLISHED // {{ date }}</p>
    </header>
    {{ lead? }}
    {{ toc? }}
    <div class="markdown-content">
{{ content }}
    </div>
    <a class="article-back" href="/">&larr; BACK</a>
</article>"#;

/// Contact page body.
pub const CONTACT_TEMPLATE: &str = r#"<section class="contact">
    <h1 class="contact-title">{{ title }}</h1>
    <p class="contact-intro">{{ intro }}</p>
    <form id="contact-form" class="contact-form" action="mailto:{{ email }}" method="post">
        <label for="contact-email">Email</label>
        <input id="contact-email" name="email" type="email" placeholder="you@domain.com" required>
        <label for="contact-message">Message</label>
        <textarea id="contact-message" name="message" placeholder="How can I help?" rows="6" required></textarea>
        <button type="submit" onclick="{{ submit_action }}">Send Message</button>
    </form>
    <p id="contact-status" class="contact-status">Ready to send.</p>
</section>"#;

/// Directory-style listing of every article.
pub const LOGS_INDEX_TEMPLATE: &str = r#"<section class="logs-index">
    <h1 class="logs-index-title">Index of /logs</h1>
    <ul class="logs-index-list">
        <li><a href="/">../</a></li>
{{ entries }}
    </ul>
</section>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_simple_render() {
        let template = Template::new("test", "Hello, {{ name }}!");
        let ctx = TemplateContext::new().with_var("name", "World");

        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_optional_variable() {
        let template = Template::new("test", "Hello{{ suffix? }}!");

        let result = template.render(&TemplateContext::new()).unwrap();
        assert_eq!(result, "Hello!");

        let ctx = TemplateContext::new().with_var("suffix", ", World");
        assert_eq!(template.render(&ctx).unwrap(), "Hello, World!");
    }

    #[test]
    fn test_template_missing_required_variable() {
        let template = Template::new("greeting", "Hello, {{ name }}!");
        let result = template.render(&TemplateContext::new());

        match result {
            Err(TemplateError::MissingVariable { template, name }) => {
                assert_eq!(template, "greeting");
                assert_eq!(name, "name");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_template_unclosed_delimiter() {
        let template = Template::new("broken", "Hello, {{ name");
        let result = template.render(&TemplateContext::new().with_var("name", "x"));

        assert!(matches!(result, Err(TemplateError::InvalidSyntax { .. })));
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let template = Template::new("test", "<div>{{ content }}</div>");
        let ctx = TemplateContext::new().with_var("content", "fn f() { {{ x }} }");

        assert_eq!(
            template.render(&ctx).unwrap(),
            "<div>fn f() { {{ x }} }</div>"
        );
    }

    #[test]
    fn test_insert_opt() {
        let mut ctx = TemplateContext::new();
        ctx.insert_opt("present", Some("yes"));
        ctx.insert_opt("absent", None::<String>);

        assert_eq!(ctx.get("present"), Some("yes"));
        assert!(!ctx.contains("absent"));
    }

    #[test]
    fn test_template_registry() {
        let registry = TemplateRegistry::new();

        for name in ["base", "home", "article", "contact", "logs_index"] {
            assert!(registry.get(name).is_some(), "missing {name}");
        }
        assert!(matches!(
            registry.render("nonexistent", &TemplateContext::new()),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_render_contact_template() {
        let registry = TemplateRegistry::new();
        let ctx = TemplateContext::new()
            .with_var("title", "Contact")
            .with_var("intro", "Use the form below to send an email.")
            .with_var("email", "hi@example.com")
            .with_var("submit_action", "return false;");

        let html = registry.render("contact", &ctx).unwrap();
        assert!(html.contains("action=\"mailto:hi@example.com\""));
        assert!(html.contains("id=\"contact-status\""));
        assert!(html.contains("Ready to send."));
    }
}
