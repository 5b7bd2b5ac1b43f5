//! HTML generation for every route of the site.
//!
//! Page bodies are rendered from named templates, then wrapped in the `base`
//! document shell together with metadata, header and footer.

use chrono::{Datelike, Utc};
use portfolio_core::{Catalog, Config, Item, LogEntry, ParsedContent};
use portfolio_pagination::{PaginationError, Section};
use thiserror::Error;
use tracing::debug;

use crate::{
    article::{lead_paragraph, placeholder_html, split_title, toc_html},
    components::{self, escape},
    composer::PageComposer,
    template::{TemplateContext, TemplateError, TemplateRegistry},
};

/// HTML generation errors.
#[derive(Debug, Error)]
pub enum HtmlError {
    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Section could not be paginated.
    #[error("pagination error: {0}")]
    Pagination(#[from] PaginationError),
}

/// Result type for HTML generation.
pub type Result<T> = std::result::Result<T, HtmlError>;

/// Site stylesheet, relative to the output root.
pub const SITE_CSS: &str = "styles/site.css";

/// Article content stylesheet, relative to the output root.
pub const CONTENT_CSS: &str = "styles/markdown.css";

const CONTACT_SUBMIT: &str = "const s = document.getElementById('contact-status'); if (s) s.textContent = 'Thanks for reaching out. I will reply soon.'; return false;";

const COPY_SCRIPT: &str = r#"<script>
document.querySelectorAll('.code-block .copy-btn').forEach((button) => {
    button.addEventListener('click', async () => {
        const code = button.parentElement.querySelector('pre');
        if (!code) return;
        try {
            await navigator.clipboard.writeText(code.innerText);
            button.textContent = 'Copied';
        } catch (_) {
            button.textContent = 'Failed';
        }
        setTimeout(() => { button.textContent = 'Copy'; }, 2000);
    });
});
</script>"#;

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Contact,
    LogsIndex,
    Article(String),
}

impl Route {
    /// Output file, relative to the output root.
    #[must_use]
    pub fn output_path(&self) -> String {
        match self {
            Self::Home => "index.html".to_string(),
            Self::Contact => "contact.html".to_string(),
            Self::LogsIndex => "logs/index.html".to_string(),
            Self::Article(slug) => format!("logs/{slug}.html"),
        }
    }

    /// Public URL path.
    #[must_use]
    pub fn url_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::LogsIndex => "/logs/".to_string(),
            other => format!("/{}", other.output_path()),
        }
    }
}

/// Per-page values placed in the document head.
#[derive(Debug, Clone)]
struct Metadata {
    title: String,
    description: Option<String>,
    og_type: &'static str,
    body_class: &'static str,
}

/// HTML page generator.
#[derive(Debug)]
pub struct HtmlGenerator {
    templates: TemplateRegistry,
    config: Config,
}

impl HtmlGenerator {
    /// Create a new HTML generator with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            templates: TemplateRegistry::new(),
            config,
        }
    }

    /// Create a generator with custom templates.
    #[must_use]
    pub fn with_templates(config: Config, templates: TemplateRegistry) -> Self {
        Self { templates, config }
    }

    /// Home page: identity, paginated projects and paginated logs.
    pub fn generate_home(&self, catalog: &Catalog) -> Result<String> {
        let pagination = &self.config.pagination;

        let projects = PageComposer::compose(
            Section::Projects,
            &catalog.projects,
            pagination.items_per_page(Section::Projects),
        )?;
        let logs = PageComposer::compose(
            Section::Logs,
            &catalog.logs,
            pagination.items_per_page(Section::Logs),
        )?;

        let ctx = TemplateContext::new()
            .with_var("hero", components::hero())
            .with_var(
                "projects",
                components::layout_section(
                    Section::Projects.id(),
                    &components::section_header(2, "PROJECTS", None),
                    &projects.to_html(),
                ),
            )
            .with_var(
                "logs",
                components::layout_section(
                    Section::Logs.id(),
                    &components::section_header(3, "LOGS", Some(catalog.logs.len())),
                    &logs.to_html(),
                ),
            );
        let body = self.templates.render("home", &ctx)?;

        let meta = Metadata {
            title: self.config.site.title.clone(),
            description: self.config.site.description.clone(),
            og_type: "website",
            body_class: "page-home",
        };
        let scripts = format!(
            "<script type=\"module\">import init from '{}'; init();</script>",
            escape(&self.config.build.controller_script)
        );
        self.wrap(&Route::Home, &meta, &body, &[], Some(scripts.as_str()))
    }

    /// Contact page with the mailto form.
    pub fn generate_contact(&self) -> Result<String> {
        let ctx = TemplateContext::new()
            .with_var("title", "Contact")
            .with_var("intro", "Use the form below to send an email.")
            .with_var("email", escape(&self.config.site.contact_email))
            .with_var("submit_action", escape(CONTACT_SUBMIT));
        let body = self.templates.render("contact", &ctx)?;

        let owner = self
            .config
            .site
            .author
            .as_deref()
            .unwrap_or(&self.config.site.title);
        let meta = Metadata {
            title: "Contact".to_string(),
            description: Some(format!("Send a message to {owner}.")),
            og_type: "website",
            body_class: "page-contact",
        };
        self.wrap(&Route::Contact, &meta, &body, &[], None)
    }

    /// Directory-style index of every article page.
    pub fn generate_logs_index(&self, catalog: &Catalog) -> Result<String> {
        let entries = catalog
            .logs
            .iter()
            .map(|entry| {
                format!(
                    "        <li><a href=\"{}\">{}.html</a><span class=\"logs-index-date\">{}</span></li>",
                    escape(&entry.href()),
                    escape(&entry.slug),
                    escape(&entry.date)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        let ctx = TemplateContext::new().with_var("entries", entries);
        let body = self.templates.render("logs_index", &ctx)?;

        let meta = Metadata {
            title: "Logs".to_string(),
            description: Some("Index of /logs".to_string()),
            og_type: "website",
            body_class: "page-logs-index",
        };
        self.wrap(&Route::LogsIndex, &meta, &body, &[], None)
    }

    /// Article page. `content` is `None` when the placeholder should be shown.
    pub fn generate_article(
        &self,
        entry: &LogEntry,
        content: Option<&ParsedContent>,
    ) -> Result<String> {
        debug!(slug = %entry.slug, rendered = content.is_some(), "generating article");

        let title = split_title(&entry.title);
        let mut ctx = TemplateContext::new()
            .with_var("category", escape(&entry.category))
            .with_var("title", escape(&title.title))
            .with_var("date", escape(&entry.date));
        ctx.insert_opt(
            "subtitle",
            title
                .subtitle
                .as_deref()
                .map(|s| format!("<p class=\"article-subtitle\">{}</p>", escape(s))),
        );

        match content {
            Some(parsed) => {
                ctx.insert_opt(
                    "lead",
                    lead_paragraph(&parsed.html)
                        .map(|lead| format!("<p class=\"article-lead\">{lead}</p>")),
                );
                ctx.insert_opt("toc", toc_html(&parsed.toc));
                ctx.insert("content", parsed.html.as_str());
            }
            None => ctx.insert("content", placeholder_html()),
        }
        let body = self.templates.render("article", &ctx)?;

        let clean_title = entry.title.replace("**", "");
        let meta = Metadata {
            title: clean_title.clone(),
            description: Some(format!("Article: {clean_title}")),
            og_type: "article",
            body_class: "page-article",
        };
        self.wrap(
            &Route::Article(entry.slug.clone()),
            &meta,
            &body,
            &[CONTENT_CSS],
            content.is_some().then_some(COPY_SCRIPT),
        )
    }

    /// Place a page body in the document shell.
    fn wrap(
        &self,
        route: &Route,
        meta: &Metadata,
        body: &str,
        extra_css: &[&str],
        scripts: Option<&str>,
    ) -> Result<String> {
        let site = &self.config.site;

        let mut stylesheets: Vec<String> = site.stylesheets.clone();
        stylesheets.push(format!("/{SITE_CSS}"));
        stylesheets.extend(extra_css.iter().map(|css| format!("/{css}")));
        let stylesheets = stylesheets
            .iter()
            .map(|href| format!("    <link rel=\"stylesheet\" href=\"{}\">", escape(href)))
            .collect::<Vec<_>>()
            .join("\n");

        let mut ctx = TemplateContext::new()
            .with_var("lang", escape(&site.locale))
            .with_var("title", escape(&self.config.page_title(&meta.title)))
            .with_var("og_type", meta.og_type)
            .with_var("canonical_url", escape(&self.config.url_for(&route.url_path())))
            .with_var("stylesheets", stylesheets)
            .with_var("body_class", meta.body_class)
            .with_var("header", components::site_header(&self.config))
            .with_var(
                "footer",
                components::site_footer(&self.config, Utc::now().year()),
            )
            .with_var("content", body);
        ctx.insert_opt("description", meta.description.as_deref().map(escape));
        ctx.insert_opt("author", site.author.as_deref().map(escape));
        if !site.keywords.is_empty() {
            ctx.insert("keywords", escape(&site.keywords.join(", ")));
        }
        ctx.insert_opt("scripts", scripts);

        Ok(self.templates.render("base", &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use portfolio_core::TocEntry;

    use super::*;

    fn generator() -> HtmlGenerator {
        HtmlGenerator::new(Config::default())
    }

    fn entry() -> LogEntry {
        LogEntry {
            id: "1".to_string(),
            date: "03.04.2025".to_string(),
            title: "**Swift**: Building a CLI".to_string(),
            slug: "swift-cli".to_string(),
            category: "ENGINEERING".to_string(),
        }
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.output_path(), "index.html");
        assert_eq!(Route::Home.url_path(), "/");
        assert_eq!(Route::LogsIndex.output_path(), "logs/index.html");
        assert_eq!(Route::LogsIndex.url_path(), "/logs/");
        assert_eq!(Route::Contact.url_path(), "/contact.html");
        assert_eq!(
            Route::Article("a-b".to_string()).output_path(),
            "logs/a-b.html"
        );
    }

    #[test]
    fn test_home_page() {
        let html = generator().generate_home(&Catalog::builtin()).unwrap();

        assert!(html.contains("<title>Mac Long</title>"));
        assert!(html.contains("<meta property=\"og:type\" content=\"website\">"));
        assert!(html.contains("02 // PROJECTS"));
        assert!(html.contains("03 // LOGS"));
        assert!(html.contains("TOTAL: 15"));
        assert!(html.contains("data-section=\"projects\""));
        assert!(html.contains("data-section=\"logs\""));
        assert!(html.contains("import init from '/pkg/portfolio_ui.js'"));
        assert!(html.contains("/styles/site.css"));
        assert!(!html.contains("/styles/markdown.css"));
    }

    #[test]
    fn test_home_page_honours_page_size() {
        let mut config = Config::default();
        config.pagination.logs_per_page = 5;
        let html = HtmlGenerator::new(config)
            .generate_home(&Catalog::builtin())
            .unwrap();

        assert!(html.contains("data-section=\"logs\" data-total-pages=\"3\" data-items-per-page=\"5\""));
    }

    #[test]
    fn test_article_page() {
        let parsed = ParsedContent {
            html: "<h2 id=\"intro\">Intro</h2>\n<p>Lead <strong>text</strong>.</p>\n".to_string(),
            toc: vec![TocEntry {
                level: 2,
                text: "Intro".to_string(),
                id: "intro".to_string(),
            }],
        };
        let html = generator().generate_article(&entry(), Some(&parsed)).unwrap();

        assert!(html.contains("<title>Swift: Building a CLI | Mac Long</title>"));
        assert!(html.contains("content=\"Article: Swift: Building a CLI\""));
        assert!(html.contains("<meta property=\"og:type\" content=\"article\">"));
        assert!(html.contains("<h1 class=\"article-title\">Swift</h1>"));
        assert!(html.contains("<p class=\"article-subtitle\">Building a CLI</p>"));
        assert!(html.contains("PUBLISHED // 03.04.2025"));
        assert!(html.contains("<p class=\"article-lead\">Lead text.</p>"));
        assert!(html.contains("href=\"#intro\""));
        assert!(html.contains("<div class=\"markdown-content\">"));
        assert!(html.contains("/styles/markdown.css"));
        assert!(html.contains("https://maclong.dev/logs/swift-cli.html"));
    }

    #[test]
    fn test_article_lead_is_not_escaped_twice() {
        let parsed = ParsedContent {
            html: "<p>Rock &amp; roll</p>\n".to_string(),
            toc: Vec::new(),
        };
        let html = generator().generate_article(&entry(), Some(&parsed)).unwrap();

        assert!(html.contains("<p class=\"article-lead\">Rock &amp; roll</p>"));
        assert!(!html.contains("&amp;amp;"));
    }

    #[test]
    fn test_article_placeholder() {
        let html = generator().generate_article(&entry(), None).unwrap();

        assert!(html.contains("Coming soon"));
        assert!(!html.contains("article-lead"));
        assert!(!html.contains("clipboard"));
    }

    #[test]
    fn test_contact_page() {
        let html = generator().generate_contact().unwrap();

        assert!(html.contains("<title>Contact | Mac Long</title>"));
        assert!(html.contains("Send a message to Mac Long."));
        assert!(html.contains("action=\"mailto:hi@maclong.dev\""));
        assert!(html.contains("Thanks for reaching out."));
        assert!(html.contains("rows=\"6\" required></textarea>"));
    }

    #[test]
    fn test_contact_submit_assigns_through_a_guard() {
        assert!(!CONTACT_SUBMIT.contains("?."));
        assert!(CONTACT_SUBMIT.contains("if (s) s.textContent = "));

        let html = generator().generate_contact().unwrap();
        assert!(html.contains(
            "onclick=\"const s = document.getElementById(&#39;contact-status&#39;); if (s)"
        ));
    }

    #[test]
    fn test_custom_templates() {
        let mut templates = TemplateRegistry::new();
        templates.register(crate::template::Template::new(
            "contact",
            "<p class=\"custom\">{{ email }}</p>",
        ));
        let html = HtmlGenerator::with_templates(Config::default(), templates)
            .generate_contact()
            .unwrap();

        assert!(html.contains("<p class=\"custom\">hi@maclong.dev</p>"));
        assert!(html.contains("<!DOCTYPE html>"));
    }

    #[test]
    fn test_logs_index_page() {
        let catalog = Catalog::builtin();
        let html = generator().generate_logs_index(&catalog).unwrap();

        assert!(html.contains("Index of /logs"));
        assert_eq!(html.matches("logs-index-date").count(), catalog.logs.len());
    }
}
