//! Reusable markup fragments shared by every page.

use std::fmt::Write;

use portfolio_core::{Config, Item, LogEntry, Project};
pub use portfolio_parser::html_escape as escape;

/// Markup for a single catalog entry inside a paginated section.
pub trait Component {
    fn render(&self) -> String;
}

impl Component for Project {
    fn render(&self) -> String {
        project_card(self)
    }
}

impl Component for LogEntry {
    fn render(&self) -> String {
        log_item(self)
    }
}

/// Inline SVG icons.
pub mod icons {
    /// Brand mark.
    pub const PYRAMID: &str = r#"<svg class="icon icon-pyramid" viewBox="0 0 24 24" width="20" height="20" aria-hidden="true"><path d="M12 2 2 21h20L12 2Zm0 0v19" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linejoin="round"/></svg>"#;

    /// Trailing marker on log rows.
    pub const ADD: &str = r#"<svg class="icon icon-add" viewBox="0 0 24 24" width="16" height="16" aria-hidden="true"><path d="M12 5v14M5 12h14" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linecap="round"/></svg>"#;

    /// Outbound link marker on project cards.
    pub const ARROW_OUT: &str = r#"<svg class="icon icon-arrow-out" viewBox="0 0 24 24" width="16" height="16" aria-hidden="true"><path d="M7 17 17 7M9 7h8v8" fill="none" stroke="currentColor" stroke-width="1.5" stroke-linecap="round" stroke-linejoin="round"/></svg>"#;
}

/// Identity blurb shown at the top of the home page.
pub mod hero {
    pub const LABEL: &str = "IDENTITY";
    pub const HEADING: &str = "FULL STACK SWIFT EXPERIENCED IN WEB SERVICES, CLI TOOLS, EMBEDDED AND NATIVE APPLE APPLICATIONS.";
    pub const PARAMETERS: &str = "OPERATIONAL PARAMETERS: SWIFT, SWIFTUI, HUMMINGBIRD, HTML, CSS, JS, POSIX SHELL, UNIX, GIT, SQL, CI/CD.";
    pub const LOCATION: &str = "London, UK";
    pub const OCCUPATION: &str = "Software Engineer, SSL";
}

/// Site header with brand and navigation.
pub fn site_header(config: &Config) -> String {
    let brand = escape(config.site.author.as_deref().unwrap_or(&config.site.title));
    format!(
        r#"<header class="site-header">
    <a class="brand" href="/">{pyramid}<span class="brand-name">{brand}</span></a>
    <nav class="site-nav">
        <a href="{github}" target="_blank" rel="noopener noreferrer">GitHub</a>
        <a href="/contact.html">Contact</a>
    </nav>
</header>"#,
        pyramid = icons::PYRAMID,
        github = escape(&config.site.github_url),
    )
}

/// Site footer stamped with `year`.
pub fn site_footer(config: &Config, year: i32) -> String {
    let owner = config
        .site
        .author
        .as_deref()
        .unwrap_or(&config.site.title)
        .to_uppercase();
    format!(
        r#"<footer class="site-footer">
    <div class="footer-column">
        <p>ARCHITECTING SYSTEMS</p>
        <p>SINCE MMXVI</p>
    </div>
    <div class="footer-column">
        <p>SIGNAL PROTOCOL: ENCRYPTED</p>
        <p>STATUS: STABLE // OPERATIONAL</p>
    </div>
    <p class="footer-copyright">&copy; {year} {owner}</p>
</footer>"#,
        owner = escape(&owner),
    )
}

/// `NN // LABEL` heading, with an optional item total.
pub fn section_header(number: u8, label: &str, total: Option<usize>) -> String {
    let mut html = format!(
        r#"<div class="section-header"><span class="section-label">{number:02} // {}</span>"#,
        escape(label)
    );
    if let Some(total) = total {
        let _ = write!(html, r#"<span class="section-total">TOTAL: {total}</span>"#);
    }
    html.push_str("</div>");
    html
}

/// A titled section of the home page.
pub fn layout_section(id: &str, header: &str, body: &str) -> String {
    format!(
        "<section id=\"{id}\" class=\"layout-section\">\n{header}\n{body}\n</section>",
        id = escape(id)
    )
}

/// Identity section.
pub fn hero() -> String {
    let body = format!(
        r#"<div class="hero">
    <h1 class="hero-heading">{heading}</h1>
    <p class="hero-parameters">{parameters}</p>
    <dl class="hero-facts">
        <div><dt>LOC:</dt><dd>{location}</dd></div>
        <div><dt>OCC:</dt><dd>{occupation}</dd></div>
    </dl>
</div>"#,
        heading = hero::HEADING,
        parameters = hero::PARAMETERS,
        location = hero::LOCATION,
        occupation = hero::OCCUPATION,
    );
    layout_section("identity", &section_header(1, hero::LABEL, None), &body)
}

/// Card linking to an external project.
pub fn project_card(project: &Project) -> String {
    format!(
        r#"<a class="project-card" href="{href}" target="_blank" rel="noopener noreferrer" data-id="{id}">
    <h3 class="project-title">{title}{arrow}</h3>
    <p class="project-description">{description}</p>
</a>"#,
        href = escape(&project.href()),
        id = escape(project.id()),
        title = escape(project.title()),
        arrow = icons::ARROW_OUT,
        description = escape(&project.description.to_uppercase()),
    )
}

/// Row linking to an article page.
pub fn log_item(entry: &LogEntry) -> String {
    format!(
        r#"<a class="log-row" href="{href}" data-id="{id}">
    <span class="log-date">{date}</span>
    <span class="log-title">{title}</span>
    <span class="log-category">{category}</span>
    {add}
</a>"#,
        href = escape(&entry.href()),
        id = escape(entry.id()),
        date = escape(&entry.date),
        title = escape(&entry.title.replace("**", "")),
        category = escape(&entry.category),
        add = icons::ADD,
    )
}
