//! Catalog of projects and log entries shown on the site.

use std::{collections::HashSet, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

/// Date format used by log entries (`17.01.2026`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// A project showcased in the projects section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

/// A log entry linking to an article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    /// Publication date as `DD.MM.YYYY`.
    pub date: String,
    pub title: String,
    pub slug: String,
    pub category: String,
}

/// Anything a paginated section can list.
pub trait Item {
    /// Stable identifier.
    fn id(&self) -> &str;

    /// Display title.
    fn title(&self) -> &str;

    /// Link target.
    fn href(&self) -> String;
}

impl Item for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn href(&self) -> String {
        self.url.clone()
    }
}

impl Item for LogEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn href(&self) -> String {
        format!("/logs/{}.html", self.slug)
    }
}

impl LogEntry {
    /// Parsed publication date.
    pub fn published(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    /// Output path of the article page, relative to the output root.
    pub fn output_path(&self) -> String {
        format!("logs/{}.html", self.slug)
    }
}

/// The ordered item lists for every section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl Catalog {
    /// Create a catalog from explicit lists.
    #[must_use]
    pub fn new(projects: Vec<Project>, logs: Vec<LogEntry>) -> Self {
        Self { projects, logs }
    }

    /// The site's own catalog.
    pub fn builtin() -> Self {
        let projects = [
            (
                "2",
                "FLUENT-GEN",
                "A Swift macro package that automatically generates Fluent ORM model classes from simple domain model structs.",
                "https://github.com/mac9sb/fluent-gen",
            ),
            (
                "3",
                "GUEST-LIST",
                "A full-stack Swift application for digital guest list management at concert and gig venues with Hummingbird backend.",
                "https://github.com/mac9sb/guest-list",
            ),
            (
                "4",
                "WEB-UI",
                "A library for generating websites in a simple, type-safe, and consistent manner. Supports SSG and SSR approaches.",
                "https://github.com/mac9sb/web-ui",
            ),
            (
                "5",
                "LIST",
                "A simple and fast rebuild of the UNIX ls command. Provides color output, file icons, and human-readable sizes.",
                "https://github.com/mac9sb/list",
            ),
        ]
        .into_iter()
        .map(|(id, title, description, url)| Project {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            url: url.to_string(),
        })
        .collect();

        let logs = [
            ("1", "17.01.2026", "Testing in the Shared Package", "shared-testing", "TESTING"),
            ("2", "03.01.2026", "Release Automation with GitHub Workflows", "release-automation", "TOOLING"),
            ("3", "06.12.2025", "Static Site Layout Patterns", "static-site-layout", "DESIGN"),
            ("4", "08.11.2025", "The Shared Design System", "shared-design-system", "DESIGN"),
            ("5", "11.10.2025", "Validation Service Design", "validation-service", "SERVER"),
            ("6", "06.09.2025", "Redis Services as a Pattern", "redis-services-pattern", "SERVER"),
            ("7", "23.08.2025", "Middleware Patterns for the Server", "server-middleware-patterns", "SERVER"),
            ("8", "09.08.2025", "FluentGen Models in Practice", "fluentgen-models", "TOOLING"),
            ("9", "12.07.2025", "Typst Content Pipeline", "typst-content-pipeline", "CONTENT"),
            ("10", "21.06.2025", "The Tooling Ecosystem", "tooling-ecosystem", "TOOLING"),
            ("11", "07.06.2025", "WebUI and Declarative Pages", "webui-declarative-pages", "DESIGN"),
            ("12", "24.05.2025", "Configuration Patterns in Pkl", "cli-config-patterns", "INFRA"),
            ("13", "10.05.2025", "Hummingbird App Structure in the Monorepo", "hummingbird-app-structure", "SERVER"),
            ("14", "12.04.2025", "Arc CLI Workflows", "arc-cli-workflows", "INFRA"),
            ("15", "29.03.2025", "Arc Server Process Model", "arc-server-process", "INFRA"),
        ]
        .into_iter()
        .map(|(id, date, title, slug, category)| LogEntry {
            id: id.to_string(),
            date: date.to_string(),
            title: title.to_string(),
            slug: slug.to_string(),
            category: category.to_string(),
        })
        .collect();

        Self { projects, logs }
    }

    /// Load a catalog from a TOML file with `[[projects]]` and `[[logs]]`
    /// tables, preserving declaration order.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::catalog(path, "file not found"));
        }

        let content = std::fs::read_to_string(path)?;
        let catalog: Catalog = toml::from_str(&content)
            .map_err(|e| CoreError::catalog(path, e.to_string()))?;

        catalog
            .validate()
            .map_err(|message| CoreError::catalog(path, message))?;

        debug!(
            path = %path.display(),
            projects = catalog.projects.len(),
            logs = catalog.logs.len(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise use the built-in catalog.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    /// Check identifiers, slugs, titles and dates.
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let mut ids = HashSet::new();
        for project in &self.projects {
            if project.title.trim().is_empty() {
                return Err(format!("project '{}' has an empty title", project.id));
            }
            if !ids.insert(project.id.as_str()) {
                return Err(format!("duplicate project id '{}'", project.id));
            }
        }

        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();
        for log in &self.logs {
            if log.title.trim().is_empty() {
                return Err(format!("log '{}' has an empty title", log.id));
            }
            if log.slug.trim().is_empty() {
                return Err(format!("log '{}' has an empty slug", log.id));
            }
            if !is_path_segment(&log.slug) {
                return Err(format!(
                    "log '{}' has slug '{}' (use only letters, digits, '-' and '_')",
                    log.id, log.slug
                ));
            }
            if !ids.insert(log.id.as_str()) {
                return Err(format!("duplicate log id '{}'", log.id));
            }
            if !slugs.insert(log.slug.as_str()) {
                return Err(format!("duplicate log slug '{}'", log.slug));
            }
            if log.published().is_none() {
                return Err(format!(
                    "log '{}' has an invalid date '{}' (expected DD.MM.YYYY)",
                    log.slug, log.date
                ));
            }
        }

        Ok(())
    }

    /// Find a log entry by slug.
    pub fn log_by_slug(&self, slug: &str) -> Option<&LogEntry> {
        self.logs.iter().find(|log| log.slug == slug)
    }
}

/// Slugs become file names under `logs/` and the content directory.
fn is_path_segment(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.projects.len(), 4);
        assert_eq!(catalog.logs.len(), 15);
        assert_eq!(catalog.projects[0].title, "FLUENT-GEN");
        assert_eq!(catalog.logs[0].slug, "shared-testing");
        assert_eq!(catalog.logs[14].slug, "arc-server-process");
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_log_entry_published() {
        let catalog = Catalog::builtin();
        let log = &catalog.logs[0];

        assert_eq!(
            log.published(),
            NaiveDate::from_ymd_opt(2026, 1, 17)
        );
        assert_eq!(log.href(), "/logs/shared-testing.html");
        assert_eq!(log.output_path(), "logs/shared-testing.html");
    }

    #[test]
    fn test_project_href_is_external_url() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.projects[3].href(),
            "https://github.com/mac9sb/list"
        );
    }

    #[test]
    fn test_load_catalog_preserves_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[projects]]
id = "b"
title = "SECOND"
description = "Listed first anyway."
url = "https://example.com/b"

[[projects]]
id = "a"
title = "FIRST"
description = "Listed second."
url = "https://example.com/a"

[[logs]]
id = "1"
date = "01.02.2025"
title = "Hello: World"
slug = "hello"
category = "MISC"
"#,
        )
        .expect("write");

        let catalog = Catalog::load(&path).expect("load catalog");

        assert_eq!(catalog.projects.len(), 2);
        assert_eq!(catalog.projects[0].id, "b");
        assert_eq!(catalog.projects[1].id, "a");
        assert_eq!(catalog.logs.len(), 1);
        assert_eq!(catalog.log_by_slug("hello").map(|l| l.id.as_str()), Some("1"));
    }

    #[test]
    fn test_load_catalog_rejects_duplicate_slug() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[logs]]
id = "1"
date = "01.02.2025"
title = "One"
slug = "same"
category = "MISC"

[[logs]]
id = "2"
date = "02.02.2025"
title = "Two"
slug = "same"
category = "MISC"
"#,
        )
        .expect("write");

        let err = Catalog::load(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate log slug 'same'"));
    }

    #[test]
    fn test_load_catalog_rejects_slug_outside_logs() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            r#"
[[logs]]
id = "1"
date = "01.02.2025"
title = "Escape"
slug = "../../escaped"
category = "MISC"
"#,
        )
        .expect("write");

        let err = Catalog::load(&path).unwrap_err();
        assert!(err.to_string().contains("slug '../../escaped'"));
    }

    #[test]
    fn test_validate_rejects_separators_in_slug() {
        for slug in ["nested/page", "nested\\page", "..", "dot.html"] {
            let mut catalog = Catalog::builtin();
            catalog.logs[0].slug = slug.to_string();
            assert!(catalog.validate().is_err(), "accepted slug {slug:?}");
        }
    }

    #[test]
    fn test_validate_rejects_bad_date() {
        let mut catalog = Catalog::builtin();
        catalog.logs[2].date = "2025-12-06".to_string();

        let err = catalog.validate().unwrap_err();
        assert!(err.contains("invalid date"));
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let mut catalog = Catalog::builtin();
        catalog.projects[1].title = "  ".to_string();

        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("catalog.toml");
        std::fs::write(&path, "").expect("write");

        let catalog = Catalog::load(&path).expect("load catalog");
        assert!(catalog.projects.is_empty());
        assert!(catalog.logs.is_empty());
    }

    #[test]
    fn test_load_or_builtin() {
        let catalog = Catalog::load_or_builtin(None).expect("builtin");
        assert_eq!(catalog, Catalog::builtin());

        assert!(Catalog::load_or_builtin(Some(Path::new("/nonexistent.toml"))).is_err());
    }
}
