//! Check command - validate configuration, catalog and content

use std::{collections::HashSet, path::Path};

use color_eyre::eyre::{Result, bail};
use portfolio_core::{ArticleSource, Catalog, Config, ContentType};
use portfolio_parser::{ParserRegistry, is_known_theme};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration, catalog and content");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    if !config_path.exists() {
        result.add_warning(format!(
            "{} not found, using built-in defaults",
            config_path.display()
        ));
    }
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            return result;
        }
    };
    check_config_values(&config, &mut result);

    println!("\nChecking catalog...");
    let catalog = match Catalog::load_or_builtin(config.catalog.path.as_deref()) {
        Ok(c) => {
            println!(
                "  ✓ Catalog valid ({} projects, {} logs)",
                c.projects.len(),
                c.logs.len()
            );
            c
        }
        Err(e) => {
            result.add_error(format!("Catalog error: {e}"));
            println!("  ✗ Catalog invalid: {e}");
            return result;
        }
    };

    let content_dir = Path::new(&config.build.content_dir);
    println!("\nChecking content files...");
    if content_dir.is_dir() {
        validate_content_files(content_dir, &config, &catalog, &mut result);
    } else {
        result.add_warning(format!(
            "Content directory does not exist: {}",
            content_dir.display()
        ));
    }

    for warning in quick_validate(&config, &catalog) {
        result.add_warning(warning);
    }

    result
}

/// Quick validation for the build command.
///
/// Returns one warning per article that will be built with placeholder text.
pub fn quick_validate(config: &Config, catalog: &Catalog) -> Vec<String> {
    let content_dir = Path::new(&config.build.content_dir);

    catalog
        .logs
        .iter()
        .filter(|entry| ArticleSource::locate(content_dir, &entry.slug).is_none())
        .map(|entry| {
            format!(
                "No content for logs/{}.html, the placeholder will be shown",
                entry.slug
            )
        })
        .collect()
}

/// Render every content file and flag files no catalog entry refers to.
fn validate_content_files(
    dir: &Path,
    config: &Config,
    catalog: &Catalog,
    result: &mut ValidationResult,
) {
    let registry = ParserRegistry::with_theme(&config.build.syntax_theme);
    let slugs: HashSet<&str> = catalog.logs.iter().map(|log| log.slug.as_str()).collect();
    let mut checked = 0;
    let mut failed = 0;

    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        let Some(content_type) = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ContentType::from_extension)
        else {
            continue;
        };

        checked += 1;

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if path.parent() != Some(dir) || !slugs.contains(stem) {
            result.add_warning(format!(
                "{}: no log entry uses this file",
                path.display()
            ));
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                result.add_error(format!("{}: Failed to read file: {e}", path.display()));
                failed += 1;
                continue;
            }
        };

        if let Err(e) = registry.parse(&content, content_type) {
            result.add_warning(format!(
                "{}: Render error, the placeholder will be shown: {e}",
                path.display()
            ));
            failed += 1;
        }
    }

    if failed == 0 {
        println!("  ✓ All {checked} content files render");
    } else {
        println!("  ✗ {failed}/{checked} content files have problems");
    }
}

/// Check configuration values for common issues.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    if !config.site.contact_email.contains('@') {
        result.add_warning(format!(
            "site.contact_email does not look like an address: {}",
            config.site.contact_email
        ));
    }

    if !is_known_theme(&config.build.syntax_theme) {
        result.add_warning(format!(
            "build.syntax_theme '{}' is not a bundled theme; code blocks use the default",
            config.build.syntax_theme
        ));
    }

    let output = Path::new(&config.build.output_dir);
    if output.exists() && !output.is_dir() {
        result.add_error(format!(
            "Output path exists but is not a directory: {}",
            config.build.output_dir
        ));
    }

    println!("  ✓ Configuration values checked");
}

#[cfg(test)]
mod tests {
    use std::fs;

    use portfolio_core::LogEntry;
    use tempfile::TempDir;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(
            Vec::new(),
            vec![
                LogEntry {
                    id: "1".to_string(),
                    date: "01.01.2025".to_string(),
                    title: "Written".to_string(),
                    slug: "written".to_string(),
                    category: "NOTES".to_string(),
                },
                LogEntry {
                    id: "2".to_string(),
                    date: "02.01.2025".to_string(),
                    title: "Pending".to_string(),
                    slug: "pending".to_string(),
                    category: "NOTES".to_string(),
                },
            ],
        )
    }

    fn config_for(content_dir: &Path) -> Config {
        let mut config = Config::default();
        config.build.content_dir = content_dir.to_string_lossy().to_string();
        config
    }

    #[test]
    fn test_quick_validate_reports_missing_articles() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("written.typ"), "= Written").unwrap();

        let warnings = quick_validate(&config_for(dir.path()), &catalog());

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("logs/pending.html"));
    }

    #[test]
    fn test_content_files_flag_orphans() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("written.md"), "# Written").unwrap();
        fs::write(dir.path().join("stray.md"), "# Stray").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut result = ValidationResult::default();
        validate_content_files(dir.path(), &config_for(dir.path()), &catalog(), &mut result);

        assert!(!result.has_errors());
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("stray.md"));
    }

    #[test]
    fn test_content_files_flag_render_failures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("written.md"), "   ").unwrap();

        let mut result = ValidationResult::default();
        validate_content_files(dir.path(), &config_for(dir.path()), &catalog(), &mut result);

        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("Render error"));
    }

    #[test]
    fn test_check_config_values() {
        let mut config = Config::default();
        config.site.base_url = "example.com".to_string();
        config.site.contact_email = "nobody".to_string();

        let mut result = ValidationResult::default();
        check_config_values(&config, &mut result);

        assert_eq!(result.warnings.len(), 2);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_check_config_values_unknown_theme() {
        let mut config = Config::default();
        config.build.syntax_theme = "no-such-theme".to_string();

        let mut result = ValidationResult::default();
        check_config_values(&config, &mut result);

        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("no-such-theme"));
    }

    #[test]
    fn test_strict_fails_on_warnings() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("portfolio.toml");
        let content_dir = dir.path().join("content");
        fs::create_dir_all(&content_dir).unwrap();
        fs::write(
            &config_path,
            format!(
                "[build]\ncontent_dir = \"{}\"\n",
                content_dir.display().to_string().replace('\\', "/")
            ),
        )
        .unwrap();

        assert!(run(&config_path, false).is_ok());
        assert!(run(&config_path, true).is_err());
    }
}
