//! Build command - generates the static site

use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use color_eyre::eyre::{Result, WrapErr};
use portfolio_core::{Catalog, Config};
use portfolio_generator::Builder;

use super::check::quick_validate;

/// Command-line overrides for a build.
#[derive(Debug, Clone, Default)]
pub struct BuildArgs {
    pub output: Option<PathBuf>,
    pub content: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
}

/// Load configuration and catalog, applying command-line overrides.
pub fn load_site(config_path: &Path, args: &BuildArgs) -> Result<(Config, Catalog)> {
    if !config_path.exists() {
        tracing::info!(?config_path, "No configuration file, using built-in site");
    }
    let mut config = Config::load_with_env(config_path).wrap_err("Failed to load configuration")?;

    if let Some(output) = &args.output {
        config.build.output_dir = output.to_string_lossy().to_string();
    }
    if let Some(content) = &args.content {
        config.build.content_dir = content.to_string_lossy().to_string();
    }
    if let Some(catalog) = &args.catalog {
        config.catalog.path = Some(catalog.clone());
    }

    let catalog =
        Catalog::load_or_builtin(config.catalog.path.as_deref()).wrap_err("Failed to load catalog")?;

    tracing::debug!(?config, "Loaded configuration");
    Ok((config, catalog))
}

/// Run the build command.
pub fn run(config_path: &Path, args: &BuildArgs) -> Result<()> {
    let start = Instant::now();
    tracing::info!(?config_path, ?args, "Starting build");

    let (config, catalog) = load_site(config_path, args)?;

    let warnings = quick_validate(&config, &catalog);
    if !warnings.is_empty() {
        println!();
        println!("  Warnings:");
        for warn in &warnings {
            println!("  ⚠ {warn}");
        }
        println!();
    }

    let content_dir = PathBuf::from(&config.build.content_dir);
    let output_dir = PathBuf::from(&config.build.output_dir);
    let static_dir = PathBuf::from(&config.build.static_dir);

    let mut builder = Builder::new(config, catalog, content_dir, output_dir);
    if static_dir.is_dir() {
        tracing::info!(?static_dir, "Found static directory, will copy to output");
        builder = builder.with_static_dir(static_dir);
    }

    let stats = builder.build().wrap_err("Build failed")?;
    let duration = start.elapsed();

    println!();
    println!("  Build completed successfully!");
    println!();
    println!("  Pages:        {}", stats.pages);
    println!("  Articles:     {}", stats.articles);
    println!("  Placeholders: {}", stats.placeholders);
    println!("  Assets:       {}", stats.assets);
    println!();
    println!("  Output:       {}", builder.output_dir().display());
    println!("  Duration:     {:.2}s", duration.as_secs_f64());
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_load_site_applies_overrides() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("portfolio.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"Test\"\nbase_url = \"https://example.com\"\n",
        )
        .unwrap();

        let args = BuildArgs {
            output: Some(dir.path().join("dist")),
            content: Some(dir.path().join("articles")),
            catalog: None,
        };
        let (config, catalog) = load_site(&config_path, &args).unwrap();

        assert_eq!(config.site.title, "Test");
        assert!(config.build.output_dir.ends_with("dist"));
        assert!(config.build.content_dir.ends_with("articles"));
        assert_eq!(catalog, Catalog::builtin());
    }

    #[test]
    fn test_load_site_missing_catalog_fails() {
        let dir = TempDir::new().unwrap();
        let args = BuildArgs {
            catalog: Some(dir.path().join("missing.toml")),
            ..BuildArgs::default()
        };

        assert!(load_site(&dir.path().join("portfolio.toml"), &args).is_err());
    }

    #[test]
    fn test_run_builds_site() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("public");
        let args = BuildArgs {
            output: Some(output.clone()),
            content: Some(dir.path().join("content")),
            catalog: None,
        };

        run(&dir.path().join("portfolio.toml"), &args).unwrap();

        assert!(output.join("index.html").exists());
        assert!(output.join("contact.html").exists());
    }
}
