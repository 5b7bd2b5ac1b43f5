//! Portfolio CLI
//!
//! Builds the static portfolio site and validates its inputs.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use portfolio::cmd::build::BuildArgs;

/// Command-line interface for the portfolio generator.
#[derive(Parser)]
#[command(name = "portfolio", version, about = "Static portfolio site generator")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "portfolio.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (overrides build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Article content directory (overrides build.content_dir)
        #[arg(long)]
        content: Option<PathBuf>,
        /// Catalog file (overrides catalog.path)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Validate configuration, catalog and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    portfolio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            output,
            content,
            catalog,
        } => {
            let args = BuildArgs {
                output,
                content,
                catalog,
            };
            portfolio::cmd::build::run(&cli.config, &args)?;
        }
        Commands::Check { strict } => {
            portfolio::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let cli = Cli::parse_from(["portfolio", "build", "--output", "dist"]);

        assert_eq!(cli.config, PathBuf::from("portfolio.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                output,
                content,
                catalog,
            } => {
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert!(content.is_none());
                assert!(catalog.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_sources() {
        let cli = Cli::parse_from([
            "portfolio",
            "build",
            "--content",
            "articles",
            "--catalog",
            "catalog.toml",
        ]);

        match cli.command {
            Commands::Build {
                output,
                content,
                catalog,
            } => {
                assert!(output.is_none());
                assert_eq!(content, Some(PathBuf::from("articles")));
                assert_eq!(catalog, Some(PathBuf::from("catalog.toml")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let cli = Cli::parse_from(["portfolio", "check", "--strict"]);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["portfolio", "-vvv", "build"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config() {
        let cli = Cli::parse_from(["portfolio", "-c", "site.toml", "check"]);
        assert_eq!(cli.config, PathBuf::from("site.toml"));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["portfolio"]).is_err());
    }
}
