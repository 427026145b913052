//! Command-line interface for routelens.

use clap::{ArgAction, Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::report::{self, RenderOptions};
use crate::route::{self, ScanMode, Scanner};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// List the pages and API routes of an App Router project.
///
/// Routes are discovered from the `app` (or `src/app`) directory and
/// annotated with what can be read from each file without running it:
/// client/server mode, metadata exports, segment config and handled
/// HTTP methods.
#[derive(Parser, Debug)]
#[command(name = "routelens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Which routes to list (default: both)
    #[arg(value_enum)]
    pub mode: Option<ModeArg>,

    /// Prefix routes with the base URL
    #[arg(short, long)]
    pub full: bool,

    /// Output format: pretty or json
    #[arg(long, default_value = "pretty")]
    pub format: String,

    /// Routing directory (default: ./app, then ./src/app)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL for --full (default: $BASE_URL, $APP_URL, https://localhost:3000)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Route table selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Page routes only
    Pages,
    /// API routes only
    Api,
}

impl From<Option<ModeArg>> for ScanMode {
    fn from(arg: Option<ModeArg>) -> Self {
        match arg {
            None => ScanMode::All,
            Some(ModeArg::Pages) => ScanMode::Pages,
            Some(ModeArg::Api) => ScanMode::Api,
        }
    }
}

/// Load the config named on the command line, or a discovered one.
fn load_config(cli: &Cli, cwd: &Path) -> anyhow::Result<Config> {
    match cli.config.clone().or_else(|| Config::discover(cwd)) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Config::parse_file(&path)
        }
        None => Ok(Config::default()),
    }
}

/// Resolve the routing directory from flag, config or discovery.
fn resolve_root(cli: &Cli, config: &Config, cwd: &Path) -> Result<PathBuf, route::ScanError> {
    match cli.root.as_ref().or(config.root.as_ref()) {
        Some(root) => Ok(cwd.join(root)),
        None => route::discover_root(cwd),
    }
}

/// Run the CLI.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Validate format
    if cli.format != "pretty" && cli.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            cli.format
        );
        return Ok(EXIT_ERROR);
    }

    let cwd = std::env::current_dir()?;

    let config = match load_config(cli, &cwd) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let exclude = match config.exclude_set() {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Error: invalid config: {:#}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let root = match resolve_root(cli, &config, &cwd) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("🚫 {}", e);
            eprintln!("This tool only works with projects using an \"app\" directory.");
            return Ok(EXIT_ERROR);
        }
    };

    let mode = ScanMode::from(cli.mode);
    let scanner = Scanner::new(&root)
        .conventions(config.conventions.clone())
        .exclude(exclude)
        .mode(mode);

    let result = match scanner.run() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("🚫 {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let options = RenderOptions {
        full_path: cli.full,
        base_url: config.base_url(cli.base_url.as_deref()),
    };

    match cli.format.as_str() {
        "json" => {
            report::write_json(
                &root,
                &result,
                &options,
                mode.includes_pages(),
                mode.includes_api(),
            )?;
        }
        _ => {
            report::write_pretty(
                &root,
                &result,
                &options,
                mode.includes_pages(),
                mode.includes_api(),
            );
        }
    }

    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        let cli = Cli::parse_from(["routelens"]);
        assert_eq!(ScanMode::from(cli.mode), ScanMode::All);

        let cli = Cli::parse_from(["routelens", "pages"]);
        assert_eq!(ScanMode::from(cli.mode), ScanMode::Pages);

        let cli = Cli::parse_from(["routelens", "api", "-f"]);
        assert_eq!(ScanMode::from(cli.mode), ScanMode::Api);
        assert!(cli.full);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "routelens",
            "--format",
            "json",
            "--root",
            "web/app",
            "--base-url",
            "https://example.test",
            "--no-color",
            "-vv",
        ]);
        assert_eq!(cli.format, "json");
        assert_eq!(cli.root, Some(PathBuf::from("web/app")));
        assert_eq!(cli.base_url.as_deref(), Some("https://example.test"));
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Cli::try_parse_from(["routelens", "layouts"]).is_err());
    }

    #[test]
    fn test_resolve_root_precedence() {
        let cwd = Path::new("/project");
        let config = Config {
            root: Some(PathBuf::from("src/app")),
            ..Default::default()
        };

        let cli = Cli::parse_from(["routelens", "--root", "web/app"]);
        assert_eq!(
            resolve_root(&cli, &config, cwd).unwrap(),
            PathBuf::from("/project/web/app")
        );

        let cli = Cli::parse_from(["routelens"]);
        assert_eq!(
            resolve_root(&cli, &config, cwd).unwrap(),
            PathBuf::from("/project/src/app")
        );
    }
}
