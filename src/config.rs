//! Optional project configuration for routelens.
//!
//! Configuration lives in a YAML file next to the project. Every field is
//! optional; command-line flags take precedence over the file, and the
//! file over environment defaults.
//!
//! ```yaml
//! root: src/app
//! base_url: https://staging.example.com
//! private_prefix: _
//! page_files: [page.tsx, page.mdx]
//! exclude:
//!   - "**/legacy/**"
//! ```

use anyhow::Context;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::route::Conventions;

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["routelens.yaml", "routelens.yml", ".routelens.yaml"];

/// Environment variables consulted for the base URL, in order.
pub const BASE_URL_ENV_VARS: &[&str] = &["BASE_URL", "APP_URL"];

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://localhost:3000";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Routing directory, relative to the working directory
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Base URL shown in full path mode
    #[serde(default)]
    pub base_url: Option<String>,
    /// File naming conventions
    #[serde(flatten)]
    pub conventions: Conventions,
    /// Glob patterns (relative to the routing directory) to skip
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse a config from YAML text. An empty document yields defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    /// Find a config file in `dir`.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.as_ref().join(name))
            .find(|p| p.is_file())
    }

    /// Compile the exclude patterns. `None` when there are none.
    pub fn exclude_set(&self) -> anyhow::Result<Option<GlobSet>> {
        if self.exclude.is_empty() {
            return Ok(None);
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude {
            let glob = Glob::new(pattern)
                .map_err(|e| anyhow::anyhow!("compiling exclude pattern {:?}: {}", pattern, e))?;
            builder.add(glob);
        }
        Ok(Some(builder.build()?))
    }

    /// Resolve the base URL from the flag, the config file and the process
    /// environment.
    pub fn base_url(&self, flag: Option<&str>) -> String {
        self.base_url_with(flag, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::base_url`] with an explicit environment lookup.
    pub fn base_url_with<F>(&self, flag: Option<&str>, env: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        flag.map(str::to_string)
            .or_else(|| self.base_url.clone())
            .or_else(|| {
                BASE_URL_ENV_VARS
                    .iter()
                    .filter_map(|name| env(name))
                    .find(|v| !v.is_empty())
            })
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }
}
