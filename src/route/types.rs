//! Core types for route descriptors and scan results.

use serde::Serialize;
use std::path::{Path, PathBuf};

/// HTTP verbs recognized as route handlers, in detection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// All verbs in fixed priority order.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        HttpMethod::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a page component executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Server,
    Client,
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecutionMode::Server => write!(f, "server"),
            ExecutionMode::Client => write!(f, "client"),
        }
    }
}

/// How a page declares its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataKind {
    None,
    /// `export const metadata = ...`
    Static,
    /// `generateMetadata` export
    Generator,
}

impl std::fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataKind::None => write!(f, "none"),
            MetadataKind::Static => write!(f, "metadata"),
            MetadataKind::Generator => write!(f, "generateMetadata"),
        }
    }
}

/// One discovered page file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// Default export identifier (empty when undetectable)
    pub function: String,
    pub route: String,
    pub mode: ExecutionMode,
    pub metadata: MetadataKind,
    pub server_action: bool,
    /// `dynamic` segment config value, empty when absent
    pub dynamic: String,
    /// `revalidate` interval in seconds
    pub revalidate: Option<u64>,
    /// `fetchCache` segment config value, empty when absent
    pub fetch_cache: String,
    pub parallel: bool,
    pub intercepting: bool,
    pub loading: bool,
    pub error: bool,
    pub source: PathBuf,
}

/// One API route file and one handled verb (or alias group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiRouteDescriptor {
    /// Verb token, or ` | `-joined names for a destructured handler export
    pub method: String,
    pub function: String,
    pub route: String,
    pub source: PathBuf,
}

impl ApiRouteDescriptor {
    /// Whether this row stands for a destructured handler group.
    pub fn is_alias_group(&self) -> bool {
        HttpMethod::parse(&self.method).is_none()
    }
}

/// A part of the tree that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: PathBuf,
    pub message: String,
}

impl ScanWarning {
    pub fn new<P: AsRef<Path>>(path: P, message: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Output of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub pages: Vec<PageDescriptor>,
    pub api_routes: Vec<ApiRouteDescriptor>,
    pub warnings: Vec<ScanWarning>,
    /// Number of route files read
    pub files_scanned: usize,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Sort pages and API routes by assembled path.
    ///
    /// The sort is stable, so the verb order of one API file is kept.
    /// Equal paths coming from different files fall back to source order.
    pub fn sort(&mut self) {
        self.pages
            .sort_by(|a, b| a.route.cmp(&b.route).then_with(|| a.source.cmp(&b.source)));
        self.api_routes
            .sort_by(|a, b| a.route.cmp(&b.route).then_with(|| a.source.cmp(&b.source)));
        self.warnings.sort_by(|a, b| a.path.cmp(&b.path));
    }
}
