//! Output formatting for scan results.
//!
//! Supports two output formats:
//! - Pretty: colored tables for the terminal
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;
use std::path::Path;

use crate::route::{ApiRouteDescriptor, PageDescriptor, ScanResult, ScanWarning};
use crate::style;

/// Rendering switches shared by both formats.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Prefix routes with the base URL
    pub full_path: bool,
    pub base_url: String,
}

impl RenderOptions {
    fn route(&self, path: &str) -> String {
        if self.full_path {
            style::full_route(&self.base_url, path)
        } else {
            style::route(path)
        }
    }
}

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON document.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub root: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pages: Option<&'a [PageDescriptor]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_routes: Option<&'a [ApiRouteDescriptor]>,
    pub warnings: &'a [ScanWarning],
    pub files_scanned: usize,
}

/// Build the JSON document for a scan.
///
/// Tables that were not requested are left out rather than emitted empty.
pub fn json_report<'a>(
    root: &Path,
    result: &'a ScanResult,
    options: &'a RenderOptions,
    include_pages: bool,
    include_api: bool,
) -> JsonReport<'a> {
    JsonReport {
        version: env!("CARGO_PKG_VERSION"),
        root: root.to_string_lossy().to_string(),
        base_url: options.full_path.then_some(options.base_url.as_str()),
        pages: include_pages.then_some(result.pages.as_slice()),
        api_routes: include_api.then_some(result.api_routes.as_slice()),
        warnings: &result.warnings,
        files_scanned: result.files_scanned,
    }
}

/// Write results in JSON format.
pub fn write_json(
    root: &Path,
    result: &ScanResult,
    options: &RenderOptions,
    include_pages: bool,
    include_api: bool,
) -> anyhow::Result<()> {
    let report = json_report(root, result, options, include_pages, include_api);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

const PAGE_HEADERS: &[&str] = &[
    "Function",
    "Route",
    "Type",
    "Metadata",
    "Server Action",
    "Dynamic",
    "Revalidate",
    "FetchCache",
    "Parallel",
    "Intercepting",
    "Loading",
    "Error",
];

const API_HEADERS: &[&str] = &["Method", "Route"];

/// A bordered table whose cells may carry color sequences.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| style::visible_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(style::visible_width(cell));
                }
            }
        }
        widths
    }

    fn border(widths: &[usize], left: &str, mid: &str, right: &str) -> String {
        let parts: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, parts.join(mid), right)
    }

    fn line(widths: &[usize], cells: &[String]) -> String {
        let mut out = String::from("│");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(style::visible_width(cell));
            out.push(' ');
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
            out.push_str(" │");
        }
        out
    }

    fn render(&self) -> String {
        let widths = self.widths();
        let mut lines = vec![
            Self::border(&widths, "┌", "┬", "┐"),
            Self::line(&widths, &self.headers),
            Self::border(&widths, "├", "┼", "┤"),
        ];
        for row in &self.rows {
            lines.push(Self::line(&widths, row));
        }
        lines.push(Self::border(&widths, "└", "┴", "┘"));
        lines.join("\n")
    }
}

/// Render the page table.
pub fn render_pages(pages: &[PageDescriptor], options: &RenderOptions) -> String {
    let mut table = Table::new(PAGE_HEADERS);
    for p in pages {
        table.push(vec![
            p.function.clone(),
            options.route(&p.route),
            style::mode(p.mode),
            style::metadata(p.metadata),
            style::server_action(p.server_action),
            style::dynamic(&p.dynamic),
            style::revalidate(p.revalidate),
            style::fetch_cache(&p.fetch_cache),
            style::parallel(p.parallel),
            style::intercepting(p.intercepting),
            style::loading(p.loading),
            style::error(p.error),
        ]);
    }
    table.render()
}

/// Render the API route table.
pub fn render_api_routes(routes: &[ApiRouteDescriptor], options: &RenderOptions) -> String {
    let mut table = Table::new(API_HEADERS);
    for r in routes {
        table.push(vec![style::method(&r.method), options.route(&r.route)]);
    }
    table.render()
}

/// Write results in pretty (human-readable) format.
pub fn write_pretty(
    root: &Path,
    result: &ScanResult,
    options: &RenderOptions,
    include_pages: bool,
    include_api: bool,
) {
    println!();
    print!("  ");
    print!("{}", "routelens".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", "Listing routes in: ".dimmed());
    println!("{}", root.display());
    println!();

    if include_pages {
        println!("  {} ({}):", "Pages".bold(), result.pages.len());
        println!("{}", render_pages(&result.pages, options));
        println!();
    }

    if include_api {
        println!("  {} ({}):", "API Routes".bold(), result.api_routes.len());
        println!("{}", render_api_routes(&result.api_routes, options));
        println!();
    }

    if result.has_warnings() {
        write_warnings(&result.warnings);
        println!();
    }
}

fn write_warnings(warnings: &[ScanWarning]) {
    println!("  {} ({}):", "Warnings".yellow(), warnings.len());
    for w in warnings {
        println!("    {} {}", "WARN".yellow(), w.path.display().to_string().blue());
        println!("         {}", w.message.dimmed());
    }
}
