//! Terminal decoration for route tables.
//!
//! Every function takes plain values and returns decorated text. Color
//! output follows the `colored` crate's global switch (`NO_COLOR`,
//! `--no-color`); nothing here keeps state of its own.

use colored::*;
use lazy_static::lazy_static;
use regex::Regex;

use crate::route::{self, ExecutionMode, HttpMethod, MetadataKind, SegmentKind, INTERCEPT_MARKERS};

lazy_static! {
    static ref ANSI_ESCAPE: Regex = Regex::new(r"\x1b\[[0-9;]*m").unwrap();
}

/// Marker shown for an absent value.
const ABSENT: &str = "×";

fn orange(text: &str) -> ColoredString {
    text.truecolor(255, 135, 0)
}

/// Remove ANSI color sequences.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Number of visible characters once color sequences are removed.
pub fn visible_width(text: &str) -> usize {
    strip_ansi(text).chars().count()
}

/// Dimmed `×` placeholder.
pub fn absent() -> String {
    ABSENT.dimmed().to_string()
}

/// Color one HTTP verb, or each member of a ` | ` alias group.
pub fn method(token: &str) -> String {
    if token.contains('|') {
        let separator = " | ".dimmed().to_string();
        return token
            .split('|')
            .map(|m| method(m.trim()))
            .collect::<Vec<_>>()
            .join(&separator);
    }

    match HttpMethod::parse(token) {
        Some(HttpMethod::Get) => token.green().to_string(),
        Some(HttpMethod::Post) => token.blue().to_string(),
        Some(HttpMethod::Delete) => token.red().to_string(),
        Some(HttpMethod::Head) => token.bright_black().to_string(),
        Some(HttpMethod::Put) => token.magenta().to_string(),
        Some(HttpMethod::Patch) => token.yellow().to_string(),
        Some(HttpMethod::Options) => token.cyan().to_string(),
        None => token.to_string(),
    }
}

/// Highlight intercepting markers inside a segment name.
fn intercept_highlight(segment: &str) -> String {
    let mut out = String::new();
    let mut rest = segment;
    'scan: while !rest.is_empty() {
        // Longest marker first so `(...)` is not read as `(.)`
        for marker in INTERCEPT_MARKERS {
            if let Some(tail) = rest.strip_prefix(marker) {
                out.push_str(&marker.green().to_string());
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}

/// Color one path segment by its kind.
fn segment(name: &str) -> String {
    let seg = route::classify(name);
    match seg.kind {
        SegmentKind::CatchAll | SegmentKind::OptionalCatchAll => name.magenta().to_string(),
        SegmentKind::Dynamic => name.yellow().to_string(),
        SegmentKind::Parallel if seg.intercepting => {
            let split = INTERCEPT_MARKERS
                .iter()
                .filter_map(|m| name.find(m))
                .min()
                .unwrap_or(name.len());
            format!("{}{}", orange(&name[..split]), intercept_highlight(&name[split..]))
        }
        SegmentKind::Parallel => orange(name).to_string(),
        SegmentKind::Intercepting => intercept_highlight(name),
        // Groups are dropped from assembled paths before they get here
        SegmentKind::Static | SegmentKind::Group => name.to_string(),
    }
}

/// Highlight the segments of an assembled route path.
pub fn route(path: &str) -> String {
    path.split('/')
        .map(|s| if s.is_empty() { String::new() } else { segment(s) })
        .collect::<Vec<_>>()
        .join("/")
}

/// Route prefixed with a dimmed base URL.
pub fn full_route(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/').dimmed(), route(path))
}

pub fn mode(mode: ExecutionMode) -> String {
    match mode {
        ExecutionMode::Client => "⇢ use client".red().to_string(),
        ExecutionMode::Server => "⇠ server".dimmed().to_string(),
    }
}

pub fn metadata(kind: MetadataKind) -> String {
    match kind {
        MetadataKind::Static => "✓ metadata".green().to_string(),
        MetadataKind::Generator => "○ generateMetadata".blue().to_string(),
        MetadataKind::None => absent(),
    }
}

pub fn server_action(present: bool) -> String {
    if present {
        "✓ use server".blue().to_string()
    } else {
        absent()
    }
}

pub fn dynamic(value: &str) -> String {
    if value.is_empty() {
        absent()
    } else {
        value.yellow().to_string()
    }
}

pub fn revalidate(seconds: Option<u64>) -> String {
    match seconds {
        Some(s) => format!("{}s", s).cyan().to_string(),
        None => absent(),
    }
}

pub fn fetch_cache(value: &str) -> String {
    if value.is_empty() {
        absent()
    } else {
        value.magenta().to_string()
    }
}

pub fn parallel(flag: bool) -> String {
    if flag {
        orange("= parallel").to_string()
    } else {
        absent()
    }
}

pub fn intercepting(flag: bool) -> String {
    if flag {
        "⇥ intercepting".green().to_string()
    } else {
        absent()
    }
}

pub fn loading(flag: bool) -> String {
    if flag {
        "○ loading".cyan().to_string()
    } else {
        absent()
    }
}

pub fn error(flag: bool) -> String {
    if flag {
        "⌀ error".red().to_string()
    } else {
        absent()
    }
}
