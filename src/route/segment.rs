//! Translation of directory names into URL path segments.
//!
//! # Classification rules (evaluated in order)
//!
//! 1. **Catch-all**: `[...slug]`
//! 2. **Optional catch-all**: `[[...slug]]`
//! 3. **Dynamic**: `[id]`
//! 4. **Group**: `(marketing)`, contributes nothing to the path
//! 5. **Parallel**: `@modal`
//! 6. **Intercepting**: contains `(.)`, `(..)` or `(...)`, e.g. `(..)photo`
//! 7. **Static**: anything else
//!
//! Parallel and intercepting are also tracked as independent flags, since
//! a slot such as `@modal(.)photo` is both.

use serde::Serialize;

/// Substrings that mark an intercepting route.
pub const INTERCEPT_MARKERS: &[&str] = &["(...)", "(..)", "(.)"];

/// Shape of a route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    Static,
    Dynamic,
    CatchAll,
    OptionalCatchAll,
    Parallel,
    Intercepting,
    Group,
}

impl SegmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Static => "static",
            SegmentKind::Dynamic => "dynamic",
            SegmentKind::CatchAll => "catch_all",
            SegmentKind::OptionalCatchAll => "optional_catch_all",
            SegmentKind::Parallel => "parallel",
            SegmentKind::Intercepting => "intercepting",
            SegmentKind::Group => "group",
        }
    }
}

impl std::fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One path component derived from one directory name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSegment {
    /// Directory name as found on disk
    pub raw: String,
    pub kind: SegmentKind,
    /// Text contributed to the assembled path (empty for groups)
    pub display: String,
    /// Named slot (`@name`)
    pub parallel: bool,
    /// Contains an intercepting marker
    pub intercepting: bool,
}

impl RouteSegment {
    /// Whether this segment contributes a path component.
    pub fn is_visible(&self) -> bool {
        self.kind != SegmentKind::Group
    }
}

/// Strip `open`/`close` from both ends of `name`, returning a non-empty inner part.
fn wrapped<'a>(name: &'a str, open: &str, close: &str) -> Option<&'a str> {
    let inner = name.strip_prefix(open)?.strip_suffix(close)?;
    (!inner.is_empty()).then_some(inner)
}

fn has_intercept_marker(name: &str) -> bool {
    INTERCEPT_MARKERS.iter().any(|m| name.contains(m))
}

/// Determine the kind of a directory name.
fn classify_kind(name: &str) -> SegmentKind {
    if let Some(inner) = wrapped(name, "[...", "]") {
        if !inner.contains(['[', ']']) {
            return SegmentKind::CatchAll;
        }
    }
    if let Some(inner) = wrapped(name, "[[...", "]]") {
        if !inner.contains(['[', ']']) {
            return SegmentKind::OptionalCatchAll;
        }
    }
    if let Some(inner) = wrapped(name, "[", "]") {
        if !inner.starts_with("...") && !inner.contains(['[', ']']) {
            return SegmentKind::Dynamic;
        }
    }
    if let Some(inner) = wrapped(name, "(", ")") {
        // `(.)` and friends are intercepting markers, not groups
        if !inner.chars().all(|c| c == '.') && !inner.contains(['(', ')']) {
            return SegmentKind::Group;
        }
    }
    if name.starts_with('@') {
        return SegmentKind::Parallel;
    }
    if has_intercept_marker(name) {
        return SegmentKind::Intercepting;
    }
    SegmentKind::Static
}

/// Classify a single directory name.
pub fn classify(name: &str) -> RouteSegment {
    let kind = classify_kind(name);
    let display = if kind == SegmentKind::Group {
        String::new()
    } else {
        name.to_string()
    };

    RouteSegment {
        raw: name.to_string(),
        kind,
        display,
        parallel: kind == SegmentKind::Parallel,
        intercepting: has_intercept_marker(name),
    }
}

/// Ordered segments from the routing root down to a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoutePath {
    segments: Vec<RouteSegment>,
}

impl RoutePath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a route path by classifying each directory name in order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: names.into_iter().map(|n| classify(n.as_ref())).collect(),
        }
    }

    /// A copy of this path extended by one directory.
    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(classify(name));
        Self { segments }
    }

    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// Assembled URL path: `/` plus the visible segments joined by `/`.
    pub fn assemble(&self) -> String {
        let parts: Vec<&str> = self
            .segments
            .iter()
            .filter(|s| s.is_visible())
            .map(|s| s.display.as_str())
            .collect();
        format!("/{}", parts.join("/"))
    }

    /// Whether any segment is a parallel slot.
    pub fn is_parallel(&self) -> bool {
        self.segments.iter().any(|s| s.parallel)
    }

    /// Whether any segment carries an intercepting marker.
    pub fn is_intercepting(&self) -> bool {
        self.segments.iter().any(|s| s.intercepting)
    }
}
