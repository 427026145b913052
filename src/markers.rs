//! Table-driven detection of declarative markers in raw source text.
//!
//! A marker is a fixed textual pattern whose presence signals a behavior:
//! a `use client` directive, an exported `revalidate` interval, a
//! `generateMetadata` function, an exported `GET` handler and so on.
//!
//! Matching is lexical. Comments and string literals are not special, so
//! a marker mentioned inside a comment is indistinguishable from a real
//! declaration:
//!
//! ```text
//! // export const metadata = ...     <- detected as static metadata
//! const s = "use client";            <- detected as a client directive
//! ```
//!
//! This is a known limitation of the heuristic and is kept as-is.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

use crate::route::HttpMethod;

/// Tag recorded for [`Field::Metadata`] when a `metadata` object is exported.
pub const METADATA_STATIC: &str = "static";
/// Tag recorded for [`Field::Metadata`] when `generateMetadata` is exported.
pub const METADATA_GENERATOR: &str = "generator";

/// Separator used to join destructured handler names.
pub const ALIAS_SEPARATOR: &str = " | ";

/// Semantic field populated by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ClientDirective,
    ServerAction,
    Metadata,
    Dynamic,
    Revalidate,
    FetchCache,
    DefaultExport,
    HandlerAlias,
    Handler(HttpMethod),
}

/// How a definition recognizes its marker.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Plain substring presence check.
    Literal(&'static str),
    /// Regular expression; capture group 1 holds the value when captured.
    Regex(Regex),
}

/// What a matching definition stores for its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Store a fixed tag (presence only).
    Tag(&'static str),
    /// Store capture group 1.
    Group,
    /// Store capture group 1 unless it is one of the reserved words.
    Identifier { reserved: &'static [&'static str] },
    /// Treat capture group 1 as a destructuring list and join the bound
    /// names with the separator.
    List { separator: &'static str },
}

/// A named textual pattern plus the field it populates.
#[derive(Debug, Clone)]
pub struct MarkerDefinition {
    pub field: Field,
    pub pattern: Pattern,
    pub capture: Capture,
}

impl MarkerDefinition {
    /// Substring presence marker.
    pub fn literal(field: Field, text: &'static str) -> Self {
        Self {
            field,
            pattern: Pattern::Literal(text),
            capture: Capture::Tag(text),
        }
    }

    /// Regex presence marker storing `tag` on match.
    pub fn tagged(field: Field, regex: Regex, tag: &'static str) -> Self {
        Self {
            field,
            pattern: Pattern::Regex(regex),
            capture: Capture::Tag(tag),
        }
    }

    /// Regex marker storing its first capture group.
    pub fn capturing(field: Field, regex: Regex) -> Self {
        Self {
            field,
            pattern: Pattern::Regex(regex),
            capture: Capture::Group,
        }
    }

    /// Regex marker storing its first capture group when that is not a
    /// reserved word.
    pub fn identifier(field: Field, regex: Regex, reserved: &'static [&'static str]) -> Self {
        Self {
            field,
            pattern: Pattern::Regex(regex),
            capture: Capture::Identifier { reserved },
        }
    }

    /// Regex marker whose first group is a `{ A, B: c }` destructuring list.
    pub fn destructuring(field: Field, regex: Regex, separator: &'static str) -> Self {
        Self {
            field,
            pattern: Pattern::Regex(regex),
            capture: Capture::List { separator },
        }
    }

    /// Evaluate this definition against `text`.
    fn evaluate(&self, text: &str) -> Option<String> {
        match (&self.pattern, self.capture) {
            (Pattern::Literal(needle), Capture::Tag(tag)) => {
                text.contains(needle).then(|| tag.to_string())
            }
            (Pattern::Literal(needle), _) => text.contains(needle).then(|| needle.to_string()),
            (Pattern::Regex(re), Capture::Tag(tag)) => re.is_match(text).then(|| tag.to_string()),
            (Pattern::Regex(re), Capture::Group) => {
                let caps = re.captures(text)?;
                let value = caps.get(1)?.as_str().trim();
                Some(value.to_string())
            }
            (Pattern::Regex(re), Capture::Identifier { reserved }) => re
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .find(|name| !reserved.contains(name))
                .map(str::to_string),
            (Pattern::Regex(re), Capture::List { separator }) => {
                let caps = re.captures(text)?;
                let names: Vec<&str> = caps
                    .get(1)?
                    .as_str()
                    .split(',')
                    .map(binding_name)
                    .filter(|name| !name.is_empty())
                    .collect();
                if names.is_empty() {
                    None
                } else {
                    Some(names.join(separator))
                }
            }
        }
    }
}

/// Name bound by one destructuring entry: `GET` for `GET`, `get` for `GET: get`.
fn binding_name(entry: &str) -> &str {
    let entry = entry.trim();
    match entry.split_once(':') {
        Some((_, local)) => local.trim(),
        None => entry,
    }
}

/// Values extracted from one file, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    values: BTreeMap<Field, String>,
}

impl Extraction {
    /// Value stored for `field`, if any marker matched.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Whether any marker for `field` matched.
    pub fn has(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    /// Value for `field`, or an empty string when absent.
    pub fn text(&self, field: Field) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// An ordered collection of marker definitions.
///
/// Definitions targeting the same field are alternatives: they are tried
/// in declared order and the first match wins.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    definitions: Vec<MarkerDefinition>,
}

impl MarkerSet {
    pub fn new(definitions: Vec<MarkerDefinition>) -> Self {
        Self { definitions }
    }

    /// Run every definition against `text`.
    pub fn extract(&self, text: &str) -> Extraction {
        let mut extraction = Extraction::default();
        for def in &self.definitions {
            if extraction.has(def.field) {
                continue;
            }
            if let Some(value) = def.evaluate(text) {
                extraction.values.insert(def.field, value);
            }
        }
        extraction
    }
}

/// `export const|let|var <name>` prefix.
fn export_binding(name: &str) -> String {
    format!(r"export\s+(?:const|let|var)\s+{}\b", name)
}

/// Keywords that follow `export default` without naming the export.
const ANONYMOUS_DEFAULT_KEYWORDS: &[&str] = &["async", "function", "class"];

fn default_export_definitions() -> Vec<MarkerDefinition> {
    let mut defs: Vec<MarkerDefinition> = [
        r"export\s+default\s+async\s+function\s+([A-Za-z_$][\w$]*)",
        r"export\s+default\s+function\s+([A-Za-z_$][\w$]*)",
        r"export\s+default\s+class\s+([A-Za-z_$][\w$]*)",
    ]
    .into_iter()
    .map(|p| MarkerDefinition::capturing(Field::DefaultExport, Regex::new(p).unwrap()))
    .collect();

    // First word of any other default export: `export default withAuth(Page)` -> `withAuth`
    defs.push(MarkerDefinition::identifier(
        Field::DefaultExport,
        Regex::new(r"export\s+default\s+([A-Za-z_$][\w$]*)").unwrap(),
        ANONYMOUS_DEFAULT_KEYWORDS,
    ));
    defs
}

lazy_static! {
    static ref PAGE_MARKERS: MarkerSet = {
        let mut defs = vec![
            MarkerDefinition::literal(Field::ClientDirective, "use client"),
            MarkerDefinition::literal(Field::ServerAction, "use server"),
            // Generator forms are declared first so they win over a static mention.
            MarkerDefinition::tagged(
                Field::Metadata,
                Regex::new(r"export\s+(?:async\s+)?function\s+generateMetadata\b").unwrap(),
                METADATA_GENERATOR,
            ),
            MarkerDefinition::tagged(
                Field::Metadata,
                Regex::new(&export_binding("generateMetadata")).unwrap(),
                METADATA_GENERATOR,
            ),
            MarkerDefinition::tagged(
                Field::Metadata,
                Regex::new(&export_binding("metadata")).unwrap(),
                METADATA_STATIC,
            ),
            MarkerDefinition::capturing(
                Field::Dynamic,
                Regex::new(&format!(r#"{}\s*=\s*['"]([^'"]+)['"]"#, export_binding("dynamic"))).unwrap(),
            ),
            MarkerDefinition::capturing(
                Field::Revalidate,
                Regex::new(&format!(r"{}\s*=\s*(\d+)", export_binding("revalidate"))).unwrap(),
            ),
            MarkerDefinition::capturing(
                Field::FetchCache,
                Regex::new(&format!(r#"{}\s*=\s*['"]([^'"]+)['"]"#, export_binding("fetchCache"))).unwrap(),
            ),
        ];
        defs.extend(default_export_definitions());
        MarkerSet::new(defs)
    };

    static ref API_MARKERS: MarkerSet = {
        let mut defs = vec![MarkerDefinition::destructuring(
            Field::HandlerAlias,
            Regex::new(r"export\s+(?:const|let|var)\s*\{([^}]+)\}\s*=\s*[A-Za-z_$][\w$.]*").unwrap(),
            ALIAS_SEPARATOR,
        )];
        for method in HttpMethod::ALL {
            let verb = method.as_str();
            let pattern = format!(
                r"export\s+(?:async\s+)?function\s+{verb}\b|{}",
                export_binding(verb)
            );
            defs.push(MarkerDefinition::tagged(
                Field::Handler(method),
                Regex::new(&pattern).unwrap(),
                verb,
            ));
        }
        defs.extend(default_export_definitions());
        MarkerSet::new(defs)
    };
}

/// Markers evaluated for page files.
pub fn page_markers() -> &'static MarkerSet {
    &PAGE_MARKERS
}

/// Markers evaluated for API route files.
pub fn api_markers() -> &'static MarkerSet {
    &API_MARKERS
}
