//! File naming conventions of the routing tree.

use serde::{Deserialize, Serialize};

/// Default prefix marking a private (non-routable) directory.
pub const DEFAULT_PRIVATE_PREFIX: &str = "_";

/// Kind of route-defining file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteFileKind {
    /// `page.tsx` and friends
    Page,
    /// `route.ts` and friends
    Api,
}

/// Which file names define pages, handlers and their sibling UI states.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Conventions {
    pub private_prefix: String,
    pub page_files: Vec<String>,
    pub route_files: Vec<String>,
    pub loading_files: Vec<String>,
    pub error_files: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            private_prefix: DEFAULT_PRIVATE_PREFIX.to_string(),
            page_files: names(&["page.tsx", "page.jsx", "page.js"]),
            route_files: names(&["route.ts", "route.js"]),
            loading_files: names(&["loading.tsx", "loading.jsx", "loading.js"]),
            error_files: names(&["error.tsx", "error.jsx", "error.js"]),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Conventions {
    /// Classify a file by its name.
    pub fn file_kind(&self, file_name: &str) -> Option<RouteFileKind> {
        if self.page_files.iter().any(|n| n == file_name) {
            Some(RouteFileKind::Page)
        } else if self.route_files.iter().any(|n| n == file_name) {
            Some(RouteFileKind::Api)
        } else {
            None
        }
    }

    /// Whether a directory name marks a private folder.
    pub fn is_private(&self, dir_name: &str) -> bool {
        !self.private_prefix.is_empty() && dir_name.starts_with(&self.private_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind() {
        let c = Conventions::default();
        assert_eq!(c.file_kind("page.tsx"), Some(RouteFileKind::Page));
        assert_eq!(c.file_kind("page.js"), Some(RouteFileKind::Page));
        assert_eq!(c.file_kind("route.ts"), Some(RouteFileKind::Api));
        assert_eq!(c.file_kind("layout.tsx"), None);
        assert_eq!(c.file_kind("page.test.tsx"), None);
    }

    #[test]
    fn test_is_private() {
        let c = Conventions::default();
        assert!(c.is_private("_components"));
        assert!(!c.is_private("components"));

        let none = Conventions {
            private_prefix: String::new(),
            ..Default::default()
        };
        assert!(!none.is_private("_components"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let c: Conventions = serde_yaml::from_str("page_files: [page.mdx]\n").unwrap();
        assert_eq!(c.page_files, vec!["page.mdx".to_string()]);
        assert_eq!(c.route_files, Conventions::default().route_files);
        assert_eq!(c.private_prefix, "_");
    }
}
