//! Recursive enumeration of the routing tree.

use globset::GlobSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::{Conventions, RouteFileKind, RoutePath, ScanError, ScanWarning};

/// A route-defining file found during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFile {
    /// Absolute path to the file
    pub path: PathBuf,
    /// Segments of the directory holding the file, relative to the root
    pub route: RoutePath,
    pub kind: RouteFileKind,
}

impl RouteFile {
    /// Directory containing the file.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

/// Files and non-fatal failures produced by one walk.
#[derive(Debug, Default)]
pub struct WalkOutput {
    pub files: Vec<RouteFile>,
    pub warnings: Vec<ScanWarning>,
}

/// Depth-first walker over an `app` directory.
pub struct Walker<'a> {
    conventions: &'a Conventions,
    exclude: Option<&'a GlobSet>,
}

impl<'a> Walker<'a> {
    pub fn new(conventions: &'a Conventions) -> Self {
        Self {
            conventions,
            exclude: None,
        }
    }

    /// Skip paths (relative to the root) matching any of these globs.
    pub fn exclude(mut self, globs: Option<&'a GlobSet>) -> Self {
        self.exclude = globs;
        self
    }

    /// Enumerate every page and route file under `root`.
    ///
    /// Private directories are pruned with their whole subtree. Entries
    /// are visited in file-name order. A directory that cannot be listed
    /// becomes a warning and the walk continues with its siblings.
    pub fn walk(&self, root: &Path) -> Result<WalkOutput, ScanError> {
        let metadata = std::fs::metadata(root).map_err(|_| ScanError::RootNotFound(root.to_path_buf()))?;
        if !metadata.is_dir() {
            return Err(ScanError::NotADirectory(root.to_path_buf()));
        }

        let mut output = WalkOutput::default();

        let entries = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !self.is_pruned(root, e));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().unwrap_or(root).to_path_buf();
                    warn!(path = %path.display(), "skipping unreadable subtree: {}", err);
                    output.warnings.push(ScanWarning::new(path, err.to_string()));
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            let Some(kind) = self.conventions.file_kind(&name) else {
                continue;
            };

            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let route = match relative.parent() {
                Some(dir) => RoutePath::from_names(
                    dir.components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned()),
                ),
                None => RoutePath::new(),
            };

            debug!(file = %relative.display(), route = %route.assemble(), ?kind, "found route file");
            output.files.push(RouteFile {
                path: entry.path().to_path_buf(),
                route,
                kind,
            });
        }

        Ok(output)
    }

    /// Whether an entry (and, for directories, its subtree) is skipped.
    fn is_pruned(&self, root: &Path, entry: &DirEntry) -> bool {
        if entry.file_type().is_dir() {
            let name = entry.file_name().to_string_lossy();
            if self.conventions.is_private(&name) {
                debug!(dir = %entry.path().display(), "pruning private directory");
                return true;
            }
        }

        match self.exclude {
            Some(globs) => {
                let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
                globs.is_match(relative)
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use globset::{Glob, GlobSetBuilder};
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "export default function X() {}").unwrap();
    }

    fn routes(output: &WalkOutput) -> Vec<(String, RouteFileKind)> {
        output
            .files
            .iter()
            .map(|f| (f.route.assemble(), f.kind))
            .collect()
    }

    #[test]
    fn test_walk_classifies_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "page.tsx");
        touch(temp.path(), "layout.tsx");
        touch(temp.path(), "blog/[slug]/page.tsx");
        touch(temp.path(), "api/users/route.ts");

        let conventions = Conventions::default();
        let output = Walker::new(&conventions).walk(temp.path()).unwrap();

        assert_eq!(
            routes(&output),
            vec![
                ("/api/users".to_string(), RouteFileKind::Api),
                ("/blog/[slug]".to_string(), RouteFileKind::Page),
                ("/".to_string(), RouteFileKind::Page),
            ]
        );
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_walk_prunes_private_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "_private/page.tsx");
        touch(temp.path(), "dashboard/_lib/deep/nested/page.tsx");
        touch(temp.path(), "dashboard/_lib/route.ts");
        touch(temp.path(), "dashboard/page.tsx");

        let conventions = Conventions::default();
        let output = Walker::new(&conventions).walk(temp.path()).unwrap();

        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].route.assemble(), "/dashboard");
        assert!(output.files.iter().all(|f| {
            let relative = f.path.strip_prefix(temp.path()).unwrap();
            !relative.to_string_lossy().contains('_')
        }));
    }

    #[test]
    fn test_walk_exclude_globs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "docs/page.tsx");
        touch(temp.path(), "legacy/old/page.tsx");

        let mut builder = GlobSetBuilder::new();
        builder.add(Glob::new("legacy").unwrap());
        let globs = builder.build().unwrap();

        let conventions = Conventions::default();
        let output = Walker::new(&conventions)
            .exclude(Some(&globs))
            .walk(temp.path())
            .unwrap();

        assert_eq!(routes(&output), vec![("/docs".to_string(), RouteFileKind::Page)]);
    }

    #[test]
    fn test_walk_missing_root() {
        let temp = TempDir::new().unwrap();
        let conventions = Conventions::default();
        let err = Walker::new(&conventions)
            .walk(&temp.path().join("app"))
            .unwrap_err();
        assert!(matches!(err, ScanError::RootNotFound(_)));
    }

    #[test]
    fn test_walk_root_is_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app");
        let conventions = Conventions::default();
        let err = Walker::new(&conventions)
            .walk(&temp.path().join("app"))
            .unwrap_err();
        assert!(matches!(err, ScanError::NotADirectory(_)));
    }

    #[test]
    fn test_root_with_private_prefix_is_walked() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "_app/page.tsx");

        let conventions = Conventions::default();
        let output = Walker::new(&conventions)
            .walk(&temp.path().join("_app"))
            .unwrap();
        assert_eq!(output.files.len(), 1);
    }
}
