//! In-memory cache of route file contents for one scan.
//!
//! Each file is read at most once per scan. The cache is owned by the scan
//! that created it and is emptied by [`SourceCache::close`] or when it is
//! dropped, so a long-lived process reusing the scanner never sees stale
//! content from an earlier run.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::ScanError;

/// Content cache keyed by absolute file path.
#[derive(Debug, Default)]
pub struct SourceCache {
    entries: HashMap<PathBuf, String>,
    /// Number of reads that actually hit the file system
    reads: usize,
}

impl SourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of `path`, reading it from disk on first access.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; markers are ASCII.
    pub fn read(&mut self, path: &Path) -> Result<&str, ScanError> {
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_str()),
            Entry::Vacant(entry) => {
                let bytes = fs::read(path).map_err(|source| ScanError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                self.reads += 1;
                let content = String::from_utf8_lossy(&bytes).into_owned();
                Ok(entry.insert(content).as_str())
            }
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct files loaded from disk.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Release every cached entry.
    pub fn close(&mut self) {
        self.entries.clear();
    }
}

impl Drop for SourceCache {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page.tsx");
        std::fs::write(&path, "export default function A() {}").unwrap();

        let mut cache = SourceCache::new();
        assert_eq!(cache.read(&path).unwrap(), "export default function A() {}");

        // Later changes on disk are not observed within the same scan.
        std::fs::write(&path, "changed").unwrap();
        assert_eq!(cache.read(&path).unwrap(), "export default function A() {}");
        assert_eq!(cache.reads(), 1);
        assert!(cache.contains(&path));
    }

    #[test]
    fn test_close_releases_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("route.ts");
        std::fs::write(&path, "export async function GET() {}").unwrap();

        let mut cache = SourceCache::new();
        cache.read(&path).unwrap();
        assert_eq!(cache.len(), 1);

        cache.close();
        assert!(cache.is_empty());

        std::fs::write(&path, "export async function POST() {}").unwrap();
        assert_eq!(cache.read(&path).unwrap(), "export async function POST() {}");
        assert_eq!(cache.reads(), 2);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let mut cache = SourceCache::new();
        let err = cache.read(&temp.path().join("gone.tsx")).unwrap_err();
        assert!(matches!(err, ScanError::Read { .. }));
        assert!(err.to_string().contains("gone.tsx"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_lossy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("page.tsx");
        std::fs::write(&path, b"'use client'\n\xff\xfe").unwrap();

        let mut cache = SourceCache::new();
        assert!(cache.read(&path).unwrap().starts_with("'use client'"));
    }
}
