//! Scan orchestration: walk the tree, build descriptors, sort the result.

use globset::GlobSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{
    Conventions, DescriptorBuilder, RouteFileKind, ScanError, ScanResult, ScanWarning,
    SourceCache, WalkOutput, Walker,
};

/// Routing directories looked up, in order, relative to the project base.
pub const APP_DIR_CANDIDATES: &[&str] = &["app", "src/app"];

/// Which descriptor tables to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Pages and API routes
    #[default]
    All,
    Pages,
    Api,
}

impl ScanMode {
    pub fn includes_pages(&self) -> bool {
        matches!(self, ScanMode::All | ScanMode::Pages)
    }

    pub fn includes_api(&self) -> bool {
        matches!(self, ScanMode::All | ScanMode::Api)
    }
}

/// Locate the routing directory under `base`.
///
/// Returns the first existing candidate of [`APP_DIR_CANDIDATES`].
pub fn discover_root<P: AsRef<Path>>(base: P) -> Result<PathBuf, ScanError> {
    let base = base.as_ref();
    APP_DIR_CANDIDATES
        .iter()
        .map(|c| base.join(c))
        .find(|p| p.is_dir())
        .ok_or_else(|| ScanError::NoAppDirectory {
            base: base.to_path_buf(),
            candidates: APP_DIR_CANDIDATES.join(", "),
        })
}

/// Runs route discovery over one routing directory.
pub struct Scanner {
    root: PathBuf,
    conventions: Conventions,
    exclude: Option<GlobSet>,
    mode: ScanMode,
}

impl Scanner {
    /// Create a scanner for the routing directory `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            conventions: Conventions::default(),
            exclude: None,
            mode: ScanMode::All,
        }
    }

    pub fn conventions(mut self, conventions: Conventions) -> Self {
        self.conventions = conventions;
        self
    }

    /// Skip root-relative paths matching these globs.
    pub fn exclude(mut self, globs: Option<GlobSet>) -> Self {
        self.exclude = globs;
        self
    }

    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Discover every route under the root.
    ///
    /// Fails only when the root itself is unusable. Unreadable directories
    /// and files end up in [`ScanResult::warnings`]. The result is sorted
    /// by assembled path, so two runs over an unchanged tree are identical.
    pub fn run(&self) -> Result<ScanResult, ScanError> {
        let walk = Walker::new(&self.conventions)
            .exclude(self.exclude.as_ref())
            .walk(&self.root)?;
        Ok(self.build(walk))
    }

    /// Read every walked file and assemble the sorted result.
    fn build(&self, walk: WalkOutput) -> ScanResult {
        let builder = DescriptorBuilder::new(&self.conventions);
        let mut cache = SourceCache::new();
        let mut result = ScanResult::new();
        result.warnings = walk.warnings;

        for file in &walk.files {
            let built = match file.kind {
                RouteFileKind::Page if self.mode.includes_pages() => builder
                    .build_page(file, &mut cache)
                    .map(|page| result.pages.push(page)),
                RouteFileKind::Api if self.mode.includes_api() => builder
                    .build_api(file, &mut cache)
                    .map(|rows| result.api_routes.extend(rows)),
                _ => continue,
            };

            if let Err(err) = built {
                warn!("skipping route file: {}", err);
                result
                    .warnings
                    .push(ScanWarning::new(&file.path, err.to_string()));
            }
        }

        result.files_scanned = cache.reads();
        cache.close();
        result.sort();

        debug!(
            pages = result.pages.len(),
            api_routes = result.api_routes.len(),
            warnings = result.warnings.len(),
            "scan complete"
        );
        result
    }
}
