//! Errors raised while discovering routes.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a scan.
///
/// `RootNotFound`, `NoAppDirectory` and `NotADirectory` are fatal and are
/// raised before traversal starts. `Read` is reported per file and is
/// turned into a warning by the scanner.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("routing directory not found: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("no \"app\" directory found (looked for {candidates} in {})", .base.display())]
    NoAppDirectory { base: PathBuf, candidates: String },
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    #[error("reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
