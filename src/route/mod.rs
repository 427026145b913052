//! Route discovery and classification.
//!
//! The pipeline is:
//!
//! - [`Walker`] enumerates the routing tree and classifies each directory
//!   name into a [`RouteSegment`]
//! - [`DescriptorBuilder`] reads each page or route file once through the
//!   [`SourceCache`] and runs the marker tables from [`crate::markers`]
//! - [`Scanner`] ties both together and returns a sorted [`ScanResult`]

mod builder;
mod cache;
mod conventions;
mod error;
mod scanner;
mod segment;
mod types;
mod walker;

pub use builder::{handled_methods, DescriptorBuilder};
pub use cache::SourceCache;
pub use conventions::{Conventions, RouteFileKind, DEFAULT_PRIVATE_PREFIX};
pub use error::ScanError;
pub use scanner::{discover_root, ScanMode, Scanner, APP_DIR_CANDIDATES};
pub use segment::{classify, RoutePath, RouteSegment, SegmentKind, INTERCEPT_MARKERS};
pub use types::{
    ApiRouteDescriptor, ExecutionMode, HttpMethod, MetadataKind, PageDescriptor, ScanResult,
    ScanWarning,
};
pub use walker::{RouteFile, WalkOutput, Walker};
