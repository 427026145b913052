//! routelens - static route inspector for App Router projects.
//!
//! routelens walks an `app` directory whose nesting encodes URL routes,
//! classifies every page and route handler file, and reads declarative
//! markers (`use client`, `generateMetadata`, `revalidate`, exported HTTP
//! handlers, ...) straight from the file text. Nothing is compiled or
//! executed.
//!
//! # Architecture
//!
//! - `markers`: table-driven text marker matcher
//! - `route`: segment classification, tree walk, descriptor assembly
//! - `style`: pure terminal decoration
//! - `report`: output formatting (table, JSON)
//! - `config`: YAML configuration
//! - `cli`: command-line entry

pub mod cli;
pub mod config;
pub mod markers;
pub mod report;
pub mod route;
pub mod style;

pub use config::Config;
pub use markers::{Extraction, Field, MarkerDefinition, MarkerSet};
pub use route::{
    ApiRouteDescriptor, PageDescriptor, RoutePath, RouteSegment, ScanError, ScanMode,
    ScanResult, Scanner, SegmentKind,
};
