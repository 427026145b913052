//! Assembly of route descriptors from classified files.

use std::path::Path;

use crate::markers::{self, Extraction, Field};

use super::{
    ApiRouteDescriptor, Conventions, ExecutionMode, HttpMethod, MetadataKind, PageDescriptor,
    RouteFile, ScanError, SourceCache,
};

/// Suffix appended to the directory path of an API route.
const API_ROUTE_SUFFIX: &str = "/route";

/// Builds descriptors for the files found by the walker.
pub struct DescriptorBuilder<'a> {
    conventions: &'a Conventions,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(conventions: &'a Conventions) -> Self {
        Self { conventions }
    }

    /// Build the descriptor for a page file.
    ///
    /// Parallel and intercepting flags come from the segments classified
    /// during traversal. Loading and error flags only check whether the
    /// sibling files exist.
    pub fn build_page(
        &self,
        file: &RouteFile,
        cache: &mut SourceCache,
    ) -> Result<PageDescriptor, ScanError> {
        let text = cache.read(&file.path)?;
        let extraction = markers::page_markers().extract(text);

        let dir = file.dir();
        let loading = has_sibling(dir, &self.conventions.loading_files);
        let error = has_sibling(dir, &self.conventions.error_files);

        Ok(page_descriptor(file, &extraction, loading, error))
    }

    /// Build one descriptor per handled verb of an API route file.
    pub fn build_api(
        &self,
        file: &RouteFile,
        cache: &mut SourceCache,
    ) -> Result<Vec<ApiRouteDescriptor>, ScanError> {
        let text = cache.read(&file.path)?;
        let extraction = markers::api_markers().extract(text);
        Ok(api_descriptors(file, &extraction))
    }
}

fn has_sibling(dir: &Path, names: &[String]) -> bool {
    names.iter().any(|name| dir.join(name).is_file())
}

fn page_descriptor(
    file: &RouteFile,
    extraction: &Extraction,
    loading: bool,
    error: bool,
) -> PageDescriptor {
    let mode = if extraction.has(Field::ClientDirective) {
        ExecutionMode::Client
    } else {
        ExecutionMode::Server
    };

    let metadata = match extraction.get(Field::Metadata) {
        Some(markers::METADATA_GENERATOR) => MetadataKind::Generator,
        Some(_) => MetadataKind::Static,
        None => MetadataKind::None,
    };

    PageDescriptor {
        function: extraction.text(Field::DefaultExport),
        route: file.route.assemble(),
        mode,
        metadata,
        server_action: extraction.has(Field::ServerAction),
        dynamic: extraction.text(Field::Dynamic),
        revalidate: extraction
            .get(Field::Revalidate)
            .and_then(|v| v.parse::<u64>().ok()),
        fetch_cache: extraction.text(Field::FetchCache),
        parallel: file.route.is_parallel(),
        intercepting: file.route.is_intercepting(),
        loading,
        error,
        source: file.path.clone(),
    }
}

/// Method column values for an API file.
///
/// A destructured handler export is exclusive: it yields a single joined
/// entry and individual verbs are not looked at. A file without any known
/// verb is treated as readable and yields `GET`.
pub fn handled_methods(extraction: &Extraction) -> Vec<String> {
    if let Some(alias) = extraction.get(Field::HandlerAlias) {
        return vec![alias.to_string()];
    }

    let methods: Vec<String> = HttpMethod::ALL
        .into_iter()
        .filter(|m| extraction.has(Field::Handler(*m)))
        .map(|m| m.as_str().to_string())
        .collect();

    if methods.is_empty() {
        vec![HttpMethod::Get.as_str().to_string()]
    } else {
        methods
    }
}

fn api_descriptors(file: &RouteFile, extraction: &Extraction) -> Vec<ApiRouteDescriptor> {
    let function = extraction.text(Field::DefaultExport);
    let dir_path = file.route.assemble();
    let route = format!("{}{}", dir_path.trim_end_matches('/'), API_ROUTE_SUFFIX);

    handled_methods(extraction)
        .into_iter()
        .map(|method| ApiRouteDescriptor {
            method,
            function: function.clone(),
            route: route.clone(),
            source: file.path.clone(),
        })
        .collect()
}
