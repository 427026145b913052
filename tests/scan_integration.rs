//! End-to-end scans over the fixture tree in `testdata/app`.

use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use routelens::route::{discover_root, ExecutionMode, MetadataKind, ScanMode, Scanner};
use routelens::{Config, ScanResult};

fn testdata_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

fn scan_fixture() -> ScanResult {
    Scanner::new(testdata_path().join("app"))
        .run()
        .expect("fixture scan should succeed")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn test_fixture_page_routes() {
    let result = scan_fixture();
    let routes: Vec<&str> = result.pages.iter().map(|p| p.route.as_str()).collect();

    assert_eq!(
        routes,
        vec![
            "/",
            "/about",
            "/blog/[slug]",
            "/dashboard",
            "/dashboard/@modal/(.)photo",
            "/docs/[[...rest]]",
            "/shop/[...all]",
        ]
    );
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
}

#[test]
fn test_fixture_private_directories_pruned() {
    let result = scan_fixture();
    let app = testdata_path().join("app");

    for page in &result.pages {
        let rel = page.source.strip_prefix(&app).unwrap();
        assert!(
            !rel.to_string_lossy().contains("_"),
            "private page listed: {}",
            rel.display()
        );
    }
    assert!(!result.pages.iter().any(|p| p.function == "Hidden"));
    assert!(!result.pages.iter().any(|p| p.function == "AlsoHidden"));
}

#[test]
fn test_fixture_page_details() {
    let result = scan_fixture();
    let page = |route: &str| {
        result
            .pages
            .iter()
            .find(|p| p.route == route)
            .unwrap_or_else(|| panic!("missing page {}", route))
    };

    let home = page("/");
    assert_eq!(home.function, "Home");
    assert_eq!(home.mode, ExecutionMode::Server);
    assert_eq!(home.metadata, MetadataKind::Static);

    let blog = page("/blog/[slug]");
    assert_eq!(blog.function, "BlogPost");
    assert_eq!(blog.metadata, MetadataKind::Generator);
    assert_eq!(blog.revalidate, Some(3600));
    assert!(blog.loading);
    assert!(blog.error);

    let dashboard = page("/dashboard");
    assert_eq!(dashboard.mode, ExecutionMode::Client);
    assert!(!dashboard.parallel);

    let modal = page("/dashboard/@modal/(.)photo");
    assert_eq!(modal.function, "PhotoModal");
    assert!(modal.parallel);
    assert!(modal.intercepting);
    assert!(modal.server_action);
    assert_eq!(modal.mode, ExecutionMode::Server);

    let shop = page("/shop/[...all]");
    assert_eq!(shop.dynamic, "force-dynamic");
    assert_eq!(shop.fetch_cache, "force-no-store");
    assert_eq!(shop.revalidate, None);

    let about = page("/about");
    assert_eq!(about.metadata, MetadataKind::None);
    assert!(!about.loading);
    assert!(!about.error);
}

#[test]
fn test_fixture_api_routes() {
    let result = scan_fixture();
    let rows: Vec<(&str, &str)> = result
        .api_routes
        .iter()
        .map(|r| (r.method.as_str(), r.route.as_str()))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("GET | POST", "/api/auth/[...nextauth]/route"),
            ("GET", "/api/health/route"),
            ("GET", "/api/users/route"),
            ("POST", "/api/users/route"),
        ]
    );

    let health = &result.api_routes[1];
    assert_eq!(health.function, "health");
    assert!(result.api_routes[0].is_alias_group());
}

#[test]
fn test_fixture_files_scanned() {
    // Loading and error files are probed, never read
    assert_eq!(scan_fixture().files_scanned, 10);
}

#[test]
fn test_scan_is_deterministic() {
    let first = scan_fixture();
    let second = scan_fixture();
    assert_eq!(first, second);
}

#[test]
fn test_mode_api_skips_pages() {
    let result = Scanner::new(testdata_path().join("app"))
        .mode(ScanMode::Api)
        .run()
        .unwrap();
    assert!(result.pages.is_empty());
    assert_eq!(result.api_routes.len(), 4);
    assert_eq!(result.files_scanned, 3);
}

#[test]
fn test_group_only_tree_maps_to_root() {
    let temp = TempDir::new().unwrap();
    write(
        temp.path(),
        "app/(shop)/(checkout)/page.tsx",
        "export default function Checkout() {}",
    );

    let root = discover_root(temp.path()).unwrap();
    let result = Scanner::new(&root).run().unwrap();

    assert_eq!(result.pages.len(), 1);
    assert_eq!(result.pages[0].route, "/");
    assert_eq!(result.pages[0].function, "Checkout");
}

#[test]
fn test_src_app_layout() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "src/app/settings/page.jsx", "export default Settings");

    let root = discover_root(temp.path()).unwrap();
    assert_eq!(root, temp.path().join("src/app"));

    let result = Scanner::new(&root).run().unwrap();
    assert_eq!(result.pages[0].route, "/settings");
    assert_eq!(result.pages[0].function, "Settings");
}

#[test]
fn test_missing_root_is_fatal() {
    let temp = TempDir::new().unwrap();
    assert!(discover_root(temp.path()).is_err());
    assert!(Scanner::new(temp.path().join("app")).run().is_err());
}

#[test]
fn test_config_exclude_applies_to_scan() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "app/page.tsx", "export default function Home() {}");
    write(
        temp.path(),
        "app/legacy/old/page.tsx",
        "export default function Old() {}",
    );
    let config = Config::parse_str("exclude:\n  - \"legacy/**\"\n").unwrap();

    let result = Scanner::new(temp.path().join("app"))
        .conventions(config.conventions.clone())
        .exclude(config.exclude_set().unwrap())
        .run()
        .unwrap();

    let routes: Vec<&str> = result.pages.iter().map(|p| p.route.as_str()).collect();
    assert_eq!(routes, vec!["/"]);
}
