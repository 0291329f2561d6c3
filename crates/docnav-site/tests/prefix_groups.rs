//! Lazy prefix groups configured in `docnav.toml`, from parsing to
//! previous/next links.

use std::path::Path;
use std::sync::Arc;

use docnav_config::Config;
use docnav_site::{Navigator, ResolvedLink, Route, SiteManifest};
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"
[theme]
sidebar = [
  "/",
  { text = "Guide", prefix = "/guide/" },
  { text = "API", prefix = "/api/" },
  { children = ["a.md"] },
  { collapsible = true },
]
"#;

const MANIFEST: &str = r#"{
  "pages": [
    { "path": "/", "title": "Home" },
    { "path": "/guide/", "title": "Guide" },
    { "path": "/a.html", "title": "A" },
    { "path": "指南.html", "title": "Unrooted", "frontmatter": { "next": "a.md" } }
  ]
}"#;

fn load(dir: &Path) -> (Navigator, SiteManifest) {
    std::fs::write(dir.join("docnav.toml"), CONFIG).unwrap();
    std::fs::write(dir.join("pages.json"), MANIFEST).unwrap();

    let config = Config::load(Some(&dir.join("docnav.toml")), None).unwrap();
    let manifest = SiteManifest::load(&config.build_resolved.manifest_path).unwrap();
    let navigator = Navigator::from_config(&config, Arc::new(manifest.route_table()));
    (navigator, manifest)
}

fn link(text: &str, link: &str) -> Option<ResolvedLink> {
    Some(ResolvedLink {
        text: text.to_owned(),
        link: link.to_owned(),
    })
}

#[test]
fn test_lazy_group_is_next_of_home() {
    let dir = tempfile::tempdir().unwrap();
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/");
    let nav = navigator.resolve(&route, manifest.page("/").unwrap());

    let texts: Vec<_> = nav.sidebar_items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["Home", "Guide", "API", ""]);
    assert_eq!(nav.sidebar_items[1].prefix.as_deref(), Some("/guide/"));
    assert_eq!(nav.sidebar_items[1].link, None);

    assert_eq!(nav.prev_link, None);
    assert_eq!(nav.next_link, link("Guide", "/guide/"));
}

#[test]
fn test_lazy_group_page_skips_dead_group() {
    let dir = tempfile::tempdir().unwrap();
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/guide/");
    let nav = navigator.resolve(&route, manifest.page("/guide/").unwrap());

    assert_eq!(nav.prev_link, link("Home", "/"));
    // `/api/` is not a page.
    assert_eq!(nav.next_link, None);
}

#[test]
fn test_untitled_group_children_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/a.html");
    let nav = navigator.resolve(&route, manifest.page("/a.html").unwrap());

    assert_eq!(nav.sidebar_items[3].children[0].link.as_deref(), Some("/a.html"));
    assert_eq!(nav.prev_link, None);
    assert_eq!(nav.next_link, None);
}

#[test]
fn test_unrooted_page_path_resolves_relative_links() {
    let dir = tempfile::tempdir().unwrap();
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("指南.html");
    let nav = navigator.resolve(&route, manifest.page("指南.html").unwrap());

    assert_eq!(nav.next_link, link("A", "/a.html"));
}
