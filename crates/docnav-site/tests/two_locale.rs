//! End-to-end navigation for a site with English and Chinese locales.

use std::path::Path;
use std::sync::Arc;

use docnav_config::Config;
use docnav_site::{Navigator, Route, SiteManifest};
use pretty_assertions::assert_eq;

const CONFIG: &str = r#"
[site.locales."/"]
lang = "en-US"

[site.locales."/zh/"]
lang = "zh-CN"

[theme]
select_language_text = "Languages"
select_language_name = "English"
docs_repo = "https://gitlab.com/acme/handbook"
docs_dir = "docs"
navbar = ["/guide/", { text = "GitHub", link = "https://github.com/acme" }]

[theme.sidebar]
"/guide/" = [{ text = "Guide", prefix = "/guide/", children = ["README.md", "install.md", "deploy.md"] }]
"/zh/guide/" = [{ text = "指南", prefix = "/zh/guide/", children = ["README.md", "install.md"] }]

[theme.locales."/zh/"]
select_language_text = "选择语言"
select_language_name = "简体中文"
home = "/zh/"
navbar = ["/zh/guide/"]

[build]
manifest = "pages.json"
"#;

const MANIFEST: &str = r##"{
  "pages": [
    { "path": "/", "title": "Home", "frontmatter": { "home": true } },
    { "path": "/guide/", "title": "Guide", "filePathRelative": "guide/README.md" },
    {
      "path": "/guide/install.html",
      "title": "Install",
      "filePathRelative": "guide/install.md",
      "headings": [
        { "level": 1, "title": "Install", "link": "#install", "children": [
          { "level": 2, "title": "Linux", "link": "#linux" },
          { "level": 2, "title": "macOS", "link": "#macos" }
        ] }
      ],
      "git": { "updatedTime": 1700000000000, "contributors": [{ "name": "Ada", "commits": 4 }] }
    },
    { "path": "/guide/deploy.html", "title": "Deploy", "frontmatter": { "next": false } },
    { "path": "/zh/", "title": "首页", "frontmatter": { "home": true } },
    { "path": "/zh/guide/", "title": "指南" },
    { "path": "/zh/guide/install.html", "title": "安装" }
  ]
}"##;

fn write_fixture(dir: &Path) {
    std::fs::write(dir.join("docnav.toml"), CONFIG).unwrap();
    std::fs::write(dir.join("pages.json"), MANIFEST).unwrap();
}

fn load(dir: &Path) -> (Navigator, SiteManifest) {
    let config = Config::load(Some(&dir.join("docnav.toml")), None).unwrap();
    let manifest = SiteManifest::load(&config.build_resolved.manifest_path).unwrap();
    let navigator = Navigator::from_config(&config, Arc::new(manifest.route_table()));
    (navigator, manifest)
}

#[test]
fn test_english_install_page() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/guide/install.html#linux");
    let page = manifest.page(&route.path).unwrap();
    let nav = navigator.resolve(&route, page);

    assert_eq!(nav.route_locale, "/");

    let group = &nav.sidebar_items[0];
    assert_eq!(group.text, "Guide");
    assert_eq!(group.prefix.as_deref(), Some("/guide/"));
    let pages: Vec<_> = group.children.iter().map(|c| c.link.as_deref()).collect();
    assert_eq!(
        pages,
        vec![
            Some("/guide/"),
            Some("/guide/install.html"),
            Some("/guide/deploy.html")
        ]
    );
    // The leading level-1 heading is the page title and is skipped.
    let headings: Vec<_> = group.children[1]
        .children
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(headings, vec!["Linux", "macOS"]);

    assert_eq!(nav.prev_link.as_ref().map(|l| l.text.as_str()), Some("Guide"));
    assert_eq!(nav.next_link.as_ref().map(|l| l.text.as_str()), Some("Deploy"));

    let navbar: Vec<_> = nav.navbar_items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(navbar, vec!["Guide", "GitHub", "Languages"]);
    let languages = &nav.navbar_items[2].children;
    assert_eq!(
        languages[0].link.as_deref(),
        Some("/guide/install.html#linux")
    );
    assert_eq!(
        languages[1].link.as_deref(),
        Some("/zh/guide/install.html#linux")
    );

    assert_eq!(
        nav.edit_link.as_ref().map(|l| l.link.as_str()),
        Some("https://gitlab.com/acme/handbook/-/edit/main/docs/guide/install.md")
    );
    assert_eq!(nav.contributors.as_ref().map(Vec::len), Some(1));
    assert!(nav.last_updated.is_some());
}

#[test]
fn test_chinese_install_page() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/zh/guide/install.html");
    let page = manifest.page(&route.path).unwrap();
    let nav = navigator.resolve(&route, page);

    assert_eq!(nav.route_locale, "/zh/");
    let sidebar: Vec<_> = nav.sidebar_items[0]
        .children
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(sidebar, vec!["指南", "安装"]);

    let navbar: Vec<_> = nav.navbar_items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(navbar, vec!["指南", "选择语言"]);
    let languages = &nav.navbar_items[1].children;
    assert_eq!(languages[0].text, "English");
    assert_eq!(languages[0].link.as_deref(), Some("/guide/install.html"));
    assert_eq!(languages[1].text, "简体中文");
    assert_eq!(languages[1].attrs.active_match.as_deref(), Some("."));
}

#[test]
fn test_language_switch_falls_back_to_home() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/guide/deploy.html");
    let page = manifest.page(&route.path).unwrap();
    let nav = navigator.resolve(&route, page);

    let chinese = &nav.navbar_items[2].children[1];
    assert_eq!(chinese.link.as_deref(), Some("/zh/"));
    // `next: false` in frontmatter.
    assert_eq!(nav.next_link, None);
    assert_eq!(nav.prev_link.as_ref().map(|l| l.text.as_str()), Some("Install"));
}

#[test]
fn test_home_page_has_no_sidebar() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/");
    let nav = navigator.resolve(&route, manifest.page("/").unwrap());

    assert!(nav.sidebar_items.is_empty());
    assert_eq!(nav.prev_link, None);
    assert_eq!(nav.next_link, None);
}

#[test]
fn test_serialized_navigation_uses_camel_case() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path());
    let (navigator, manifest) = load(dir.path());

    let route = Route::parse("/guide/");
    let nav = navigator.resolve(&route, manifest.page("/guide/").unwrap());
    let json = serde_json::to_value(&*nav).unwrap();

    assert_eq!(json["routeLocale"], "/");
    assert_eq!(json["navbarItems"][2]["ariaLabel"], "Languages");
    assert_eq!(json["nextLink"]["link"], "/guide/install.html");
    assert!(json["prevLink"].is_null());
}
