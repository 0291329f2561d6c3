//! Route table and route path normalization.
//!
//! Navigation configuration refers to pages by source path (`guide/intro.md`),
//! by route path (`/guide/intro.html`) or by directory (`/guide/`). The
//! [`RouteResolver`] trait maps any of these to the route the page is served
//! under; [`RouteTable`] is the in-memory implementation seeded from the site
//! manifest.

use std::collections::HashMap;

use crate::path::{encode_path, is_external, is_protocol_qualified, split_suffix};

/// Result of a route lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedRoute {
    /// No page is registered under the resolved path.
    pub not_found: bool,
    /// Title of the matched page.
    pub title: Option<String>,
    /// Resolved route path, with the original query and hash re-appended.
    pub path: String,
}

/// Route lookup consumed by the resolvers.
pub trait RouteResolver: Send + Sync {
    /// Resolve `path`, interpreting relative paths against `current`.
    fn resolve(&self, path: &str, current: Option<&str>) -> ResolvedRoute;

    /// Whether `path` is a registered route (exact match, no normalization).
    fn has_route(&self, path: &str) -> bool;
}

#[derive(Clone, Debug)]
struct RouteEntry {
    title: Option<String>,
}

/// In-memory route table.
///
/// Keys are route paths as served (`/`, `/guide/`, `/guide/intro.html`).
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    routes: HashMap<String, RouteEntry>,
    redirects: HashMap<String, String>,
}

impl RouteTable {
    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Map a normalized path to a registered route key.
    ///
    /// Tries the path itself, then its URI-encoded form, then redirects.
    fn lookup(&self, normalized: &str) -> String {
        if self.routes.contains_key(normalized) {
            return normalized.to_owned();
        }
        let encoded = encode_path(normalized);
        if self.routes.contains_key(&encoded) {
            return encoded;
        }
        self.redirects
            .get(normalized)
            .or_else(|| self.redirects.get(&encoded))
            .cloned()
            .unwrap_or_else(|| normalized.to_owned())
    }
}

impl RouteResolver for RouteTable {
    fn resolve(&self, path: &str, current: Option<&str>) -> ResolvedRoute {
        if path.is_empty() || is_protocol_qualified(path) || is_external(path, "/") {
            return ResolvedRoute {
                not_found: true,
                title: None,
                path: path.to_owned(),
            };
        }

        let (pathname, suffix) = split_suffix(path);
        let route_path = if pathname.is_empty() {
            // Bare `#hash` or `?query` stays on the current page.
            current.map(|c| split_suffix(c).0).unwrap_or("/").to_owned()
        } else {
            self.lookup(&normalize_route_path(pathname, current))
        };

        match self.routes.get(&route_path) {
            Some(entry) => ResolvedRoute {
                not_found: false,
                title: entry.title.clone(),
                path: format!("{route_path}{suffix}"),
            },
            None => ResolvedRoute {
                not_found: true,
                title: None,
                path: format!("{route_path}{suffix}"),
            },
        }
    }

    fn has_route(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }
}

/// Builder for [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    routes: HashMap<String, RouteEntry>,
    redirects: HashMap<String, String>,
}

impl RouteTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// # Arguments
    ///
    /// * `path` - Route path as served (e.g., "/guide/intro.html")
    /// * `title` - Page title, `None` for untitled pages
    pub fn add_route(&mut self, path: impl Into<String>, title: Option<String>) -> &mut Self {
        self.routes.insert(path.into(), RouteEntry { title });
        self
    }

    /// Register a redirect from an old path to a registered route.
    pub fn add_redirect(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.redirects.insert(from.into(), to.into());
        self
    }

    #[must_use]
    pub fn build(self) -> RouteTable {
        RouteTable {
            routes: self.routes,
            redirects: self.redirects,
        }
    }
}

/// Normalize a source or route pathname into the route path it is served as.
///
/// Relative paths resolve against the directory of `current` (or `/`).
///
/// # Examples
///
/// ```
/// use docnav_site::routes::normalize_route_path;
///
/// assert_eq!(normalize_route_path("/guide/README.md", None), "/guide/");
/// assert_eq!(normalize_route_path("/guide/intro.md", None), "/guide/intro.html");
/// assert_eq!(normalize_route_path("/guide/intro", None), "/guide/intro.html");
/// assert_eq!(normalize_route_path("setup.md", Some("/guide/intro.html")), "/guide/setup.html");
/// ```
pub fn normalize_route_path(path: &str, current: Option<&str>) -> String {
    if path.starts_with('/') {
        return infer_route_path(&collapse_segments(path));
    }
    let base = current.map_or("/", |c| split_suffix(c).0);
    let dir = base.rfind('/').map_or("", |index| &base[..=index]);
    // A current path without a leading slash is taken relative to the root.
    let joined = if dir.starts_with('/') {
        format!("{dir}{path}")
    } else {
        format!("/{dir}{path}")
    };
    infer_route_path(&collapse_segments(&joined))
}

/// Map a markdown source path to its served route path.
fn infer_route_path(path: &str) -> String {
    if path.is_empty() || path.ends_with('/') {
        return path.to_owned();
    }

    let readme_dir = path
        .strip_suffix("README.md")
        .filter(|dir| dir.is_empty() || dir.ends_with('/'));

    let mut route = if let Some(dir) = readme_dir {
        format!("{dir}index.html")
    } else if let Some(stem) = path.strip_suffix(".md") {
        format!("{stem}.html")
    } else if path.ends_with(".html") {
        path.to_owned()
    } else {
        format!("{path}.html")
    };

    if route.ends_with("/index.html") {
        route.truncate(route.len() - "index.html".len());
    }
    route
}

/// Collapse `.` and `..` segments of an absolute path.
fn collapse_segments(path: &str) -> String {
    if !path.contains("/.") {
        return path.to_owned();
    }

    let trailing = path.ends_with('/') || path.ends_with("/.") || path.ends_with("/..");
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut collapsed = format!("/{}", segments.join("/"));
    if trailing && !collapsed.ends_with('/') {
        collapsed.push('/');
    }
    collapsed
}
