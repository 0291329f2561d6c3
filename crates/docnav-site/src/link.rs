//! Link normalization against the route table.

use serde::Serialize;

use crate::path::{is_internal, join_prefix};
use crate::routes::RouteResolver;

/// Link with display text.
///
/// `text` is never empty: explicit text, else the page title, else the
/// literal path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub text: String,
    pub link: String,
}

/// Resolve `path` to a link labelled with the target page's title.
///
/// Unknown paths degrade to the literal path for both text and link.
pub fn auto_link(resolver: &dyn RouteResolver, path: &str, current: Option<&str>) -> ResolvedLink {
    let route = resolver.resolve(path, current);
    if route.not_found {
        return ResolvedLink {
            text: route.path.clone(),
            link: route.path,
        };
    }
    let text = route
        .title
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| route.path.clone());
    ResolvedLink {
        text,
        link: route.path,
    }
}

/// Rewrite an explicit link under `prefix`.
///
/// Only internal links go through the route table; external, protocol
/// and already-resolved links pass through verbatim.
pub fn resolve_link(resolver: &dyn RouteResolver, link: &str, prefix: &str) -> String {
    if is_internal(link) {
        auto_link(resolver, &join_prefix(prefix, link), None).link
    } else {
        link.to_owned()
    }
}

/// Normalize a link object with optional explicit text.
///
/// Explicit non-empty text wins; otherwise the text comes from the route
/// table (internal links) or the link itself.
pub fn normalize_link(
    resolver: &dyn RouteResolver,
    text: Option<&str>,
    link: &str,
    prefix: &str,
    current: Option<&str>,
) -> ResolvedLink {
    let resolved = if is_internal(link) {
        auto_link(resolver, &join_prefix(prefix, link), current)
    } else {
        ResolvedLink {
            text: link.to_owned(),
            link: link.to_owned(),
        }
    };

    match text.filter(|text| !text.is_empty()) {
        Some(text) => ResolvedLink {
            text: text.to_owned(),
            link: resolved.link,
        },
        None => resolved,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::routes::{RouteTable, RouteTableBuilder};

    fn table() -> RouteTable {
        let mut builder = RouteTableBuilder::new();
        builder
            .add_route("/guide/intro.html", Some("Introduction".to_owned()))
            .add_route("/guide/blank.html", Some(String::new()));
        builder.build()
    }

    #[test]
    fn test_auto_link_uses_page_title() {
        let link = auto_link(&table(), "/guide/intro.md", None);

        assert_eq!(
            link,
            ResolvedLink {
                text: "Introduction".to_owned(),
                link: "/guide/intro.html".to_owned(),
            }
        );
    }

    #[test]
    fn test_auto_link_unknown_path_is_literal() {
        let link = auto_link(&table(), "/guide/missing.md", None);

        assert_eq!(link.text, "/guide/missing.html");
        assert_eq!(link.link, "/guide/missing.html");
    }

    #[test]
    fn test_auto_link_empty_title_falls_back_to_path() {
        let link = auto_link(&table(), "/guide/blank.md", None);

        assert_eq!(link.text, "/guide/blank.html");
    }

    #[test]
    fn test_auto_link_relative_to_current() {
        let link = auto_link(&table(), "intro.md", Some("/guide/other.html"));

        assert_eq!(link.link, "/guide/intro.html");
    }

    #[test]
    fn test_auto_link_relative_to_unrooted_current() {
        let link = auto_link(&table(), "intro.md", Some("guide/页面.html"));

        assert_eq!(link.text, "Introduction");
        assert_eq!(link.link, "/guide/intro.html");
    }

    #[test]
    fn test_resolve_link_internal_under_prefix() {
        assert_eq!(resolve_link(&table(), "intro.md", "/guide/"), "/guide/intro.html");
    }

    #[test]
    fn test_resolve_link_external_verbatim() {
        assert_eq!(resolve_link(&table(), "https://x.com/a.md", "/guide/"), "https://x.com/a.md");
        assert_eq!(resolve_link(&table(), "mailto:a@b.c", "/guide/"), "mailto:a@b.c");
    }

    #[test]
    fn test_normalize_link_explicit_text_wins() {
        let link = normalize_link(&table(), Some("Start"), "intro.md", "/guide/", None);

        assert_eq!(link.text, "Start");
        assert_eq!(link.link, "/guide/intro.html");
    }

    #[test]
    fn test_normalize_link_external_keeps_text() {
        let link = normalize_link(&table(), Some("GitHub"), "https://github.com", "/guide/", None);

        assert_eq!(
            link,
            ResolvedLink {
                text: "GitHub".to_owned(),
                link: "https://github.com".to_owned(),
            }
        );
    }

    #[test]
    fn test_normalize_link_missing_text_uses_title() {
        let link = normalize_link(&table(), None, "/guide/intro.md", "", None);

        assert_eq!(link.text, "Introduction");
    }
}
