//! Previous and next page links.

use docnav_config::ThemeLocaleConfig;
use serde::Serialize;

use crate::link::{ResolvedLink, auto_link};
use crate::page::{Frontmatter, RelatedLinkConfig};
use crate::path::is_internal;
use crate::routes::RouteResolver;
use crate::sidebar::SidebarItem;

/// Direction of a related link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    fn sibling(self, index: usize) -> Option<usize> {
        match self {
            Self::Prev => index.checked_sub(1),
            Self::Next => index.checked_add(1),
        }
    }
}

/// Previous and next links of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedLinks {
    pub prev: Option<ResolvedLink>,
    pub next: Option<ResolvedLink>,
}

/// Resolve both related links of the page at `current_path`.
pub fn resolve_related_links(
    frontmatter: &Frontmatter,
    theme: &ThemeLocaleConfig,
    sidebar: &[SidebarItem],
    current_path: &str,
    resolver: &dyn RouteResolver,
) -> RelatedLinks {
    RelatedLinks {
        prev: resolve_related_link(
            &frontmatter.prev,
            theme.prev,
            sidebar,
            current_path,
            Direction::Prev,
            resolver,
        ),
        next: resolve_related_link(
            &frontmatter.next,
            theme.next,
            sidebar,
            current_path,
            Direction::Next,
            resolver,
        ),
    }
}

/// Resolve one related link.
///
/// Frontmatter wins: `false` suppresses the link and a literal link is used
/// as is. Otherwise `theme_enabled == Some(false)` suppresses it, and the
/// sibling of the current page in the sidebar is used.
pub fn resolve_related_link(
    config: &RelatedLinkConfig,
    theme_enabled: Option<bool>,
    sidebar: &[SidebarItem],
    current_path: &str,
    direction: Direction,
    resolver: &dyn RouteResolver,
) -> Option<ResolvedLink> {
    match config {
        RelatedLinkConfig::Disabled => None,
        RelatedLinkConfig::Path(path) => Some(auto_link(resolver, path, Some(current_path))),
        RelatedLinkConfig::Link { text, link } => {
            let resolved = if is_internal(link) {
                auto_link(resolver, link, Some(current_path))
            } else {
                ResolvedLink {
                    text: link.clone(),
                    link: link.clone(),
                }
            };
            Some(ResolvedLink {
                text: text
                    .clone()
                    .filter(|text| !text.is_empty())
                    .unwrap_or(resolved.text),
                link: resolved.link,
            })
        }
        RelatedLinkConfig::Auto if theme_enabled == Some(false) => None,
        RelatedLinkConfig::Auto => find_sibling(sidebar, current_path, direction, resolver),
    }
}

/// Depth-first search for the sibling of the item linking to `current_path`.
///
/// An exact link match on a level takes precedence over matches in nested
/// levels, which take precedence over a prefix group equal to the path.
fn find_sibling(
    items: &[SidebarItem],
    current_path: &str,
    direction: Direction,
    resolver: &dyn RouteResolver,
) -> Option<ResolvedLink> {
    if let Some(index) = items
        .iter()
        .position(|item| item.link.as_deref() == Some(current_path))
    {
        return candidate(items, index, direction, resolver);
    }

    for item in items {
        if let Some(found) = find_sibling(&item.children, current_path, direction, resolver) {
            return Some(found);
        }
    }

    let index = items
        .iter()
        .position(|item| item.prefix.as_deref() == Some(current_path))?;
    candidate(items, index, direction, resolver)
}

/// The neighbour of `items[index]`, if it can be linked to.
///
/// Prefix groups without a link qualify only when their prefix is a page.
/// Dead groups are skipped without searching inside them.
fn candidate(
    items: &[SidebarItem],
    index: usize,
    direction: Direction,
    resolver: &dyn RouteResolver,
) -> Option<ResolvedLink> {
    let target = items.get(direction.sibling(index)?)?;
    if let Some(link) = &target.link {
        return Some(ResolvedLink {
            text: target.text.clone(),
            link: link.clone(),
        });
    }
    let prefix = target.prefix.as_ref()?;
    if resolver.resolve(prefix, None).not_found {
        return None;
    }
    Some(ResolvedLink {
        text: target.text.clone(),
        link: prefix.clone(),
    })
}
