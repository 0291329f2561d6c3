//! Sidebar resolution.
//!
//! Turns a [`SidebarConfig`] into a tree of [`SidebarItem`]s bound to routes:
//!
//! - `Hidden` resolves to nothing.
//! - `Heading` derives a single root item from the current page's headings.
//! - `Items` resolves each entry under the route locale, composing group
//!   prefixes on the way down. The entry linking to the current page gets
//!   the page's headings as children.
//! - `Scoped` picks the longest configured prefix of the current path and
//!   resolves its value as above, with that prefix as base.

use std::cmp::Reverse;

use docnav_config::theme::DEFAULT_SIDEBAR_DEPTH;
use docnav_config::{
    LinkAttrs, ScopedSidebar, SidebarConfig, SidebarItemConfig, ThemeLocaleConfig,
};
use serde::Serialize;

use crate::link::{auto_link, normalize_link, resolve_link};
use crate::page::{Frontmatter, HeadingNode, PageData};
use crate::path::{decode_path, join_prefix};
use crate::routes::RouteResolver;

static HIDDEN_SIDEBAR: SidebarConfig = SidebarConfig::Hidden;
static HEADING_SIDEBAR: SidebarConfig = SidebarConfig::Heading;

/// Resolved sidebar entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarItem {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Prefix of a prefix group, composed with its parents' prefixes.
    ///
    /// Previous/next resolution compares it against the current route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,
    #[serde(flatten)]
    pub attrs: LinkAttrs,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarItem>,
}

/// Sidebar configuration and heading depth in effect for a page.
///
/// Home pages have no sidebar. Otherwise frontmatter overrides the theme,
/// and a page with neither gets a heading sidebar.
pub fn sidebar_config_for<'a>(
    frontmatter: &'a Frontmatter,
    theme: &'a ThemeLocaleConfig,
) -> (&'a SidebarConfig, u8) {
    let config = if frontmatter.home {
        &HIDDEN_SIDEBAR
    } else {
        frontmatter
            .sidebar
            .as_ref()
            .or(theme.sidebar.as_ref())
            .unwrap_or(&HEADING_SIDEBAR)
    };
    let depth = frontmatter
        .sidebar_depth
        .or(theme.sidebar_depth)
        .unwrap_or(DEFAULT_SIDEBAR_DEPTH);
    (config, depth)
}

/// Resolve `config` for the page served at `current_path`.
///
/// `locale_prefix` is the base prefix of a plain item list.
pub fn resolve_sidebar_items(
    config: &SidebarConfig,
    depth: u8,
    page: &PageData,
    current_path: &str,
    locale_prefix: &str,
    resolver: &dyn RouteResolver,
) -> Vec<SidebarItem> {
    let sidebar = ArraySidebar {
        depth,
        page,
        current_path,
        resolver,
    };
    match config {
        SidebarConfig::Hidden => Vec::new(),
        SidebarConfig::Heading => heading_sidebar(depth, page),
        SidebarConfig::Items(items) => sidebar.resolve(items, locale_prefix),
        SidebarConfig::Scoped(table) => {
            let decoded = decode_path(current_path);
            // Longest prefix first; equal lengths keep configuration order.
            let mut prefixes: Vec<(&str, &ScopedSidebar)> = table.iter().collect();
            prefixes.sort_by_key(|(prefix, _)| Reverse(prefix.len()));

            let Some((base, matched)) = prefixes
                .into_iter()
                .find(|(base, _)| decoded.starts_with(base))
            else {
                tracing::warn!(path = %decoded, "Route is missing sidebar config");
                return Vec::new();
            };

            match matched {
                ScopedSidebar::Hidden => Vec::new(),
                ScopedSidebar::Heading => heading_sidebar(depth, page),
                ScopedSidebar::Items(items) => sidebar.resolve(items, base),
            }
        }
    }
}

/// Convert headings to sidebar items, descending at most `depth` levels.
pub fn heading_items(depth: u8, headings: &[HeadingNode]) -> Vec<SidebarItem> {
    if depth == 0 {
        return Vec::new();
    }
    headings
        .iter()
        .map(|heading| SidebarItem {
            text: heading.title.clone(),
            link: Some(heading.link.clone()),
            children: heading_items(depth - 1, &heading.children),
            ..SidebarItem::default()
        })
        .collect()
}

fn heading_sidebar(depth: u8, page: &PageData) -> Vec<SidebarItem> {
    vec![SidebarItem {
        text: page.title.clone(),
        children: heading_items(depth, &page.headings),
        ..SidebarItem::default()
    }]
}

/// Resolution state shared by every level of an item list.
struct ArraySidebar<'a> {
    depth: u8,
    page: &'a PageData,
    current_path: &'a str,
    resolver: &'a dyn RouteResolver,
}

impl ArraySidebar<'_> {
    fn resolve(&self, items: &[SidebarItemConfig], prefix: &str) -> Vec<SidebarItem> {
        items
            .iter()
            .filter(|item| !item.is_empty())
            .map(|item| self.resolve_item(item, prefix))
            .collect()
    }

    fn resolve_item(&self, item: &SidebarItemConfig, prefix: &str) -> SidebarItem {
        match item {
            SidebarItemConfig::Path(path) => {
                let link = auto_link(self.resolver, &join_prefix(prefix, path), None);
                self.with_headings(SidebarItem {
                    text: link.text,
                    link: Some(link.link),
                    ..SidebarItem::default()
                })
            }
            SidebarItemConfig::Link(config) => {
                let (text, link) = match config.link.as_deref() {
                    Some(raw) => {
                        let link =
                            normalize_link(self.resolver, config.text.as_deref(), raw, prefix, None);
                        (link.text, Some(link.link))
                    }
                    None => (config.text.clone().unwrap_or_default(), None),
                };
                self.with_headings(SidebarItem {
                    text,
                    link,
                    attrs: config.attrs.clone(),
                    ..SidebarItem::default()
                })
            }
            SidebarItemConfig::Group(group) => {
                let child_prefix = join_prefix(prefix, group.prefix.as_deref().unwrap_or(""));
                SidebarItem {
                    text: group.text.clone(),
                    link: group
                        .link
                        .as_deref()
                        .map(|raw| resolve_link(self.resolver, raw, prefix)),
                    prefix: group.prefix.as_ref().map(|_| child_prefix.clone()),
                    collapsible: group.collapsible,
                    attrs: group.attrs.clone(),
                    children: self.resolve(&group.children, &child_prefix),
                }
            }
        }
    }

    /// Attach the current page's headings to the leaf linking to it.
    fn with_headings(&self, mut item: SidebarItem) -> SidebarItem {
        if item.link.as_deref() == Some(self.current_path) {
            let headings = match self.page.headings.first() {
                Some(first) if first.level == 1 => &first.children,
                _ => &self.page.headings,
            };
            item.children = heading_items(self.depth, headings);
        }
        item
    }
}
