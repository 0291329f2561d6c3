//! Sidebar configuration shapes.
//!
//! A sidebar value is classified once, while deserializing, into a
//! [`SidebarConfig`] variant:
//!
//! - `false` → [`SidebarConfig::Hidden`]
//! - `"heading"` → [`SidebarConfig::Heading`]
//! - an array → [`SidebarConfig::Items`]
//! - a table keyed by route prefix → [`SidebarConfig::Scoped`]
//!
//! Values that fit none of these (e.g. `true`, an unknown string) become
//! `Hidden` and log a warning rather than failing the whole config.

use serde::{Deserialize, Deserializer, Serialize};

use crate::OrderedMap;

/// Keyword selecting heading-derived sidebars.
pub const HEADING_SIDEBAR: &str = "heading";

/// Optional presentation attributes carried unchanged onto resolved links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct LinkAttrs {
    /// Accessible label.
    #[serde(default, alias = "ariaLabel", skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    /// Link target (e.g. `_blank`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Link `rel` attribute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    /// Pattern the rendering layer uses to mark the link active.
    #[serde(default, alias = "activeMatch", skip_serializing_if = "Option::is_none")]
    pub active_match: Option<String>,
}

impl LinkAttrs {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aria_label.is_none()
            && self.target.is_none()
            && self.rel.is_none()
            && self.active_match.is_none()
    }
}

/// Sidebar configuration value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SidebarConfig {
    /// Sidebar disabled.
    #[default]
    Hidden,
    /// Derive the sidebar from the current page's headings.
    Heading,
    /// Single item list, resolved under the route locale.
    Items(Vec<SidebarItemConfig>),
    /// Per-prefix sidebars; the longest matching prefix wins.
    Scoped(OrderedMap<ScopedSidebar>),
}

/// Sidebar configured for one route prefix of a [`SidebarConfig::Scoped`] table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScopedSidebar {
    Hidden,
    Heading,
    Items(Vec<SidebarItemConfig>),
}

/// One entry of a sidebar item list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SidebarItemConfig {
    /// Bare path; text comes from the page title.
    Path(String),
    /// Link entry without children.
    Link(SidebarLinkConfig),
    /// Group of nested entries.
    Group(SidebarGroupConfig),
}

/// Link entry of a sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarLinkConfig {
    pub text: Option<String>,
    pub link: Option<String>,
    pub attrs: LinkAttrs,
}

/// Group entry of a sidebar.
///
/// A group with a `prefix` and no children is a lazy group: it stands for
/// the page at its prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarGroupConfig {
    /// Group label; empty when not configured.
    pub text: String,
    pub link: Option<String>,
    /// Path prefix shared by the children.
    pub prefix: Option<String>,
    pub collapsible: Option<bool>,
    pub children: Vec<SidebarItemConfig>,
    pub attrs: LinkAttrs,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSidebar {
    Flag(bool),
    Keyword(String),
    Items(Vec<SidebarItemConfig>),
    Scoped(OrderedMap<RawScopedSidebar>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScopedSidebar {
    Flag(bool),
    Keyword(String),
    Items(Vec<SidebarItemConfig>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSidebarItem {
    Path(String),
    Item(RawSidebarFields),
}

#[derive(Deserialize)]
struct RawSidebarFields {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    collapsible: Option<bool>,
    #[serde(default)]
    children: Option<Vec<SidebarItemConfig>>,
    #[serde(flatten)]
    attrs: LinkAttrs,
}

fn keyword_is_heading(keyword: &str, context: &str) -> bool {
    if keyword == HEADING_SIDEBAR {
        return true;
    }
    tracing::warn!(value = %keyword, context, "Unknown sidebar keyword, sidebar hidden");
    false
}

impl<'de> Deserialize<'de> for SidebarConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSidebar::deserialize(deserializer)?;
        Ok(match raw {
            RawSidebar::Flag(false) => Self::Hidden,
            RawSidebar::Flag(true) => {
                tracing::warn!("`sidebar = true` is not a sidebar shape, sidebar hidden");
                Self::Hidden
            }
            RawSidebar::Keyword(keyword) => {
                if keyword_is_heading(&keyword, "sidebar") {
                    Self::Heading
                } else {
                    Self::Hidden
                }
            }
            RawSidebar::Items(items) => Self::Items(items),
            RawSidebar::Scoped(table) => Self::Scoped(
                table
                    .into_iter()
                    .map(|(prefix, value)| {
                        let scoped = ScopedSidebar::from_raw(&prefix, value);
                        (prefix, scoped)
                    })
                    .collect(),
            ),
        })
    }
}

impl ScopedSidebar {
    fn from_raw(prefix: &str, raw: RawScopedSidebar) -> Self {
        match raw {
            RawScopedSidebar::Flag(_) => Self::Hidden,
            RawScopedSidebar::Keyword(keyword) => {
                if keyword_is_heading(&keyword, prefix) {
                    Self::Heading
                } else {
                    Self::Hidden
                }
            }
            RawScopedSidebar::Items(items) => Self::Items(items),
        }
    }
}

impl<'de> Deserialize<'de> for SidebarItemConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawSidebarItem::deserialize(deserializer)? {
            RawSidebarItem::Path(path) => Ok(Self::Path(path)),
            RawSidebarItem::Item(fields) => {
                // A prefix without children is a lazy group.
                if fields.children.is_some() || fields.prefix.is_some() {
                    return Ok(Self::Group(SidebarGroupConfig {
                        text: fields.text.unwrap_or_default(),
                        link: fields.link,
                        prefix: fields.prefix,
                        collapsible: fields.collapsible,
                        children: fields.children.unwrap_or_default(),
                        attrs: fields.attrs,
                    }));
                }
                if fields.text.is_none() && fields.link.is_none() {
                    tracing::warn!("Sidebar item without `text`, `link` or `prefix` is ignored");
                }
                Ok(Self::Link(SidebarLinkConfig {
                    text: fields.text,
                    link: fields.link,
                    attrs: fields.attrs,
                }))
            }
        }
    }
}

impl SidebarItemConfig {
    /// Whether the entry carries nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Path(path) => path.is_empty(),
            Self::Link(link) => link.text.is_none() && link.link.is_none(),
            Self::Group(_) => false,
        }
    }
}
