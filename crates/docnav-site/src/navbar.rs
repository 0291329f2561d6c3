//! Navbar resolution.

use docnav_config::{
    LinkAttrs, NavbarChildConfig, NavbarItemConfig, NavbarLeafConfig, NavbarLinkConfig,
};
use serde::Serialize;

use crate::link::{auto_link, normalize_link};
use crate::path::join_prefix;
use crate::routes::RouteResolver;

/// Resolved navbar entry or dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavbarItem {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Composed prefix of a dropdown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(flatten)]
    pub attrs: LinkAttrs,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavbarItem>,
}

/// Resolve configured navbar entries from the site root.
pub fn resolve_navbar_items(
    config: &[NavbarItemConfig],
    resolver: &dyn RouteResolver,
) -> Vec<NavbarItem> {
    config
        .iter()
        .map(|item| match item {
            NavbarItemConfig::Path(path) => path_item(resolver, path, ""),
            NavbarItemConfig::Link(link) => link_item(resolver, link, ""),
            NavbarItemConfig::Group(group) => {
                let prefix = join_prefix("", group.prefix.as_deref().unwrap_or(""));
                NavbarItem {
                    text: group.text.clone(),
                    prefix: group.prefix.as_ref().map(|_| prefix.clone()),
                    attrs: group.attrs.clone(),
                    children: group
                        .children
                        .iter()
                        .map(|child| resolve_child(resolver, child, &prefix))
                        .collect(),
                    ..NavbarItem::default()
                }
            }
        })
        .collect()
}

fn resolve_child(resolver: &dyn RouteResolver, child: &NavbarChildConfig, prefix: &str) -> NavbarItem {
    match child {
        NavbarChildConfig::Path(path) => path_item(resolver, path, prefix),
        NavbarChildConfig::Link(link) => link_item(resolver, link, prefix),
        NavbarChildConfig::Subgroup(group) => {
            let sub_prefix = join_prefix(prefix, group.prefix.as_deref().unwrap_or(""));
            NavbarItem {
                text: group.text.clone(),
                prefix: group.prefix.as_ref().map(|_| sub_prefix.clone()),
                attrs: group.attrs.clone(),
                children: group
                    .children
                    .iter()
                    .map(|leaf| match leaf {
                        NavbarLeafConfig::Path(path) => path_item(resolver, path, &sub_prefix),
                        NavbarLeafConfig::Link(link) => link_item(resolver, link, &sub_prefix),
                    })
                    .collect(),
                ..NavbarItem::default()
            }
        }
    }
}

fn path_item(resolver: &dyn RouteResolver, path: &str, prefix: &str) -> NavbarItem {
    let link = auto_link(resolver, &join_prefix(prefix, path), None);
    NavbarItem {
        text: link.text,
        link: Some(link.link),
        ..NavbarItem::default()
    }
}

fn link_item(resolver: &dyn RouteResolver, config: &NavbarLinkConfig, prefix: &str) -> NavbarItem {
    let link = normalize_link(resolver, config.text.as_deref(), &config.link, prefix, None);
    NavbarItem {
        text: link.text,
        link: Some(link.link),
        attrs: config.attrs.clone(),
        ..NavbarItem::default()
    }
}
