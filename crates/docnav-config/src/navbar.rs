//! Navbar configuration shapes.
//!
//! Navbar entries nest at most two levels below the bar itself: a top-level
//! group may contain subgroups, and subgroups contain only links. The type
//! structure encodes that limit, so a deeper table is rejected while parsing.

use serde::{Deserialize, Deserializer};

use crate::sidebar::LinkAttrs;

/// Top-level navbar entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavbarItemConfig {
    Path(String),
    Link(NavbarLinkConfig),
    Group(NavbarGroupConfig),
}

/// Entry inside a top-level group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavbarChildConfig {
    Path(String),
    Link(NavbarLinkConfig),
    Subgroup(NavbarSubgroupConfig),
}

/// Entry inside a subgroup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavbarLeafConfig {
    Path(String),
    Link(NavbarLinkConfig),
}

/// Link entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavbarLinkConfig {
    pub text: Option<String>,
    pub link: String,
    pub attrs: LinkAttrs,
}

/// Dropdown group at the top level of the navbar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavbarGroupConfig {
    pub text: String,
    pub prefix: Option<String>,
    pub children: Vec<NavbarChildConfig>,
    pub attrs: LinkAttrs,
}

/// Group nested inside a dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavbarSubgroupConfig {
    pub text: String,
    pub prefix: Option<String>,
    pub children: Vec<NavbarLeafConfig>,
    pub attrs: LinkAttrs,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNavbarEntry {
    Path(String),
    Item(RawNavbarFields),
}

#[derive(Deserialize)]
struct RawNavbarFields {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    prefix: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNavbarEntry>>,
    #[serde(flatten)]
    attrs: LinkAttrs,
}

/// A parsed entry before the nesting depth is checked.
enum Parsed {
    Path(String),
    Link(NavbarLinkConfig),
    Group {
        text: String,
        prefix: Option<String>,
        children: Vec<RawNavbarEntry>,
        attrs: LinkAttrs,
    },
}

impl RawNavbarEntry {
    fn parse(self) -> Result<Parsed, String> {
        match self {
            Self::Path(path) => Ok(Parsed::Path(path)),
            Self::Item(fields) => {
                if let Some(children) = fields.children {
                    return Ok(Parsed::Group {
                        text: fields.text.unwrap_or_default(),
                        prefix: fields.prefix,
                        children,
                        attrs: fields.attrs,
                    });
                }
                let link = fields
                    .link
                    .ok_or_else(|| "navbar item requires `link` or `children`".to_owned())?;
                Ok(Parsed::Link(NavbarLinkConfig {
                    text: fields.text,
                    link,
                    attrs: fields.attrs,
                }))
            }
        }
    }

    fn into_leaf(self) -> Result<NavbarLeafConfig, String> {
        match self.parse()? {
            Parsed::Path(path) => Ok(NavbarLeafConfig::Path(path)),
            Parsed::Link(link) => Ok(NavbarLeafConfig::Link(link)),
            Parsed::Group { text, .. } => Err(format!(
                "navbar group `{text}` is nested too deeply (dropdowns nest at most two levels)"
            )),
        }
    }

    fn into_child(self) -> Result<NavbarChildConfig, String> {
        match self.parse()? {
            Parsed::Path(path) => Ok(NavbarChildConfig::Path(path)),
            Parsed::Link(link) => Ok(NavbarChildConfig::Link(link)),
            Parsed::Group {
                text,
                prefix,
                children,
                attrs,
            } => Ok(NavbarChildConfig::Subgroup(NavbarSubgroupConfig {
                text,
                prefix,
                children: children
                    .into_iter()
                    .map(Self::into_leaf)
                    .collect::<Result<_, _>>()?,
                attrs,
            })),
        }
    }

    fn into_item(self) -> Result<NavbarItemConfig, String> {
        match self.parse()? {
            Parsed::Path(path) => Ok(NavbarItemConfig::Path(path)),
            Parsed::Link(link) => Ok(NavbarItemConfig::Link(link)),
            Parsed::Group {
                text,
                prefix,
                children,
                attrs,
            } => Ok(NavbarItemConfig::Group(NavbarGroupConfig {
                text,
                prefix,
                children: children
                    .into_iter()
                    .map(Self::into_child)
                    .collect::<Result<_, _>>()?,
                attrs,
            })),
        }
    }
}

impl<'de> Deserialize<'de> for NavbarItemConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawNavbarEntry::deserialize(deserializer)?
            .into_item()
            .map_err(serde::de::Error::custom)
    }
}
