//! Page data supplied by the content pipeline.
//!
//! Pages arrive through a site manifest, a JSON or YAML document listing
//! every page with its route, title, heading outline, frontmatter and git
//! data:
//!
//! ```yaml
//! pages:
//!   - path: /guide/intro.html
//!     title: Introduction
//!     filePathRelative: guide/intro.md
//!     headings:
//!       - { level: 2, title: Setup, link: "#setup" }
//!     frontmatter:
//!       sidebarDepth: 1
//!       prev: false
//!     git:
//!       updatedTime: 1700000000000
//! redirects:
//!   /old/intro.html: /guide/intro.html
//! ```

use std::path::Path;

use docnav_config::{OrderedMap, SidebarConfig};
use serde::{Deserialize, Deserializer, Serialize};

use crate::routes::{RouteTable, RouteTableBuilder};

/// One node of a page's heading outline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct HeadingNode {
    /// Heading level (1-6).
    pub level: u8,
    pub title: String,
    /// In-page anchor (e.g., "#setup").
    pub link: String,
    #[serde(default)]
    pub children: Vec<HeadingNode>,
}

/// Git author of a page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Number of commits touching the page.
    #[serde(default)]
    pub commits: u32,
}

/// Git data of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitInfo {
    /// Last commit time in milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_time: Option<i64>,
    #[serde(default)]
    pub contributors: Option<Vec<Contributor>>,
}

/// Frontmatter override for a previous/next link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RelatedLinkConfig {
    /// Derive the link from the sidebar (`true` or unset).
    #[default]
    Auto,
    /// Suppress the link (`false`).
    Disabled,
    /// Path resolved like a sidebar entry.
    Path(String),
    /// Explicit link, optionally with text.
    Link { text: Option<String>, link: String },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRelatedLink {
    Flag(bool),
    Path(String),
    Link {
        #[serde(default)]
        text: Option<String>,
        link: String,
    },
}

impl<'de> Deserialize<'de> for RelatedLinkConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawRelatedLink::deserialize(deserializer)? {
            RawRelatedLink::Flag(true) => Self::Auto,
            RawRelatedLink::Flag(false) => Self::Disabled,
            RawRelatedLink::Path(path) => Self::Path(path),
            RawRelatedLink::Link { text, link } => Self::Link { text, link },
        })
    }
}

/// Per-page overrides of theme settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Frontmatter {
    /// Home pages never show a sidebar.
    pub home: bool,
    pub sidebar: Option<SidebarConfig>,
    pub sidebar_depth: Option<u8>,
    pub prev: RelatedLinkConfig,
    pub next: RelatedLinkConfig,
    pub contributors: Option<bool>,
    pub last_updated: Option<bool>,
    pub edit_link: Option<bool>,
}

/// Page as seen by the navigation resolvers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageData {
    /// Route path the page is served under.
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub headings: Vec<HeadingNode>,
    #[serde(default)]
    pub frontmatter: Frontmatter,
    /// Source file relative to the docs directory.
    #[serde(default)]
    pub file_path_relative: Option<String>,
    #[serde(default)]
    pub git: Option<GitInfo>,
}

/// Error type for manifest loading.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// I/O error reading the manifest.
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON parsing error.
    #[error("Invalid JSON manifest: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("Invalid YAML manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// All pages of a site.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteManifest {
    pub pages: Vec<PageData>,
    /// Old route path to current route path.
    pub redirects: OrderedMap<String>,
}

impl SiteManifest {
    /// Parse a manifest from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a manifest from YAML.
    ///
    /// Empty content returns an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, ManifestError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(trimmed)?)
    }

    /// Load a manifest file; `.yaml`/`.yml` files are YAML, anything else JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let manifest = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&content)?,
            _ => Self::from_json(&content)?,
        };
        tracing::debug!(
            path = %path.display(),
            pages = manifest.pages.len(),
            "Loaded site manifest"
        );
        Ok(manifest)
    }

    /// Page served under `route_path` (query and hash ignored).
    #[must_use]
    pub fn page(&self, route_path: &str) -> Option<&PageData> {
        let (pathname, _) = crate::path::split_suffix(route_path);
        self.pages.iter().find(|page| page.path == pathname)
    }

    /// Build the route table for all pages and redirects.
    #[must_use]
    pub fn route_table(&self) -> RouteTable {
        let mut builder = RouteTableBuilder::new();
        for page in &self.pages {
            let title = Some(page.title.clone()).filter(|t| !t.is_empty());
            builder.add_route(page.path.clone(), title);
        }
        for (from, to) in self.redirects.iter() {
            builder.add_redirect(from, to.clone());
        }
        builder.build()
    }
}
