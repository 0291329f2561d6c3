//! Theme configuration.
//!
//! The `[theme]` table holds root defaults; `[theme.locales."<prefix>"]`
//! tables override them for one locale. [`ThemeConfig::locale_data`] merges
//! the two field by field, the way a locale page sees them.

use serde::Deserialize;

use crate::OrderedMap;
use crate::navbar::NavbarItemConfig;
use crate::sidebar::SidebarConfig;

/// Default sidebar heading depth.
pub const DEFAULT_SIDEBAR_DEPTH: u8 = 2;

/// Default `last_updated` format (`en-US` locale string, UTC).
pub const DEFAULT_LAST_UPDATED_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Theme values that can be set globally and per locale.
///
/// Every field is optional; `None` means "inherit" (from the root theme for
/// locale tables, or from the built-in default for the merged result).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeLocaleConfig {
    /// Sidebar configuration.
    pub sidebar: Option<SidebarConfig>,
    /// Heading depth injected into sidebars.
    pub sidebar_depth: Option<u8>,
    /// Navbar entries.
    pub navbar: Option<Vec<NavbarItemConfig>>,
    /// `false` disables automatic previous links.
    pub prev: Option<bool>,
    /// `false` disables automatic next links.
    pub next: Option<bool>,
    /// Show git contributors.
    pub contributors: Option<bool>,
    /// Show the last-updated time.
    pub last_updated: Option<bool>,
    /// chrono format string for the last-updated time.
    pub last_updated_format: Option<String>,
    /// Language dropdown label.
    pub select_language_text: Option<String>,
    /// Language dropdown accessible label.
    pub select_language_aria_label: Option<String>,
    /// This locale's display name in the language dropdown.
    pub select_language_name: Option<String>,
    /// Home page of this locale (language switch fallback).
    pub home: Option<String>,
    /// Repository holding the docs (URL or `owner/name` shorthand).
    pub docs_repo: Option<String>,
    pub docs_branch: Option<String>,
    /// Docs directory inside the repository.
    pub docs_dir: Option<String>,
    /// Show the edit link.
    pub edit_link: Option<bool>,
    /// Edit URL pattern with `:repo`, `:branch` and `:path` placeholders.
    pub edit_link_pattern: Option<String>,
}

impl ThemeLocaleConfig {
    /// Overlay `self` onto `base`: values set here win, unset values inherit.
    #[must_use]
    pub fn merged_over(&self, base: &ThemeLocaleConfig) -> ThemeLocaleConfig {
        macro_rules! pick {
            ($field:ident) => {
                self.$field.as_ref().or(base.$field.as_ref()).cloned()
            };
        }

        ThemeLocaleConfig {
            sidebar: pick!(sidebar),
            sidebar_depth: pick!(sidebar_depth),
            navbar: pick!(navbar),
            prev: pick!(prev),
            next: pick!(next),
            contributors: pick!(contributors),
            last_updated: pick!(last_updated),
            last_updated_format: pick!(last_updated_format),
            select_language_text: pick!(select_language_text),
            select_language_aria_label: pick!(select_language_aria_label),
            select_language_name: pick!(select_language_name),
            home: pick!(home),
            docs_repo: pick!(docs_repo),
            docs_branch: pick!(docs_branch),
            docs_dir: pick!(docs_dir),
            edit_link: pick!(edit_link),
            edit_link_pattern: pick!(edit_link_pattern),
        }
    }
}

/// CSS breakpoints used for device detection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Maximum viewport width treated as mobile (CSS pixel value).
    pub mobile: String,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: "719px".to_owned(),
        }
    }
}

/// `[theme]` configuration table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Root theme values.
    #[serde(flatten)]
    pub defaults: ThemeLocaleConfig,
    /// Per-locale overrides keyed by locale prefix.
    pub locales: OrderedMap<ThemeLocaleConfig>,
    /// Device breakpoints.
    pub breakpoints: Breakpoints,
}

impl ThemeConfig {
    /// Theme values as seen by pages of `route_locale`.
    #[must_use]
    pub fn locale_data(&self, route_locale: &str) -> ThemeLocaleConfig {
        match self.locales.get(route_locale) {
            Some(locale) => locale.merged_over(&self.defaults),
            None => self.defaults.clone(),
        }
    }

    /// Overrides configured for exactly `locale_path` (no root fallback).
    #[must_use]
    pub fn locale(&self, locale_path: &str) -> Option<&ThemeLocaleConfig> {
        self.locales.get(locale_path)
    }
}
