//! Language dropdown.
//!
//! Maps the current route into every configured locale. A locale without a
//! translation of the current page links to its home page instead.

use docnav_config::{LinkAttrs, OrderedMap, SiteLocaleConfig, ThemeConfig, ThemeLocaleConfig};

use crate::navbar::NavbarItem;
use crate::routes::RouteResolver;

/// Dropdown label used when the theme sets none.
const DEFAULT_SELECT_LANGUAGE_TEXT: &str = "Languages";

/// Build the language dropdown for the route at `full_path`.
///
/// `path` is the route path without query or hash; `route_locale` is the
/// locale prefix owning it. Sites with fewer than two locales get no
/// dropdown.
pub fn resolve_language_dropdown(
    locales: &OrderedMap<SiteLocaleConfig>,
    theme: &ThemeConfig,
    route_locale: &str,
    path: &str,
    full_path: &str,
    resolver: &dyn RouteResolver,
) -> Vec<NavbarItem> {
    if locales.len() < 2 {
        return Vec::new();
    }

    let current = theme.locale_data(route_locale);
    let text = current
        .select_language_text
        .clone()
        .unwrap_or_else(|| DEFAULT_SELECT_LANGUAGE_TEXT.to_owned());
    let aria_label = current
        .select_language_aria_label
        .clone()
        .unwrap_or_else(|| text.clone());

    let children = locales
        .iter()
        .map(|(target, site_locale)| {
            let target_theme = target_theme(theme, target);
            let text = target_theme
                .and_then(|t| t.select_language_name.clone())
                .unwrap_or_else(|| site_locale.lang.clone());

            if target == route_locale {
                return NavbarItem {
                    text,
                    link: Some(full_path.to_owned()),
                    attrs: LinkAttrs {
                        active_match: Some(".".to_owned()),
                        ..LinkAttrs::default()
                    },
                    ..NavbarItem::default()
                };
            }

            let candidate = path.replacen(route_locale, target, 1);
            let link = if resolver.has_route(&candidate) {
                // Keep query and hash of the current route.
                full_path.replacen(path, &candidate, 1)
            } else {
                target_theme
                    .and_then(|t| t.home.clone())
                    .unwrap_or_else(|| target.to_owned())
            };
            NavbarItem {
                text,
                link: Some(link),
                ..NavbarItem::default()
            }
        })
        .collect();

    vec![NavbarItem {
        text,
        attrs: LinkAttrs {
            aria_label: Some(aria_label),
            ..LinkAttrs::default()
        },
        children,
        ..NavbarItem::default()
    }]
}

/// Theme values configured for exactly `locale`.
///
/// The root locale falls back to the root theme table.
fn target_theme<'a>(theme: &'a ThemeConfig, locale: &str) -> Option<&'a ThemeLocaleConfig> {
    theme
        .locale(locale)
        .or_else(|| (locale == "/").then_some(&theme.defaults))
}
