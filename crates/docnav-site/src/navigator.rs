//! Navigation façade.
//!
//! [`Navigator`] holds the site configuration and route table, resolves the
//! complete navigation of a route in one call and keeps the latest result.
//!
//! # Thread Safety
//!
//! - Uses internal `RwLock<Option<Arc<Memo>>>` for the latest resolution
//! - Uses `AtomicBool` for memo validity tracking
//! - Owns the [`ScrollGate`] used to defer scrolling after navigation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use docnav_config::{BuildMode, Config, OrderedMap, SiteLocaleConfig, ThemeConfig};
use serde::Serialize;

use crate::device::{self, DeviceType};
use crate::error::{DeviceError, NavigationError};
use crate::language::resolve_language_dropdown;
use crate::link::ResolvedLink;
use crate::navbar::{NavbarItem, resolve_navbar_items};
use crate::navigate::{NavigateAction, navigate_action};
use crate::page::{Contributor, PageData};
use crate::page_meta;
use crate::path::{resolve_locale_path, split_suffix};
use crate::related::resolve_related_links;
use crate::routes::RouteResolver;
use crate::scroll::{ScrollGate, ScrollWaiter};
use crate::sidebar::{SidebarItem, resolve_sidebar_items, sidebar_config_for};

/// Current route.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Path without query or hash.
    pub path: String,
    /// Path with query and hash.
    pub full_path: String,
}

impl Route {
    /// Split a full path (`/guide/intro.html?tab=1#setup`) into a route.
    #[must_use]
    pub fn parse(full_path: &str) -> Self {
        let (path, _) = split_suffix(full_path);
        Self {
            path: path.to_owned(),
            full_path: full_path.to_owned(),
        }
    }
}

/// Everything the rendering layer needs to draw navigation for one route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNavigation {
    pub route_locale: String,
    pub sidebar_items: Vec<SidebarItem>,
    pub navbar_items: Vec<NavbarItem>,
    pub prev_link: Option<ResolvedLink>,
    pub next_link: Option<ResolvedLink>,
    pub last_updated: Option<String>,
    pub contributors: Option<Vec<Contributor>>,
    pub edit_link: Option<ResolvedLink>,
}

#[derive(Debug, PartialEq, Eq)]
struct MemoKey {
    full_path: String,
    route_locale: String,
    page_path: String,
}

#[derive(Debug)]
struct Memo {
    key: MemoKey,
    navigation: Arc<ResolvedNavigation>,
}

/// Resolves and memoizes navigation for routes of one site.
pub struct Navigator {
    locales: OrderedMap<SiteLocaleConfig>,
    theme: ThemeConfig,
    mode: BuildMode,
    resolver: Arc<dyn RouteResolver>,
    /// Latest resolution (atomically swappable).
    memo: RwLock<Option<Arc<Memo>>>,
    /// Memo validity flag.
    memo_valid: AtomicBool,
    scroll: ScrollGate,
}

impl Navigator {
    /// Create a navigator.
    ///
    /// # Arguments
    ///
    /// * `locales` - Site locales keyed by prefix, in display order
    /// * `theme` - Theme defaults and per-locale overrides
    /// * `mode` - Build mode (controls strictness of device breakpoints)
    /// * `resolver` - Route table
    #[must_use]
    pub fn new(
        locales: OrderedMap<SiteLocaleConfig>,
        theme: ThemeConfig,
        mode: BuildMode,
        resolver: Arc<dyn RouteResolver>,
    ) -> Self {
        Self {
            locales,
            theme,
            mode,
            resolver,
            memo: RwLock::new(None),
            memo_valid: AtomicBool::new(false),
            scroll: ScrollGate::new(),
        }
    }

    /// Create a navigator from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config, resolver: Arc<dyn RouteResolver>) -> Self {
        Self::new(
            config.site.locales.clone(),
            config.theme.clone(),
            config.build_resolved.mode,
            resolver,
        )
    }

    /// Locale prefix owning `path`.
    pub fn route_locale(&self, path: &str) -> &str {
        resolve_locale_path(self.locales.keys(), path)
    }

    /// Resolve navigation for `route` showing `page`.
    ///
    /// Repeated calls with the same route, locale and page reuse the previous
    /// result until [`invalidate`](Self::invalidate) is called.
    pub fn resolve(&self, route: &Route, page: &PageData) -> Arc<ResolvedNavigation> {
        let key = MemoKey {
            full_path: route.full_path.clone(),
            route_locale: self.route_locale(&route.path).to_owned(),
            page_path: page.path.clone(),
        };

        if self.memo_valid.load(Ordering::Acquire)
            && let Some(memo) = self.current()
            && memo.key == key
        {
            return Arc::clone(&memo.navigation);
        }

        let navigation = Arc::new(self.compute(route, &key.route_locale, page));
        tracing::debug!(
            path = %route.full_path,
            locale = %key.route_locale,
            sidebar_items = navigation.sidebar_items.len(),
            "Resolved navigation"
        );
        *self.memo.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(Memo {
            key,
            navigation: Arc::clone(&navigation),
        }));
        self.memo_valid.store(true, Ordering::Release);
        navigation
    }

    fn compute(&self, route: &Route, route_locale: &str, page: &PageData) -> ResolvedNavigation {
        let theme = self.theme.locale_data(route_locale);
        let frontmatter = &page.frontmatter;
        let resolver = self.resolver.as_ref();

        let (sidebar_config, depth) = sidebar_config_for(frontmatter, &theme);
        let sidebar_items = resolve_sidebar_items(
            sidebar_config,
            depth,
            page,
            &route.path,
            route_locale,
            resolver,
        );

        let mut navbar_items =
            resolve_navbar_items(theme.navbar.as_deref().unwrap_or_default(), resolver);
        navbar_items.extend(resolve_language_dropdown(
            &self.locales,
            &self.theme,
            route_locale,
            &route.path,
            &route.full_path,
            resolver,
        ));

        let related =
            resolve_related_links(frontmatter, &theme, &sidebar_items, &route.path, resolver);

        ResolvedNavigation {
            route_locale: route_locale.to_owned(),
            navbar_items,
            prev_link: related.prev,
            next_link: related.next,
            last_updated: page_meta::last_updated(frontmatter, &theme, page),
            contributors: page_meta::contributors(frontmatter, &theme, page).map(<[_]>::to_vec),
            edit_link: page_meta::edit_link(frontmatter, &theme, page),
            sidebar_items,
        }
    }

    fn current(&self) -> Option<Arc<Memo>> {
        self.memo
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sidebar of the most recently resolved route.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::SidebarNotProvided`] if no route has been
    /// resolved yet.
    pub fn sidebar_items(&self) -> Result<Vec<SidebarItem>, NavigationError> {
        self.current()
            .map(|memo| memo.navigation.sidebar_items.clone())
            .ok_or(NavigationError::SidebarNotProvided)
    }

    /// Mark the memo stale; the next [`resolve`](Self::resolve) recomputes.
    ///
    /// The last resolved sidebar stays readable.
    pub fn invalidate(&self) {
        self.memo_valid.store(false, Ordering::Release);
    }

    /// Decide how to follow `url` from `route`.
    ///
    /// Route pushes open the scroll gate until [`page_rendered`](Self::page_rendered).
    pub fn navigate(&self, url: &str, route: &Route) -> NavigateAction {
        let action = navigate_action(url, &route.path);
        if matches!(action, NavigateAction::Push(_)) {
            self.scroll.pending();
        }
        action
    }

    /// Signal that the page of the latest navigation has rendered.
    pub fn page_rendered(&self) {
        self.scroll.resolve();
    }

    /// Waiter for the outstanding navigation, if any.
    #[must_use]
    pub fn scroll_waiter(&self) -> Option<ScrollWaiter> {
        self.scroll.wait()
    }

    /// Configured maximum width of `device` in pixels.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed breakpoints in development builds.
    pub fn device_width(&self, device: DeviceType) -> Result<Option<u32>, DeviceError> {
        device::device_width(device, &self.theme.breakpoints, self.mode)
    }
}
