//! Route-aware navigation resolution for docnav.
//!
//! This crate provides:
//! - [`Navigator`]: resolves and memoizes the navigation of a route
//! - Resolvers for sidebars, navbars, the language dropdown and
//!   previous/next links, usable on their own
//! - [`RouteTable`]: in-memory route lookup seeded from a [`SiteManifest`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use docnav_config::Config;
//! use docnav_site::{Navigator, Route, SiteManifest};
//!
//! let config = Config::load(None, None)?;
//! let manifest = SiteManifest::load(&config.build_resolved.manifest_path)?;
//! let navigator = Navigator::from_config(&config, Arc::new(manifest.route_table()));
//!
//! let route = Route::parse("/guide/intro.html");
//! if let Some(page) = manifest.page(&route.path) {
//!     let navigation = navigator.resolve(&route, page);
//!     println!("{}", serde_json::to_string_pretty(&*navigation)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod device;
mod error;
pub mod language;
pub mod link;
pub mod navbar;
pub mod navigate;
mod navigator;
pub mod page;
pub mod page_meta;
pub mod path;
pub mod related;
pub mod routes;
pub mod scroll;
pub mod sidebar;

pub use device::DeviceType;
pub use error::{DeviceError, NavigationError};
pub use link::ResolvedLink;
pub use navbar::NavbarItem;
pub use navigate::NavigateAction;
pub use navigator::{Navigator, ResolvedNavigation, Route};
pub use page::{ManifestError, PageData, SiteManifest};
pub use routes::{ResolvedRoute, RouteResolver, RouteTable, RouteTableBuilder};
pub use sidebar::SidebarItem;
