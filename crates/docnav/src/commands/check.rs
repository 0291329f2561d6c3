//! `docnav check` command implementation.

use std::fmt;

use clap::Args;
use docnav_config::{SidebarConfig, ThemeConfig};
use docnav_site::path::{decode_path, is_absolute, is_internal};
use docnav_site::sidebar::sidebar_config_for;
use docnav_site::{
    DeviceType, NavbarItem, PageData, ResolvedNavigation, Route, RouteResolver, SidebarItem,
};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

/// Navigation problem found on a page.
#[derive(Debug, PartialEq, Eq)]
enum Problem {
    /// Sidebar or navbar link to a route that does not exist.
    BrokenLink { page: String, link: String },
    /// Scoped sidebar without an entry covering the page.
    MissingSidebar { page: String },
    /// Malformed device breakpoint.
    Breakpoint(String),
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BrokenLink { page, link } => write!(f, "{page}: unresolved link {link}"),
            Self::MissingSidebar { page } => write!(f, "{page}: no sidebar config for route"),
            Self::Breakpoint(message) => write!(f, "breakpoints: {message}"),
        }
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site fails to load or problems are found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load()?;
        output.info(&format!(
            "Checking {}",
            site.config.build_resolved.manifest_path.display()
        ));

        let mut problems = Vec::new();
        if let Err(err) = site.navigator.device_width(DeviceType::Mobile) {
            problems.push(Problem::Breakpoint(err.to_string()));
        }

        for page in &site.manifest.pages {
            let route = Route::parse(&page.path);
            let navigation = site.navigator.resolve(&route, page);
            problems.extend(page_problems(
                page,
                &navigation,
                &site.config.theme,
                site.routes.as_ref(),
            ));
        }

        if problems.is_empty() {
            output.success(&format!(
                "Checked {} page(s): no problems found",
                site.manifest.pages.len()
            ));
            return Ok(());
        }

        output.warning(&format!(
            "Checked {} page(s): {} problem(s) found",
            site.manifest.pages.len(),
            problems.len()
        ));
        for problem in &problems {
            output.detail(&problem.to_string());
        }
        Err(CliError::CheckFailed(problems.len()))
    }
}

/// Problems in the resolved navigation of `page`.
fn page_problems(
    page: &PageData,
    navigation: &ResolvedNavigation,
    theme: &ThemeConfig,
    routes: &dyn RouteResolver,
) -> Vec<Problem> {
    let mut problems = Vec::new();

    let theme = theme.locale_data(&navigation.route_locale);
    let (sidebar, _) = sidebar_config_for(&page.frontmatter, &theme);
    if let SidebarConfig::Scoped(table) = sidebar {
        let decoded = decode_path(&page.path);
        if !table.keys().any(|prefix| decoded.starts_with(prefix)) {
            problems.push(Problem::MissingSidebar {
                page: page.path.clone(),
            });
        }
    }

    let mut links = Vec::new();
    sidebar_links(&navigation.sidebar_items, &mut links);
    navbar_links(&navigation.navbar_items, &mut links);
    links.sort_unstable();
    links.dedup();

    problems.extend(
        links
            .into_iter()
            .filter(|link| is_absolute(link) && is_internal(link))
            .filter(|link| !routes.has_route(&Route::parse(link).path))
            .map(|link| Problem::BrokenLink {
                page: page.path.clone(),
                link: link.to_owned(),
            }),
    );
    problems
}

fn sidebar_links<'a>(items: &'a [SidebarItem], links: &mut Vec<&'a str>) {
    for item in items {
        links.extend(item.link.as_deref());
        sidebar_links(&item.children, links);
    }
}

fn navbar_links<'a>(items: &'a [NavbarItem], links: &mut Vec<&'a str>) {
    for item in items {
        links.extend(item.link.as_deref());
        navbar_links(&item.children, links);
    }
}
