//! `docnav resolve` command implementation.

use clap::Args;
use docnav_site::Route;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Route to resolve, optionally with `?query` and `#hash`.
    path: String,

    /// Print compact JSON instead of pretty-printed JSON.
    #[arg(long)]
    compact: bool,

    #[command(flatten)]
    pub site: SiteArgs,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site fails to load or the route has no page.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let site = self.site.load()?;

        let route = Route::parse(&self.path);
        let page = site
            .manifest
            .page(&route.path)
            .ok_or_else(|| CliError::PageNotFound(route.path.clone()))?;
        let navigation = site.navigator.resolve(&route, page);

        let json = if self.compact {
            serde_json::to_string(&*navigation)?
        } else {
            serde_json::to_string_pretty(&*navigation)?
        };
        output.data(&json)?;
        Ok(())
    }
}
