//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod resolve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, ValueEnum};
use docnav_config::{BuildMode, CliSettings, Config};
use docnav_site::{Navigator, RouteTable, SiteManifest};

use crate::error::CliError;

pub(crate) use check::CheckArgs;
pub(crate) use resolve::ResolveArgs;

/// Build mode as accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum ModeArg {
    Development,
    Production,
}

impl From<ModeArg> for BuildMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Development => Self::Development,
            ModeArg::Production => Self::Production,
        }
    }
}

/// Arguments shared by commands that load a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Site manifest (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Build mode (overrides config).
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// A loaded site and a navigator over its routes.
pub(crate) struct Site {
    pub config: Config,
    pub manifest: SiteManifest,
    pub routes: Arc<RouteTable>,
    pub navigator: Navigator,
}

impl SiteArgs {
    /// Load configuration and manifest, and build the navigator.
    pub(crate) fn load(&self) -> Result<Site, CliError> {
        let cli_settings = CliSettings {
            manifest: self.manifest.clone(),
            mode: self.mode.map(BuildMode::from),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let manifest = SiteManifest::load(&config.build_resolved.manifest_path)?;
        tracing::info!(
            manifest = %config.build_resolved.manifest_path.display(),
            pages = manifest.pages.len(),
            "Loaded site manifest"
        );
        let routes = Arc::new(manifest.route_table());
        let navigator = Navigator::from_config(&config, Arc::<RouteTable>::clone(&routes));

        Ok(Site {
            config,
            manifest,
            routes,
            navigator,
        })
    }
}
