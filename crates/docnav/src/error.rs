//! CLI error types.

use docnav_config::ConfigError;
use docnav_site::{DeviceError, ManifestError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Device(#[from] DeviceError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("No page in the manifest for route {0}")]
    PageNotFound(String),

    #[error("Navigation check found {0} problem(s)")]
    CheckFailed(usize),
}
