//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base`
//! - `theme.docs_repo` (root and per-locale)
//! - `build.manifest`

mod expand;
pub mod navbar;
mod ordered;
pub mod sidebar;
pub mod theme;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use navbar::{
    NavbarChildConfig, NavbarGroupConfig, NavbarItemConfig, NavbarLeafConfig, NavbarLinkConfig,
    NavbarSubgroupConfig,
};
pub use ordered::OrderedMap;
pub use sidebar::{
    LinkAttrs, ScopedSidebar, SidebarConfig, SidebarGroupConfig, SidebarItemConfig,
    SidebarLinkConfig,
};
pub use theme::{Breakpoints, ThemeConfig, ThemeLocaleConfig};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site manifest path.
    pub manifest: Option<PathBuf>,
    /// Override the build mode.
    pub mode: Option<BuildMode>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Manifest filename used when `build.manifest` is not set.
const DEFAULT_MANIFEST: &str = "pages.json";

/// Deepest heading level a sidebar can reach.
const MAX_SIDEBAR_DEPTH: u8 = 6;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Theme defaults and per-locale overrides.
    pub theme: ThemeConfig,
    /// Build configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Site configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL the site is served under.
    pub base: String,
    /// Locales keyed by route prefix, in configuration order.
    pub locales: OrderedMap<SiteLocaleConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base: "/".to_owned(),
            locales: OrderedMap::new(),
        }
    }
}

/// One site locale.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SiteLocaleConfig {
    /// Language tag (e.g., "en-US").
    pub lang: String,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl Default for SiteLocaleConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_owned(),
            title: None,
            description: None,
        }
    }
}

/// Build mode.
///
/// Development builds surface authoring mistakes (e.g. malformed breakpoints)
/// as errors; production builds degrade silently.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Development,
    #[default]
    Production,
}

/// Raw build configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    manifest: Option<String>,
    mode: Option<BuildMode>,
}

/// Resolved build configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Site manifest listing pages, headings and git data.
    pub manifest_path: PathBuf,
    pub mode: BuildMode,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`theme.docs_repo`").
        field: String,
        /// Error message (e.g., "${`DOCS_REPO`} not set").
        message: String,
    },
}

/// Require a path-like field to start and end with `/`.
fn require_slashed(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') || !value.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start and end with '/' (got {value:?})"
        )));
    }
    Ok(())
}

/// Require a sidebar depth to stay within heading levels.
fn require_depth(depth: Option<u8>, field: &str) -> Result<(), ConfigError> {
    match depth {
        Some(depth) if depth > MAX_SIDEBAR_DEPTH => Err(ConfigError::Validation(format!(
            "{field} cannot exceed {MAX_SIDEBAR_DEPTH}"
        ))),
        _ => Ok(()),
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from TOML text, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(manifest) = &settings.manifest {
            self.build_resolved.manifest_path.clone_from(manifest);
        }
        if let Some(mode) = settings.mode {
            self.build_resolved.mode = mode;
        }
    }

    /// Locale prefixes in configuration order.
    pub fn locale_paths(&self) -> impl Iterator<Item = &str> {
        self.site.locales.keys()
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            build_resolved: BuildConfig {
                manifest_path: base.join(DEFAULT_MANIFEST),
                mode: BuildMode::Production,
            },
            ..Self::default()
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_theme()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_slashed(&self.site.base, "site.base")?;
        for locale in self.site.locales.keys() {
            require_slashed(locale, "site.locales key")?;
        }
        Ok(())
    }

    fn validate_theme(&self) -> Result<(), ConfigError> {
        require_depth(self.theme.defaults.sidebar_depth, "theme.sidebar_depth")?;
        for (locale, overrides) in self.theme.locales.iter() {
            require_slashed(locale, "theme.locales key")?;
            require_depth(
                overrides.sidebar_depth,
                &format!("theme.locales.\"{locale}\".sidebar_depth"),
            )?;
        }
        if self.theme.breakpoints.mobile.trim().is_empty() {
            return Err(ConfigError::Validation(
                "theme.breakpoints.mobile cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;
        expand::expand_opt(&mut self.theme.defaults.docs_repo, "theme.docs_repo")?;
        for (locale, overrides) in self.theme.locales.iter_mut() {
            expand::expand_opt(
                &mut overrides.docs_repo,
                &format!("theme.locales.\"{locale}\".docs_repo"),
            )?;
        }
        expand::expand_opt(&mut self.build.manifest, "build.manifest")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build_resolved = BuildConfig {
            manifest_path: config_dir.join(self.build.manifest.as_deref().unwrap_or(DEFAULT_MANIFEST)),
            mode: self.build.mode.unwrap_or_default(),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.base, "/");
        assert!(config.site.locales.is_empty());
        assert_eq!(
            config.build_resolved.manifest_path,
            PathBuf::from("/test/pages.json")
        );
        assert_eq!(config.build_resolved.mode, BuildMode::Production);
        assert_eq!(config.theme.breakpoints.mobile, "719px");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.base, "/");
        assert!(config.theme.defaults.sidebar.is_none());
    }

    #[test]
    fn test_parse_locales_in_order() {
        let toml = r#"
[site.locales."/"]
lang = "en-US"
title = "Docs"

[site.locales."/zh/"]
lang = "zh-CN"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.locale_paths().collect::<Vec<_>>(), vec!["/", "/zh/"]);
        assert_eq!(config.site.locales.get("/zh/").unwrap().lang, "zh-CN");
        assert_eq!(
            config.site.locales.get("/").unwrap().title.as_deref(),
            Some("Docs")
        );
    }

    #[test]
    fn test_locale_lang_defaults() {
        let config: Config = toml::from_str("[site.locales.\"/\"]\n").unwrap();
        assert_eq!(config.site.locales.get("/").unwrap().lang, "en-US");
    }

    #[test]
    fn test_parse_theme_sidebar_and_navbar() {
        let toml = r#"
[theme]
sidebar_depth = 1
navbar = ["/guide/"]

[theme.sidebar]
"/guide/" = ["intro.md", "setup.md"]
"/" = "heading"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.theme.defaults.sidebar_depth, Some(1));
        assert_eq!(
            config.theme.defaults.navbar,
            Some(vec![NavbarItemConfig::Path("/guide/".to_owned())])
        );
        let Some(SidebarConfig::Scoped(table)) = &config.theme.defaults.sidebar else {
            panic!("expected scoped sidebar");
        };
        assert_eq!(table.get("/"), Some(&ScopedSidebar::Heading));
    }

    #[test]
    fn test_parse_build_mode() {
        let config: Config = toml::from_str("[build]\nmode = \"development\"\n").unwrap();
        assert_eq!(config.build.mode, Some(BuildMode::Development));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[build]
manifest = "dist/pages.yaml"
mode = "development"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.build_resolved.manifest_path,
            PathBuf::from("/project/dist/pages.yaml")
        );
        assert_eq!(config.build_resolved.mode, BuildMode::Development);
    }

    #[test]
    fn test_resolve_paths_default_manifest() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.build_resolved.manifest_path,
            PathBuf::from("/project/pages.json")
        );
    }

    #[test]
    fn test_apply_cli_settings_manifest() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            manifest: Some(PathBuf::from("/custom/pages.json")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.build_resolved.manifest_path,
            PathBuf::from("/custom/pages.json")
        );
        assert_eq!(config.build_resolved.mode, BuildMode::Production); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_mode() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            mode: Some(BuildMode::Development),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.build_resolved.mode, BuildMode::Development);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.build_resolved.manifest_path,
            PathBuf::from("/test/pages.json")
        );
    }

    #[test]
    fn test_expand_env_vars_docs_repo_and_manifest() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_CFG_REPO", "acme/handbook");
            std::env::set_var("DOCNAV_CFG_OUT", "build");
        }

        let toml = r#"
[theme]
docs_repo = "${DOCNAV_CFG_REPO}"

[theme.locales."/zh/"]
docs_repo = "${DOCNAV_CFG_REPO}-zh"

[build]
manifest = "${DOCNAV_CFG_OUT}/pages.json"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(
            config.theme.defaults.docs_repo.as_deref(),
            Some("acme/handbook")
        );
        assert_eq!(
            config.theme.locale("/zh/").unwrap().docs_repo.as_deref(),
            Some("acme/handbook-zh")
        );
        assert_eq!(config.build.manifest.as_deref(), Some("build/pages.json"));

        unsafe {
            std::env::remove_var("DOCNAV_CFG_REPO");
            std::env::remove_var("DOCNAV_CFG_OUT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_CFG_MISSING_BASE");
        }

        let toml = r#"
[site]
base = "${DOCNAV_CFG_MISSING_BASE}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("site.base"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docnav.toml");
        std::fs::write(
            &path,
            r#"
[site.locales."/"]
lang = "en-US"

[theme]
sidebar = "heading"

[build]
manifest = "pages.yaml"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.build_resolved.manifest_path, dir.path().join("pages.yaml"));
        assert_eq!(config.theme.defaults.sidebar, Some(SidebarConfig::Heading));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let err = Config::load(Some(Path::new("/nonexistent/docnav.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_base_without_trailing_slash() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base = "/docs".to_owned();
        assert_validation_error(&config, &["site.base", "/docs"]);
    }

    #[test]
    fn test_validate_locale_key_without_slashes() {
        let toml = "[site.locales.zh]\nlang = \"zh-CN\"\n";
        let config: Config = toml::from_str(toml).unwrap();
        assert_validation_error(&config, &["site.locales", "zh"]);
    }

    #[test]
    fn test_validate_sidebar_depth_too_deep() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.theme.defaults.sidebar_depth = Some(7);
        assert_validation_error(&config, &["theme.sidebar_depth", "6"]);
    }

    #[test]
    fn test_validate_locale_sidebar_depth_too_deep() {
        let toml = "[theme.locales.\"/zh/\"]\nsidebar_depth = 9\n";
        let config: Config = toml::from_str(toml).unwrap();
        assert_validation_error(&config, &["/zh/", "sidebar_depth"]);
    }

    #[test]
    fn test_validate_empty_breakpoint() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.theme.breakpoints.mobile = String::new();
        assert_validation_error(&config, &["breakpoints.mobile"]);
    }
}
