//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` references in `value`.
///
/// Strings without `${` are returned unchanged. Bare `$VAR` is left alone so
/// paths and URLs containing a dollar sign survive.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Variable referenced without a default but missing from the environment.
struct UnsetVar(String);

/// Expand an optional string field in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("DOCNAV_TEST_REPO", "acme/docs");
        }
        let result = expand_env("${DOCNAV_TEST_REPO}", "theme.docs_repo").unwrap();
        assert_eq!(result, "acme/docs");
        unsafe {
            std::env::remove_var("DOCNAV_TEST_REPO");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_UNSET_BASE");
        }
        let result = expand_env("${DOCNAV_UNSET_BASE:-/docs/}", "site.base").unwrap();
        assert_eq!(result, "/docs/");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCNAV_MISSING_MANIFEST");
        }
        let err = expand_env("${DOCNAV_MISSING_MANIFEST}/pages.json", "build.manifest").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("DOCNAV_MISSING_MANIFEST"));
        assert!(err.to_string().contains("build.manifest"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let result = expand_env("/price/$1", "site.base").unwrap();
        assert_eq!(result, "/price/$1");
    }

    #[test]
    fn test_expand_opt_none_stays_none() {
        let mut value = None;
        expand_opt(&mut value, "theme.docs_repo").unwrap();
        assert!(value.is_none());
    }
}
