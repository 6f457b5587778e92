//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so bare `$VAR` is kept as-is.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Unset variable encountered during expansion.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_with_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("READMES_UNSET_EXPAND_TEST");
        }
        let result = expand_env("${READMES_UNSET_EXPAND_TEST:-/chrome}", "assets.base_url").unwrap();
        assert_eq!(result, "/chrome");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("READMES_HOST_EXPAND_TEST", "cdn.example.com");
        }
        let result = expand_env("https://${READMES_HOST_EXPAND_TEST}/chrome", "assets.base_url")
            .unwrap();
        assert_eq!(result, "https://cdn.example.com/chrome");
        unsafe {
            std::env::remove_var("READMES_HOST_EXPAND_TEST");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("READMES_MISSING_EXPAND_TEST");
        }
        let err = expand_env("${READMES_MISSING_EXPAND_TEST}", "repository.root").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("READMES_MISSING_EXPAND_TEST"));
        assert!(err.to_string().contains("repository.root"));
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        assert_eq!(expand_env("/srv/$repo", "repository.root").unwrap(), "/srv/$repo");
    }
}
