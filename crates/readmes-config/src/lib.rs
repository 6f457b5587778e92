//! Configuration management for readmes.
//!
//! Parses `readmes.toml` configuration files with serde and provides
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
//! - `repository.root`
//! - `browser.anchor`
//! - `assets.base_url`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "readmes.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override repository root.
    pub root: Option<PathBuf>,
    /// Override repository backend.
    pub backend: Option<Backend>,
    /// Override anchor selector.
    pub anchor: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Repository configuration (root is a relative string from TOML).
    repository: RepositoryConfigRaw,
    /// Browser page configuration.
    pub browser: BrowserConfig,
    /// Permissions granted to the current principal.
    pub permissions: PermissionsConfig,
    /// Static asset configuration.
    pub assets: AssetsConfig,

    /// Resolved repository configuration (set after loading).
    #[serde(skip)]
    pub repository_resolved: RepositoryConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Repository backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Plain directory tree, no revisions.
    #[default]
    Fs,
    /// Git repository, revisions via rev-parse.
    Git,
}

/// Raw repository configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RepositoryConfigRaw {
    backend: Option<Backend>,
    root: Option<String>,
}

/// Resolved repository configuration with an absolute root.
#[derive(Debug, Default)]
pub struct RepositoryConfig {
    /// Backend used to read the repository.
    pub backend: Backend,
    /// Repository root directory.
    pub root: PathBuf,
}

/// Browser page configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Node path of the element README blocks are inserted before.
    pub anchor: String,
    /// Number of leading bytes used for content sniffing.
    pub sniff_bytes: usize,
    /// Largest file, in bytes, that is rendered.
    pub max_preview_size: usize,
    /// Case-insensitive name prefix of README files.
    pub readme_prefix: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            anchor: "div#content > div#help".to_owned(),
            sniff_bytes: 4096,
            max_preview_size: 262_144,
            readme_prefix: "readme".to_owned(),
        }
    }
}

/// Permissions configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PermissionsConfig {
    /// Granted actions, e.g. `FILE_VIEW`.
    pub granted: Vec<String>,
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        Self {
            granted: vec!["BROWSER_VIEW".to_owned(), "FILE_VIEW".to_owned()],
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// URL prefix that logical asset names are resolved against.
    pub base_url: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            base_url: "/chrome".to_owned(),
        }
    }
}

impl AssetsConfig {
    /// URL of the asset with logical name `name`.
    #[must_use]
    pub fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), name)
    }
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
        /// Config field path (e.g., "`repository.root`").
        field: String,
        /// Error message (e.g., "${`REPO_ROOT`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a size field to be positive.
fn require_positive(value: usize, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `readmes.toml` in current directory and parents.
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
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(root) = &settings.root {
            self.repository_resolved.root.clone_from(root);
        }
        if let Some(backend) = settings.backend {
            self.repository_resolved.backend = backend;
        }
        if let Some(anchor) = &settings.anchor {
            self.browser.anchor.clone_from(anchor);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        Self::discover_config_from(&cwd)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
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
            repository: RepositoryConfigRaw::default(),
            browser: BrowserConfig::default(),
            permissions: PermissionsConfig::default(),
            assets: AssetsConfig::default(),
            repository_resolved: RepositoryConfig {
                backend: Backend::Fs,
                root: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.browser.anchor, "browser.anchor")?;
        require_non_empty(&self.browser.readme_prefix, "browser.readme_prefix")?;
        require_positive(self.browser.sniff_bytes, "browser.sniff_bytes")?;
        require_positive(self.browser.max_preview_size, "browser.max_preview_size")?;
        require_non_empty(&self.assets.base_url, "assets.base_url")?;
        if let Some(action) = self.permissions.granted.iter().find(|a| a.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "permissions.granted contains an empty action: {action:?}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref root) = self.repository.root {
            self.repository.root = Some(expand::expand_env(root, "repository.root")?);
        }
        self.browser.anchor = expand::expand_env(&self.browser.anchor, "browser.anchor")?;
        self.assets.base_url = expand::expand_env(&self.assets.base_url, "assets.base_url")?;
        Ok(())
    }

    /// Resolve the repository root against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.repository_resolved = RepositoryConfig {
            backend: self.repository.backend.unwrap_or_default(),
            root: config_dir.join(self.repository.root.as_deref().unwrap_or(".")),
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
        assert_eq!(config.repository_resolved.backend, Backend::Fs);
        assert_eq!(config.repository_resolved.root, PathBuf::from("/test"));
        assert_eq!(config.browser.anchor, "div#content > div#help");
        assert_eq!(config.browser.sniff_bytes, 4096);
        assert_eq!(config.browser.max_preview_size, 262_144);
        assert_eq!(config.browser.readme_prefix, "readme");
        assert_eq!(config.permissions.granted, ["BROWSER_VIEW", "FILE_VIEW"]);
        assert_eq!(config.assets.base_url, "/chrome");
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.browser.sniff_bytes, 4096);
        assert!(config.repository.backend.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[repository]
backend = "git"
root = "repo"

[browser]
anchor = "div#main"
sniff_bytes = 512
max_preview_size = 1024
readme_prefix = "about"

[permissions]
granted = ["FILE_VIEW"]

[assets]
base_url = "https://cdn.example.com/chrome/"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.repository_resolved.backend, Backend::Git);
        assert_eq!(config.repository_resolved.root, PathBuf::from("/project/repo"));
        assert_eq!(config.browser.anchor, "div#main");
        assert_eq!(config.browser.sniff_bytes, 512);
        assert_eq!(config.browser.max_preview_size, 1024);
        assert_eq!(config.browser.readme_prefix, "about");
        assert_eq!(config.permissions.granted, ["FILE_VIEW"]);
        assert_eq!(
            config.assets.url("readme/readme.js"),
            "https://cdn.example.com/chrome/readme/readme.js"
        );
    }

    #[test]
    fn test_parse_unknown_backend_fails() {
        let result: Result<Config, _> = toml::from_str("[repository]\nbackend = \"svn\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            root: Some(PathBuf::from("/other")),
            backend: Some(Backend::Git),
            anchor: None,
        });

        assert_eq!(config.repository_resolved.root, PathBuf::from("/other"));
        assert_eq!(config.repository_resolved.backend, Backend::Git);
        assert_eq!(config.browser.anchor, "div#content > div#help");
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.repository_resolved.root, PathBuf::from("/test"));
        assert_eq!(config.repository_resolved.backend, Backend::Fs);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("READMES_TEST_ROOT", "/srv/repo");
        }

        let toml = r#"
[repository]
root = "${READMES_TEST_ROOT}"

[assets]
base_url = "${READMES_TEST_UNSET_BASE:-/static}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.repository_resolved.root, PathBuf::from("/srv/repo"));
        assert_eq!(config.assets.base_url, "/static");

        unsafe {
            std::env::remove_var("READMES_TEST_ROOT");
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.browser.sniff_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("browser.sniff_bytes"));

        let mut config = Config::default();
        config.browser.anchor = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("browser.anchor"));

        let mut config = Config::default();
        config.permissions.granted.push(String::new());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readmes.toml");
        std::fs::write(&path, "[repository]\nroot = \"src\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.repository_resolved.root, dir.path().join("src"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/readmes.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readmes.toml");
        std::fs::write(&path, "[browser]\nmax_preview_size = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("browser.max_preview_size"));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("readmes.toml"), "").unwrap();

        assert_eq!(
            Config::discover_config_from(&nested),
            Some(dir.path().join("readmes.toml"))
        );
    }
}
