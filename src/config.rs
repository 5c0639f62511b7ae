//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/tree2json/tree2json.toml`
//! 3. Local config: `<project_dir>/.tree2json.toml`
//! 4. Environment variables: `TREE2JSON_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::DuplicatePolicy;

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "TREE2JSON";

/// User agent sent when fetching listings over HTTP.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// HTTP fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

/// Raw HTTP config for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawHttpConfig {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub source: Option<String>,
    pub encoding: Option<String>,
    pub fallback_encoding: Option<String>,
    pub normalize: Option<bool>,
    pub duplicates: Option<DuplicatePolicy>,
    pub pretty: Option<bool>,
    pub http: RawHttpConfig,
}

/// Unified configuration for tree2json.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default source when none is given on the command line
    pub source: Option<String>,
    /// Source encoding label, or "auto"
    pub encoding: String,
    /// Encoding tried when "auto" input is not UTF-8
    pub fallback_encoding: String,
    /// Rewrite Windows ASCII tree art before parsing
    pub normalize: bool,
    /// Handling of repeated sibling names
    pub duplicates: DuplicatePolicy,
    /// Pretty-print JSON output
    pub pretty: bool,
    pub http: HttpConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            encoding: "auto".into(),
            fallback_encoding: "big5".into(),
            normalize: true,
            duplicates: DuplicatePolicy::Overwrite,
            pretty: true,
            http: HttpConfig::default(),
        }
    }
}

/// Get the XDG config directory for tree2json.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "tree2json").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("tree2json.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".tree2json.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            source: overlay.source.clone().or_else(|| self.source.clone()),
            encoding: overlay
                .encoding
                .clone()
                .unwrap_or_else(|| self.encoding.clone()),
            fallback_encoding: overlay
                .fallback_encoding
                .clone()
                .unwrap_or_else(|| self.fallback_encoding.clone()),
            normalize: overlay.normalize.unwrap_or(self.normalize),
            duplicates: overlay.duplicates.unwrap_or(self.duplicates),
            pretty: overlay.pretty.unwrap_or(self.pretty),
            http: HttpConfig {
                timeout_secs: overlay.http.timeout_secs.unwrap_or(self.http.timeout_secs),
                user_agent: overlay
                    .http
                    .user_agent
                    .clone()
                    .unwrap_or_else(|| self.http.user_agent.clone()),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional directory holding a local `.tree2json.toml`
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path();
        Self::load_from(global.as_deref(), project_dir, ENV_PREFIX)
    }

    /// Load settings from explicit locations.
    ///
    /// Missing files are skipped; unreadable or invalid files are errors.
    pub fn load_from(
        global_path: Option<&Path>,
        project_dir: Option<&Path>,
        env_prefix: &str,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw);
            }
        }

        // 4. Environment variables
        current = Self::apply_env_overrides(current, env_prefix)?;

        Ok(current)
    }

    /// Apply `<prefix>_*` environment variables as explicit overrides.
    ///
    /// Nested keys use `__`, e.g. `TREE2JSON_HTTP__TIMEOUT_SECS=5`.
    fn apply_env_overrides(mut settings: Self, prefix: &str) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("source") {
            settings.source = Some(val);
        }
        if let Ok(val) = config.get_string("encoding") {
            settings.encoding = val;
        }
        if let Ok(val) = config.get_string("fallback_encoding") {
            settings.fallback_encoding = val;
        }
        if let Ok(val) = config.get_bool("normalize") {
            settings.normalize = val;
        }
        if let Ok(val) = config.get_string("duplicates") {
            settings.duplicates = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("{prefix}_DUPLICATES: {e}"),
            })?;
        }
        if let Ok(val) = config.get_bool("pretty") {
            settings.pretty = val;
        }
        if let Ok(val) = config.get_int("http.timeout_secs") {
            settings.http.timeout_secs = u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("{prefix}_HTTP__TIMEOUT_SECS must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("http.user_agent") {
            settings.http.user_agent = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# tree2json configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/tree2json/tree2json.toml
#   Local:  <project_dir>/.tree2json.toml
#   Env:    TREE2JSON_* environment variables (nested keys use "__")

# Default source when none is given: file path, "-" for stdin, or http(s) URL
# source = "tree.txt"

# Source encoding: "auto" (UTF-8, else fallback_encoding) or a label
# such as "utf-8", "cp950", "big5", "shift_jis", "windows-1252"
# encoding = "auto"
# fallback_encoding = "big5"

# Rewrite Windows ASCII art (+---, \---, |   ) into Unicode connectors
# normalize = true

# Repeated sibling names: "overwrite", "merge" or "reject"
# duplicates = "overwrite"

# Pretty-print JSON output
# pretty = true

[http]
# timeout_secs = 30
# user_agent = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
