//! Configuration management using Figment
//!
//! Configuration is loaded from multiple sources with the following precedence (highest to lowest):
//! 1. Environment variables (prefix: STDRESP_, sections split on `__`)
//! 2. Current working directory: ./config.toml
//! 3. XDG config directory: ~/.config/standard-response/{service_name}/config.toml
//! 4. System directory: /etc/standard-response/{service_name}/config.toml
//! 5. Default values
//!
//! # Example
//!
//! ```toml
//! [service]
//! name = "sample-service"
//! port = 5010
//!
//! [response]
//! version = "1.0"
//!
//! [aliases]
//! default_case_convention = "camel"
//!
//! [[aliases.entries]]
//! owner = "PageInfo"
//! field = "current"
//! name = "current_page"
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::alias::{AliasContext, OwnerType};
use crate::case::CaseConvention;
use crate::error::Result;

const ENV_PREFIX: &str = "STDRESP_";
const XDG_PREFIX: &str = "standard-response";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Service configuration
    pub service: ServiceConfig,

    /// Response envelope configuration
    #[serde(default)]
    pub response: ResponseConfig,

    /// Key conversion aliases
    #[serde(default)]
    pub aliases: AliasConfig,
}

/// Service-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service name
    pub name: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level or tracing filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Environment (dev, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// Response envelope configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// API version reported in every envelope
    #[serde(default = "default_version")]
    pub version: String,

    /// Whether envelopes carry their creation timestamp
    #[serde(default = "default_true")]
    pub include_datetime: bool,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            include_datetime: true,
        }
    }
}

/// Aliases and default naming convention applied during key conversion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Convention for fields without an alias
    #[serde(default)]
    pub default_case_convention: Option<CaseConvention>,

    /// Explicit output names
    #[serde(default)]
    pub entries: Vec<AliasEntryConfig>,
}

/// One configured alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntryConfig {
    /// Owner type, written as `Kind` or `Kind<Element>`
    pub owner: OwnerType,

    /// Field name as declared on the owner
    pub field: String,

    /// Output key name
    pub name: String,
}

// Default value functions
fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "dev".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from all sources
    ///
    /// The service name is taken from the binary name.
    pub fn load() -> Result<Self> {
        let service_name = std::env::current_exe()
            .ok()
            .and_then(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| XDG_PREFIX.to_string());

        Self::load_for_service(&service_name)
    }

    /// Load configuration for a specific service name
    pub fn load_for_service(service_name: &str) -> Result<Self> {
        let config_paths = Self::find_config_paths(service_name);

        tracing::debug!("Searching for config files in order:");
        for path in &config_paths {
            tracing::debug!("  - {}", path.display());
        }

        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Lowest priority first so that higher priority files override
        for path in config_paths.iter().rev() {
            if path.exists() {
                tracing::info!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Bypasses the search directories. Environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        Ok(config)
    }

    /// Candidate config files, highest priority first
    fn find_config_paths(service_name: &str) -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        let xdg_dirs = xdg::BaseDirectories::with_prefix(XDG_PREFIX);
        let config_file_path = Path::new(service_name).join("config.toml");
        if let Some(path) = xdg_dirs.find_config_file(&config_file_path) {
            paths.push(path);
        }

        paths.push(
            PathBuf::from("/etc")
                .join(XDG_PREFIX)
                .join(service_name)
                .join("config.toml"),
        );

        paths
    }

    /// Alias context described by the `aliases` section
    #[must_use]
    pub fn alias_context(&self) -> AliasContext {
        AliasContext::from_config(&self.aliases)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: XDG_PREFIX.to_string(),
                port: default_port(),
                log_level: default_log_level(),
                environment: default_environment(),
            },
            response: ResponseConfig::default(),
            aliases: AliasConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.response.version, "1.0");
        assert!(config.response.include_datetime);
        assert!(config.aliases.entries.is_empty());
        assert_eq!(config.aliases.default_case_convention, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[service]
name = "sample-service"
port = 5010

[response]
version = "2.1"
include_datetime = false

[aliases]
default_case_convention = "camel"

[[aliases.entries]]
owner = "Items<SampleItem>"
field = "current"
name = "current_page"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.service.name, "sample-service");
        assert_eq!(config.service.port, 5010);
        assert_eq!(config.service.log_level, "info");
        assert_eq!(config.response.version, "2.1");
        assert!(!config.response.include_datetime);
        assert_eq!(config.aliases.default_case_convention, Some(CaseConvention::Camel));
        assert_eq!(config.aliases.entries.len(), 1);

        let aliases = config.alias_context();
        let owner: OwnerType = "Items<SampleItem>".parse().unwrap();
        assert_eq!(aliases.alias_for(&owner, "current"), Some("current_page"));
        assert_eq!(aliases.default_case_convention(), Some(CaseConvention::Camel));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.service.port, 8080);
        assert_eq!(config.response.version, "1.0");
    }

    #[test]
    fn test_malformed_owner_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[[aliases.entries]]
owner = "Items<"
field = "current"
name = "current_page"
"#
        )
        .unwrap();

        let error = Config::load_from(file.path()).unwrap_err();
        assert_eq!(error.code(), "CONFIG_ERROR");
    }
}
