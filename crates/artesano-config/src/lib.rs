//! Shared configuration for the Artesano CLI and TUI.
//!
//! TOML profiles merged with `ARTESANO_` environment variables through
//! figment, and translation to `artesano_core::CatalogConfig`. Both
//! binaries depend on this crate; the CLI layers `GlobalOpts` flag
//! overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use artesano_core::config::DEFAULT_API_URL;
use artesano_core::listing::{FEEDSTOCK_PAGE_SIZE, PRODUCT_PAGE_SIZE};
use artesano_core::{CatalogConfig, TlsVerification};

/// Profile used when neither a flag nor `default_profile` names one.
pub const DEFAULT_PROFILE: &str = "default";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' is not defined")]
    UnknownProfile { name: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some(DEFAULT_PROFILE.into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// Look up `name`, falling back to a built-in profile pointing at
    /// [`DEFAULT_API_URL`] when `name` is the default profile and the
    /// file does not define it.
    pub fn profile(&self, name: &str) -> Result<Profile, ConfigError> {
        match self.profiles.get(name) {
            Some(p) => Ok(p.clone()),
            None if name == DEFAULT_PROFILE => Ok(Profile::default()),
            None => Err(ConfigError::UnknownProfile { name: name.into() }),
        }
    }

    /// Resolve the active profile name: explicit choice, then
    /// `default_profile`, then `"default"`.
    pub fn active_profile_name(&self, explicit: Option<&str>) -> String {
        explicit
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| DEFAULT_PROFILE.into())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_feedstock_page_size")]
    pub feedstock_page_size: u32,

    #[serde(default = "default_product_page_size")]
    pub product_page_size: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            feedstock_page_size: default_feedstock_page_size(),
            product_page_size: default_product_page_size(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_feedstock_page_size() -> u32 {
    FEEDSTOCK_PAGE_SIZE
}
fn default_product_page_size() -> u32 {
    PRODUCT_PAGE_SIZE
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Backend base URL (e.g., "http://localhost:8080").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "artesano", "artesano").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("artesano");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// Environment keys nest on a double underscore:
/// `ARTESANO_DEFAULTS__TIMEOUT=5` sets `defaults.timeout`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("ARTESANO_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist or is broken.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write it to `path`, creating parents.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Resolution ──────────────────────────────────────────────────────

/// Build a `CatalogConfig` from a profile, no flag overrides.
///
/// Profile values win over `defaults`. Suitable for the TUI; the CLI
/// applies its own flags afterwards.
pub fn profile_to_catalog_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<CatalogConfig, ConfigError> {
    let base_url: url::Url = profile
        .api_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("invalid URL: {}", profile.api_url),
        })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(CatalogConfig {
        base_url,
        timeout,
        tls,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.feedstock_page_size, 10);
        assert_eq!(cfg.defaults.product_page_size, 5);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn file_profiles_are_loaded() {
        let (_dir, path) = write_config(
            r#"
default_profile = "oficina"

[defaults]
output = "json"
timeout = 12

[profiles.oficina]
api_url = "https://estoque.example.com"
insecure = true
"#,
        );

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.active_profile_name(None), "oficina");
        assert_eq!(cfg.active_profile_name(Some("other")), "other");
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");

        let profile = cfg.profile("oficina").unwrap();
        assert_eq!(profile.api_url, "https://estoque.example.com");
        assert_eq!(profile.insecure, Some(true));
    }

    #[test]
    fn unknown_profile_is_an_error_but_default_is_builtin() {
        let cfg = Config::default();
        assert_eq!(cfg.profile("default").unwrap().api_url, DEFAULT_API_URL);
        assert!(matches!(
            cfg.profile("galpao"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn malformed_file_is_reported() {
        let (_dir, path) = write_config("defaults = 3");
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "loja".into(),
            Profile {
                api_url: "http://10.0.0.5:8080".into(),
                timeout: Some(5),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let loja = loaded.profile("loja").unwrap();
        assert_eq!(loja.api_url, "http://10.0.0.5:8080");
        assert_eq!(loja.timeout, Some(5));
    }

    #[test]
    fn profile_resolves_to_catalog_config() {
        let defaults = Defaults::default();
        let profile = Profile {
            api_url: "http://localhost:9090".into(),
            ca_cert: Some(PathBuf::from("/etc/ssl/loja.pem")),
            ..Profile::default()
        };

        let config = profile_to_catalog_config(&profile, &defaults).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:9090/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(
            config.tls,
            TlsVerification::CustomCa(PathBuf::from("/etc/ssl/loja.pem"))
        );
    }

    #[test]
    fn insecure_default_applies_unless_profile_overrides() {
        let defaults = Defaults {
            insecure: true,
            ..Defaults::default()
        };
        let inherits = Profile::default();
        let overrides = Profile {
            insecure: Some(false),
            ..Profile::default()
        };

        assert_eq!(
            profile_to_catalog_config(&inherits, &defaults).unwrap().tls,
            TlsVerification::DangerAcceptInvalid
        );
        assert_eq!(
            profile_to_catalog_config(&overrides, &defaults).unwrap().tls,
            TlsVerification::SystemDefaults
        );
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let profile = Profile {
            api_url: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_catalog_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "api_url"));
    }
}
