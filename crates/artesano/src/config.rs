//! CLI configuration -- thin wrapper around `artesano_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--api-url, --insecure, --timeout).

use std::time::Duration;

use artesano_core::{CatalogConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use artesano_config::{
    Config, ConfigError, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    config.active_profile_name(global.profile.as_deref())
}

/// Comma-separated profile names, for help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Translate the active profile + global flags into a `CatalogConfig`.
///
/// CLI flag overrides take priority over profile values. An undefined
/// profile is only tolerated when `--api-url` supplies the backend.
pub fn resolve_catalog_config(
    global: &GlobalOpts,
    config: &Config,
) -> Result<CatalogConfig, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = match config.profile(&profile_name) {
        Ok(profile) => profile,
        Err(ConfigError::UnknownProfile { .. }) if global.api_url.is_some() => Profile::default(),
        Err(ConfigError::UnknownProfile { name }) => {
            return Err(CliError::ProfileNotFound {
                name,
                available: available_profiles(config),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let mut catalog = artesano_config::profile_to_catalog_config(&profile, &config.defaults)?;

    // 1. Backend URL (flag > env > profile)
    if let Some(ref raw) = global.api_url {
        catalog.base_url = raw.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }

    // 2. TLS verification
    if global.insecure {
        catalog.tls = TlsVerification::DangerAcceptInvalid;
    }

    // 3. Timeout
    if let Some(secs) = global.timeout {
        catalog.timeout = Duration::from_secs(secs);
    }

    Ok(catalog)
}
