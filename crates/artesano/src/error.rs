//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and a stable exit code each.

use miette::Diagnostic;
use thiserror::Error;

use artesano_config::ConfigError;
use artesano_core::CoreError;
use artesano_core::guard::DELETE_FAILED_MESSAGE;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the catalog backend at {url}")]
    #[diagnostic(
        code(artesano::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Reason: {reason}\n\
             Point at another backend with --api-url or: artesano config set api_url <URL>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(artesano::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(artesano::not_found),
        help("Run: artesano {list_command} to see available records")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    #[error("Cannot delete \"{name}\": it is used in the composition of {dependents} product(s)")]
    #[diagnostic(
        code(artesano::feedstock_in_use),
        help(
            "Remove this feedstock from those products first.\n\
             See which ones with: artesano feedstocks get <ID>"
        )
    )]
    FeedstockInUse { name: String, dependents: usize },

    #[error("The backend rejected the request: {message}")]
    #[diagnostic(
        code(artesano::rejected),
        help("The code may already be registered. Pick another code and retry.")
    )]
    Rejected { message: String },

    #[error("{}", DELETE_FAILED_MESSAGE)]
    #[diagnostic(code(artesano::delete_failed), help("{reason}"))]
    DeleteFailed { reason: String },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(artesano::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(artesano::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(artesano::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: artesano config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(artesano::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(artesano::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render {format} output: {reason}")]
    #[diagnostic(code(artesano::render))]
    Render { format: String, reason: String },
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(see: artesano config profiles)".into(),
            },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::FeedstockInUse { .. } | Self::Rejected { .. } => exit_code::CONFLICT,
            Self::Validation { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                list_command: format!("{}s list", entity_type.to_lowercase()),
                resource_type: entity_type,
                identifier,
            },

            CoreError::FeedstockInUse { name, dependents } => {
                CliError::FeedstockInUse { name, dependents }
            }

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "unknown".into(), |s| s.to_string()),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::CatalogStopped => CliError::ApiError {
                code: "stopped".into(),
                message: "catalog was shut down before the request completed".into(),
            },

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}

/// Delete failures that are not a missing record, a lock, or a transport
/// problem collapse into the generic delete message.
pub fn delete_error(err: CoreError) -> CliError {
    match err {
        CoreError::Api { message, .. } | CoreError::Internal(message) => {
            CliError::DeleteFailed { reason: message }
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_use_maps_to_conflict() {
        let err = CliError::from(CoreError::FeedstockInUse {
            name: "Carvalho".into(),
            dependents: 2,
        });
        assert_eq!(err.exit_code(), exit_code::CONFLICT);
        assert!(err.to_string().contains("2 product(s)"));
    }

    #[test]
    fn not_found_points_at_list_command() {
        let err = CliError::from(CoreError::NotFound {
            entity_type: "Product".into(),
            identifier: "9".into(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(err, CliError::NotFound { ref list_command, .. } if list_command == "products list"));
    }

    #[test]
    fn server_failure_on_delete_is_generic() {
        let err = delete_error(CoreError::Api {
            message: "db down".into(),
            status: Some(500),
        });
        assert_eq!(err.to_string(), DELETE_FAILED_MESSAGE);
        assert_eq!(err.exit_code(), exit_code::GENERAL);

        let timeout = delete_error(CoreError::Timeout { timeout_secs: 5 });
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);
    }
}
