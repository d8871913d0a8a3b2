// ── Core error types ──
//
// User-facing errors from artesano-core. Consumers never see raw HTTP
// failures; the `From<artesano_api::Error>` impl translates transport and
// backend errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the catalog backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Catalog backend timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Business rules ───────────────────────────────────────────────
    /// Deleting a feedstock that products still reference. Raised before
    /// any request is sent.
    #[error(
        "Cannot delete \"{name}\": it is used in the composition of {dependents} product(s). \
         Remove this feedstock from those products first."
    )]
    FeedstockInUse { name: String, dependents: usize },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Operation rejected by the backend: {message}")]
    Rejected { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Lifecycle ────────────────────────────────────────────────────
    #[error("Catalog is not running")]
    CatalogStopped,

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    /// Rewrite a generic 404 into a `NotFound` naming the entity.
    #[must_use]
    pub fn for_entity(self, entity_type: &str, identifier: impl ToString) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                entity_type: entity_type.to_owned(),
                identifier: identifier.to_string(),
            },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<artesano_api::Error> for CoreError {
    fn from(err: artesano_api::Error) -> Self {
        match err {
            artesano_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            artesano_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            artesano_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            artesano_api::Error::Api { status, message } => match status {
                400 | 422 => CoreError::ValidationFailed { message },
                404 => CoreError::NotFound {
                    entity_type: "Resource".into(),
                    identifier: message,
                },
                409 => CoreError::Rejected { message },
                _ => CoreError::Api {
                    message,
                    status: Some(status),
                },
            },
            artesano_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    fn in_use_message_names_feedstock_and_count() {
        let msg = CoreError::FeedstockInUse {
            name: "Carvalho".into(),
            dependents: 3,
        }
        .to_string();
        assert!(msg.contains("\"Carvalho\""));
        assert!(msg.contains("3 product(s)"));
    }

    #[test]
    fn backend_404_becomes_named_not_found() {
        let err: CoreError = artesano_api::Error::Api {
            status: 404,
            message: "Not Found".into(),
        }
        .into();
        let err = err.for_entity("Feedstock", 9);
        assert_eq!(err.to_string(), "Feedstock not found: 9");
    }

    #[test]
    fn backend_400_is_validation() {
        let err: CoreError = artesano_api::Error::Api {
            status: 400,
            message: "feedstockCode is required".into(),
        }
        .into();
        assert!(matches!(err, CoreError::ValidationFailed { .. }));
    }
}
