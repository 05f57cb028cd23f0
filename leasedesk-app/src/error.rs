/// Error handling for the LeaseDesk client
///
/// This module provides the error type returned by every tenant API call
/// and the field/message pairs reported by form validation. Screens never
/// let these escape: each failure is logged with its detail and turned into
/// a generic user-facing alert.
///
/// # Example
///
/// ```
/// use leasedesk_app::error::{ClientError, ClientResult};
///
/// fn lookup(found: bool) -> ClientResult<u32> {
///     if found {
///         Ok(7)
///     } else {
///         Err(ClientError::Cancelled)
///     }
/// }
///
/// assert!(lookup(false).unwrap_err().is_cancelled());
/// ```

use serde::{Deserialize, Serialize};

/// Client result type alias
pub type ClientResult<T> = Result<T, ClientError>;

/// Unified client error type
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Connection, TLS or timeout failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("Backend returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response body did not match the tenant schema
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Request URL could not be built
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The owning screen went away before the request finished
    #[error("Request cancelled")]
    Cancelled,
}

impl ClientError {
    /// Returns true for [`ClientError::Cancelled`]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }

    /// Returns the HTTP status, if the backend answered
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

impl ValidationErrorDetail {
    /// Flattens `validator` errors into field/message pairs, sorted by field
    pub fn from_errors(errors: &validator::ValidationErrors) -> Vec<Self> {
        let mut details: Vec<ValidationErrorDetail> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        details.sort_by(|a, b| a.field.cmp(&b.field));
        details
    }
}
