//! Error handling.
//!
//! This module provides the error type shared by the query, fetch and render stages.

use crate::constants::{ALERT_EMPTY_QUERY, ALERT_FETCH_FAILED, ALERT_QUERY_TOO_LONG};
use colored::*;
use std::fmt;

/// Result type alias for the lookup client.
pub type Result<T> = std::result::Result<T, LookupError>;

/// Main error type for the lookup client.
#[derive(Debug)]
pub enum LookupError {
    /// The user submitted a blank or whitespace-only query.
    EmptyQuery,

    /// Query rejected for a reason other than being empty.
    InvalidInput(String),

    /// Non-success HTTP status or transport failure.
    /// `status` is `None` when no response was received at all.
    RequestError { status: Option<u16>, reason: String },

    /// The response body is not a JSON array of term entries.
    ParseError(String),

    /// Invalid command line arguments.
    InvalidArguments(String),

    /// IO error.
    IoError(std::io::Error),

    /// TUI rendering error.
    TuiError(String),

    /// Terminal related error.
    TerminalError(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let warn_msg = match self {
            LookupError::EmptyQuery => "Empty query: enter a term to search".to_string(),
            LookupError::InvalidInput(msg) => format!("Invalid input: {}", msg),
            LookupError::RequestError {
                status: Some(code),
                reason,
            } => format!("Request failed with HTTP {}: {}", code, reason),
            LookupError::RequestError {
                status: None,
                reason,
            } => format!("Request failed: {}", reason),
            LookupError::ParseError(msg) => format!("Unexpected response body: {}", msg),
            LookupError::InvalidArguments(msg) => format!("Invalid arguments: {}", msg),
            LookupError::IoError(err) => format!("IO error: {}", err),
            LookupError::TuiError(err) => format!("TUI error: {}", err),
            LookupError::TerminalError(err) => format!(
                "Terminal error: {}\n Try running in a proper terminal.",
                err
            ),
        };
        write!(f, "{}", warn_msg.red().bold())
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::IoError(err)
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return LookupError::ParseError(err.to_string());
        }
        LookupError::RequestError {
            status: err.status().map(|s| s.as_u16()),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::ParseError(err.to_string())
    }
}

impl LookupError {
    /// Create a request error for a non-success status
    pub fn http_status(status: u16, reason: &str) -> Self {
        LookupError::RequestError {
            status: Some(status),
            reason: reason.to_string(),
        }
    }

    /// Create a request error for a failure before any response arrived
    pub fn transport(reason: &str) -> Self {
        LookupError::RequestError {
            status: None,
            reason: reason.to_string(),
        }
    }

    /// Create a terminal error with context
    pub fn terminal_error(err: &str) -> Self {
        LookupError::TerminalError(err.to_string())
    }

    /// Check if the panel stays usable after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            LookupError::EmptyQuery => true,
            LookupError::InvalidInput(_) => true,
            LookupError::RequestError { .. } => true,
            LookupError::ParseError(_) => true,
            LookupError::InvalidArguments(_) => false,
            LookupError::IoError(_) => false,
            LookupError::TuiError(_) => false,
            LookupError::TerminalError(_) => false,
        }
    }

    /// Whether this error comes from the fetch boundary
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            LookupError::RequestError { .. } | LookupError::ParseError(_)
        )
    }

    /// French alert text shown to the user, if this error is user-facing
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            LookupError::EmptyQuery => Some(ALERT_EMPTY_QUERY),
            LookupError::InvalidInput(_) => Some(ALERT_QUERY_TOO_LONG),
            LookupError::RequestError { .. } | LookupError::ParseError(_) => {
                Some(ALERT_FETCH_FAILED)
            }
            _ => None,
        }
    }
}
