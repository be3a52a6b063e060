/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the fixpoll FIX client.
//!
//! Errors are split by layer: rendering a message ([`EncodeError`]) and
//! interacting with the engine's session layer ([`SessionError`]).

use thiserror::Error;

/// Errors that occur while rendering a message in tag=value form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// A field the framing depends on is missing.
    #[error("missing required field: tag {tag}")]
    MissingRequiredField {
        /// The tag number of the missing field.
        tag: u32,
    },

    /// Field value contains the SOH delimiter.
    #[error("field value for tag {tag} contains the SOH delimiter")]
    EmbeddedDelimiter {
        /// The tag number of the field.
        tag: u32,
    },
}

/// Errors raised by the engine's session layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Session is not in the correct state for the operation.
    #[error("invalid session state: expected {expected}, current {current}")]
    InvalidState {
        /// Expected state for the operation.
        expected: String,
        /// Current session state.
        current: String,
    },

    /// The message was addressed to a session the engine does not know.
    #[error("unknown session: {session}")]
    UnknownSession {
        /// Display form of the session identifier.
        session: String,
    },

    /// Logon was rejected by counterparty.
    #[error("logon rejected: {reason}")]
    LogonRejected {
        /// Reason for rejection.
        reason: String,
    },

    /// Session configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::MissingRequiredField { tag: 35 };
        assert_eq!(err.to_string(), "missing required field: tag 35");
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::InvalidState {
            expected: "LoggedOn".to_string(),
            current: "Created".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid session state: expected LoggedOn, current Created"
        );
    }

    #[test]
    fn test_unknown_session_display() {
        let err = SessionError::UnknownSession {
            session: "FIX.4.4:A->B".to_string(),
        };
        assert_eq!(err.to_string(), "unknown session: FIX.4.4:A->B");
    }
}
