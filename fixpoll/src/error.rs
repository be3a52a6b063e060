/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Error types for the client application layer.

use crate::config::ConfigError;
use crate::request::RequestKind;
use fixpoll_core::error::SessionError;
use thiserror::Error;

/// Result type alias using [`ClientError`] as the error type.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors raised by the client application layer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No session has been created or logged on yet, so there is no
    /// identity to address a request with.
    #[error("no active session")]
    NoActiveSession,

    /// The engine refused or failed to transmit a request.
    #[error("failed to send {kind}: {source}")]
    Send {
        /// The request that failed.
        kind: RequestKind,
        /// The engine's error.
        #[source]
        source: SessionError,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_error_display() {
        let err = ClientError::Send {
            kind: RequestKind::OrderStatusQuery,
            source: SessionError::Connection("reset by peer".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "failed to send Check Order Status: connection error: reset by peer"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ClientError = ConfigError::InvalidCompId {
            name: "FIX_SENDER".to_string(),
            value: String::new(),
        }
        .into();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
