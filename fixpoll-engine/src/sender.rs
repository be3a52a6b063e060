/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! The engine's send primitive.

use crate::application::SessionId;
use async_trait::async_trait;
use fixpoll_core::error::SessionError;
use fixpoll_core::message::Message;
use std::sync::Arc;

/// Hands a fully built message to the engine for transmission.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `message` on the session identified by `session_id`.
    ///
    /// # Errors
    /// Returns `SessionError` if the session is unknown, not in a state that
    /// allows sending, or the transport fails.
    async fn send_to_target(
        &self,
        message: Message,
        session_id: &SessionId,
    ) -> Result<(), SessionError>;
}

#[async_trait]
impl<T: MessageSender + ?Sized> MessageSender for Arc<T> {
    async fn send_to_target(
        &self,
        message: Message,
        session_id: &SessionId,
    ) -> Result<(), SessionError> {
        (**self).send_to_target(message, session_id).await
    }
}
