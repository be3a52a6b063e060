/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Application callback interface.
//!
//! This module defines the callbacks an engine invokes on the application
//! layer, following the QuickFIX pattern with async support.

use async_trait::async_trait;
use fixpoll_core::message::Message;

/// Session identifier.
///
/// The addressing handle the engine hands to the application on session
/// creation and logon. Every outbound message is addressed with it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId {
    /// BeginString (FIX version).
    pub begin_string: String,
    /// Sender CompID.
    pub sender_comp_id: String,
    /// Target CompID.
    pub target_comp_id: String,
}

impl SessionId {
    /// Creates a new session ID.
    #[must_use]
    pub fn new(
        begin_string: impl Into<String>,
        sender_comp_id: impl Into<String>,
        target_comp_id: impl Into<String>,
    ) -> Self {
        Self {
            begin_string: begin_string.into(),
            sender_comp_id: sender_comp_id.into(),
            target_comp_id: target_comp_id.into(),
        }
    }

    /// Returns the identifier as seen from the counterparty, with sender and
    /// target swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            begin_string: self.begin_string.clone(),
            sender_comp_id: self.target_comp_id.clone(),
            target_comp_id: self.sender_comp_id.clone(),
        }
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}->{}",
            self.begin_string, self.sender_comp_id, self.target_comp_id
        )
    }
}

/// Reason for rejecting an inbound message.
#[derive(Debug, Clone)]
pub struct RejectReason {
    /// Rejection reason code.
    pub code: u32,
    /// Human-readable rejection text.
    pub text: String,
}

impl RejectReason {
    /// Creates a new rejection reason.
    #[must_use]
    pub fn new(code: u32, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.text, self.code)
    }
}

/// Application callback interface.
///
/// The engine calls these from its own tasks, concurrently with whatever the
/// application does on its side. Return values other than the inbound
/// `Result`s are ignored.
#[async_trait]
pub trait Application: Send + Sync {
    /// Called when a session is created.
    async fn on_create(&self, session_id: &SessionId);

    /// Called on successful logon.
    async fn on_logon(&self, session_id: &SessionId);

    /// Called on logout.
    async fn on_logout(&self, session_id: &SessionId);

    /// Called before sending an admin message.
    ///
    /// Allows modification of outgoing admin messages (Logon, Heartbeat, etc.).
    async fn to_admin(&self, message: &mut Message, session_id: &SessionId);

    /// Called when an admin message is received.
    ///
    /// # Returns
    /// `Ok(())` to accept, `Err(RejectReason)` to reject.
    #[allow(clippy::wrong_self_convention)]
    async fn from_admin(&self, message: &Message, session_id: &SessionId)
    -> Result<(), RejectReason>;

    /// Called before sending an application message.
    async fn to_app(&self, message: &mut Message, session_id: &SessionId);

    /// Called when an application message is received.
    ///
    /// # Returns
    /// `Ok(())` to accept, `Err(RejectReason)` to reject.
    #[allow(clippy::wrong_self_convention)]
    async fn from_app(&self, message: &Message, session_id: &SessionId)
    -> Result<(), RejectReason>;
}
