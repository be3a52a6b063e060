/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session configuration.
//!
//! This module provides configuration options for the session the initiator
//! opens on the application's behalf.

use crate::application::SessionId;
use fixpoll_core::types::CompId;
use std::time::Duration;

/// Default BeginString.
pub const DEFAULT_BEGIN_STRING: &str = "FIX.4.4";

/// Configuration for a FIX session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sender CompID (tag 49).
    pub sender_comp_id: CompId,
    /// Target CompID (tag 56).
    pub target_comp_id: CompId,
    /// FIX version BeginString (e.g., "FIX.4.4").
    pub begin_string: String,
    /// Heartbeat interval, announced in the Logon (tag 108).
    pub heartbeat_interval: Duration,
}

impl SessionConfig {
    /// Creates a new session configuration with required fields.
    ///
    /// # Arguments
    /// * `sender_comp_id` - The sender CompID
    /// * `target_comp_id` - The target CompID
    /// * `begin_string` - The FIX version string
    #[must_use]
    pub fn new(
        sender_comp_id: CompId,
        target_comp_id: CompId,
        begin_string: impl Into<String>,
    ) -> Self {
        Self {
            sender_comp_id,
            target_comp_id,
            begin_string: begin_string.into(),
            heartbeat_interval: Duration::from_secs(30),
        }
    }

    /// Sets the heartbeat interval.
    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// Returns the heartbeat interval in seconds.
    #[must_use]
    pub fn heartbeat_interval_secs(&self) -> u64 {
        self.heartbeat_interval.as_secs()
    }

    /// Returns the session identifier this configuration describes.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        SessionId::new(
            self.begin_string.as_str(),
            self.sender_comp_id.as_str(),
            self.target_comp_id.as_str(),
        )
    }
}
