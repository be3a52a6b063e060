/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Initiator builder for fluent configuration.
//!
//! Binds an [`Application`] to a session configuration and produces the
//! initiator that will drive it.

use crate::application::Application;
use crate::config::SessionConfig;
use crate::initiator::SimulatedInitiator;
use fixpoll_core::error::SessionError;
use std::sync::Arc;

/// Builder for configuring an initiator.
#[derive(Debug)]
pub struct InitiatorBuilder<A: Application> {
    /// Application callback handler.
    application: Option<Arc<A>>,
    /// Session configuration.
    session: Option<SessionConfig>,
}

impl<A: Application> Default for InitiatorBuilder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Application> InitiatorBuilder<A> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            application: None,
            session: None,
        }
    }

    /// Sets the application callback handler.
    #[must_use]
    pub fn with_application(mut self, application: impl Into<Arc<A>>) -> Self {
        self.application = Some(application.into());
        self
    }

    /// Sets the session configuration.
    #[must_use]
    pub fn with_session(mut self, config: SessionConfig) -> Self {
        self.session = Some(config);
        self
    }

    /// Builds an in-process initiator.
    ///
    /// # Errors
    /// Returns `SessionError::Configuration` if the application or the
    /// session configuration is missing.
    pub fn build(self) -> Result<SimulatedInitiator<A>, SessionError> {
        let application = self.application.ok_or_else(|| {
            SessionError::Configuration("an application handler is required".to_string())
        })?;
        let session = self.session.ok_or_else(|| {
            SessionError::Configuration("a session configuration is required".to_string())
        })?;
        Ok(SimulatedInitiator::new(application, session))
    }
}
