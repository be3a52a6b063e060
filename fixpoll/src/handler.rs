/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Session lifecycle handling.
//!
//! [`ClientApplication`] receives the engine's callbacks, keeps track of the
//! active session identity and whether a logon has been seen, and stamps the
//! client's credentials on the outbound Logon. The state lives in a
//! [`SharedSession`] so the dispatcher can read it from its own task.

use crate::logger::EventLogger;
use async_trait::async_trait;
use fixpoll_core::field::tags;
use fixpoll_core::message::{Message, MsgType};
use fixpoll_engine::{Application, RejectReason, SessionId};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Where the session stands, as far as the callbacks have reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No callback received yet.
    #[default]
    NoSession,
    /// The engine created the session.
    Created,
    /// Logon completed.
    LoggedOn,
    /// Logout completed; the engine may log on again.
    LoggedOut,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoSession => "NoSession",
            Self::Created => "Created",
            Self::LoggedOn => "LoggedOn",
            Self::LoggedOut => "LoggedOut",
        };
        f.write_str(name)
    }
}

/// Point-in-time copy of the session state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Identity from the latest create or logon callback.
    pub session: Option<SessionId>,
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Set by the first logon. A logout leaves it set.
    pub authenticated: bool,
}

/// Session state shared between the callbacks and the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionSnapshot>>,
}

impl SharedSession {
    /// Creates state with no session and no logon.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a consistent copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.lock().clone()
    }

    /// Returns the active session identity, if any.
    #[must_use]
    pub fn session(&self) -> Option<SessionId> {
        self.inner.lock().session.clone()
    }

    /// Returns true once any logon has been observed.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.lock().authenticated
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.inner.lock().phase
    }

    fn created(&self, session_id: &SessionId) {
        let mut state = self.inner.lock();
        state.session = Some(session_id.clone());
        state.phase = SessionPhase::Created;
    }

    fn logged_on(&self, session_id: &SessionId) {
        let mut state = self.inner.lock();
        state.session = Some(session_id.clone());
        state.phase = SessionPhase::LoggedOn;
        state.authenticated = true;
    }

    // Leaves `authenticated` set.
    fn logged_out(&self) {
        self.inner.lock().phase = SessionPhase::LoggedOut;
    }
}

/// Values injected into the outbound Logon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogonCredentials {
    /// SenderSubID (tag 50), placed in the header.
    pub sender_sub_id: String,
    /// RawData (tag 96), placed in the body.
    pub password: String,
}

impl Default for LogonCredentials {
    fn default() -> Self {
        Self {
            sender_sub_id: "Test FIX".to_string(),
            password: "pass".to_string(),
        }
    }
}

/// The client's engine callback handler.
#[derive(Debug)]
pub struct ClientApplication<L> {
    shared: SharedSession,
    credentials: LogonCredentials,
    logger: L,
}

impl<L: EventLogger> ClientApplication<L> {
    /// Creates a handler writing to `logger`.
    #[must_use]
    pub fn new(credentials: LogonCredentials, logger: L) -> Self {
        Self {
            shared: SharedSession::new(),
            credentials,
            logger,
        }
    }

    /// Returns a handle on the session state this handler maintains.
    #[must_use]
    pub fn shared(&self) -> SharedSession {
        self.shared.clone()
    }

    /// Returns the credentials stamped on outbound Logons.
    #[must_use]
    pub fn credentials(&self) -> &LogonCredentials {
        &self.credentials
    }

    fn inject_credentials(&self, message: &mut Message) {
        message
            .header_mut()
            .set_str(tags::SENDER_SUB_ID, self.credentials.sender_sub_id.as_str());
        message
            .body_mut()
            .set_str(tags::RAW_DATA, self.credentials.password.as_str());
    }
}

#[async_trait]
impl<L: EventLogger> Application for ClientApplication<L> {
    async fn on_create(&self, session_id: &SessionId) {
        self.shared.created(session_id);
        self.logger
            .event(&format!("Session created. Session: {session_id}"));
    }

    async fn on_logon(&self, session_id: &SessionId) {
        self.shared.logged_on(session_id);
        self.logger
            .event(&format!("onLogon received from server. Session: {session_id}"));
    }

    async fn on_logout(&self, session_id: &SessionId) {
        self.shared.logged_out();
        self.logger
            .event(&format!("onLogout received from server. Session: {session_id}"));
    }

    async fn to_admin(&self, message: &mut Message, session_id: &SessionId) {
        if message.msg_type() == Some(MsgType::Logon) {
            debug!(session = %session_id, "adding credentials to logon");
            self.inject_credentials(message);
        }
        self.logger.event(&format!(
            "Sending Admin message to server. Session: {session_id}. Message: {message}"
        ));
    }

    async fn from_admin(
        &self,
        message: &Message,
        session_id: &SessionId,
    ) -> Result<(), RejectReason> {
        self.logger.event(&format!(
            "Received Admin message from server. Session: {session_id}. Message: {message}"
        ));
        Ok(())
    }

    async fn to_app(&self, message: &mut Message, session_id: &SessionId) {
        self.logger.event(&format!(
            "Sending Application message to server. Session: {session_id}. Message: {message}"
        ));
    }

    async fn from_app(
        &self,
        message: &Message,
        session_id: &SessionId,
    ) -> Result<(), RejectReason> {
        self.logger.event(&format!(
            "Received Application message from server. Session: {session_id}. Message: {message}"
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryLogger;

    fn handler() -> (ClientApplication<Arc<MemoryLogger>>, Arc<MemoryLogger>) {
        let logger = Arc::new(MemoryLogger::new());
        let app = ClientApplication::new(LogonCredentials::default(), Arc::clone(&logger));
        (app, logger)
    }

    fn s1() -> SessionId {
        SessionId::new("FIX.4.4", "CLIENT", "SERVER")
    }

    fn admin(msg_type: MsgType) -> Message {
        let mut msg = Message::with_msg_type(&msg_type);
        msg.header_mut().set_str(tags::BEGIN_STRING, "FIX.4.4");
        msg
    }

    #[tokio::test]
    async fn test_create_then_logon() {
        let (app, logger) = handler();
        let shared = app.shared();
        assert!(!shared.is_authenticated());
        assert_eq!(shared.phase(), SessionPhase::NoSession);

        app.on_create(&s1()).await;
        assert!(!shared.is_authenticated());
        assert_eq!(shared.phase(), SessionPhase::Created);

        app.on_logon(&s1()).await;
        let snapshot = shared.snapshot();
        assert!(snapshot.authenticated);
        assert_eq!(snapshot.session, Some(s1()));
        assert_eq!(snapshot.phase, SessionPhase::LoggedOn);
        assert_eq!(
            logger.events(),
            vec![
                "Session created. Session: FIX.4.4:CLIENT->SERVER",
                "onLogon received from server. Session: FIX.4.4:CLIENT->SERVER",
            ]
        );
    }

    #[tokio::test]
    async fn test_logout_keeps_authenticated() {
        let (app, logger) = handler();
        let shared = app.shared();
        app.on_create(&s1()).await;
        app.on_logon(&s1()).await;
        app.on_logout(&s1()).await;

        assert!(shared.is_authenticated());
        assert_eq!(shared.phase(), SessionPhase::LoggedOut);
        assert_eq!(shared.session(), Some(s1()));
        assert_eq!(
            logger.events().last().map(String::as_str),
            Some("onLogout received from server. Session: FIX.4.4:CLIENT->SERVER")
        );

        app.on_logon(&s1()).await;
        assert_eq!(shared.phase(), SessionPhase::LoggedOn);
    }

    #[tokio::test]
    async fn test_logon_overwrites_session_identity() {
        let (app, _) = handler();
        let s2 = SessionId::new("FIX.4.2", "CLIENT", "BACKUP");
        app.on_create(&s1()).await;
        app.on_logon(&s2).await;
        assert_eq!(app.shared().session(), Some(s2));
    }

    #[tokio::test]
    async fn test_credentials_only_on_logon() {
        let (app, _) = handler();

        let mut logon = admin(MsgType::Logon);
        app.to_admin(&mut logon, &s1()).await;
        assert_eq!(logon.header().get(tags::SENDER_SUB_ID), Some("Test FIX"));
        assert_eq!(logon.body().get(tags::RAW_DATA), Some("pass"));

        for msg_type in [
            MsgType::Heartbeat,
            MsgType::TestRequest,
            MsgType::Logout,
            MsgType::ResendRequest,
        ] {
            let mut msg = admin(msg_type);
            app.to_admin(&mut msg, &s1()).await;
            assert_eq!(msg.get_field(tags::SENDER_SUB_ID), None);
            assert_eq!(msg.get_field(tags::RAW_DATA), None);
        }
    }

    #[tokio::test]
    async fn test_custom_credentials() {
        let logger = Arc::new(MemoryLogger::new());
        let credentials = LogonCredentials {
            sender_sub_id: "desk-7".to_string(),
            password: "hunter2".to_string(),
        };
        let app = ClientApplication::new(credentials, logger);

        let mut logon = admin(MsgType::Logon);
        app.to_admin(&mut logon, &s1()).await;
        assert_eq!(logon.get_field(tags::SENDER_SUB_ID), Some("desk-7"));
        assert_eq!(logon.get_field(tags::RAW_DATA), Some("hunter2"));
    }

    #[tokio::test]
    async fn test_message_callbacks_log_and_accept() {
        let (app, logger) = handler();
        let mut outbound = Message::with_msg_type(&MsgType::NewOrderSingle);
        let before = outbound.clone();

        app.to_app(&mut outbound, &s1()).await;
        assert_eq!(outbound, before);
        assert!(app.from_app(&outbound, &s1()).await.is_ok());
        assert!(app.from_admin(&admin(MsgType::Heartbeat), &s1()).await.is_ok());

        let events = logger.events();
        assert_eq!(
            events[0],
            "Sending Application message to server. Session: FIX.4.4:CLIENT->SERVER. Message: 35=D|"
        );
        assert!(events[1].starts_with("Received Application message from server."));
        assert!(events[2].starts_with("Received Admin message from server."));
    }

    #[tokio::test]
    async fn test_to_admin_logs_injected_fields() {
        let (app, logger) = handler();
        let mut logon = admin(MsgType::Logon);
        app.to_admin(&mut logon, &s1()).await;
        let event = logger.events().pop().unwrap();
        assert!(event.starts_with("Sending Admin message to server."));
        assert!(event.contains("50=Test FIX|"));
        assert!(event.contains("96=pass|"));
    }
}
