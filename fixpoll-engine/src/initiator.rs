/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! In-process initiator.
//!
//! [`SimulatedInitiator`] plays the engine's role for one session without a
//! socket, a message store, or sequence recovery. It drives the
//! [`Application`] callbacks in the order a real initiator would
//! (create, outbound Logon, inbound Logon ack, logon; outbound Logout,
//! logout) and implements [`MessageSender`] so the application layer can
//! hand it outbound requests. A NewOrderSingle is answered with a New
//! ExecutionReport delivered through `from_app`.
//!
//! Outbound MsgSeqNum (34) comes from two independent counters. Logon and
//! Logout take theirs from the initiator, starting at 1. Application
//! messages keep whatever number the application stamped, which in the
//! client also starts at 1. Both streams therefore overlap on the same
//! session, e.g. the Logon and the first NewOrderSingle both carry `34=1`.
//! A real engine owns a single outbound counter and would renumber
//! application traffic; this stand-in does not.

use crate::application::{Application, SessionId};
use crate::config::SessionConfig;
use crate::sender::MessageSender;
use async_trait::async_trait;
use fixpoll_core::error::SessionError;
use fixpoll_core::field::tags;
use fixpoll_core::message::{Message, MsgType};
use fixpoll_core::types::Timestamp;
use fixpoll_tagvalue::render_packet;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Link state of the simulated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    /// Created, never logged on.
    Idle,
    /// Logon exchanged; application messages may flow.
    LoggedOn,
    /// Logout exchanged; a new `start` logs on again.
    LoggedOut,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::LoggedOn => "LoggedOn",
            Self::LoggedOut => "LoggedOut",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct Link {
    state: LinkState,
    created: bool,
    /// Sequence numbers for the admin traffic the engine originates.
    next_admin_seq: u64,
    /// Sequence numbers for the counterparty's messages.
    next_inbound_seq: u64,
    next_exec_id: u64,
}

/// In-process initiator for a single session.
#[derive(Debug)]
pub struct SimulatedInitiator<A: Application> {
    application: Arc<A>,
    config: SessionConfig,
    session_id: SessionId,
    link: Mutex<Link>,
    sent: Mutex<Vec<Message>>,
}

impl<A: Application> SimulatedInitiator<A> {
    pub(crate) fn new(application: Arc<A>, config: SessionConfig) -> Self {
        let session_id = config.session_id();
        Self {
            application,
            config,
            session_id,
            link: Mutex::new(Link {
                state: LinkState::Idle,
                created: false,
                next_admin_seq: 1,
                next_inbound_seq: 1,
                next_exec_id: 1,
            }),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Returns the identifier of the session this initiator drives.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the current link state.
    #[must_use]
    pub fn state(&self) -> LinkState {
        self.link.lock().state
    }

    /// Returns a copy of every application message accepted for sending.
    #[must_use]
    pub fn sent_messages(&self) -> Vec<Message> {
        self.sent.lock().clone()
    }

    /// Logs the session on.
    ///
    /// `on_create` fires on the first start only; later starts model a
    /// reconnect.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidState` if already logged on, or
    /// `SessionError::LogonRejected` if the application rejects the
    /// counterparty's Logon acknowledgement.
    pub async fn start(&self) -> Result<(), SessionError> {
        let first_start = {
            let mut link = self.link.lock();
            if link.state == LinkState::LoggedOn {
                return Err(invalid_state("Idle or LoggedOut", link.state));
            }
            !std::mem::replace(&mut link.created, true)
        };

        info!(session = %self.session_id, "starting simulated initiator");
        if first_start {
            self.application.on_create(&self.session_id).await;
        }

        let mut logon = self.outbound_admin(MsgType::Logon);
        logon.body_mut().set_str(tags::ENCRYPT_METHOD, "0");
        logon
            .body_mut()
            .set_uint(tags::HEART_BT_INT, self.config.heartbeat_interval_secs());
        self.application.to_admin(&mut logon, &self.session_id).await;
        trace_outbound(&logon);

        let mut ack = self.inbound(MsgType::Logon);
        ack.body_mut().set_str(tags::ENCRYPT_METHOD, "0");
        ack.body_mut()
            .set_uint(tags::HEART_BT_INT, self.config.heartbeat_interval_secs());
        if let Err(reason) = self.application.from_admin(&ack, &self.session_id).await {
            warn!(session = %self.session_id, %reason, "logon acknowledgement rejected");
            return Err(SessionError::LogonRejected {
                reason: reason.to_string(),
            });
        }

        self.link.lock().state = LinkState::LoggedOn;
        self.application.on_logon(&self.session_id).await;
        Ok(())
    }

    /// Logs the session out.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidState` if the session is not logged on.
    pub async fn stop(&self) -> Result<(), SessionError> {
        {
            let link = self.link.lock();
            if link.state != LinkState::LoggedOn {
                return Err(invalid_state("LoggedOn", link.state));
            }
        }

        let mut logout = self.outbound_admin(MsgType::Logout);
        self.application.to_admin(&mut logout, &self.session_id).await;
        trace_outbound(&logout);

        self.link.lock().state = LinkState::LoggedOut;
        info!(session = %self.session_id, "simulated initiator logged out");
        self.application.on_logout(&self.session_id).await;
        Ok(())
    }

    fn outbound_admin(&self, msg_type: MsgType) -> Message {
        let seq = {
            let mut link = self.link.lock();
            let seq = link.next_admin_seq;
            link.next_admin_seq += 1;
            seq
        };
        header(&msg_type, &self.session_id, seq)
    }

    fn inbound(&self, msg_type: MsgType) -> Message {
        let seq = {
            let mut link = self.link.lock();
            let seq = link.next_inbound_seq;
            link.next_inbound_seq += 1;
            seq
        };
        header(&msg_type, &self.session_id.reversed(), seq)
    }

    fn execution_report(&self, order: &Message) -> Message {
        let exec_id = {
            let mut link = self.link.lock();
            let id = link.next_exec_id;
            link.next_exec_id += 1;
            id
        };
        let mut report = self.inbound(MsgType::ExecutionReport);
        let body = report.body_mut();
        body.set_str(tags::ORDER_ID, format!("SIM-{exec_id}"));
        body.set_str(tags::EXEC_ID, format!("SIM-EXEC-{exec_id}"));
        for tag in [tags::CL_ORD_ID, tags::SYMBOL, tags::SIDE, tags::ORDER_QTY] {
            if let Some(value) = order.get_field(tag) {
                body.set_str(tag, value);
            }
        }
        body.set_char(tags::EXEC_TYPE, '0');
        body.set_char(tags::ORD_STATUS, '0');
        report
    }
}

#[async_trait]
impl<A: Application> MessageSender for SimulatedInitiator<A> {
    async fn send_to_target(
        &self,
        mut message: Message,
        session_id: &SessionId,
    ) -> Result<(), SessionError> {
        if session_id != &self.session_id {
            return Err(SessionError::UnknownSession {
                session: session_id.to_string(),
            });
        }
        {
            let link = self.link.lock();
            if link.state != LinkState::LoggedOn {
                return Err(invalid_state("LoggedOn", link.state));
            }
        }

        self.application.to_app(&mut message, session_id).await;
        trace_outbound(&message);

        let report = (message.msg_type() == Some(MsgType::NewOrderSingle))
            .then(|| self.execution_report(&message));
        self.sent.lock().push(message);

        if let Some(report) = report {
            if let Err(reason) = self.application.from_app(&report, session_id).await {
                warn!(session = %session_id, %reason, "execution report rejected by application");
            }
        }
        Ok(())
    }
}

fn header(msg_type: &MsgType, session_id: &SessionId, seq: u64) -> Message {
    let mut message = Message::new();
    let header = message.header_mut();
    header.set_str(tags::BEGIN_STRING, session_id.begin_string.as_str());
    header.set_str(tags::MSG_TYPE, msg_type.as_str());
    header.set_str(tags::SENDER_COMP_ID, session_id.sender_comp_id.as_str());
    header.set_str(tags::TARGET_COMP_ID, session_id.target_comp_id.as_str());
    header.set_uint(tags::MSG_SEQ_NUM, seq);
    header.set_str(tags::SENDING_TIME, Timestamp::now().format_micros());
    message
}

fn trace_outbound(message: &Message) {
    match render_packet(message) {
        Ok(packet) => debug!(%packet, "outbound"),
        Err(error) => warn!(%error, "outbound message cannot be rendered"),
    }
}

fn invalid_state(expected: &str, current: LinkState) -> SessionError {
    SessionError::InvalidState {
        expected: expected.to_string(),
        current: current.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RejectReason;
    use crate::builder::InitiatorBuilder;
    use fixpoll_core::types::CompId;

    #[derive(Debug, Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
        admin_seqs: Mutex<Vec<String>>,
        reject_logon_ack: bool,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }

        fn record(&self, what: impl Into<String>) {
            self.calls.lock().push(what.into());
        }
    }

    #[async_trait]
    impl Application for Recorder {
        async fn on_create(&self, _: &SessionId) {
            self.record("create");
        }
        async fn on_logon(&self, _: &SessionId) {
            self.record("logon");
        }
        async fn on_logout(&self, _: &SessionId) {
            self.record("logout");
        }
        async fn to_admin(&self, message: &mut Message, _: &SessionId) {
            if message.msg_type() == Some(MsgType::Logon) {
                message.body_mut().set_str(tags::RAW_DATA, "pw");
            }
            if let Some(seq) = message.get_field(tags::MSG_SEQ_NUM) {
                self.admin_seqs.lock().push(seq.to_string());
            }
            self.record(format!("to_admin:{}", message.get_field(tags::MSG_TYPE).unwrap_or("")));
        }
        async fn from_admin(&self, message: &Message, _: &SessionId) -> Result<(), RejectReason> {
            self.record(format!("from_admin:{}", message.get_field(tags::MSG_TYPE).unwrap_or("")));
            if self.reject_logon_ack {
                return Err(RejectReason::new(1, "bad credentials"));
            }
            Ok(())
        }
        async fn to_app(&self, message: &mut Message, _: &SessionId) {
            self.record(format!("to_app:{}", message.get_field(tags::MSG_TYPE).unwrap_or("")));
        }
        async fn from_app(&self, message: &Message, _: &SessionId) -> Result<(), RejectReason> {
            self.record(format!("from_app:{}", message.get_field(tags::MSG_TYPE).unwrap_or("")));
            Ok(())
        }
    }

    fn initiator(app: Arc<Recorder>) -> SimulatedInitiator<Recorder> {
        let config = SessionConfig::new(
            CompId::new("CLIENT").unwrap(),
            CompId::new("SERVER").unwrap(),
            "FIX.4.4",
        );
        InitiatorBuilder::<Recorder>::new()
            .with_application(app)
            .with_session(config)
            .build()
            .unwrap()
    }

    fn order(session_id: &SessionId) -> Message {
        let mut msg = header(&MsgType::NewOrderSingle, session_id, 1);
        msg.body_mut().set_str(tags::CL_ORD_ID, "1");
        msg.body_mut().set_str(tags::SYMBOL, "EURUSD");
        msg
    }

    #[tokio::test]
    async fn test_start_stop_callback_order() {
        let app = Arc::new(Recorder::default());
        let initiator = initiator(Arc::clone(&app));

        initiator.start().await.unwrap();
        assert_eq!(initiator.state(), LinkState::LoggedOn);
        initiator.stop().await.unwrap();
        assert_eq!(initiator.state(), LinkState::LoggedOut);

        assert_eq!(
            app.calls(),
            vec!["create", "to_admin:A", "from_admin:A", "logon", "to_admin:5", "logout"]
        );
    }

    #[tokio::test]
    async fn test_restart_skips_on_create() {
        let app = Arc::new(Recorder::default());
        let initiator = initiator(Arc::clone(&app));

        initiator.start().await.unwrap();
        initiator.stop().await.unwrap();
        initiator.start().await.unwrap();

        let creates = app.calls().iter().filter(|c| *c == "create").count();
        let logons = app.calls().iter().filter(|c| *c == "logon").count();
        assert_eq!(creates, 1);
        assert_eq!(logons, 2);
    }

    #[tokio::test]
    async fn test_start_twice_is_invalid() {
        let initiator = initiator(Arc::new(Recorder::default()));
        initiator.start().await.unwrap();
        assert!(matches!(
            initiator.start().await,
            Err(SessionError::InvalidState { .. })
        ));
    }

    #[tokio::test]
    async fn test_rejected_logon_ack() {
        let app = Arc::new(Recorder {
            reject_logon_ack: true,
            ..Recorder::default()
        });
        let initiator = initiator(Arc::clone(&app));

        let err = initiator.start().await.unwrap_err();
        assert!(matches!(err, SessionError::LogonRejected { .. }));
        assert_eq!(initiator.state(), LinkState::Idle);
        assert!(!app.calls().contains(&"logon".to_string()));
    }

    #[tokio::test]
    async fn test_send_requires_logon() {
        let initiator = initiator(Arc::new(Recorder::default()));
        let session_id = initiator.session_id().clone();

        let err = initiator
            .send_to_target(order(&session_id), &session_id)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidState {
                expected: "LoggedOn".to_string(),
                current: "Idle".to_string(),
            }
        );
        assert!(initiator.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_send_to_unknown_session() {
        let initiator = initiator(Arc::new(Recorder::default()));
        initiator.start().await.unwrap();

        let other = SessionId::new("FIX.4.4", "CLIENT", "ELSEWHERE");
        let err = initiator
            .send_to_target(order(&other), &other)
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::UnknownSession { .. }));
    }

    #[tokio::test]
    async fn test_order_gets_execution_report() {
        let app = Arc::new(Recorder::default());
        let initiator = initiator(Arc::clone(&app));
        initiator.start().await.unwrap();
        let session_id = initiator.session_id().clone();

        initiator
            .send_to_target(order(&session_id), &session_id)
            .await
            .unwrap();

        let calls = app.calls();
        assert_eq!(&calls[calls.len() - 2..], ["to_app:D", "from_app:8"]);
        assert_eq!(initiator.sent_messages().len(), 1);
    }

    #[tokio::test]
    async fn test_custom_request_gets_no_reply() {
        let app = Arc::new(Recorder::default());
        let initiator = initiator(Arc::clone(&app));
        initiator.start().await.unwrap();
        let session_id = initiator.session_id().clone();

        let query = header(&MsgType::Custom("UAR".to_string()), &session_id, 2);
        initiator.send_to_target(query, &session_id).await.unwrap();

        assert_eq!(app.calls().last().map(String::as_str), Some("to_app:UAR"));
    }

    #[tokio::test]
    async fn test_admin_and_app_sequence_numbers_overlap() {
        let app = Arc::new(Recorder::default());
        let initiator = initiator(Arc::clone(&app));
        initiator.start().await.unwrap();
        let session_id = initiator.session_id().clone();

        initiator
            .send_to_target(order(&session_id), &session_id)
            .await
            .unwrap();
        initiator.stop().await.unwrap();

        assert_eq!(*app.admin_seqs.lock(), ["1", "2"]);
        let sent = initiator.sent_messages();
        assert_eq!(sent[0].get_field(tags::MSG_SEQ_NUM), Some("1"));
    }
}
