/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Timer-driven request dispatch.
//!
//! Every interval the dispatcher sends, in order:
//! 1. one NewOrderSingle, only the first time it finds the session
//!    authenticated;
//! 2. one order status query;
//! 3. one account data query.
//!
//! Each send is independent. A failure is logged and the remaining sends and
//! later ticks go ahead. The identifier generator and the first-order flag
//! belong to the dispatcher alone.

use crate::error::ClientError;
use crate::handler::SharedSession;
use crate::ids::IdGenerator;
use crate::logger::EventLogger;
use crate::request::{RequestBuilder, RequestKind};
use fixpoll_core::message::Message;
use fixpoll_engine::MessageSender;
use fixpoll_tagvalue::render_packet;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Default wait between ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Outcome of one tick.
#[derive(Debug)]
pub struct TickReport {
    /// The NewOrderSingle result, or `None` if none was due.
    pub new_order: Option<Result<(), ClientError>>,
    /// The order status query result.
    pub order_status: Result<(), ClientError>,
    /// The account data query result.
    pub account_data: Result<(), ClientError>,
}

impl TickReport {
    /// Number of sends attempted during the tick.
    #[must_use]
    pub fn attempted(&self) -> usize {
        2 + usize::from(self.new_order.is_some())
    }

    /// Number of sends that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.results().filter(|r| r.is_err()).count()
    }

    /// Returns true if every attempted send succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.failures() == 0
    }

    fn results(&self) -> impl Iterator<Item = &Result<(), ClientError>> {
        self.new_order
            .iter()
            .chain([&self.order_status, &self.account_data])
    }
}

/// Sends the client's requests on a fixed interval.
#[derive(Debug)]
pub struct RequestDispatcher<S, L> {
    sender: S,
    session: SharedSession,
    builder: RequestBuilder,
    ids: IdGenerator,
    logger: L,
    interval: Duration,
    first_order_sent: bool,
    ticks: u64,
}

impl<S: MessageSender, L: EventLogger> RequestDispatcher<S, L> {
    /// Creates a dispatcher reading session state from `session` and handing
    /// messages to `sender`.
    #[must_use]
    pub fn new(sender: S, session: SharedSession, builder: RequestBuilder, logger: L) -> Self {
        Self {
            sender,
            session,
            builder,
            ids: IdGenerator::new(),
            logger,
            interval: DEFAULT_POLL_INTERVAL,
            first_order_sent: false,
            ticks: 0,
        }
    }

    /// Sets the wait between ticks.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the wait between ticks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns the identifier generator.
    #[must_use]
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Returns true once the NewOrderSingle has been attempted.
    #[must_use]
    pub fn first_order_sent(&self) -> bool {
        self.first_order_sent
    }

    /// Returns the number of completed ticks.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Performs one iteration.
    pub async fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        debug!(tick = self.ticks, "dispatch tick");

        let new_order = if !self.first_order_sent && self.session.is_authenticated() {
            self.first_order_sent = true;
            Some(self.attempt(RequestKind::NewOrderSingle).await)
        } else {
            None
        };
        let order_status = self.attempt(RequestKind::OrderStatusQuery).await;
        let account_data = self.attempt(RequestKind::AccountDataQuery).await;

        TickReport {
            new_order,
            order_status,
            account_data,
        }
    }

    /// Ticks every interval until `cancel` fires, then hands the dispatcher
    /// back.
    ///
    /// The first tick happens one full interval after the call.
    pub async fn run(mut self, cancel: CancellationToken) -> Self {
        info!(interval = ?self.interval, "request dispatcher started");
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let report = self.tick().await;
                    if !report.is_ok() {
                        warn!(
                            tick = self.ticks,
                            failures = report.failures(),
                            attempted = report.attempted(),
                            "tick completed with failures"
                        );
                    }
                }
            }
        }

        info!(ticks = self.ticks, "request dispatcher stopped");
        self
    }

    async fn attempt(&mut self, kind: RequestKind) -> Result<(), ClientError> {
        let result = self.send(kind).await;
        if let Err(ref err) = result {
            error!(request = %kind, error = %err, "request failed");
        }
        result
    }

    async fn send(&mut self, kind: RequestKind) -> Result<(), ClientError> {
        self.logger.event(kind.label());
        let session = self.session.session().ok_or(ClientError::NoActiveSession)?;
        let request = self.builder.build(kind, &session, &mut self.ids);
        self.logger.packet(&packet_text(&request.message));
        self.sender
            .send_to_target(request.message, &session)
            .await
            .map_err(|source| ClientError::Send { kind, source })
    }
}

fn packet_text(message: &Message) -> String {
    render_packet(message).unwrap_or_else(|err| {
        warn!(error = %err, "packet cannot be framed, logging raw fields");
        message.to_string()
    })
}
