/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixpoll
//!
//! Application layer of a FIX trading client.
//!
//! The client reacts to session lifecycle callbacks from a FIX engine and,
//! on a fixed interval, sends an order status query and an account data
//! query. The first time it finds the session authenticated it also sends a
//! single limit order.
//!
//! This crate provides:
//! - **Identifiers**: [`IdGenerator`] for sequence numbers and request ids
//! - **Requests**: [`RequestBuilder`] for the three outbound requests
//! - **Output**: the [`EventLogger`] event and packet channels
//! - **Lifecycle**: [`ClientApplication`], the engine callback handler
//! - **Dispatch**: [`RequestDispatcher`], the timer-driven send loop
//! - **Configuration**: [`ClientConfig`] from `FIX_*` environment variables
//!
//! ## Example
//!
//! ```no_run
//! use fixpoll::{ClientApplication, ClientConfig, ConsoleLogger, RequestBuilder, RequestDispatcher};
//! use fixpoll_engine::InitiatorBuilder;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::from_env()?;
//! let app = Arc::new(ClientApplication::new(config.credentials.clone(), ConsoleLogger));
//! let initiator = Arc::new(
//!     InitiatorBuilder::<ClientApplication<ConsoleLogger>>::new()
//!         .with_application(Arc::clone(&app))
//!         .with_session(config.session.clone())
//!         .build()?,
//! );
//! initiator.start().await?;
//!
//! let dispatcher = RequestDispatcher::new(
//!     Arc::clone(&initiator),
//!     app.shared(),
//!     RequestBuilder::new(config.order.clone()),
//!     ConsoleLogger,
//! )
//! .with_interval(config.poll_interval);
//! dispatcher.run(CancellationToken::new()).await;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod ids;
pub mod logger;
pub mod request;

pub use config::{ClientConfig, ConfigError};
pub use dispatch::{RequestDispatcher, TickReport};
pub use error::{ClientError, Result};
pub use handler::{ClientApplication, LogonCredentials, SessionPhase, SessionSnapshot, SharedSession};
pub use ids::IdGenerator;
pub use logger::{ChannelFormat, ConsoleLogger, EventLogger, LogLine, MemoryLogger};
pub use request::{OrderDefaults, OutboundRequest, RequestBuilder, RequestKind};

/// Installs the global `tracing` subscriber.
///
/// The filter comes from `RUST_LOG`, with `info` as the fallback. Event and
/// packet lines are formatted by [`ChannelFormat`].
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(ChannelFormat::default())
        .try_init();
}
