/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixpoll Engine
//!
//! The contracts between a FIX engine and the application layer that sits
//! on top of it.
//!
//! This crate provides:
//! - **Application trait**: Lifecycle and message callbacks the engine invokes
//! - **MessageSender trait**: The engine's send primitive
//! - **Session configuration**: CompIDs, BeginString, heartbeat interval
//! - **Initiator**: A builder plus an in-process [`SimulatedInitiator`] that
//!   plays the engine's part without sockets or a message store

pub mod application;
pub mod builder;
pub mod config;
pub mod initiator;
pub mod sender;

pub use application::{Application, RejectReason, SessionId};
pub use builder::InitiatorBuilder;
pub use config::{DEFAULT_BEGIN_STRING, SessionConfig};
pub use initiator::{LinkState, SimulatedInitiator};
pub use sender::MessageSender;
