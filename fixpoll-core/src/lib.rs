/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixpoll Core
//!
//! Core types, messages, and error definitions shared by the fixpoll crates.
//!
//! This crate provides:
//! - **Error types**: Session and encoding errors built with `thiserror`
//! - **Fields**: Tag constants, [`Field`] and the ordered [`FieldMap`]
//! - **Messages**: [`Message`] (header + body) and [`MsgType`]
//! - **Core types**: [`Timestamp`], [`CompId`], [`Side`], [`OrdType`], [`OpenClose`]

pub mod error;
pub mod field;
pub mod message;
pub mod types;

pub use error::{EncodeError, SessionError};
pub use field::{Field, FieldMap, tags};
pub use message::{Message, MsgType};
pub use types::{CompId, OpenClose, OrdType, Side, Timestamp};
