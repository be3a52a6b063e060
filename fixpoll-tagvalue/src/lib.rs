/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! # fixpoll Tag-Value
//!
//! Renders [`Message`] values in the standard FIX tag=value form, with
//! BodyLength (9) and CheckSum (10) computed on the fly.
//!
//! The output is what the client prints on its packet channel. Framing on
//! the wire stays the engine's job.

pub mod checksum;
pub mod encoder;

pub use checksum::calculate_checksum;
pub use encoder::{Encoder, encode_message, render_packet};
pub use fixpoll_core::message::Message;
