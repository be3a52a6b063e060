/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Message types for the FIX protocol.
//!
//! This module provides:
//! - [`MsgType`]: Enumeration of the FIX message types the client deals with
//! - [`Message`]: Mutable message value made of a header and a body block

use crate::field::{FieldMap, tags};
use serde::{Deserialize, Serialize};
use std::fmt;

/// FIX message types.
///
/// Covers the session-level messages plus the application messages the
/// client sends or expects back. Venue-specific types such as `UAF` or
/// `UAR` are represented as `Custom(String)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MsgType {
    /// Heartbeat (0) - Session level.
    #[default]
    Heartbeat,
    /// Test Request (1) - Session level.
    TestRequest,
    /// Resend Request (2) - Session level.
    ResendRequest,
    /// Reject (3) - Session level.
    Reject,
    /// Sequence Reset (4) - Session level.
    SequenceReset,
    /// Logout (5) - Session level.
    Logout,
    /// Execution Report (8).
    ExecutionReport,
    /// Order Cancel Reject (9).
    OrderCancelReject,
    /// Logon (A) - Session level.
    Logon,
    /// New Order Single (D).
    NewOrderSingle,
    /// Order Status Request (H).
    OrderStatusRequest,
    /// Business Message Reject (j).
    BusinessMessageReject,
    /// Custom or unknown message type.
    Custom(String),
}

impl std::str::FromStr for MsgType {
    type Err = std::convert::Infallible;

    /// Creates a MsgType from a string value.
    ///
    /// # Arguments
    /// * `s` - The message type string (e.g., "D" for NewOrderSingle)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "0" => Self::Heartbeat,
            "1" => Self::TestRequest,
            "2" => Self::ResendRequest,
            "3" => Self::Reject,
            "4" => Self::SequenceReset,
            "5" => Self::Logout,
            "8" => Self::ExecutionReport,
            "9" => Self::OrderCancelReject,
            "A" => Self::Logon,
            "D" => Self::NewOrderSingle,
            "H" => Self::OrderStatusRequest,
            "j" => Self::BusinessMessageReject,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl MsgType {
    /// Returns the string representation of this message type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Heartbeat => "0",
            Self::TestRequest => "1",
            Self::ResendRequest => "2",
            Self::Reject => "3",
            Self::SequenceReset => "4",
            Self::Logout => "5",
            Self::ExecutionReport => "8",
            Self::OrderCancelReject => "9",
            Self::Logon => "A",
            Self::NewOrderSingle => "D",
            Self::OrderStatusRequest => "H",
            Self::BusinessMessageReject => "j",
            Self::Custom(s) => s.as_str(),
        }
    }
}

impl fmt::Display for MsgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owned, mutable FIX message.
///
/// The header holds the standard header fields (BeginString, MsgType,
/// CompIDs, MsgSeqNum, SendingTime, ...). The body holds everything else.
/// BodyLength and CheckSum are not stored; they are produced when the
/// message is rendered in tag=value form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    header: FieldMap,
    body: FieldMap,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a message whose header carries the given MsgType.
    #[must_use]
    pub fn with_msg_type(msg_type: &MsgType) -> Self {
        let mut msg = Self::new();
        msg.header.set_str(tags::MSG_TYPE, msg_type.as_str());
        msg
    }

    /// Returns the header block.
    #[inline]
    #[must_use]
    pub fn header(&self) -> &FieldMap {
        &self.header
    }

    /// Returns the header block for modification.
    #[inline]
    pub fn header_mut(&mut self) -> &mut FieldMap {
        &mut self.header
    }

    /// Returns the body block.
    #[inline]
    #[must_use]
    pub fn body(&self) -> &FieldMap {
        &self.body
    }

    /// Returns the body block for modification.
    #[inline]
    pub fn body_mut(&mut self) -> &mut FieldMap {
        &mut self.body
    }

    /// Returns the message type from the header, if set.
    #[must_use]
    pub fn msg_type(&self) -> Option<MsgType> {
        self.header
            .get(tags::MSG_TYPE)
            .and_then(|s| s.parse().ok())
    }

    /// Returns the BeginString from the header, if set.
    #[must_use]
    pub fn begin_string(&self) -> Option<&str> {
        self.header.get(tags::BEGIN_STRING)
    }

    /// Gets a field value by tag, looking in the header first, then the body.
    #[must_use]
    pub fn get_field(&self, tag: u32) -> Option<&str> {
        self.header.get(tag).or_else(|| self.body.get(tag))
    }
}

/// Renders header then body as `tag=value|tag=value|...`.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for field in self.header.iter().chain(self.body.iter()) {
            write!(f, "{}|", field)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msg_type_from_str() {
        assert_eq!("0".parse::<MsgType>().unwrap(), MsgType::Heartbeat);
        assert_eq!("A".parse::<MsgType>().unwrap(), MsgType::Logon);
        assert_eq!("D".parse::<MsgType>().unwrap(), MsgType::NewOrderSingle);
        assert_eq!("8".parse::<MsgType>().unwrap(), MsgType::ExecutionReport);
    }

    #[test]
    fn test_msg_type_custom() {
        let custom: MsgType = "UAR".parse().unwrap();
        assert_eq!(custom, MsgType::Custom("UAR".to_string()));
        assert_eq!(custom.as_str(), "UAR");
    }

    #[test]
    fn test_message_header_and_body() {
        let mut msg = Message::with_msg_type(&MsgType::NewOrderSingle);
        msg.header_mut().set_str(tags::BEGIN_STRING, "FIX.4.4");
        msg.body_mut().set_str(tags::SYMBOL, "IBM");

        assert_eq!(msg.msg_type(), Some(MsgType::NewOrderSingle));
        assert_eq!(msg.begin_string(), Some("FIX.4.4"));
        assert_eq!(msg.get_field(tags::SYMBOL), Some("IBM"));
        assert_eq!(msg.get_field(tags::MSG_TYPE), Some("D"));
        assert_eq!(msg.header().len(), 2);
        assert_eq!(msg.body().len(), 1);
    }

    #[test]
    fn test_message_without_type() {
        let msg = Message::new();
        assert_eq!(msg.msg_type(), None);
        assert_eq!(msg.begin_string(), None);
    }

    #[test]
    fn test_message_display() {
        let mut msg = Message::with_msg_type(&MsgType::Logon);
        msg.body_mut().set_str(tags::SENDER_SUB_ID, "desk");
        assert_eq!(msg.to_string(), "35=A|50=desk|");
    }
}
