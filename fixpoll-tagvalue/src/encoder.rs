/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX message encoder.
//!
//! [`Encoder`] appends tag=value fields and wraps them with BeginString,
//! BodyLength and CheckSum. [`encode_message`] and [`render_packet`] apply it
//! to a [`Message`].

use crate::checksum::{calculate_checksum, format_checksum};
use bytes::{BufMut, BytesMut};
use fixpoll_core::error::EncodeError;
use fixpoll_core::field::tags;
use fixpoll_core::message::Message;

/// SOH (Start of Header) delimiter used in FIX messages.
pub const SOH: u8 = 0x01;

/// Printable stand-in for SOH in packet dumps.
pub const PACKET_DELIMITER: char = '|';

/// FIX message encoder.
#[derive(Debug)]
pub struct Encoder {
    /// Buffer for the message body (between BodyLength and CheckSum).
    body: BytesMut,
    /// The BeginString value (e.g., "FIX.4.4").
    begin_string: String,
}

impl Encoder {
    /// Creates a new encoder with the specified BeginString.
    #[must_use]
    pub fn new(begin_string: impl Into<String>) -> Self {
        Self {
            body: BytesMut::with_capacity(256),
            begin_string: begin_string.into(),
        }
    }

    /// Appends a field with a string value.
    #[inline]
    pub fn put_str(&mut self, tag: u32, value: &str) {
        self.put_raw(tag, value.as_bytes());
    }

    /// Appends a field with raw bytes.
    #[inline]
    pub fn put_raw(&mut self, tag: u32, value: &[u8]) {
        let mut tag_buf = itoa::Buffer::new();
        self.body.put_slice(tag_buf.format(tag).as_bytes());
        self.body.put_u8(b'=');
        self.body.put_slice(value);
        self.body.put_u8(SOH);
    }

    /// Finalizes the message: prepends `8=` and `9=`, appends `10=`.
    #[must_use]
    pub fn finish(self) -> BytesMut {
        let body_len = self.body.len();
        let mut len_buf = itoa::Buffer::new();
        let len_str = len_buf.format(body_len);

        let mut message =
            BytesMut::with_capacity(self.begin_string.len() + len_str.len() + body_len + 16);
        message.put_slice(b"8=");
        message.put_slice(self.begin_string.as_bytes());
        message.put_u8(SOH);
        message.put_slice(b"9=");
        message.put_slice(len_str.as_bytes());
        message.put_u8(SOH);
        message.put_slice(&self.body);

        let checksum = format_checksum(calculate_checksum(&message));
        message.put_slice(b"10=");
        message.put_slice(&checksum);
        message.put_u8(SOH);

        message
    }

}

/// Encodes a message into tag=value bytes.
///
/// Header fields come first, in insertion order, then body fields.
/// BeginString, BodyLength and CheckSum stored in the message are ignored
/// and regenerated.
///
/// # Errors
/// Returns `EncodeError::MissingRequiredField` if BeginString or MsgType is
/// absent, or `EncodeError::EmbeddedDelimiter` if a value contains SOH.
pub fn encode_message(message: &Message) -> Result<BytesMut, EncodeError> {
    let begin_string = message
        .begin_string()
        .ok_or(EncodeError::MissingRequiredField {
            tag: tags::BEGIN_STRING,
        })?;
    if !message.header().contains(tags::MSG_TYPE) {
        return Err(EncodeError::MissingRequiredField {
            tag: tags::MSG_TYPE,
        });
    }

    let mut encoder = Encoder::new(begin_string);
    for field in message.header().iter().chain(message.body().iter()) {
        if matches!(
            field.tag,
            tags::BEGIN_STRING | tags::BODY_LENGTH | tags::CHECK_SUM
        ) {
            continue;
        }
        if field.value.as_bytes().contains(&SOH) {
            return Err(EncodeError::EmbeddedDelimiter { tag: field.tag });
        }
        encoder.put_str(field.tag, &field.value);
    }
    Ok(encoder.finish())
}

/// Renders a message for human inspection, with `|` in place of SOH.
///
/// # Errors
/// Same conditions as [`encode_message`].
pub fn render_packet(message: &Message) -> Result<String, EncodeError> {
    let bytes = encode_message(message)?;
    Ok(String::from_utf8_lossy(&bytes)
        .chars()
        .map(|c| {
            if c == char::from(SOH) {
                PACKET_DELIMITER
            } else {
                c
            }
        })
        .collect())
}
