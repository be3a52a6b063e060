/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Field types for FIX protocol messages.
//!
//! This module provides:
//! - [`tags`]: Tag numbers for the fields the client reads or writes
//! - [`Field`]: An owned tag/value pair
//! - [`FieldMap`]: An insertion-ordered field collection with replace-on-set semantics

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Tag numbers used by the client.
pub mod tags {
    /// Account (1).
    pub const ACCOUNT: u32 = 1;
    /// BeginString (8).
    pub const BEGIN_STRING: u32 = 8;
    /// BodyLength (9).
    pub const BODY_LENGTH: u32 = 9;
    /// CheckSum (10).
    pub const CHECK_SUM: u32 = 10;
    /// ClOrdID (11).
    pub const CL_ORD_ID: u32 = 11;
    /// ExecID (17).
    pub const EXEC_ID: u32 = 17;
    /// MsgSeqNum (34).
    pub const MSG_SEQ_NUM: u32 = 34;
    /// MsgType (35).
    pub const MSG_TYPE: u32 = 35;
    /// OrderID (37).
    pub const ORDER_ID: u32 = 37;
    /// OrderQty (38).
    pub const ORDER_QTY: u32 = 38;
    /// OrdStatus (39).
    pub const ORD_STATUS: u32 = 39;
    /// OrdType (40).
    pub const ORD_TYPE: u32 = 40;
    /// Price (44).
    pub const PRICE: u32 = 44;
    /// SenderCompID (49).
    pub const SENDER_COMP_ID: u32 = 49;
    /// SenderSubID (50).
    pub const SENDER_SUB_ID: u32 = 50;
    /// SendingTime (52).
    pub const SENDING_TIME: u32 = 52;
    /// Side (54).
    pub const SIDE: u32 = 54;
    /// Symbol (55).
    pub const SYMBOL: u32 = 55;
    /// TargetCompID (56).
    pub const TARGET_COMP_ID: u32 = 56;
    /// TargetSubID (57).
    pub const TARGET_SUB_ID: u32 = 57;
    /// TransactTime (60).
    pub const TRANSACT_TIME: u32 = 60;
    /// OpenClose (77).
    pub const OPEN_CLOSE: u32 = 77;
    /// RawData (96).
    pub const RAW_DATA: u32 = 96;
    /// EncryptMethod (98).
    pub const ENCRYPT_METHOD: u32 = 98;
    /// HeartBtInt (108).
    pub const HEART_BT_INT: u32 = 108;
    /// ExecType (150).
    pub const EXEC_TYPE: u32 = 150;
    /// Venue-specific account data request id, carried on `UAR` messages.
    pub const ACCOUNT_DATA_REQUEST_ID: u32 = 20003;
    /// Venue-specific order status request id, carried on `UAF` messages.
    pub const ORDER_STATUS_REQUEST_ID: u32 = 50584;
}

/// An owned FIX field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// The field tag number.
    pub tag: u32,
    /// The field value in its wire (string) form.
    pub value: String,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub fn new(tag: u32, value: impl Into<String>) -> Self {
        Self {
            tag,
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.tag, self.value)
    }
}

/// Insertion-ordered collection of fields.
///
/// Setting a tag that is already present replaces its value in place, so the
/// original position is kept. Values are stored as strings; no validation is
/// performed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: SmallVec<[Field; 16]>,
}

impl FieldMap {
    /// Creates an empty field map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field with a string value.
    pub fn set_str(&mut self, tag: u32, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.tag == tag) {
            Some(field) => field.value = value,
            None => self.fields.push(Field { tag, value }),
        }
    }

    /// Sets a field with an unsigned integer value.
    pub fn set_uint(&mut self, tag: u32, value: u64) {
        self.set_str(tag, value.to_string());
    }

    /// Sets a field with a single character value.
    pub fn set_char(&mut self, tag: u32, value: char) {
        self.set_str(tag, value.to_string());
    }

    /// Sets a field with a decimal value, rendered without trailing zeros.
    pub fn set_decimal(&mut self, tag: u32, value: Decimal) {
        self.set_str(tag, value.normalize().to_string());
    }

    /// Gets a field value by tag.
    #[must_use]
    pub fn get(&self, tag: u32) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.tag == tag)
            .map(|f| f.value.as_str())
    }

    /// Returns true if the tag is present.
    #[must_use]
    pub fn contains(&self, tag: u32) -> bool {
        self.fields.iter().any(|f| f.tag == tag)
    }

    /// Returns an iterator over the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Returns the number of fields.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the map holds no fields.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
