/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Core types for FIX protocol operations.
//!
//! This module provides fundamental types used throughout fixpoll:
//! - [`Timestamp`]: FIX-formatted UTC timestamp
//! - [`CompId`]: Component identifier (SenderCompID, TargetCompID)
//! - [`Side`]: Order side (tag 54)
//! - [`OrdType`]: Order type (tag 40)
//! - [`OpenClose`]: Position effect (tag 77)

use arrayvec::ArrayString;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for CompID strings in bytes.
pub const COMP_ID_MAX_LEN: usize = 32;

const UTC_TIMESTAMP_MICROS: &str = "%Y%m%d-%H:%M:%S%.6f";

/// A UTC instant, written in FIX `UTCTimestamp` form with microseconds:
/// `YYYYMMDD-HH:MM:SS.ffffff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Captures the current time.
    #[inline]
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Formats the timestamp with microsecond precision.
    #[must_use]
    pub fn format_micros(self) -> String {
        self.0.format(UTC_TIMESTAMP_MICROS).to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(UTC_TIMESTAMP_MICROS))
    }
}

/// Component identifier for FIX sessions.
///
/// Used for SenderCompID (tag 49), TargetCompID (tag 56), and related fields.
/// Maximum length is 32 characters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct CompId(ArrayString<COMP_ID_MAX_LEN>);

impl CompId {
    /// Creates a new CompId from a string slice.
    ///
    /// # Returns
    /// `Some(CompId)` if the string is non-empty and fits within the maximum
    /// length, `None` otherwise.
    #[must_use]
    pub fn new(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        ArrayString::from(s).ok().map(Self)
    }

    /// Returns the CompId as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CompId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order side enumeration (tag 54).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order.
    Buy = b'1',
    /// Sell order.
    Sell = b'2',
}

impl Side {
    /// Returns the character representation of this side.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Order type enumeration (tag 40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrdType {
    /// Market order.
    Market = b'1',
    /// Limit order.
    Limit = b'2',
}

impl OrdType {
    /// Returns the character representation of this order type.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}

/// Position effect enumeration (tag 77).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
#[serde(rename_all = "UPPERCASE")]
pub enum OpenClose {
    /// Opening a position.
    Open = b'O',
    /// Closing a position.
    Close = b'C',
}

impl OpenClose {
    /// Returns the character representation of this position effect.
    #[must_use]
    pub const fn as_char(self) -> char {
        self as u8 as char
    }
}
