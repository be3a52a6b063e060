/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Monotonic identifier generation.
//!
//! Two independent counters start at zero and are pre-incremented on every
//! call, so the first identifier handed out is 1. They are never reset and
//! never persisted; a restart starts over.

/// Generator for header sequence numbers and request identifiers.
#[derive(Debug, Default)]
pub struct IdGenerator {
    order_seq: u64,
    exec_seq: u64,
}

impl IdGenerator {
    /// Creates a generator with both counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            order_seq: 0,
            exec_seq: 0,
        }
    }

    /// Advances the order counter and returns the new value.
    pub fn next_order_id(&mut self) -> u64 {
        self.order_seq += 1;
        self.order_seq
    }

    /// Advances the execution counter and returns the new value as decimal
    /// text.
    pub fn next_exec_id(&mut self) -> String {
        self.exec_seq += 1;
        let mut buf = itoa::Buffer::new();
        buf.format(self.exec_seq).to_owned()
    }

    /// Last order identifier handed out, or 0.
    #[inline]
    #[must_use]
    pub const fn order_seq(&self) -> u64 {
        self.order_seq
    }

    /// Last execution identifier handed out, or 0.
    #[inline]
    #[must_use]
    pub const fn exec_seq(&self) -> u64 {
        self.exec_seq
    }
}
