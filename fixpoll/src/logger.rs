/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! Human-facing event and packet output.
//!
//! Two channels are kept apart: narrative events and raw outbound packets.
//! [`ConsoleLogger`] maps them onto the `fixpoll::event` and `fixpoll::packet`
//! tracing targets; [`MemoryLogger`] records them for inspection.
//! [`ChannelFormat`] prints the two targets in green and yellow when the
//! writer supports ANSI colours.

use nu_ansi_term::Color;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{Event, Subscriber, info};
use tracing_subscriber::fmt::format::{Format, Full, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Tracing target for narrative events.
pub const EVENT_TARGET: &str = "fixpoll::event";
/// Tracing target for packet dumps.
pub const PACKET_TARGET: &str = "fixpoll::packet";

/// Sink for event and packet lines.
pub trait EventLogger: Send + Sync {
    /// Records a narrative event.
    fn event(&self, text: &str);

    /// Records a rendered packet.
    fn packet(&self, text: &str);
}

impl<T: EventLogger + ?Sized> EventLogger for Arc<T> {
    fn event(&self, text: &str) {
        (**self).event(text);
    }

    fn packet(&self, text: &str) {
        (**self).packet(text);
    }
}

/// Writes both channels through `tracing`, each on its own target.
/// [`ChannelFormat`] gives them their colours.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl EventLogger for ConsoleLogger {
    fn event(&self, text: &str) {
        info!(target: EVENT_TARGET, "{text}");
    }

    fn packet(&self, text: &str) {
        info!(target: PACKET_TARGET, "{text}");
    }
}

/// Event formatter for the console.
///
/// Lines on [`EVENT_TARGET`] and [`PACKET_TARGET`] are printed bare, green
/// and yellow respectively. Everything else goes through the default
/// `tracing_subscriber` format.
#[derive(Debug, Default)]
pub struct ChannelFormat {
    fallback: Format<Full>,
}

impl ChannelFormat {
    fn colour(target: &str) -> Option<Color> {
        match target {
            EVENT_TARGET => Some(Color::Green),
            PACKET_TARGET => Some(Color::Yellow),
            _ => None,
        }
    }
}

impl<S, N> FormatEvent<S, N> for ChannelFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let Some(colour) = Self::colour(event.metadata().target()) else {
            return self.fallback.format_event(ctx, writer, event);
        };

        let mut text = String::new();
        ctx.format_fields(Writer::new(&mut text), event)?;
        if writer.has_ansi_escapes() {
            writeln!(writer, "{}", colour.paint(text))
        } else {
            writeln!(writer, "{text}")
        }
    }
}

/// A line captured by [`MemoryLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogLine {
    /// From the event channel.
    Event(String),
    /// From the packet channel.
    Packet(String),
}

/// Keeps every line in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<LogLine>>,
}

impl MemoryLogger {
    /// Creates an empty logger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every captured line.
    #[must_use]
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().clone()
    }

    /// Returns the captured event texts.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| match line {
                LogLine::Event(text) => Some(text.clone()),
                LogLine::Packet(_) => None,
            })
            .collect()
    }

    /// Returns the captured packet texts.
    #[must_use]
    pub fn packets(&self) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| match line {
                LogLine::Packet(text) => Some(text.clone()),
                LogLine::Event(_) => None,
            })
            .collect()
    }

    /// Drops every captured line.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl EventLogger for MemoryLogger {
    fn event(&self, text: &str) {
        self.lines.lock().push(LogLine::Event(text.to_string()));
    }

    fn packet(&self, text: &str) {
        self.lines.lock().push(LogLine::Packet(text.to_string()));
    }
}
