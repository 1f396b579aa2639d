//! Host side of the console relay: message validation and the ordered
//! log of records received from the preview frame.

mod relay;

pub use relay::{ConsoleRelay, FramePort, DEFAULT_CAPACITY};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Log,
    Warn,
    Error,
    Info,
}

/// Wire shape posted by the in-frame shim. The message channel is
/// shared and unauthenticated, so the `type` tag is checked before
/// anything else is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub level: LogLevel,
    pub args: Vec<String>,
}

/// Accepts only well-formed console messages; everything else on the
/// channel is somebody else's traffic and is ignored.
pub fn parse_message(raw: &str) -> Option<ConsoleMessage> {
    let message: ConsoleMessage = serde_json::from_str(raw).ok()?;
    (message.kind == "console").then_some(message)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub args: Vec<String>,
    /// Monotonic arrival marker; display order is arrival order.
    pub seq: u64,
}

/// Append-only list of relayed records, cleared only by explicit user
/// action. Reloading the preview does not touch delivered records.
#[derive(Debug, Default)]
pub struct ConsoleLog {
    records: Vec<LogRecord>,
    next_seq: u64,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: LogLevel, args: Vec<String>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.push(LogRecord { level, args, seq });
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
