//! Bounded channel between the isolated preview context and the host.
//!
//! The frame side posts raw message strings and never blocks; when the
//! queue is full the post is dropped with a warning. The host drains
//! in FIFO order and validates each message before mutating any state,
//! so per-channel ordering of delivered records is preserved.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};

use super::{parse_message, ConsoleLog};

pub const DEFAULT_CAPACITY: usize = 256;

/// Producer half handed to the preview frame bridge.
#[derive(Clone)]
pub struct FramePort {
    tx: SyncSender<String>,
}

impl FramePort {
    /// Returns false when the message was dropped (queue full or host
    /// gone).
    pub fn post(&self, raw: impl Into<String>) -> bool {
        match self.tx.try_send(raw.into()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("console queue full, dropping message");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Consumer half owned by the host session.
pub struct ConsoleRelay {
    rx: Receiver<String>,
}

impl ConsoleRelay {
    pub fn channel(capacity: usize) -> (FramePort, ConsoleRelay) {
        let (tx, rx) = sync_channel(capacity);
        (FramePort { tx }, ConsoleRelay { rx })
    }

    /// Drains everything currently queued into the log, in arrival
    /// order. Returns the number of records appended.
    pub fn drain_into(&self, log: &mut ConsoleLog) -> usize {
        let mut appended = 0;
        while let Ok(raw) = self.rx.try_recv() {
            match parse_message(&raw) {
                Some(message) => {
                    log.push(message.level, message.args);
                    appended += 1;
                }
                None => tracing::debug!("ignoring unrecognized frame message"),
            }
        }
        appended
    }
}
