//! Async runtime: network calls run as spawned tasks and report back
//! over a plain channel, so the tree stays editable while a share or
//! load is in flight. Nothing is cancelled; a consumer that stops
//! listening simply drops the eventual result.

mod message;

pub use message::AppMessage;

use std::future::Future;
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::persistence::{FileRecord, ShareClient};

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    pub fn new() -> io::Result<(Self, Receiver<AppMessage>)> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let (tx, rx) = mpsc::channel();
        Ok((Self { runtime, tx }, rx))
    }

    pub fn spawn_share(&self, client: ShareClient, files: Vec<FileRecord>) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let message = match client.share(&files).await {
                Ok(receipt) => AppMessage::ShareCompleted(receipt),
                Err(error) => AppMessage::ShareFailed {
                    error: error.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    pub fn spawn_load_shared(&self, client: ShareClient, slug: String) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let message = match client.load_shared(&slug).await {
                Ok(files) => AppMessage::SharedLoaded { slug, files },
                Err(error) => AppMessage::SharedLoadFailed {
                    slug,
                    error: error.to_string(),
                },
            };
            let _ = tx.send(message);
        });
    }

    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
