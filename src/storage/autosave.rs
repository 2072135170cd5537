//! Debounced ledger writer
//!
//! Every ledger mutation schedules a snapshot here; the worker thread
//! writes it only once the quiescence window elapses with no newer
//! snapshot, so rapid edits coalesce into a single write of the latest
//! state. Saves are fire-and-forget: a failure is logged and the in-memory
//! ledger stays authoritative. Dropping the autosaver disconnects the
//! channel and joins the worker; a snapshot still waiting out its window
//! is discarded, never written after teardown.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::models::transaction::Transaction;

use super::{ledger_io, KeyValueStore};

/// Quiescence window between the last mutation and the write it triggers
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

enum Message {
    Snapshot(Vec<Transaction>),
    Flush(mpsc::Sender<()>),
    Cancel(mpsc::Sender<()>),
}

/// Owns the debounce timer and the worker thread that performs writes
pub struct Autosaver {
    sender: Option<mpsc::Sender<Message>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Autosaver {
    /// Spawn the worker writing through `store` after `delay` of quiescence
    pub fn new(store: Arc<dyn KeyValueStore>, delay: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let handle = thread::spawn(move || worker(store, receiver, delay));
        Self {
            sender: Some(sender),
            handle: Some(handle),
        }
    }

    /// Queue the latest ledger state, superseding any pending snapshot and
    /// restarting the quiescence window.
    pub fn schedule(&self, snapshot: Vec<Transaction>) {
        if let Some(sender) = &self.sender {
            let _ = sender.send(Message::Snapshot(snapshot));
        }
    }

    /// Write the pending snapshot (if any) now and wait for it to land.
    /// One-shot commands don't live long enough for the debounce window.
    pub fn flush(&self) {
        if let Some(sender) = &self.sender {
            let (ack, done) = mpsc::channel();
            if sender.send(Message::Flush(ack)).is_ok() {
                let _ = done.recv();
            }
        }
    }

    /// Discard the pending snapshot (if any) and wait for the discard to
    /// take effect, so a superseded state can never reach the store later.
    pub fn cancel(&self) {
        if let Some(sender) = &self.sender {
            let (ack, done) = mpsc::channel();
            if sender.send(Message::Cancel(ack)).is_ok() {
                let _ = done.recv();
            }
        }
    }
}

impl Drop for Autosaver {
    fn drop(&mut self) {
        // Disconnect first so the worker stops waiting, then join it
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn worker(store: Arc<dyn KeyValueStore>, receiver: mpsc::Receiver<Message>, delay: Duration) {
    let mut pending: Option<Vec<Transaction>> = None;
    loop {
        let message = match &pending {
            Some(_) => match receiver.recv_timeout(delay) {
                Ok(message) => message,
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    write(store.as_ref(), pending.take());
                    continue;
                }
                // Owner gone: the pending snapshot dies with it
                Err(mpsc::RecvTimeoutError::Disconnected) => return,
            },
            None => match receiver.recv() {
                Ok(message) => message,
                Err(_) => return,
            },
        };

        match message {
            Message::Snapshot(snapshot) => pending = Some(snapshot),
            Message::Flush(ack) => {
                write(store.as_ref(), pending.take());
                let _ = ack.send(());
            }
            Message::Cancel(ack) => {
                pending = None;
                let _ = ack.send(());
            }
        }
    }
}

fn write(store: &dyn KeyValueStore, pending: Option<Vec<Transaction>>) {
    let Some(snapshot) = pending else {
        return;
    };
    if let Err(err) = ledger_io::save_ledger(store, &snapshot) {
        // In-memory state is still good; the edit just isn't persisted yet
        warn!(%err, "debounced ledger save failed");
    }
}
