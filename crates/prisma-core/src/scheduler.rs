//! Tick scheduler: turns a [`TickRequest`] into a delayed inbox event.
//!
//! Timer tasks never touch session state. They sleep, then send the mapped
//! event into the owner's inbox, and the owner feeds it to the engine. At
//! most one timer is outstanding: scheduling a new tick cancels the previous
//! one. Wake-ups that slip through anyway are rejected by the engine's tick
//! id check.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::playback::TickRequest;
use crate::session::TickId;

/// Spawns one timer at a time and delivers `map(id)` when it fires.
///
/// Must be used from within a tokio runtime.
pub struct TickScheduler<E> {
    tx: mpsc::UnboundedSender<E>,
    map: fn(TickId) -> E,
    outstanding: Option<CancellationToken>,
}

impl<E: Send + 'static> TickScheduler<E> {
    pub fn new(tx: mpsc::UnboundedSender<E>, map: fn(TickId) -> E) -> Self {
        Self {
            tx,
            map,
            outstanding: None,
        }
    }

    /// Schedules a tick, superseding any outstanding one.
    pub fn schedule(&mut self, request: TickRequest) {
        self.cancel();

        let token = CancellationToken::new();
        let cancel = token.clone();
        let tx = self.tx.clone();
        let event = (self.map)(request.id);
        let TickRequest { id, delay } = request;

        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    trace!(tick = id.0, "tick timer cancelled");
                }
                () = tokio::time::sleep(delay) => {
                    trace!(tick = id.0, "tick timer fired");
                    let _ = tx.send(event);
                }
            }
        });

        self.outstanding = Some(token);
    }

    /// Cancels the outstanding timer, if any.
    pub fn cancel(&mut self) {
        if let Some(token) = self.outstanding.take() {
            token.cancel();
        }
    }
}

impl<E> Drop for TickScheduler<E> {
    fn drop(&mut self) {
        if let Some(token) = self.outstanding.take() {
            token.cancel();
        }
    }
}
