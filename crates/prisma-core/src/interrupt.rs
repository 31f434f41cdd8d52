//! Process-wide stop request raised by Ctrl+C.
//!
//! The first Ctrl+C only marks the request, so the TUI loop and headless
//! playback wind down on their own. A repeated Ctrl+C means the process is
//! not stopping: the registered force-exit hook runs and the process exits
//! with status 130.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{LazyLock, OnceLock};

use anyhow::{Context, Result};
use tokio::sync::Notify;

/// Exit status used for an interrupted run.
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

static STOP: LazyLock<StopSignal> = LazyLock::new(StopSignal::default);

/// Returned by a run that stopped because of Ctrl+C.
#[derive(Debug)]
pub struct InterruptedError;

impl fmt::Display for InterruptedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Interrupted")
    }
}

impl std::error::Error for InterruptedError {}

type ForceExitHook = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct StopSignal {
    raised: AtomicBool,
    wake: Notify,
    force_exit_hook: OnceLock<ForceExitHook>,
}

impl StopSignal {
    /// Marks the stop request. Returns `true` if it was already marked.
    fn raise(&self) -> bool {
        let repeated = self.raised.swap(true, Ordering::SeqCst);
        if !repeated {
            self.wake.notify_waiters();
        }
        repeated
    }

    fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    async fn wait(&self) {
        loop {
            // Register before checking so a raise in between is not lost.
            let notified = self.wake.notified();
            if self.is_raised() {
                return;
            }
            notified.await;
        }
    }
}

/// Installs the Ctrl+C handler. Call once per process.
///
/// # Errors
/// Returns an error if a handler is already registered.
pub fn init() -> Result<()> {
    ctrlc::set_handler(on_ctrl_c).context("Error setting Ctrl+C handler")
}

fn on_ctrl_c() {
    if STOP.raise() {
        // process::exit skips destructors.
        if let Some(hook) = STOP.force_exit_hook.get() {
            hook();
        }
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }
}

pub fn is_interrupted() -> bool {
    STOP.is_raised()
}

/// Resolves once Ctrl+C has been pressed, immediately if it already was.
pub async fn wait_for_interrupt() {
    STOP.wait().await;
}

/// Sets the hook run before a forced exit. Only the first call takes effect.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = STOP.force_exit_hook.set(Box::new(hook));
}
