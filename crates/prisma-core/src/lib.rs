//! Core PRISMA library: scripted playback engine, session state, config.
//!
//! - `script`: the authored chat and log sequences
//! - `session`: per-session mutable state
//! - `transcript`: chat transcript mutations
//! - `playback`: the reveal state machine
//! - `scheduler`: timer that turns tick requests into inbox events
//! - `config`, `logging`, `interrupt`: ambient plumbing

pub mod config;
pub mod interrupt;
pub mod logging;
pub mod playback;
pub mod scheduler;
pub mod script;
pub mod session;
pub mod transcript;

pub use playback::{
    Clock, DEFAULT_TICK_INTERVAL, PlaybackEngine, SystemClock, TickOutcome, TickRequest,
};
pub use scheduler::TickScheduler;
pub use script::{ChatEvent, LogEvent, Script, Sender, Severity};
pub use session::{Phase, RevealedLogEntry, SessionState, TickId};
pub use transcript::Transcript;
