//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer never touches timers or the terminal itself.

use prisma_core::TickRequest;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Arm the playback timer, replacing any outstanding one.
    ScheduleTick(TickRequest),

    /// Disarm the playback timer.
    CancelTick,
}
