//! Events fed to the reducer.

use crossterm::event::Event;
use prisma_core::TickId;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Render cadence tick; also advances the spinner.
    Tick,
    /// Raw terminal input.
    Terminal(Event),
    /// A playback timer fired for the given ticket.
    PlaybackTick(TickId),
}
