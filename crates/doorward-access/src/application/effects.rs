//! Outbound, fire-and-forget hooks into the engine.

use crate::domain::values::{Location, PlayerId};

/// Sink for the visible consequences of an access decision.
///
/// Implementations must not call back into the registry.
pub trait DoorEffects: Send + Sync {
    /// Plays the door-open animation at `location`.
    fn open_door(&self, location: &Location);

    /// Shows the PIN challenge prompt to `player`.
    fn prompt_for_pin(&self, player: PlayerId, location: &Location);
}
