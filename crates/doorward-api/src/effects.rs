//! Effect sink that reports door effects as structured log events.
//!
//! The engine's animation and prompt systems sit outside this service; the
//! host logs each effect under the `doorward::effects` target so an engine
//! bridge can tail them.

use doorward_access::application::effects::DoorEffects;
use doorward_access::domain::values::{Location, PlayerId};
use tracing::info;

/// Emits one log event per door effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEffects;

impl DoorEffects for TracingEffects {
    fn open_door(&self, location: &Location) {
        info!(target: "doorward::effects", effect = "open_door", %location, "playing door-open animation");
    }

    fn prompt_for_pin(&self, player: PlayerId, location: &Location) {
        info!(target: "doorward::effects", effect = "prompt_for_pin", %player, %location, "showing PIN prompt");
    }
}
