//! Shared application state.

use std::sync::Arc;

use doorward_access::application::effects::DoorEffects;
use doorward_access::application::registry::AccessRegistry;
use doorward_core::clock::Clock;

/// Application state shared across all request handlers.
///
/// The registry lives as long as the server session; dropping the last
/// clone of the state drops every binding.
#[derive(Clone)]
pub struct AppState {
    /// The door registry for this session.
    pub registry: Arc<AccessRegistry>,
    /// Clock used to timestamp domain events.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Engine effect sink.
    pub effects: Arc<dyn DoorEffects>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        registry: Arc<AccessRegistry>,
        clock: Arc<dyn Clock + Send + Sync>,
        effects: Arc<dyn DoorEffects>,
    ) -> Self {
        Self {
            registry,
            clock,
            effects,
        }
    }
}
