//! Commands for the access context.

use std::fmt;

use doorward_core::command::Command;
use doorward_core::error::DomainError;
use uuid::Uuid;

use super::values::{Location, PlayerId};

/// Command reporting that a player touched a door.
#[derive(Debug, Clone)]
pub struct Interact {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The interacting player.
    pub player_id: PlayerId,
    /// The door that was touched.
    pub location: Location,
}

impl Interact {
    /// Builds the command from the raw strings the engine hook delivers.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentity` if `player_id` is not a UUID,
    /// or `DomainError::InvalidLocation` if `location` is empty.
    pub fn from_raw(
        correlation_id: Uuid,
        player_id: &str,
        location: &str,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            correlation_id,
            player_id: PlayerId::parse(player_id)?,
            location: Location::parse(location)?,
        })
    }
}

impl Command for Interact {
    fn command_type(&self) -> &'static str {
        "access.interact"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> String {
        self.location.to_string()
    }
}

/// Administrative command to replace a door's PIN.
///
/// The candidate is validated by the handler, not here, so that a malformed
/// PIN is reported even for a location that does not exist.
#[derive(Clone)]
pub struct SetPin {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The door whose PIN changes.
    pub location: Location,
    /// The proposed PIN, unvalidated.
    pub candidate: String,
}

impl fmt::Debug for SetPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetPin")
            .field("correlation_id", &self.correlation_id)
            .field("location", &self.location)
            .field("candidate", &"<redacted>")
            .finish()
    }
}

impl Command for SetPin {
    fn command_type(&self) -> &'static str {
        "access.set_pin"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    fn subject(&self) -> String {
        self.location.to_string()
    }
}
