//! Query handlers for the access context.
//!
//! This module contains query handlers that read bound doors from the
//! registry and return read-only view DTOs. PINs are never exposed.

use doorward_core::aggregate::AggregateRoot;
use doorward_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use crate::application::registry::AccessRegistry;
use crate::domain::values::Location;

/// Read-only view of a bound door.
#[derive(Debug, Serialize)]
pub struct DoorView {
    /// The door identifier.
    pub door_id: Uuid,
    /// Canonical location of the door.
    pub location: String,
    /// The owner's player ID.
    pub owner: Uuid,
    /// Whether the PIN is still the one issued at binding.
    pub pin_is_default: bool,
    /// Current version (event count).
    pub version: i64,
}

/// Retrieves the door bound at `location`.
///
/// # Errors
///
/// Returns `DomainError::UnknownLocation` if no door is bound there.
/// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
pub fn get_door(location: &Location, registry: &AccessRegistry) -> Result<DoorView, DomainError> {
    registry.inspect(location, |door| DoorView {
        door_id: door.aggregate_id(),
        location: door.location().to_string(),
        owner: door.owner().as_uuid(),
        pin_is_default: door.pin_is_default(),
        version: door.version(),
    })
}

/// Returns the number of bound doors.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
pub fn count_doors(registry: &AccessRegistry) -> Result<usize, DomainError> {
    registry.door_count()
}
