//! Domain events for the access context.
//!
//! PIN digits never appear in an event payload.

use doorward_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::values::{Location, PlayerId};

/// Event type name for `DoorBound`.
pub const DOOR_BOUND_EVENT_TYPE: &str = "access.door_bound";
/// Event type name for `AccessGranted`.
pub const ACCESS_GRANTED_EVENT_TYPE: &str = "access.access_granted";
/// Event type name for `AccessDenied`.
pub const ACCESS_DENIED_EVENT_TYPE: &str = "access.access_denied";
/// Event type name for `PinChanged`.
pub const PIN_CHANGED_EVENT_TYPE: &str = "access.pin_changed";

/// Emitted when an unbound door is claimed by the first player to touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorBound {
    /// The door identifier.
    pub door_id: Uuid,
    /// Where the door is.
    pub location: Location,
    /// The new owner.
    pub owner: PlayerId,
}

/// Emitted when the owner touches their door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessGranted {
    /// The door identifier.
    pub door_id: Uuid,
    /// Where the door is.
    pub location: Location,
    /// The owner that was let through.
    pub player: PlayerId,
}

/// Emitted when someone other than the owner touches a door.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDenied {
    /// The door identifier.
    pub door_id: Uuid,
    /// Where the door is.
    pub location: Location,
    /// The player that was turned away.
    pub player: PlayerId,
}

/// Emitted when a door's PIN is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinChanged {
    /// The door identifier.
    pub door_id: Uuid,
    /// Where the door is.
    pub location: Location,
}

/// Event payload variants for the access context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorEventKind {
    /// A door has been bound to its owner.
    DoorBound(DoorBound),
    /// The owner has been let through.
    AccessGranted(AccessGranted),
    /// A non-owner has been challenged for a PIN.
    AccessDenied(AccessDenied),
    /// The PIN has been replaced.
    PinChanged(PinChanged),
}

/// Domain event envelope for the access context.
#[derive(Debug, Clone)]
pub struct DoorEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: DoorEventKind,
}

impl DomainEvent for DoorEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            DoorEventKind::DoorBound(_) => DOOR_BOUND_EVENT_TYPE,
            DoorEventKind::AccessGranted(_) => ACCESS_GRANTED_EVENT_TYPE,
            DoorEventKind::AccessDenied(_) => ACCESS_DENIED_EVENT_TYPE,
            DoorEventKind::PinChanged(_) => PIN_CHANGED_EVENT_TYPE,
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("DoorEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
