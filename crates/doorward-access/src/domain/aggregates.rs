//! Aggregate roots for the access context.

use doorward_core::aggregate::AggregateRoot;
use doorward_core::clock::Clock;
use doorward_core::event::EventMetadata;
use uuid::Uuid;

use super::events::{
    ACCESS_DENIED_EVENT_TYPE, ACCESS_GRANTED_EVENT_TYPE, AccessDenied, AccessGranted,
    DOOR_BOUND_EVENT_TYPE, DoorBound, DoorEvent, DoorEventKind, PIN_CHANGED_EVENT_TYPE,
    PinChanged,
};
use super::values::{AccessDecision, Location, PlayerId, Pin};

/// Namespace for deriving door IDs from canonical locations.
const DOOR_NAMESPACE: Uuid = Uuid::from_u128(0x6f1c_2b7e_9d4a_4c1b_8e3f_5a2d_7c9b_0e41);

/// Returns the stable aggregate ID of the door at `location`.
#[must_use]
pub fn door_id_for(location: &Location) -> Uuid {
    Uuid::new_v5(&DOOR_NAMESPACE, location.to_string().as_bytes())
}

/// The aggregate root for a bound door.
///
/// A `Door` only exists once someone has touched it, so it always has an
/// owner. The owner is fixed at binding; only the PIN changes afterwards.
#[derive(Debug)]
pub struct Door {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    location: Location,
    owner: PlayerId,
    pin: Pin,
    pin_is_default: bool,
    /// Events produced by commands that the caller has not taken yet.
    uncommitted_events: Vec<DoorEvent>,
}

impl Door {
    /// Binds a door to the first player that touched it, producing a
    /// `DoorBound` event.
    #[must_use]
    pub fn bind(
        location: Location,
        owner: PlayerId,
        initial_pin: Pin,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Self {
        let id = door_id_for(&location);
        let mut door = Self {
            id,
            version: 0,
            location,
            owner,
            pin: initial_pin,
            pin_is_default: true,
            uncommitted_events: Vec::new(),
        };
        let kind = DoorEventKind::DoorBound(DoorBound {
            door_id: id,
            location: door.location.clone(),
            owner,
        });
        door.record(DOOR_BOUND_EVENT_TYPE, kind, correlation_id, clock);
        door
    }

    /// Decides whether `player` may pass, producing `AccessGranted` for the
    /// owner and `AccessDenied` for anyone else.
    pub fn admit(
        &mut self,
        player: PlayerId,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> AccessDecision {
        if player == self.owner {
            let kind = DoorEventKind::AccessGranted(AccessGranted {
                door_id: self.id,
                location: self.location.clone(),
                player,
            });
            self.record(ACCESS_GRANTED_EVENT_TYPE, kind, correlation_id, clock);
            AccessDecision::Granted
        } else {
            let kind = DoorEventKind::AccessDenied(AccessDenied {
                door_id: self.id,
                location: self.location.clone(),
                player,
            });
            self.record(ACCESS_DENIED_EVENT_TYPE, kind, correlation_id, clock);
            AccessDecision::DeniedNeedsPin
        }
    }

    /// Replaces the PIN, producing a `PinChanged` event. Resubmitting the
    /// current PIN is accepted and recorded like any other change.
    pub fn change_pin(&mut self, pin: Pin, correlation_id: Uuid, clock: &dyn Clock) {
        self.pin = pin;
        self.pin_is_default = false;
        let kind = DoorEventKind::PinChanged(PinChanged {
            door_id: self.id,
            location: self.location.clone(),
        });
        self.record(PIN_CHANGED_EVENT_TYPE, kind, correlation_id, clock);
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    /// Whether the PIN is still the one issued at binding.
    #[must_use]
    pub fn pin_is_default(&self) -> bool {
        self.pin_is_default
    }

    /// Returns the next sequence number for a new event.
    #[allow(clippy::cast_possible_wrap)]
    fn next_sequence_number(&self) -> i64 {
        self.version + self.uncommitted_events.len() as i64 + 1
    }

    fn record(
        &mut self,
        event_type: &str,
        kind: DoorEventKind,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) {
        let metadata = EventMetadata::caused_by_command(
            event_type,
            self.id,
            self.next_sequence_number(),
            correlation_id,
            clock.now(),
        );
        self.uncommitted_events.push(DoorEvent { metadata, kind });
    }
}

impl AggregateRoot for Door {
    type Event = DoorEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, _event: &Self::Event) {
        // Owner and PIN are set by the commands themselves.
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn commit(&mut self) -> Vec<Self::Event> {
        let events = std::mem::take(&mut self.uncommitted_events);
        for event in &events {
            self.apply(event);
        }
        events
    }
}
