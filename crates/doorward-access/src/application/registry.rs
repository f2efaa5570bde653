//! The access registry: the in-memory map from location to bound door.
//!
//! One registry is created per hosting session and dropped with it. Every
//! operation takes the single registry lock for its whole duration, so the
//! check-then-bind step on first touch is atomic and the first player to
//! reach an unbound door always wins it.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use doorward_core::aggregate::AggregateRoot;
use doorward_core::clock::Clock;
use doorward_core::error::DomainError;
use doorward_core::rng::DeterministicRng;
use uuid::Uuid;

use crate::domain::aggregates::Door;
use crate::domain::events::DoorEvent;
use crate::domain::policy::DefaultPinPolicy;
use crate::domain::values::{AccessDecision, Location, Pin, PlayerId};

/// What happened when a player touched a door.
#[derive(Debug)]
pub struct Interaction {
    /// The door that was touched.
    pub door_id: Uuid,
    /// The decision reached.
    pub decision: AccessDecision,
    /// Events produced by the decision.
    pub events: Vec<DoorEvent>,
}

struct RegistryState {
    doors: HashMap<Location, Door>,
    rng: Box<dyn DeterministicRng>,
}

/// Owns every bound door for the lifetime of a hosting session.
pub struct AccessRegistry {
    state: Mutex<RegistryState>,
    pin_policy: DefaultPinPolicy,
}

impl AccessRegistry {
    /// Creates an empty registry. `rng` is only consulted when the policy
    /// is `DefaultPinPolicy::Random`.
    #[must_use]
    pub fn new(pin_policy: DefaultPinPolicy, rng: Box<dyn DeterministicRng>) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                doors: HashMap::new(),
                rng,
            }),
            pin_policy,
        }
    }

    /// Binds the door at `location` to `player` if it is unbound, otherwise
    /// decides whether `player` is its owner.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn interact(
        &self,
        player: PlayerId,
        location: &Location,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Interaction, DomainError> {
        let mut guard = self.lock()?;
        let RegistryState { doors, rng } = &mut *guard;

        let (door, decision) = match doors.entry(location.clone()) {
            Entry::Vacant(slot) => {
                let pin = self.pin_policy.issue(&mut **rng);
                let door = Door::bind(location.clone(), player, pin, correlation_id, clock);
                (slot.insert(door), AccessDecision::BoundAsOwner)
            }
            Entry::Occupied(slot) => {
                let door = slot.into_mut();
                let decision = door.admit(player, correlation_id, clock);
                (door, decision)
            }
        };

        Ok(Interaction {
            door_id: door.id,
            decision,
            events: door.commit(),
        })
    }

    /// Replaces the PIN of the door at `location`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownLocation` if no door is bound there, or
    /// `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn set_pin(
        &self,
        location: &Location,
        pin: Pin,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(Uuid, Vec<DoorEvent>), DomainError> {
        let mut guard = self.lock()?;
        let door = guard
            .doors
            .get_mut(location)
            .ok_or_else(|| DomainError::UnknownLocation(location.to_string()))?;
        door.change_pin(pin, correlation_id, clock);
        Ok((door.id, door.commit()))
    }

    /// Runs `read` against the door at `location` while holding the lock.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownLocation` if no door is bound there, or
    /// `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn inspect<T>(
        &self,
        location: &Location,
        read: impl FnOnce(&Door) -> T,
    ) -> Result<T, DomainError> {
        let guard = self.lock()?;
        guard
            .doors
            .get(location)
            .map(read)
            .ok_or_else(|| DomainError::UnknownLocation(location.to_string()))
    }

    /// Returns how many doors are bound.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
    pub fn door_count(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.doors.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, DomainError> {
        self.state
            .lock()
            .map_err(|_| DomainError::Infrastructure("door registry lock poisoned".to_owned()))
    }
}

impl fmt::Debug for AccessRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessRegistry")
            .field("pin_policy", &self.pin_policy)
            .finish_non_exhaustive()
    }
}
