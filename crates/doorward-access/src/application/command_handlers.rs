//! Command handlers for the access context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: run the command against the registry, then fire
//! the engine effect that matches the outcome once the registry lock is
//! released.

use doorward_core::clock::Clock;
use doorward_core::command::Command;
use doorward_core::error::DomainError;
use tracing::{info, warn};
use uuid::Uuid;

use crate::application::effects::DoorEffects;
use crate::application::registry::AccessRegistry;
use crate::domain::commands::{Interact, SetPin};
use crate::domain::events::DoorEvent;
use crate::domain::values::{AccessDecision, Pin};

/// Result of a handled `Interact` command.
#[derive(Debug)]
pub struct InteractionResult {
    /// The door affected by the command.
    pub aggregate_id: Uuid,
    /// The decision reached.
    pub decision: AccessDecision,
    /// The events produced.
    pub events: Vec<DoorEvent>,
}

/// Result of an accepted `SetPin` command.
#[derive(Debug)]
pub struct PinChangeResult {
    /// The door affected by the command.
    pub aggregate_id: Uuid,
    /// Human-readable confirmation.
    pub message: String,
    /// The events produced.
    pub events: Vec<DoorEvent>,
}

/// Handles the `Interact` command: binds, grants, or denies, and fires the
/// matching effect.
///
/// Binding a door fires no effect. A grant opens the door. A denial prompts
/// the player for a PIN, though no operation exists to submit one.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the registry lock is poisoned.
pub fn handle_interact(
    command: &Interact,
    registry: &AccessRegistry,
    clock: &dyn Clock,
    effects: &dyn DoorEffects,
) -> Result<InteractionResult, DomainError> {
    let interaction = registry.interact(
        command.player_id,
        &command.location,
        command.correlation_id,
        clock,
    )?;

    match interaction.decision {
        AccessDecision::BoundAsOwner => {
            info!(
                correlation_id = %command.correlation_id,
                location = %command.location,
                owner = %command.player_id,
                "door bound to new owner"
            );
        }
        AccessDecision::Granted => {
            info!(
                correlation_id = %command.correlation_id,
                location = %command.location,
                "owner recognised, opening door"
            );
            effects.open_door(&command.location);
        }
        AccessDecision::DeniedNeedsPin => {
            info!(
                correlation_id = %command.correlation_id,
                location = %command.location,
                player = %command.player_id,
                "access denied, PIN required"
            );
            effects.prompt_for_pin(command.player_id, &command.location);
        }
    }

    Ok(InteractionResult {
        aggregate_id: interaction.door_id,
        decision: interaction.decision,
        events: interaction.events,
    })
}

/// Handles the `SetPin` command: validates the candidate, then replaces the
/// PIN of an existing door.
///
/// The format is checked before the location, so a malformed candidate is
/// always reported as `InvalidFormat`.
///
/// # Errors
///
/// Returns `DomainError::InvalidFormat` if the candidate is not four digits,
/// `DomainError::UnknownLocation` if no door is bound at the location, or
/// `DomainError::Infrastructure` if the registry lock is poisoned. Nothing is
/// changed in any of these cases.
pub fn handle_set_pin(
    command: &SetPin,
    registry: &AccessRegistry,
    clock: &dyn Clock,
) -> Result<PinChangeResult, DomainError> {
    let outcome = Pin::parse(&command.candidate).and_then(|pin| {
        registry.set_pin(&command.location, pin, command.correlation_id, clock)
    });

    match outcome {
        Ok((aggregate_id, events)) => {
            let message = format!("PIN updated for door at {}", command.subject());
            info!(correlation_id = %command.correlation_id, "{message}");
            Ok(PinChangeResult {
                aggregate_id,
                message,
                events,
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %command.correlation_id,
                command = command.command_type(),
                location = %command.subject(),
                error = %err,
                "PIN change rejected"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use doorward_core::error::DomainError;
    use doorward_core::event::DomainEvent;
    use doorward_test_support::{FixedClock, MockRng};
    use uuid::Uuid;

    use crate::application::command_handlers::{handle_interact, handle_set_pin};
    use crate::application::effects::recording::{Effect, RecordingEffects};
    use crate::application::registry::AccessRegistry;
    use crate::domain::commands::{Interact, SetPin};
    use crate::domain::events::{
        ACCESS_DENIED_EVENT_TYPE, ACCESS_GRANTED_EVENT_TYPE, DOOR_BOUND_EVENT_TYPE,
        PIN_CHANGED_EVENT_TYPE,
    };
    use crate::domain::policy::DefaultPinPolicy;
    use crate::domain::values::{AccessDecision, Location};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn registry() -> AccessRegistry {
        AccessRegistry::new(DefaultPinPolicy::default(), Box::new(MockRng))
    }

    fn interact(player: Uuid, location: &str) -> Interact {
        Interact::from_raw(Uuid::new_v4(), &player.to_string(), location).unwrap()
    }

    fn set_pin(location: &str, candidate: &str) -> SetPin {
        SetPin {
            correlation_id: Uuid::new_v4(),
            location: Location::parse(location).unwrap(),
            candidate: candidate.to_owned(),
        }
    }

    fn current_pin(registry: &AccessRegistry, location: &str) -> String {
        registry
            .inspect(&Location::parse(location).unwrap(), |door| {
                door.pin().as_str().to_owned()
            })
            .unwrap()
    }

    #[test]
    fn test_handle_interact_binds_first_toucher_without_effects() {
        // Arrange
        let registry = registry();
        let effects = RecordingEffects::default();
        let owner = Uuid::new_v4();
        let command = interact(owner, "10,5,10");

        // Act
        let result = handle_interact(&command, &registry, &clock(), &effects).unwrap();

        // Assert
        assert_eq!(result.decision, AccessDecision::BoundAsOwner);
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].event_type(), DOOR_BOUND_EVENT_TYPE);
        assert_eq!(
            result.events[0].metadata().correlation_id,
            command.correlation_id
        );
        assert!(effects.calls().is_empty());
        let recorded_owner = registry
            .inspect(&command.location, |door| door.owner().as_uuid())
            .unwrap();
        assert_eq!(recorded_owner, owner);
    }

    #[test]
    fn test_handle_interact_grants_owner_every_time() {
        // Arrange
        let registry = registry();
        let effects = RecordingEffects::default();
        let owner = Uuid::new_v4();
        handle_interact(&interact(owner, "10,5,10"), &registry, &clock(), &effects).unwrap();

        // Act
        let decisions: Vec<AccessDecision> = (0..3)
            .map(|_| {
                handle_interact(&interact(owner, "10,5,10"), &registry, &clock(), &effects)
                    .unwrap()
                    .decision
            })
            .collect();

        // Assert
        assert!(decisions.iter().all(|d| *d == AccessDecision::Granted));
        let location = Location::parse("10,5,10").unwrap();
        assert_eq!(effects.calls(), vec![Effect::Opened(location); 3]);
    }

    #[test]
    fn test_handle_interact_prompts_non_owner_and_leaves_door_unchanged() {
        // Arrange
        let registry = registry();
        let effects = RecordingEffects::default();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        handle_interact(&interact(owner, "10,5,10"), &registry, &clock(), &effects).unwrap();
        let command = interact(stranger, "10,5,10");

        // Act
        let result = handle_interact(&command, &registry, &clock(), &effects).unwrap();

        // Assert
        assert_eq!(result.decision, AccessDecision::DeniedNeedsPin);
        assert_eq!(result.events[0].event_type(), ACCESS_DENIED_EVENT_TYPE);
        assert_eq!(
            effects.calls(),
            vec![Effect::Prompted(command.player_id, command.location.clone())]
        );
        let (recorded_owner, pin) = registry
            .inspect(&command.location, |door| {
                (door.owner().as_uuid(), door.pin().as_str().to_owned())
            })
            .unwrap();
        assert_eq!(recorded_owner, owner);
        assert_eq!(pin, "1234");
    }

    #[test]
    fn test_handle_interact_treats_respaced_coordinates_as_same_door() {
        // Arrange
        let registry = registry();
        let effects = RecordingEffects::default();
        let owner = Uuid::new_v4();
        handle_interact(&interact(owner, "10,5,10"), &registry, &clock(), &effects).unwrap();

        // Act
        let result =
            handle_interact(&interact(owner, " 10 , 5, 10"), &registry, &clock(), &effects)
                .unwrap();

        // Assert
        assert_eq!(result.decision, AccessDecision::Granted);
        assert_eq!(result.events[0].event_type(), ACCESS_GRANTED_EVENT_TYPE);
        assert_eq!(registry.door_count().unwrap(), 1);
    }

    #[test]
    fn test_handle_set_pin_accepts_four_digits() {
        // Arrange
        let registry = registry();
        let effects = RecordingEffects::default();
        handle_interact(
            &interact(Uuid::new_v4(), "10,5,10"),
            &registry,
            &clock(),
            &effects,
        )
        .unwrap();

        // Act
        let result = handle_set_pin(&set_pin("10,5,10", "9999"), &registry, &clock()).unwrap();

        // Assert
        assert_eq!(result.message, "PIN updated for door at 10,5,10");
        assert_eq!(result.events.len(), 1);
        assert_eq!(result.events[0].event_type(), PIN_CHANGED_EVENT_TYPE);
        assert_eq!(current_pin(&registry, "10,5,10"), "9999");
    }

    #[test]
    fn test_handle_set_pin_rejects_malformed_candidates_without_mutation() {
        // Arrange
        let registry = registry();
        let effects = RecordingEffects::default();
        handle_interact(
            &interact(Uuid::new_v4(), "10,5,10"),
            &registry,
            &clock(),
            &effects,
        )
        .unwrap();

        for candidate in ["12a4", "12345", "", "99"] {
            // Act
            let result = handle_set_pin(&set_pin("10,5,10", candidate), &registry, &clock());

            // Assert
            assert_eq!(result.unwrap_err(), DomainError::InvalidFormat);
            assert_eq!(current_pin(&registry, "10,5,10"), "1234");
        }
    }

    #[test]
    fn test_handle_set_pin_rejects_unknown_location() {
        let registry = registry();

        let result = handle_set_pin(&set_pin("unknown-loc", "1234"), &registry, &clock());

        assert_eq!(
            result.unwrap_err(),
            DomainError::UnknownLocation("unknown-loc".to_owned())
        );
    }

    #[test]
    fn test_handle_set_pin_reports_format_before_location() {
        let registry = registry();

        let result = handle_set_pin(&set_pin("unknown-loc", "12a4"), &registry, &clock());

        assert_eq!(result.unwrap_err(), DomainError::InvalidFormat);
    }

    #[test]
    fn test_handle_set_pin_is_idempotent_for_same_candidate() {
        let registry = registry();
        let effects = RecordingEffects::default();
        handle_interact(&interact(Uuid::new_v4(), "1,1,1"), &registry, &clock(), &effects)
            .unwrap();

        handle_set_pin(&set_pin("1,1,1", "4321"), &registry, &clock()).unwrap();
        handle_set_pin(&set_pin("1,1,1", "4321"), &registry, &clock()).unwrap();

        assert_eq!(current_pin(&registry, "1,1,1"), "4321");
    }

    #[test]
    fn test_owner_stranger_admin_scenario() {
        // Arrange
        let registry = registry();
        let effects = RecordingEffects::default();
        let clock = clock();
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();

        // Act / Assert
        let first = handle_interact(&interact(u1, "10,5,10"), &registry, &clock, &effects).unwrap();
        assert_eq!(first.decision, AccessDecision::BoundAsOwner);

        let again = handle_interact(&interact(u1, "10,5,10"), &registry, &clock, &effects).unwrap();
        assert_eq!(again.decision, AccessDecision::Granted);

        let other = handle_interact(&interact(u2, "10,5,10"), &registry, &clock, &effects).unwrap();
        assert_eq!(other.decision, AccessDecision::DeniedNeedsPin);

        handle_set_pin(&set_pin("10,5,10", "9999"), &registry, &clock).unwrap();
        assert_eq!(current_pin(&registry, "10,5,10"), "9999");

        let rejected = handle_set_pin(&set_pin("10,5,10", "99"), &registry, &clock);
        assert_eq!(rejected.unwrap_err(), DomainError::InvalidFormat);
        assert_eq!(current_pin(&registry, "10,5,10"), "9999");
    }
}
