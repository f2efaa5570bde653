//! Aggregate root abstraction.

use uuid::Uuid;

use crate::event::DomainEvent;

/// Trait for aggregate roots that record the events their commands produce.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate produces and consumes.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> Uuid;

    /// Returns the current version (number of events applied).
    fn version(&self) -> i64;

    /// Apply an event to mutate internal state.
    fn apply(&mut self, event: &Self::Event);

    /// Returns events produced by command handling that have not been
    /// taken by the caller yet.
    fn uncommitted_events(&self) -> &[Self::Event];

    /// Applies every pending event and hands them to the caller.
    fn commit(&mut self) -> Vec<Self::Event>;
}
