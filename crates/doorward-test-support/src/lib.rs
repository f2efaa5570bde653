//! Shared test doubles for the Doorward access-control service.

mod clock;
mod rng;

pub use clock::FixedClock;
pub use rng::{MockRng, SequenceRng};
