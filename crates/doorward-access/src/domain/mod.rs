//! Domain model for the access context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod policy;
pub mod values;
