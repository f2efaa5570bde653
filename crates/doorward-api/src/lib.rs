//! Doorward API — HTTP host for the access registry.
//!
//! Plays the engine's interaction hook and the administrative caller, and
//! routes door effects to structured logs.

pub mod config;
pub mod effects;
pub mod error;
pub mod routes;
pub mod state;
