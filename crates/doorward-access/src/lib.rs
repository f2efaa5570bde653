//! Doorward — door access-control bounded context.
//!
//! Binds a door location to the first player that touches it, recognises
//! that owner afterwards, and challenges everyone else for a PIN.

pub mod application;
pub mod domain;
