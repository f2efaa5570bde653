//! Route modules.

pub mod doors;
pub mod health;
