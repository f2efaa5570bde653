//! Application services for the access context.

pub mod command_handlers;
pub mod effects;
pub mod query_handlers;
pub mod registry;
