//! Journey application layer.

pub mod command_handlers;
pub mod controller;
pub mod dispatch;
pub mod query_handlers;
pub mod timers;
