//! Report application layer.

pub mod command_handlers;
pub mod ports;
pub mod sinks;
