//! Heartline terminal player.
//!
//! Plays a card scene by scene on a terminal and delivers the final answer
//! report to the report server without ever waiting on it.

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod transport;
