//! Heartline Core — shared domain abstractions.
//!
//! This crate defines the traits and types that the journey and report
//! contexts depend on. It contains no infrastructure code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
