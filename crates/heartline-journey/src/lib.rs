//! Heartline — journey context.
//!
//! Drives the five-scene greeting card: welcome, memories, quiz, heart game
//! and the closing decision. Owns the answer accumulator and hands the final
//! report to a dispatcher without waiting on delivery.

pub mod application;
pub mod content;
pub mod domain;
