//! Heartline — report context.
//!
//! Accepts answer reports from players, stamps them with where they came from
//! and when they arrived, and records them. Anything that parses as JSON is
//! accepted verbatim.

pub mod application;
pub mod domain;
