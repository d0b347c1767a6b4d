//! Report domain model.

pub mod commands;
pub mod errors;
pub mod metadata;
pub mod report;
