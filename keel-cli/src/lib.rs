//! Keel project scaffolding.

pub mod cli;
pub mod commands;
