//! Subcommand implementations.

pub mod query;
pub mod serve;
pub mod show;
pub mod status;
