//! CLI command implementations.

pub mod config;
pub mod list;
pub mod show;
