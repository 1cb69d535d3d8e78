//! CLI command implementations.

pub mod common;
pub mod config;
pub mod devices;
pub mod instruments;
pub mod play;
pub mod render;
