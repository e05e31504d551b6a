//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod complete;
pub mod config_cmd;
pub mod create;
pub mod ports;
pub mod types;
