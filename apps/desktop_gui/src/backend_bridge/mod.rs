//! Bridge between the UI command queue and the network worker.

pub mod commands;
pub mod runtime;
