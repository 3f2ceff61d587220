//! Application orchestration: state, events and input handling.

pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
pub mod stats_runtime;
