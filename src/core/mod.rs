//! Core logic – theme store, carousel cursor, site content, stats parsing
//! and the headline animation.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod carousel;
pub mod content;
pub mod stats;
pub mod theme;
pub mod typewriter;
