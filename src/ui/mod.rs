//! UI / rendering layer.  Everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and application state and
//! turns them into cells on the terminal.  No I/O happens here.

pub mod carousel;
pub mod charts;
pub mod footer;
pub mod layout;
pub mod nav;
pub mod pages;
pub mod popup;
pub mod spinner;
pub mod theme;
