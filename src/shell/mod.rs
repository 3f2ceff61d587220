//! Hand-offs to the host system.
//!
//! The TUI never renders web content itself; links are passed to whatever
//! the platform uses to open URLs.

pub mod open;
