//! pcix library - exposes modules for testing

pub mod cli;
pub mod logging;
pub mod tui;
