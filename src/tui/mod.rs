//! TUI signal inspector.
//!
//! Provides an interactive terminal view of a program with:
//! - Per-word decode listing, faults highlighted
//! - Full control-signal panel for the selected word
//! - Field breakdown of the selected instruction

mod app;
mod ui;

pub use app::{InspectorApp, run_inspector};
