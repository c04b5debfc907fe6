//! Command-line interface for library-extender.
//!
//! Search, download and look up metadata without launching the GUI.

mod commands;

pub use commands::{Cli, Commands, run_command};
