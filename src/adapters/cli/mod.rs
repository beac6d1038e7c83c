//! CLI Adapter
//!
//! Command-line interface for the equity ticker.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::CliApp;

/// Parse the process arguments
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
