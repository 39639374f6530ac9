//! logsift command-line interface
//!
//! The `logsift` binary is a thin wrapper over these modules: argument
//! parsing ([`cli`]), command handlers ([`commands`]), output rendering
//! ([`output`]), logging setup ([`logging`]) and exit-code mapping ([`error`]).

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
