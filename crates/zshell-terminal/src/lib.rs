//! Command interpreter and terminal subsystem.
//!
//! The terminal is a registry-based dispatch system. Commands implement the
//! `Command` trait, declare how many arguments they take, and are registered
//! by name. The interpreter splits input lines, resolves the command name,
//! checks the argument count, and dispatches `execute()`.

mod banner;
mod commands;
mod file_commands;
mod interpreter;
mod store;
mod var_commands;

#[cfg(test)]
mod testing;

/// Render the block-letter startup banner.
pub use banner::render_banner;
/// Register all built-in commands into a registry.
pub use commands::register_builtins;
/// Register cd, pwd, targz and untargz into a registry.
pub use file_commands::{create_archive, extract_archive, register_file_commands};
/// Accepted argument count of a command.
pub use interpreter::Arity;
/// A single executable command trait.
pub use interpreter::Command;
/// Output produced by a command.
pub use interpreter::CommandOutput;
/// Registry of available commands with dispatch.
pub use interpreter::CommandRegistry;
/// Shared mutable environment passed to every command.
pub use interpreter::Environment;
/// Variable store and startup-script persistence.
pub use store::{StartupScript, VariableStore, set_line_target};
/// Register set, get, delete and store-all into a registry.
pub use var_commands::{NOT_SET, register_variable_commands};
