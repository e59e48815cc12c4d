//! Error types for zShell.

use std::io;

/// Errors produced by zShell.
#[derive(Debug, thiserror::Error)]
pub enum ZshellError {
    /// A command was invoked with arguments it does not accept.
    #[error("{message}\nUsage: {usage}")]
    Usage {
        command: String,
        message: String,
        usage: String,
    },

    #[error("{0}")]
    Command(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl ZshellError {
    /// Build a usage error for `command`.
    pub fn usage(command: &str, message: impl Into<String>, usage: &str) -> Self {
        Self::Usage {
            command: command.to_string(),
            message: message.into(),
            usage: usage.to_string(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ZshellError>;
