//! Shell configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, ZshellError};
use crate::path::expand_tilde;

/// Runtime configuration for the shell (`config.toml`).
///
/// Every field has a default, so an empty or missing file is valid.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    /// Startup script replayed at launch and rewritten by `store` requests.
    pub startup_script: PathBuf,
    /// Line-editor history file.
    pub history_file: PathBuf,
    /// Text rendered in block letters by the banner.
    pub banner_text: String,
    /// Hand unknown commands to the OS shell instead of rejecting them.
    pub default_to_shell: bool,
    /// Colour the prompt when stdout is a terminal.
    pub color_prompt: bool,
    /// Maximum number of history entries kept by the line editor.
    pub max_history: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            startup_script: PathBuf::from("~/.zshellrc"),
            history_file: PathBuf::from("~/.zshell_history"),
            banner_text: "zShell".to_string(),
            default_to_shell: false,
            color_prompt: true,
            max_history: 1000,
        }
    }
}

impl ShellConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.max_history == 0 {
            return Err(ZshellError::Config(
                "max_history must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a configuration file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Expand `~` in every path field against `home`.
    pub fn expand_paths(&mut self, home: Option<&Path>) {
        self.startup_script = expand_tilde(&self.startup_script.to_string_lossy(), home);
        self.history_file = expand_tilde(&self.history_file.to_string_lossy(), home);
    }
}
