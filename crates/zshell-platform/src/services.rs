//! Platform service traits and desktop implementation.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use zshell_types::error::{Result, ZshellError};

// ---------------------------------------------------------------------------
// Time service
// ---------------------------------------------------------------------------

/// Abstraction over the wall clock.
pub trait TimeService {
    /// Current local wall-clock time.
    fn now(&self) -> Result<NaiveDateTime>;
}

// ---------------------------------------------------------------------------
// Identity service
// ---------------------------------------------------------------------------

/// Who and where the shell is running, for the prompt and `~` expansion.
pub trait IdentityService {
    /// Login name of the current user.
    fn username(&self) -> String;

    /// Host name of the machine.
    fn hostname(&self) -> String;

    /// Home directory, if one can be determined.
    fn home_dir(&self) -> Option<PathBuf>;
}

// ---------------------------------------------------------------------------
// Directory service
// ---------------------------------------------------------------------------

/// Access to the working directory.
pub trait DirectoryService {
    /// The current working directory.
    fn current_dir(&self) -> Result<PathBuf>;

    /// Change the working directory.
    fn change_dir(&mut self, path: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Desktop implementation
// ---------------------------------------------------------------------------

/// Services backed by the host OS process.
///
/// `change_dir` changes the working directory of the whole process.
#[derive(Debug, Clone)]
pub struct DesktopPlatform {
    home: Option<PathBuf>,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Use an explicit home directory instead of the user's real one.
    pub fn with_home(home: Option<PathBuf>) -> Self {
        Self { home }
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeService for DesktopPlatform {
    fn now(&self) -> Result<NaiveDateTime> {
        Ok(Local::now().naive_local())
    }
}

impl IdentityService for DesktopPlatform {
    fn username(&self) -> String {
        ["USER", "USERNAME", "LOGNAME"]
            .iter()
            .find_map(|key| std::env::var(key).ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "user".to_string())
    }

    fn hostname(&self) -> String {
        if let Ok(name) = std::env::var("HOSTNAME")
            && !name.is_empty()
        {
            return name;
        }
        std::fs::read_to_string("/etc/hostname")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "localhost".to_string())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }
}

impl DirectoryService for DesktopPlatform {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(std::env::current_dir()?)
    }

    fn change_dir(&mut self, path: &Path) -> Result<()> {
        std::env::set_current_dir(path)
            .map_err(|e| ZshellError::Platform(format!("{}: {e}", path.display())))?;
        log::debug!("working directory is now {}", path.display());
        Ok(())
    }
}
