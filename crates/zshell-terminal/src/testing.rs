//! Test doubles shared by the command test modules.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use zshell_platform::{DirectoryService, TimeService};
use zshell_types::error::{Result, ZshellError};

use crate::interpreter::Environment;
use crate::store::{StartupScript, VariableStore};

/// Clock frozen at 2026-02-13 14:30:45.
pub struct FixedClock(pub NaiveDateTime);

impl Default for FixedClock {
    fn default() -> Self {
        let time = NaiveDate::from_ymd_opt(2026, 2, 13)
            .and_then(|d| d.and_hms_opt(14, 30, 45))
            .unwrap();
        Self(time)
    }
}

impl TimeService for FixedClock {
    fn now(&self) -> Result<NaiveDateTime> {
        Ok(self.0)
    }
}

/// Working directory that never touches the process state.
pub struct MemoryDirs {
    pub cwd: PathBuf,
    pub fail_with: Option<String>,
}

impl DirectoryService for MemoryDirs {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.cwd.clone())
    }

    fn change_dir(&mut self, path: &Path) -> Result<()> {
        if let Some(msg) = &self.fail_with {
            return Err(ZshellError::Platform(msg.clone()));
        }
        self.cwd = path.to_path_buf();
        Ok(())
    }
}

/// A temp directory with a store, a startup script and fake services.
pub struct Fixture {
    pub tmp: tempfile::TempDir,
    pub store: VariableStore,
    pub script: StartupScript,
    pub clock: FixedClock,
    pub dirs: MemoryDirs,
    pub home: PathBuf,
    pub banner: String,
}

impl Fixture {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        Self {
            script: StartupScript::new(home.join(".zshellrc")),
            dirs: MemoryDirs {
                cwd: tmp.path().to_path_buf(),
                fail_with: None,
            },
            store: VariableStore::new(),
            clock: FixedClock::default(),
            banner: "BANNER".to_string(),
            home,
            tmp,
        }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn env(&mut self) -> Environment<'_> {
        Environment {
            store: &mut self.store,
            startup: &self.script,
            time: &self.clock,
            dirs: &mut self.dirs,
            home: Some(self.home.clone()),
            banner: &self.banner,
            raw_args: String::new(),
        }
    }

    /// Contents of the startup script, or `None` if it was never created.
    pub fn script_text(&self) -> Option<String> {
        std::fs::read_to_string(self.script.path()).ok()
    }
}
