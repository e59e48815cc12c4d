//! Shell session: owns the registry, the variable store and the platform.

use zshell_platform::{DesktopPlatform, DirectoryService, IdentityService, TimeService};
use zshell_terminal::{
    CommandOutput, CommandRegistry, Environment, StartupScript, VariableStore,
    register_builtins, render_banner,
};
use zshell_types::config::ShellConfig;
use zshell_types::error::Result;

use crate::prompt::format_prompt;

pub struct Shell {
    registry: CommandRegistry,
    store: VariableStore,
    startup: StartupScript,
    platform: DesktopPlatform,
    banner: String,
}

impl Shell {
    pub fn new(config: &ShellConfig, platform: DesktopPlatform) -> Self {
        let mut registry = CommandRegistry::new();
        register_builtins(&mut registry);
        registry.set_default_to_shell(config.default_to_shell);
        Self {
            registry,
            store: VariableStore::new(),
            startup: StartupScript::new(&config.startup_script),
            platform,
            banner: render_banner(&config.banner_text, env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }

    /// Every command name and alias, for tab completion.
    pub fn command_names(&self) -> Vec<String> {
        self.registry.completions("")
    }

    /// Execute one input line.
    pub fn run_line(&mut self, line: &str) -> Result<CommandOutput> {
        let clock = self.platform.clone();
        let home = self.platform.home_dir();
        let mut env = Environment {
            store: &mut self.store,
            startup: &self.startup,
            time: &clock,
            dirs: &mut self.platform,
            home,
            banner: &self.banner,
            raw_args: String::new(),
        };
        self.registry.execute(line, &mut env)
    }

    /// Replay the startup script, returning the text each line printed.
    ///
    /// A failing line is logged and skipped; replay continues with the next.
    pub fn replay_startup(&mut self) -> Result<Vec<String>> {
        let lines = self.startup.lines()?;
        log::info!(
            "replaying {} line(s) from {}",
            lines.len(),
            self.startup.path().display()
        );
        let mut printed = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            match self.run_line(line) {
                Ok(CommandOutput::Text(text)) => printed.push(text),
                Ok(CommandOutput::None) => {},
                Ok(CommandOutput::Exit) => {
                    log::warn!(
                        "{}:{}: ignoring exit in startup script",
                        self.startup.path().display(),
                        idx + 1
                    );
                },
                Err(e) => {
                    log::warn!("{}:{}: {e}", self.startup.path().display(), idx + 1);
                },
            }
        }
        Ok(printed)
    }

    /// Prompt text for the current user, time and directory.
    pub fn prompt(&self, color: bool) -> String {
        let cwd = self.platform.current_dir().unwrap_or_default();
        let time = self.platform.now().unwrap_or_default();
        format_prompt(
            &self.platform.username(),
            &self.platform.hostname(),
            time,
            &cwd,
            self.platform.home_dir().as_deref(),
            color,
        )
    }
}
