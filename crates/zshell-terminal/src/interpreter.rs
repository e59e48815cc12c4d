//! Command trait, registry, and dispatch logic.
//!
//! A line is split on whitespace; the first word selects a command by name or
//! alias, and the remaining words become its argument list. Every command
//! declares an [`Arity`] which the registry checks before the command runs, so
//! a rejected invocation never touches the variable store or the filesystem.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use zshell_platform::{DirectoryService, TimeService};
use zshell_types::error::{Result, ZshellError};

use crate::store::{StartupScript, VariableStore};

/// Output produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Plain text lines.
    Text(String),
    /// Command produced no visible output.
    None,
    /// Signal to the REPL to terminate.
    Exit,
}

/// Number of arguments a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly this many arguments.
    Exact(usize),
    /// Between `min` and `max` arguments inclusive; `None` means unbounded.
    Range { min: usize, max: Option<usize> },
}

impl Arity {
    /// Whether `count` arguments satisfy this arity.
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exact(n) => count == n,
            Arity::Range { min, max } => count >= min && max.is_none_or(|max| count <= max),
        }
    }

    /// Human-readable form, e.g. "exactly 1 argument" or "2 or 3 arguments".
    pub fn describe(&self) -> String {
        match *self {
            Arity::Exact(n) => format!("exactly {n} {}", plural(n)),
            Arity::Range { min, max: None } => format!("at least {min} {}", plural(min)),
            Arity::Range { min, max: Some(max) } if max == min + 1 => {
                format!("{min} or {max} {}", plural(max))
            },
            Arity::Range { min, max: Some(max) } => format!("{min} to {max} arguments"),
        }
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "argument" } else { "arguments" }
}

/// Shared mutable state passed to every command.
pub struct Environment<'a> {
    /// The in-memory variable store.
    pub store: &'a mut VariableStore,
    /// The startup script that `store` requests write through to.
    pub startup: &'a StartupScript,
    /// Wall clock.
    pub time: &'a dyn TimeService,
    /// Working directory access.
    pub dirs: &'a mut dyn DirectoryService,
    /// Home directory used for `~` expansion.
    pub home: Option<PathBuf>,
    /// Rendered startup banner.
    pub banner: &'a str,
    /// The text after the command word, as typed. Set by the registry.
    pub raw_args: String,
}

/// A single executable command.
pub trait Command {
    /// The command name (what the user types).
    fn name(&self) -> &str;

    /// Alternative names that dispatch to this command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line description for `help`.
    fn description(&self) -> &str;

    /// Usage string (e.g. "untargz <archive> \[dest\]").
    fn usage(&self) -> &str;

    /// Command category for grouping in `help` output.
    fn category(&self) -> &str {
        "Built-in commands"
    }

    /// Accepted argument count, checked before `execute` runs.
    fn arity(&self) -> Arity;

    /// Execute the command with validated arguments.
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput>;
}

const HELP_USAGE: &str = "help [command]";

/// Registry of available commands with dispatch.
pub struct CommandRegistry {
    commands: BTreeMap<String, Box<dyn Command>>,
    aliases: HashMap<String, String>,
    default_to_shell: bool,
}

impl CommandRegistry {
    /// Create an empty command registry.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
            aliases: HashMap::new(),
            default_to_shell: false,
        }
    }

    /// Register a command. Replaces any existing command with the same name.
    pub fn register(&mut self, cmd: Box<dyn Command>) {
        let name = cmd.name().to_string();
        for alias in cmd.aliases() {
            self.aliases.insert((*alias).to_string(), name.clone());
        }
        self.commands.insert(name, cmd);
    }

    /// Hand unknown commands to the OS shell instead of rejecting them.
    pub fn set_default_to_shell(&mut self, enabled: bool) {
        self.default_to_shell = enabled;
    }

    /// Look up a command by name or alias.
    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        let canonical = self.aliases.get(name).map(String::as_str).unwrap_or(name);
        self.commands.get(canonical).map(|c| c.as_ref())
    }

    /// Parse and execute a command line.
    ///
    /// Blank lines and `#` comments produce no output.
    pub fn execute(&self, line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(CommandOutput::None);
        }

        let (name, rest) = split_command(trimmed);
        let args: Vec<&str> = rest.split_whitespace().collect();

        if name == "help" || name == "?" {
            return self.execute_help(&args);
        }

        let Some(cmd) = self.lookup(name) else {
            if self.default_to_shell {
                return execute_external(trimmed, env);
            }
            return Err(ZshellError::Command(format!("unknown command: {name}")));
        };

        let arity = cmd.arity();
        if !arity.accepts(args.len()) {
            log::debug!("{name}: rejected {} argument(s)", args.len());
            return Err(ZshellError::usage(
                cmd.name(),
                format!("{name} requires {}", arity.describe()),
                cmd.usage(),
            ));
        }

        log::debug!("dispatch {} with {} argument(s)", cmd.name(), args.len());
        env.raw_args = rest.to_string();
        cmd.execute(&args, env)
    }

    /// Built-in `help` command.
    fn execute_help(&self, args: &[&str]) -> Result<CommandOutput> {
        match args {
            [] => Ok(CommandOutput::Text(self.help_overview())),
            [name] if *name == "help" || *name == "?" => Ok(CommandOutput::Text(format!(
                "help (Built-in commands)\n  List commands or describe one\n  Usage: {HELP_USAGE}"
            ))),
            [name] => match self.lookup(name) {
                Some(cmd) => {
                    let mut out = cmd.name().to_string();
                    out.push_str(&format!(" ({})\n", cmd.category()));
                    out.push_str(&format!("  {}\n", cmd.description()));
                    if !cmd.aliases().is_empty() {
                        out.push_str(&format!("  Aliases: {}\n", cmd.aliases().join(", ")));
                    }
                    out.push_str(&format!("  Usage: {}", cmd.usage()));
                    Ok(CommandOutput::Text(out))
                },
                None => Err(ZshellError::Command(format!("unknown command: {name}"))),
            },
            _ => Err(ZshellError::usage(
                "help",
                format!("help requires {}", Arity::Range { min: 0, max: Some(1) }.describe()),
                HELP_USAGE,
            )),
        }
    }

    fn help_overview(&self) -> String {
        let mut categories: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();
        categories
            .entry("Built-in commands")
            .or_default()
            .push(("help", "List commands or describe one"));
        for cmd in self.commands.values() {
            categories
                .entry(cmd.category())
                .or_default()
                .push((cmd.name(), cmd.description()));
        }

        let mut out = String::new();
        for (cat, cmds) in &mut categories {
            cmds.sort_by_key(|(name, _)| *name);
            out.push_str(&format!("{cat}\n"));
            out.push_str(&format!("{}\n", "=".repeat(cat.len())));
            for (name, desc) in cmds.iter() {
                out.push_str(&format!("  {name:12} {desc}\n"));
            }
            out.push('\n');
        }
        out.push_str("Type 'help <command>' for details.");
        out
    }

    /// Get list of all registered commands (name, description), sorted by name.
    pub fn list_commands(&self) -> Vec<(&str, &str)> {
        self.commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect()
    }

    /// Return completions for a partial command name, aliases included.
    pub fn completions(&self, partial: &str) -> Vec<String> {
        let mut out: Vec<String> = self
            .commands
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
            .chain(["help"])
            .filter(|name| name.starts_with(partial))
            .map(str::to_string)
            .collect();
        out.sort();
        out.dedup();
        out
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a trimmed line into the command word and the raw remainder.
fn split_command(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim_start()),
        None => (line, ""),
    }
}

/// Run a line through the OS shell in the current directory.
fn execute_external(line: &str, env: &mut Environment<'_>) -> Result<CommandOutput> {
    let cwd = env.dirs.current_dir()?;
    log::debug!("passing to OS shell: {line}");

    #[cfg(windows)]
    let output = std::process::Command::new("cmd")
        .args(["/C", line])
        .current_dir(&cwd)
        .output()?;
    #[cfg(not(windows))]
    let output = std::process::Command::new("sh")
        .args(["-c", line])
        .current_dir(&cwd)
        .output()?;

    let stdout = String::from_utf8_lossy(&output.stdout).trim_end().to_string();
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim_end().to_string();
        let mut msg = format!("command failed ({})", output.status);
        if !stderr.is_empty() {
            msg.push_str(&format!(": {stderr}"));
        }
        return Err(ZshellError::Command(msg));
    }
    if stdout.is_empty() {
        Ok(CommandOutput::None)
    } else {
        Ok(CommandOutput::Text(stdout))
    }
}
