//! Built-in commands for the zShell terminal.

use zshell_types::error::Result;

use crate::interpreter::{Arity, Command, CommandOutput, CommandRegistry, Environment};

pub(crate) const CUSTOM_CATEGORY: &str = "My custom commands";
pub(crate) const SHELL_CATEGORY: &str = "Shell commands";
pub(crate) const VARIABLE_CATEGORY: &str = "Variable management commands";

/// Register all built-in commands into a registry.
pub fn register_builtins(reg: &mut CommandRegistry) {
    reg.register(Box::new(TimestampCmd));
    reg.register(Box::new(IntroCmd));
    reg.register(Box::new(EchoCmd));
    reg.register(Box::new(ExitCmd));
    crate::register_file_commands(reg);
    crate::register_variable_commands(reg);
}

// ---------------------------------------------------------------------------
// timestamp
// ---------------------------------------------------------------------------

struct TimestampCmd;
impl Command for TimestampCmd {
    fn name(&self) -> &str {
        "timestamp"
    }
    fn description(&self) -> &str {
        "Print the local time as YYYYMMDDHHMMSS"
    }
    fn usage(&self) -> &str {
        "timestamp"
    }
    fn category(&self) -> &str {
        CUSTOM_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let now = env.time.now()?;
        Ok(CommandOutput::Text(now.format("%Y%m%d%H%M%S").to_string()))
    }
}

// ---------------------------------------------------------------------------
// intro
// ---------------------------------------------------------------------------

struct IntroCmd;
impl Command for IntroCmd {
    fn name(&self) -> &str {
        "intro"
    }
    fn description(&self) -> &str {
        "Display the intro banner"
    }
    fn usage(&self) -> &str {
        "intro"
    }
    fn category(&self) -> &str {
        CUSTOM_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.banner.to_string()))
    }
}

// ---------------------------------------------------------------------------
// echo
// ---------------------------------------------------------------------------

struct EchoCmd;
impl Command for EchoCmd {
    fn name(&self) -> &str {
        "echo"
    }
    fn description(&self) -> &str {
        "Print the argument text unchanged"
    }
    fn usage(&self) -> &str {
        "echo [text...]"
    }
    fn category(&self) -> &str {
        CUSTOM_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Range { min: 0, max: None }
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.raw_args.clone()))
    }
}

// ---------------------------------------------------------------------------
// exit
// ---------------------------------------------------------------------------

struct ExitCmd;
impl Command for ExitCmd {
    fn name(&self) -> &str {
        "exit"
    }
    fn aliases(&self) -> &[&str] {
        &["quit"]
    }
    fn description(&self) -> &str {
        "Leave the shell"
    }
    fn usage(&self) -> &str {
        "exit"
    }
    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Exit)
    }
}
