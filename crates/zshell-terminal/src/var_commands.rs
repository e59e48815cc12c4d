//! Variable management commands: set, get, delete, store-all.

use zshell_types::error::{Result, ZshellError};

use crate::commands::VARIABLE_CATEGORY;
use crate::interpreter::{Arity, Command, CommandOutput, CommandRegistry, Environment};

/// Value printed by `get` for a name that was never set.
pub const NOT_SET: &str = "NOT SET";

/// Register variable management commands.
pub fn register_variable_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(SetCmd));
    reg.register(Box::new(GetCmd));
    reg.register(Box::new(DeleteCmd));
    reg.register(Box::new(StoreAllCmd));
}

// ---------------------------------------------------------------------------
// set
// ---------------------------------------------------------------------------

struct SetCmd;
impl Command for SetCmd {
    fn name(&self) -> &str {
        "set"
    }
    fn aliases(&self) -> &[&str] {
        &["zset"]
    }
    fn description(&self) -> &str {
        "Set a variable; with 'store' also save it in the startup script"
    }
    fn usage(&self) -> &str {
        "set <name> <value> [store]"
    }
    fn category(&self) -> &str {
        VARIABLE_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Range { min: 2, max: Some(3) }
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let (name, value) = (args[0], args[1]);
        let persist = match args.get(2) {
            None => false,
            Some(flag) if flag.eq_ignore_ascii_case("store") => true,
            Some(flag) => {
                return Err(ZshellError::usage(
                    self.name(),
                    format!("set: expected 'store' as third argument, got '{flag}'"),
                    self.usage(),
                ));
            },
        };

        env.store.set(name, value);
        if !persist {
            return Ok(CommandOutput::None);
        }
        env.startup.persist_one(name, value)?;
        Ok(CommandOutput::Text(format!("Variable stored {name} = {value}")))
    }
}

// ---------------------------------------------------------------------------
// get
// ---------------------------------------------------------------------------

struct GetCmd;
impl Command for GetCmd {
    fn name(&self) -> &str {
        "get"
    }
    fn aliases(&self) -> &[&str] {
        &["zget"]
    }
    fn description(&self) -> &str {
        "Print one variable, or all of them"
    }
    fn usage(&self) -> &str {
        "get [name]"
    }
    fn category(&self) -> &str {
        VARIABLE_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Range { min: 0, max: Some(1) }
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if let Some(name) = args.first() {
            let value = env.store.get(name).unwrap_or(NOT_SET);
            return Ok(CommandOutput::Text(value.to_string()));
        }
        if env.store.is_empty() {
            return Ok(CommandOutput::None);
        }
        let lines: Vec<String> = env
            .store
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect();
        Ok(CommandOutput::Text(lines.join("\n")))
    }
}

// ---------------------------------------------------------------------------
// delete
// ---------------------------------------------------------------------------

struct DeleteCmd;
impl Command for DeleteCmd {
    fn name(&self) -> &str {
        "delete"
    }
    fn aliases(&self) -> &[&str] {
        &["zdel"]
    }
    fn description(&self) -> &str {
        "Delete a variable"
    }
    fn usage(&self) -> &str {
        "delete <name>"
    }
    fn category(&self) -> &str {
        VARIABLE_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match env.store.remove(args[0]) {
            Some(_) => Ok(CommandOutput::None),
            None => Err(ZshellError::Command(format!(
                "variable not set: {}",
                args[0]
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// store-all
// ---------------------------------------------------------------------------

struct StoreAllCmd;
impl Command for StoreAllCmd {
    fn name(&self) -> &str {
        "store-all"
    }
    fn aliases(&self) -> &[&str] {
        &["zstorevar"]
    }
    fn description(&self) -> &str {
        "Save every variable in the startup script"
    }
    fn usage(&self) -> &str {
        "store-all"
    }
    fn category(&self) -> &str {
        VARIABLE_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let stored = env.startup.persist_all(env.store.iter())?;
        Ok(CommandOutput::Text(format!(
            "Stored {stored} variable(s) in {}",
            env.startup.path().display()
        )))
    }
}
