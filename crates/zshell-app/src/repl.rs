//! REPL (Read-Eval-Print Loop) over the rustyline editor.

use std::path::PathBuf;

use anyhow::Result;
use console::{Term, style};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use zshell_terminal::CommandOutput;
use zshell_types::config::ShellConfig;

use crate::helper::ShellHelper;
use crate::shell::Shell;

/// REPL state and configuration.
pub struct Repl {
    shell: Shell,
    editor: Editor<ShellHelper, DefaultHistory>,
    history_file: PathBuf,
    color: bool,
}

impl Repl {
    pub fn new(shell: Shell, config: &ShellConfig) -> Result<Self> {
        let editor_config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .max_history_size(config.max_history)?
            .completion_type(CompletionType::List)
            .build();

        let mut editor = Editor::with_config(editor_config)?;
        editor.set_helper(Some(ShellHelper::new(shell.command_names())));

        if config.history_file.exists()
            && let Err(e) = editor.load_history(&config.history_file)
        {
            log::warn!(
                "could not load history from {}: {e}",
                config.history_file.display()
            );
        }

        Ok(Self {
            shell,
            editor,
            history_file: config.history_file.clone(),
            color: config.color_prompt && Term::stdout().is_term(),
        })
    }

    /// Run the REPL loop until `exit` or end of input.
    pub fn run(&mut self, startup_output: &[String]) -> Result<()> {
        println!("{}", self.shell.banner());
        for text in startup_output {
            println!("{text}");
        }

        loop {
            let prompt = self.shell.prompt(self.color);

            match self.editor.readline(&prompt) {
                Ok(line) => match self.shell.run_line(&line) {
                    Ok(CommandOutput::Text(text)) => println!("{text}"),
                    Ok(CommandOutput::None) => {},
                    Ok(CommandOutput::Exit) => break,
                    Err(e) => self.print_error(&e.to_string()),
                },
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C clears the line but keeps the shell running.
                    println!("^C");
                    continue;
                },
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                },
                Err(e) => {
                    self.save_history();
                    return Err(e.into());
                },
            }
        }

        self.save_history();
        Ok(())
    }

    fn save_history(&mut self) {
        if let Some(parent) = self.history_file.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            log::warn!("could not create {}: {e}", parent.display());
            return;
        }
        if let Err(e) = self.editor.save_history(&self.history_file) {
            log::warn!(
                "could not save history to {}: {e}",
                self.history_file.display()
            );
        }
    }

    fn print_error(&self, msg: &str) {
        eprintln!("{}", style(format!("error: {msg}")).red().force_styling(self.color));
    }
}
