//! zShell entry point.
//!
//! Loads the configuration, replays the startup script, then either runs the
//! `-c` command lines and exits or enters the interactive REPL.

mod helper;
mod prompt;
mod repl;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use zshell_platform::{DesktopPlatform, IdentityService};
use zshell_terminal::CommandOutput;
use zshell_types::config::ShellConfig;

use repl::Repl;
use shell::Shell;

/// zShell - an interactive command shell with persistent variables
#[derive(Parser)]
#[command(name = "zshell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/zshell/config.toml)
    #[arg(long, env = "ZSHELL_CONFIG")]
    config: Option<PathBuf>,

    /// Startup script to replay and to store variables in
    #[arg(long, value_name = "PATH")]
    startup_script: Option<PathBuf>,

    /// Do not replay the startup script
    #[arg(long)]
    no_startup: bool,

    /// Line-editor history file
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Run a command line and exit (repeatable)
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("zshell").join("config.toml"))
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let platform = DesktopPlatform::new();
    let mut config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => ShellConfig::load(&path)?,
        None => ShellConfig::default(),
    };
    if let Some(path) = cli.startup_script {
        config.startup_script = path;
    }
    if let Some(path) = cli.history_file {
        config.history_file = path;
    }
    config.expand_paths(platform.home_dir().as_deref());
    log::info!("startup script: {}", config.startup_script.display());

    let mut shell = Shell::new(&config, platform);
    let startup_output = if cli.no_startup {
        Vec::new()
    } else {
        shell.replay_startup()?
    };

    if !cli.commands.is_empty() {
        for text in &startup_output {
            println!("{text}");
        }
        return Ok(run_batch(&mut shell, &cli.commands));
    }

    let mut repl = Repl::new(shell, &config)?;
    repl.run(&startup_output)?;
    Ok(ExitCode::SUCCESS)
}

/// Run `-c` lines in order. Any failing line makes the exit status 1.
fn run_batch(shell: &mut Shell, lines: &[String]) -> ExitCode {
    let mut failed = false;
    for line in lines {
        match shell.run_line(line) {
            Ok(CommandOutput::Text(text)) => println!("{text}"),
            Ok(CommandOutput::None) => {},
            Ok(CommandOutput::Exit) => break,
            Err(e) => {
                eprintln!("error: {e}");
                failed = true;
            },
        }
    }
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
