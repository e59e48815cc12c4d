//! Prompt formatting.

use std::path::Path;

use chrono::NaiveDateTime;
use console::style;
use zshell_types::path::abbreviate_home;

/// `user@host HH:MM:SS <cwd> $ `, with the home directory shown as `~`.
pub fn format_prompt(
    user: &str,
    host: &str,
    time: NaiveDateTime,
    cwd: &Path,
    home: Option<&Path>,
    color: bool,
) -> String {
    let who = style(format!("{user}@{host}"))
        .green()
        .bold()
        .force_styling(color);
    let clock = style(time.format("%H:%M:%S").to_string())
        .red()
        .force_styling(color);
    let dir = style(format!("{} $", abbreviate_home(cwd, home)))
        .cyan()
        .force_styling(color);
    format!("{who} {clock} {dir} ")
}
