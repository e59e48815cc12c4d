//! Line-editor helper: completes command names, then file paths.

use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

pub struct ShellHelper {
    names: Vec<String>,
    files: FilenameCompleter,
}

impl ShellHelper {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            files: FilenameCompleter::new(),
        }
    }

    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        self.names
            .iter()
            .filter(|name| name.starts_with(partial))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        let start = head.len() - head.trim_start().len();
        if !head[start..].contains(char::is_whitespace) {
            return Ok((start, self.complete_command(&head[start..])));
        }
        self.files.complete(line, pos, ctx)
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}
