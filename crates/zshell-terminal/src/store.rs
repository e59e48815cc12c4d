//! Variable store and its startup-script persistence.
//!
//! The store is a small ordered name/value map. Nothing is persisted
//! automatically: `set ... store` rewrites the startup script for one name and
//! `store-all` rewrites every `set` line at once. In both cases the fresh
//! lines go first and every other line of the script is kept in order.
//!
//! Rewrites are not atomic. A crash mid-write can leave a truncated script.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use zshell_types::error::Result;

/// Command words recognised as variable assignments in the startup script.
const SET_WORDS: [&str; 2] = ["set", "zset"];

/// In-memory variables, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableStore {
    entries: Vec<(String, String)>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`. An existing name keeps its position.
    pub fn set(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Remove `name`, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The per-user startup script, replayed as commands at launch.
#[derive(Debug, Clone)]
pub struct StartupScript {
    path: PathBuf,
}

impl StartupScript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the script as lines. A missing script is empty.
    pub fn lines(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Create the script (and its parent directories) if missing.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        File::create(&self.path)?;
        log::info!("created startup script {}", self.path.display());
        Ok(())
    }

    /// Persist one variable: drop its old `set` lines, prepend the new one.
    pub fn persist_one(&self, name: &str, value: &str) -> Result<()> {
        self.ensure_exists()?;
        let mut lines = vec![set_line(name, value)];
        lines.extend(
            self.lines()?
                .into_iter()
                .filter(|line| !set_line_names(line, name)),
        );
        self.write_lines(&lines)?;
        log::info!("stored {name} in {}", self.path.display());
        Ok(())
    }

    /// Persist every entry: drop all `set` lines, prepend one per entry.
    pub fn persist_all<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<usize> {
        self.ensure_exists()?;
        let mut lines: Vec<String> = entries
            .into_iter()
            .map(|(name, value)| set_line(name, value))
            .collect();
        let stored = lines.len();
        lines.extend(
            self.lines()?
                .into_iter()
                .filter(|line| set_line_target(line).is_none()),
        );
        self.write_lines(&lines)?;
        log::info!("stored {stored} variable(s) in {}", self.path.display());
        Ok(stored)
    }

    fn write_lines(&self, lines: &[String]) -> Result<()> {
        let mut out = BufWriter::new(File::create(&self.path)?);
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()?;
        Ok(())
    }
}

fn set_line(name: &str, value: &str) -> String {
    format!("set {name} {value}")
}

/// If `line` is a variable assignment, the name it assigns.
///
/// Matches `set` and `zset` case-insensitively (full Unicode lowercasing). A bare `set` with no name
/// still counts as an assignment line and yields an empty name.
pub fn set_line_target(line: &str) -> Option<&str> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let first = first.to_lowercase();
    if !SET_WORDS.contains(&first.as_str()) {
        return None;
    }
    Some(words.next().unwrap_or(""))
}

fn set_line_names(line: &str, name: &str) -> bool {
    let name = name.to_lowercase();
    set_line_target(line).is_some_and(|target| target.to_lowercase() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn script_in(dir: &tempfile::TempDir) -> StartupScript {
        StartupScript::new(dir.path().join(".zshellrc"))
    }

    #[test]
    fn set_then_get() {
        let mut store = VariableStore::new();
        store.set("color", "blue");
        assert_eq!(store.get("color"), Some("blue"));
        assert_eq!(store.get("Color"), None);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut store = VariableStore::new();
        store.set("a", "1");
        store.set("b", "2");
        store.set("a", "3");
        let all: Vec<_> = store.iter().collect();
        assert_eq!(all, vec![("a", "3"), ("b", "2")]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_returns_value() {
        let mut store = VariableStore::new();
        store.set("a", "1");
        assert_eq!(store.remove("a"), Some("1".to_string()));
        assert_eq!(store.remove("a"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn set_line_target_recognises_assignments() {
        assert_eq!(set_line_target("set color blue"), Some("color"));
        assert_eq!(set_line_target("SET Color blue"), Some("Color"));
        assert_eq!(set_line_target("zset legacy 1"), Some("legacy"));
        assert_eq!(set_line_target("set"), Some(""));
        assert_eq!(set_line_target("setup x"), None);
        assert_eq!(set_line_target("echo set x"), None);
        assert_eq!(set_line_target(""), None);
    }

    #[test]
    fn lines_of_missing_script_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(script_in(&dir).lines().unwrap().is_empty());
    }

    #[test]
    fn ensure_exists_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let script = StartupScript::new(dir.path().join("a/b/rc"));
        script.ensure_exists().unwrap();
        assert!(script.path().is_file());
    }

    #[test]
    fn persist_one_into_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(&dir);
        script.persist_one("color", "green").unwrap();
        assert_eq!(script.lines().unwrap(), vec!["set color green"]);
    }

    #[test]
    fn persist_one_replaces_previous_lines_for_name() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(&dir);
        fs::write(
            script.path(),
            "echo hi\nSET COLOR red\nset colorful yes\nzset color blue\ntimestamp\n",
        )
        .unwrap();
        script.persist_one("color", "green").unwrap();
        assert_eq!(
            script.lines().unwrap(),
            vec!["set color green", "echo hi", "set colorful yes", "timestamp"]
        );
    }

    #[test]
    fn persist_all_rewrites_every_set_line() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(&dir);
        fs::write(
            script.path(),
            "set stale 1\necho first\nZSET old 2\nsetup keep\necho second\n",
        )
        .unwrap();
        let mut store = VariableStore::new();
        store.set("a", "1");
        store.set("b", "2");
        let n = script.persist_all(store.iter()).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            script.lines().unwrap(),
            vec!["set a 1", "set b 2", "echo first", "setup keep", "echo second"]
        );
    }

    #[test]
    fn persist_one_folds_non_ascii_case() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(&dir);
        fs::write(script.path(), "set ärger 1\necho hi\nSET ÄRGERLICH 3\n").unwrap();
        script.persist_one("Ärger", "2").unwrap();
        assert_eq!(
            script.lines().unwrap(),
            vec!["set Ärger 2", "echo hi", "SET ÄRGERLICH 3"]
        );
    }

    #[test]
    fn persist_all_with_empty_store_drops_set_lines() {
        let dir = tempfile::tempdir().unwrap();
        let script = script_in(&dir);
        fs::write(script.path(), "set a 1\necho hi\n").unwrap();
        script.persist_all(VariableStore::new().iter()).unwrap();
        assert_eq!(script.lines().unwrap(), vec!["echo hi"]);
    }

    fn word() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,7}"
    }

    proptest! {
        #[test]
        fn store_get_returns_last_set(pairs in prop::collection::vec((word(), word()), 1..20)) {
            let mut store = VariableStore::new();
            for (k, v) in &pairs {
                store.set(k, v);
            }
            for (k, _) in &pairs {
                let last = pairs.iter().rev().find(|(k2, _)| k2 == k).map(|(_, v)| v.as_str());
                prop_assert_eq!(store.get(k), last);
            }
        }

        #[test]
        fn persist_one_leaves_single_line_for_name(
            name in word(),
            value in word(),
            other in prop::collection::vec("(echo|set|zset|timestamp) [a-z]{1,6} [a-z]{1,6}", 0..10),
        ) {
            let dir = tempfile::tempdir().unwrap();
            let script = script_in(&dir);
            fs::write(script.path(), other.join("\n")).unwrap();
            script.persist_one(&name, &value).unwrap();
            let lines = script.lines().unwrap();
            prop_assert_eq!(&lines[0], &format!("set {name} {value}"));
            let naming = lines.iter().filter(|l| set_line_names(l, &name)).count();
            prop_assert_eq!(naming, 1);
        }

        #[test]
        fn persist_all_preserves_other_lines_in_order(
            vars in prop::collection::vec((word(), word()), 0..6),
            other in prop::collection::vec("(echo|set|cd|intro) [a-z]{1,6}", 0..10),
        ) {
            let dir = tempfile::tempdir().unwrap();
            let script = script_in(&dir);
            fs::write(script.path(), other.join("\n")).unwrap();
            let mut store = VariableStore::new();
            for (k, v) in &vars {
                store.set(k, v);
            }
            script.persist_all(store.iter()).unwrap();
            let lines = script.lines().unwrap();

            let expected_sets: Vec<String> =
                store.iter().map(|(k, v)| format!("set {k} {v}")).collect();
            let expected_rest: Vec<&String> =
                other.iter().filter(|l| set_line_target(l).is_none()).collect();

            prop_assert_eq!(&lines[..expected_sets.len()], &expected_sets[..]);
            let rest: Vec<&String> = lines[expected_sets.len()..].iter().collect();
            prop_assert_eq!(rest, expected_rest);
        }
    }
}
