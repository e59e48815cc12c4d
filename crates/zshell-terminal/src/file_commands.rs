//! Filesystem commands: cd, pwd, targz, untargz.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use zshell_types::error::{Result, ZshellError};
use zshell_types::path::{expand_tilde, resolve_path};

use crate::commands::{CUSTOM_CATEGORY, SHELL_CATEGORY};
use crate::interpreter::{Arity, Command, CommandOutput, CommandRegistry, Environment};

/// Register filesystem commands.
pub fn register_file_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(CdCmd));
    reg.register(Box::new(PwdCmd));
    reg.register(Box::new(TargzCmd));
    reg.register(Box::new(UntargzCmd));
}

/// Expand `~` and resolve against the working directory.
fn host_path(env: &Environment<'_>, input: &str) -> Result<PathBuf> {
    let expanded = expand_tilde(input, env.home.as_deref());
    let cwd = env.dirs.current_dir()?;
    Ok(resolve_path(&cwd, &expanded))
}

// ---------------------------------------------------------------------------
// cd
// ---------------------------------------------------------------------------

struct CdCmd;
impl Command for CdCmd {
    fn name(&self) -> &str {
        "cd"
    }
    fn description(&self) -> &str {
        "Change directory"
    }
    fn usage(&self) -> &str {
        "cd <new_dir>"
    }
    fn category(&self) -> &str {
        SHELL_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Exact(1)
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let path = host_path(env, args[0])?;
        if !path.is_dir() {
            return Err(ZshellError::Command(format!(
                "'{}' is not a directory",
                path.display()
            )));
        }
        if let Err(e) = fs::read_dir(&path) {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                return Err(ZshellError::Command(format!(
                    "You do not have read access to '{}'",
                    path.display()
                )));
            }
            return Err(ZshellError::Command(e.to_string()));
        }
        env.dirs
            .change_dir(&path)
            .map_err(|e| ZshellError::Command(e.to_string()))?;
        Ok(CommandOutput::Text(format!(
            "Successfully changed directory to '{}'",
            path.display()
        )))
    }
}

// ---------------------------------------------------------------------------
// pwd
// ---------------------------------------------------------------------------

struct PwdCmd;
impl Command for PwdCmd {
    fn name(&self) -> &str {
        "pwd"
    }
    fn description(&self) -> &str {
        "Print working directory"
    }
    fn usage(&self) -> &str {
        "pwd"
    }
    fn category(&self) -> &str {
        SHELL_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Exact(0)
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let cwd = env.dirs.current_dir()?;
        Ok(CommandOutput::Text(cwd.display().to_string()))
    }
}

// ---------------------------------------------------------------------------
// targz
// ---------------------------------------------------------------------------

struct TargzCmd;
impl Command for TargzCmd {
    fn name(&self) -> &str {
        "targz"
    }
    fn description(&self) -> &str {
        "Create a tar.gz archive, creating the output directory if needed"
    }
    fn usage(&self) -> &str {
        "targz <source> <output_filename>"
    }
    fn category(&self) -> &str {
        CUSTOM_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Exact(2)
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let source = host_path(env, args[0])?;
        let output = host_path(env, args[1])?;
        if !source.exists() {
            return Err(ZshellError::Command(format!(
                "targz: no such file or directory: '{}'",
                source.display()
            )));
        }
        create_archive(&source, &output)?;
        log::info!("archived {} into {}", source.display(), output.display());
        Ok(CommandOutput::Text(format!("Created {}", output.display())))
    }
}

/// Write `source` into a gzip-compressed tar at `output`.
///
/// A directory is stored recursively under its own base name; a file is
/// stored under its file name. When `output` lies inside `source` the
/// archive being written is left out.
pub fn create_archive(source: &Path, output: &Path) -> Result<()> {
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let root_name = archive_root_name(source)?;
    let encoder = GzEncoder::new(File::create(output)?, Compression::default());
    let skip = fs::canonicalize(output)?;
    let mut builder = tar::Builder::new(encoder);
    if source.is_dir() {
        append_tree(&mut builder, source, &root_name, &skip)?;
    } else {
        builder.append_path_with_name(source, &root_name)?;
    }
    builder.into_inner()?.finish()?;
    Ok(())
}

/// Append `dir` and everything below it under `name`, skipping `skip`.
fn append_tree<W: Write>(
    builder: &mut tar::Builder<W>,
    dir: &Path,
    name: &Path,
    skip: &Path,
) -> Result<()> {
    builder.append_dir(name, dir)?;
    let mut entries = fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let path = entry.path();
        let entry_name = name.join(entry.file_name());
        if path.is_dir() {
            append_tree(builder, &path, &entry_name, skip)?;
        } else if fs::canonicalize(&path).is_ok_and(|p| p == skip) {
            log::debug!("skipping archive output {}", path.display());
        } else {
            builder.append_path_with_name(&path, &entry_name)?;
        }
    }
    Ok(())
}

fn archive_root_name(source: &Path) -> Result<PathBuf> {
    if let Some(name) = source.file_name() {
        return Ok(PathBuf::from(name));
    }
    // `.` or `..` style inputs have no file name until canonicalised.
    let canonical = fs::canonicalize(source)?;
    Ok(canonical
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}

// ---------------------------------------------------------------------------
// untargz
// ---------------------------------------------------------------------------

struct UntargzCmd;
impl Command for UntargzCmd {
    fn name(&self) -> &str {
        "untargz"
    }
    fn description(&self) -> &str {
        "Extract a tar.gz archive, creating the destination if needed"
    }
    fn usage(&self) -> &str {
        "untargz <input_filename> [destination_dir]"
    }
    fn category(&self) -> &str {
        CUSTOM_CATEGORY
    }
    fn arity(&self) -> Arity {
        Arity::Range { min: 1, max: Some(2) }
    }
    fn execute(&self, args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        let archive = host_path(env, args[0])?;
        let dest = host_path(env, args.get(1).copied().unwrap_or("."))?;
        extract_archive(&archive, &dest)?;
        log::info!("extracted {} into {}", archive.display(), dest.display());
        Ok(CommandOutput::Text(format!(
            "Extracted {} into {}",
            archive.display(),
            dest.display()
        )))
    }
}

/// Unpack every entry of the tar.gz at `archive` into `dest`.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    fs::create_dir_all(dest)?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    tar.unpack(dest)?;
    Ok(())
}
