//! Host path helpers: `~` expansion and lexical resolution.

use std::path::{Component, Path, PathBuf};

/// Expand a leading `~` (alone or followed by a separator) to `home`.
///
/// Paths that do not start with `~`, or `~user` forms, are returned as-is.
/// With no home directory available the input is returned unchanged.
pub fn expand_tilde(input: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(input);
    };
    if input == "~" {
        return home.to_path_buf();
    }
    match input.strip_prefix("~/").or_else(|| input.strip_prefix("~\\")) {
        Some(rest) => home.join(rest),
        None => PathBuf::from(input),
    }
}

/// Resolve `input` against `cwd` and normalise `.` / `..` lexically.
///
/// Symlinks are not followed. `..` at the root stays at the root.
pub fn resolve_path(cwd: &Path, input: &Path) -> PathBuf {
    let raw = if input.is_absolute() {
        input.to_path_buf()
    } else {
        cwd.join(input)
    };

    let mut out = PathBuf::new();
    for component in raw.components() {
        match component {
            Component::Prefix(p) => out.push(p.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {},
            Component::ParentDir => {
                out.pop();
            },
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Abbreviate `path` with `~` when it lives under `home`.
pub fn abbreviate_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~{}{}", std::path::MAIN_SEPARATOR, rest.display());
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_alone_is_home() {
        let home = Path::new("/home/ada");
        assert_eq!(expand_tilde("~", Some(home)), PathBuf::from("/home/ada"));
    }

    #[test]
    fn tilde_prefix_joins_home() {
        let home = Path::new("/home/ada");
        assert_eq!(
            expand_tilde("~/work/src", Some(home)),
            PathBuf::from("/home/ada/work/src")
        );
    }

    #[test]
    fn tilde_user_form_untouched() {
        let home = Path::new("/home/ada");
        assert_eq!(expand_tilde("~bob/x", Some(home)), PathBuf::from("~bob/x"));
    }

    #[test]
    fn no_home_leaves_input() {
        assert_eq!(expand_tilde("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn resolve_path_absolute() {
        assert_eq!(
            resolve_path(Path::new("/home"), Path::new("/tmp/x")),
            PathBuf::from("/tmp/x")
        );
    }

    #[test]
    fn resolve_path_relative() {
        assert_eq!(
            resolve_path(Path::new("/home"), Path::new("user")),
            PathBuf::from("/home/user")
        );
    }

    #[test]
    fn resolve_path_dotdot() {
        assert_eq!(
            resolve_path(Path::new("/home/user"), Path::new("../other/./docs")),
            PathBuf::from("/home/other/docs")
        );
    }

    #[test]
    fn resolve_path_dotdot_at_root() {
        assert_eq!(
            resolve_path(Path::new("/"), Path::new("../..")),
            PathBuf::from("/")
        );
    }

    #[test]
    fn abbreviate_under_home() {
        let home = Path::new("/home/ada");
        assert_eq!(abbreviate_home(Path::new("/home/ada"), Some(home)), "~");
        assert_eq!(
            abbreviate_home(Path::new("/home/ada/src"), Some(home)),
            format!("~{}src", std::path::MAIN_SEPARATOR)
        );
    }

    #[test]
    fn abbreviate_outside_home() {
        let home = Path::new("/home/ada");
        assert_eq!(abbreviate_home(Path::new("/etc"), Some(home)), "/etc");
        assert_eq!(abbreviate_home(Path::new("/home/adam"), Some(home)), "/home/adam");
    }
}
