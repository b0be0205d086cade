//! Filesystem locations used by the contact book.
//!
//! The data directory holds the trace file. It resolves, in order, to the
//! configured directory, `$XDG_DATA_HOME/contactbook`,
//! `$HOME/.local/share/contactbook`, and finally `./.contactbook`.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "contactbook";

/// Default trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "contactbook-otlp.json";

/// Resolves the data directory, honouring an explicit configuration first.
#[must_use]
pub fn get_data_dir(configured: Option<&Path>) -> PathBuf {
    resolve_data_dir(
        configured,
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        home_dir(),
    )
}

fn resolve_data_dir(configured: Option<&Path>, xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = configured {
        return expand_tilde_with(dir, home.as_deref());
    }
    if let Some(xdg) = xdg_data_home.filter(|p| p.is_absolute()) {
        return xdg.join(APP_DIR);
    }
    home.map_or_else(
        || PathBuf::from(format!(".{APP_DIR}")),
        |home| home.join(".local").join("share").join(APP_DIR),
    )
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or any path when no home directory is known,
/// are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    expand_tilde_with(path, home_dir().as_deref())
}

fn expand_tilde_with(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_wins_and_expands_tilde() {
        let dir = resolve_data_dir(
            Some(Path::new("~/contacts")),
            Some(PathBuf::from("/xdg")),
            Some(PathBuf::from("/home/ada")),
        );
        assert_eq!(dir, PathBuf::from("/home/ada/contacts"));
    }

    #[test]
    fn falls_back_through_xdg_and_home() {
        assert_eq!(
            resolve_data_dir(None, Some(PathBuf::from("/xdg")), Some(PathBuf::from("/home/ada"))),
            PathBuf::from("/xdg/contactbook")
        );
        assert_eq!(
            resolve_data_dir(None, Some(PathBuf::from("relative")), Some(PathBuf::from("/home/ada"))),
            PathBuf::from("/home/ada/.local/share/contactbook")
        );
        assert_eq!(resolve_data_dir(None, None, None), PathBuf::from(".contactbook"));
    }

    #[test]
    fn tilde_only_expands_as_leading_component() {
        let home = Some(Path::new("/home/ada"));
        assert_eq!(expand_tilde_with(Path::new("~"), home), PathBuf::from("/home/ada"));
        assert_eq!(expand_tilde_with(Path::new("/srv/~x"), home), PathBuf::from("/srv/~x"));
        assert_eq!(expand_tilde_with(Path::new("~/a"), None), PathBuf::from("~/a"));
    }
}
