//! Configuration paths.

use std::path::{Path, PathBuf};

/// Directory name under the platform config dir (`~/.config/gogcli` on Linux)
pub const APP_NAME: &str = "gogcli";

/// Project-local configuration file name
pub const LOCAL_CONFIG_FILE: &str = ".gog.toml";

/// The user configuration directory, if the platform has one
#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME))
}

/// The user configuration file (`<config dir>/config.toml`)
#[must_use]
pub fn user_config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Expand a leading `~` to the home directory.
///
/// Shells do not expand `~` inside quotes, so paths taken from flags or
/// environment variables may still carry it. Paths without a leading `~`, and
/// `~user` forms, are returned unchanged.
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    expand_path_with_home(path, dirs::home_dir().as_deref())
}

fn expand_path_with_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (path, Some(home)) if path.starts_with("~/") || path.starts_with("~\\") => {
            home.join(path.get(2..).unwrap_or_default())
        }
        (path, _) => PathBuf::from(path),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests can panic")]
mod tests {
    use super::*;

    #[test]
    fn expands_bare_tilde() {
        let home = Path::new("/home/ada");
        assert_eq!(expand_path_with_home("~", Some(home)), home);
    }

    #[test]
    fn expands_tilde_prefix() {
        let home = Path::new("/home/ada");
        assert_eq!(
            expand_path_with_home("~/gog/config.toml", Some(home)),
            Path::new("/home/ada/gog/config.toml")
        );
    }

    #[test]
    fn leaves_other_paths_alone() {
        let home = Path::new("/home/ada");
        assert_eq!(
            expand_path_with_home("/etc/gog.toml", Some(home)),
            Path::new("/etc/gog.toml")
        );
        assert_eq!(expand_path_with_home("~bob/x", Some(home)), Path::new("~bob/x"));
        assert_eq!(expand_path_with_home("", Some(home)), Path::new(""));
    }

    #[test]
    fn without_home_nothing_is_expanded() {
        assert_eq!(expand_path_with_home("~/x", None), Path::new("~/x"));
    }

    #[test]
    fn user_config_file_lives_under_app_dir() {
        if let Some(file) = user_config_file() {
            assert!(file.ends_with("gogcli/config.toml"));
        }
    }
}
