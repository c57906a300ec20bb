//! Configuration path utilities for command-saver.
//!
//! This module provides functions for resolving the store, log and export
//! file paths and expanding shell variables like `~` in paths.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Default path for the saved command store
const DEFAULT_STORE_PATH: &str = "~/.command-saver/store.yml";
/// Default path for the diagnostic log
const DEFAULT_LOG_PATH: &str = "~/.command-saver/cs.log";
/// Default path for the plain text export of all saved commands
const DEFAULT_EXPORT_PATH: &str = "~/.command-saver/saved_commands.txt";

/// Default shell to use for command execution
pub const DEFAULT_SHELL: &str = "/bin/sh";

fn resolve(path_arg: &Option<String>, default: &str) -> String {
    let path = match path_arg {
        Some(path) => path,
        None => default,
    };

    shellexpand::tilde(path).to_string()
}

/// Resolves the store file path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// store path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use command_saver_core::config::get_store_path;
///
/// let default_path = get_store_path(&None);
/// assert!(default_path.ends_with("store.yml"));
///
/// let custom_path = get_store_path(&Some("/path/to/store.yml".to_string()));
/// assert_eq!(custom_path, "/path/to/store.yml");
/// ```
pub fn get_store_path(store_path_arg: &Option<String>) -> String {
    resolve(store_path_arg, DEFAULT_STORE_PATH)
}

/// Resolves the log file path, expanding `~`.
pub fn get_log_path(log_path_arg: &Option<String>) -> String {
    resolve(log_path_arg, DEFAULT_LOG_PATH)
}

/// Resolves the export file path, expanding `~`.
pub fn get_export_path(export_path_arg: &Option<String>) -> String {
    resolve(export_path_arg, DEFAULT_EXPORT_PATH)
}

/// Picks the shell used to run saved commands.
///
/// Uses the given value (normally `$SHELL`) when it is set and non-empty,
/// otherwise [`DEFAULT_SHELL`].
#[must_use]
pub fn get_shell(shell_env: Option<String>) -> String {
    shell_env
        .filter(|shell| !shell.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

/// Creates the parent directory of `path` if it does not exist yet.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(file_description: &str, path: &str) -> Result<()> {
    let Some(parent) = Path::new(path).parent() else {
        return Ok(());
    };

    if parent.as_os_str().is_empty() || parent.exists() {
        return Ok(());
    }

    fs::create_dir_all(parent)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_store_path_with_custom_path() {
        let custom_path = Some("/custom/path/store.yml".to_string());
        let result = get_store_path(&custom_path);
        assert_eq!(result, "/custom/path/store.yml");
    }

    #[test]
    fn test_get_store_path_with_none() {
        let result = get_store_path(&None);
        assert!(result.ends_with("store.yml"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_log_path_with_tilde() {
        let tilde_path = Some("~/my.log".to_string());
        let result = get_log_path(&tilde_path);
        assert!(!result.starts_with('~'));
        assert!(result.ends_with("my.log"));
    }

    #[test]
    fn test_get_export_path_with_none() {
        let result = get_export_path(&None);
        assert!(result.ends_with("saved_commands.txt"));
        assert!(!result.starts_with('~'));
    }

    #[test]
    fn test_get_shell_fallback() {
        assert_eq!(get_shell(None), DEFAULT_SHELL);
        assert_eq!(get_shell(Some("  ".to_string())), DEFAULT_SHELL);
        assert_eq!(get_shell(Some("/bin/zsh".to_string())), "/bin/zsh");
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a/b/store.yml");
        let path = path.to_str().unwrap();

        ensure_parent_dir("store", path).unwrap();

        assert!(temp_dir.path().join("a/b").is_dir());
    }

    #[test]
    fn test_ensure_parent_dir_bare_file_name() {
        assert!(ensure_parent_dir("store", "store.yml").is_ok());
    }
}
