//! Compiler discovery on PATH.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Whether `tool` is found on the current PATH.
pub fn on_path(tool: &str) -> bool {
    resolve_tool_path(tool, &parse_system_path()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn make_executable(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        fs::write(path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn resolves_first_executable_match() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        make_executable(&second.path().join("clang++"));

        let entries = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let found = resolve_tool_path("clang++", &entries);

        assert_eq!(found, Some(second.path().join("clang++")));
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_executable_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("g++"), "not a binary").unwrap();

        let entries = vec![dir.path().to_path_buf()];
        assert_eq!(resolve_tool_path("g++", &entries), None);
    }

    #[test]
    fn missing_tool_is_none() {
        let dir = TempDir::new().unwrap();
        let entries = vec![dir.path().to_path_buf()];
        assert_eq!(resolve_tool_path("featprobe-missing", &entries), None);
    }

    #[test]
    fn parse_system_path_does_not_panic() {
        let _ = parse_system_path();
    }
}
