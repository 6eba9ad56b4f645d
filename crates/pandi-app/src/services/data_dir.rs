// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::{Path, PathBuf};

/// Directory name under the platform data root.
const APP_DIR: &str = "pandi";

/// Return the application data directory, creating it if needed.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = data_root(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
    .join(APP_DIR);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// `$XDG_DATA_HOME`, else `~/.local/share`, else the system temp dir.
fn data_root(xdg: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match (xdg, home) {
        (Some(xdg), _) if !xdg.as_os_str().is_empty() => xdg,
        (_, Some(home)) => home.join(".local").join("share"),
        _ => std::env::temp_dir(),
    }
}

/// The local key/value database.
pub fn store_path(dir: &Path) -> PathBuf {
    dir.join("local.db")
}

/// The device key that seals the session token.
pub fn key_path(dir: &Path) -> PathBuf {
    dir.join("session.key")
}

/// Persisted settings.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_wins_over_home() {
        let root = data_root(Some("/xdg".into()), Some("/home/a".into()));
        assert_eq!(root, PathBuf::from("/xdg"));
    }

    #[test]
    fn home_falls_back_to_local_share() {
        let root = data_root(Some(PathBuf::new()), Some("/home/a".into()));
        assert_eq!(root, PathBuf::from("/home/a/.local/share"));
    }
}
