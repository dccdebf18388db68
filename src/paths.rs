use std::path::PathBuf;

use crate::types::USERDEX_DIR;

/// Environment variable that overrides the userdex root directory.
pub const ROOT_ENV: &str = "USERDEX_ROOT";

/// Returns the root userdex directory path.
///
/// Resolution order:
/// 1. `USERDEX_ROOT` environment variable (if set and non-empty)
/// 2. The platform data directory (e.g. `~/.local/share/userdex`)
/// 3. Current working directory + `.userdex`
pub fn userdex_root() -> PathBuf {
    if let Ok(root) = std::env::var(ROOT_ENV)
        && !root.is_empty()
    {
        return PathBuf::from(root);
    }

    directories::ProjectDirs::from("", "", "userdex")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(USERDEX_DIR))
}

/// Returns the path to the configuration file.
pub fn config_path() -> PathBuf {
    userdex_root().join("config.yaml")
}

/// Returns the path to the persisted listing state.
pub fn state_path() -> PathBuf {
    userdex_root().join("state.json")
}
