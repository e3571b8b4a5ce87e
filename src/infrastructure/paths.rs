//! Path utilities for the Zellij sandbox environment.
//!
//! Inside the sandbox the host filesystem is reachable under `/host`, which
//! points at the working directory Zellij was started from (usually `$HOME`).

use std::path::PathBuf;

/// Returns the data directory for zroster state.
///
/// Resolves to `/host/.local/share/zellij/zroster`, i.e.
/// `~/.local/share/zellij/zroster` on the host when Zellij runs from `$HOME`.
/// Holds the stored auth token and the trace file.
///
/// # Examples
///
/// ```
/// use zroster::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert_eq!(data_dir.to_str().unwrap(), "/host/.local/share/zellij/zroster");
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zroster")
}

/// Expands tilde paths to their `/host` equivalents.
///
/// # Examples
///
/// ```
/// use zroster::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}
