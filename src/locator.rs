//! Locating the descriptor of the enclosing project.
//!
//! Tools that run inside a project (for example from a package installed
//! under `node_modules`) find the app by walking up from their working
//! directory until a directory containing `tiapp.xml` turns up.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

/// File name of the application descriptor.
pub const CONFIG_FILENAME: &str = "tiapp.xml";

/// The nearest directory, starting at `start` and walking up through its
/// ancestors, that contains a `tiapp.xml` file.
///
/// `start` is canonicalized first when possible so relative paths such as
/// `.` still walk all the way up. Returns `None` when the filesystem root is
/// reached without a match.
pub fn find_config_root<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    let start = start.as_ref();
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());

    for dir in start.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        debug!("Looking for {}", candidate.display());
        if candidate.is_file() {
            return Some(dir.to_path_buf());
        }
    }
    None
}

/// Like [`find_config_root`], but returns the path of the file itself.
pub fn find_config_file<P: AsRef<Path>>(start: P) -> Option<PathBuf> {
    find_config_root(start).map(|root| root.join(CONFIG_FILENAME))
}
