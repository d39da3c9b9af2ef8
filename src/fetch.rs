//! Repository fetching and checkout lifecycle.
//!
//! Uses the system `git`, which brings along the user's SSH keys,
//! credential helpers and proxy configuration for free. The checkout is
//! disposable: removed before a fetch (stale trees from aborted runs) and
//! again after the collection is rendered.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to run git: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
    #[error("git clone of {url} ({branch}) failed: {stderr}")]
    Clone {
        url: String,
        branch: String,
        stderr: String,
    },
    #[error("cannot remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Expand `owner/name` shorthand into a clone URL.
pub fn repository_url(repo: &str) -> String {
    format!("https://github.com/{repo}.git")
}

/// Clone a single branch of `url` into `destination`.
///
/// The destination must not exist — callers remove stale checkouts first
/// via [`remove_tree`]. stderr is captured and surfaced in the error on a
/// non-zero exit.
pub fn clone(url: &str, branch: &str, destination: &Path) -> Result<(), FetchError> {
    let output = Command::new("git")
        .args(["clone", "--single-branch", "--branch", branch, url])
        .arg(destination)
        .output()
        .map_err(|source| FetchError::Spawn { source })?;

    if !output.status.success() {
        return Err(FetchError::Clone {
            url: url.to_string(),
            branch: branch.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}

/// Run the configured cleanup script inside the fresh checkout.
///
/// The script is opaque to bookbind. Returns whether it succeeded; the
/// caller reports a failure but the run continues either way.
pub fn run_cleanup_script(script: &Path, checkout: &Path) -> bool {
    match Command::new("sh").arg(script).current_dir(checkout).status() {
        Ok(status) => status.success(),
        Err(_) => false,
    }
}

/// Remove a checkout tree if it exists. Returns whether anything was
/// removed, so the caller can report the cleanup.
pub fn remove_tree(path: &Path) -> Result<bool, FetchError> {
    if !path.exists() {
        return Ok(false);
    }
    fs::remove_dir_all(path).map_err(|source| FetchError::Remove {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(true)
}
