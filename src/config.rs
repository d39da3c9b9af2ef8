//! Build configuration: `bookbind.toml` loading and defaults.
//!
//! Everything that was ambient global state in the classic converter
//! scripts — source checkout dir, output root, stylesheet, default cover,
//! the list of collections to build — is an explicit immutable value here,
//! loaded once and passed down. Paths are interpreted relative to the
//! working directory bookbind is invoked from.

use crate::naming;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("no [[collection]] configured in {path}")]
    NoCollections { path: PathBuf },
}

/// One `[[collection]]` table: a repository to fetch and bind.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CollectionSpec {
    /// GitHub shorthand, `owner/name`.
    pub repo: String,
    /// Branch to fetch; also becomes the output subdirectory.
    pub branch: String,
    /// Book author, shared by every book in the collection.
    pub author: String,
}

impl CollectionSpec {
    /// Collection display name, derived from the repository name:
    /// `getify/You-Dont-Know-JS` → "You Dont Know JS".
    pub fn name(&self) -> String {
        let repo_name = self.repo.rsplit('/').next().unwrap_or(&self.repo);
        naming::titleize(repo_name)
    }
}

/// Top-level `bookbind.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Where the repository is checked out. Removed before and after each
    /// collection build.
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Root for generated EPUBs; each branch gets a subdirectory.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Stylesheet handed to the renderer for every book.
    #[serde(default = "default_stylesheet")]
    pub stylesheet: PathBuf,
    /// Cover used when a book folder has no `cover` entry of its own.
    #[serde(default = "default_cover")]
    pub cover: PathBuf,
    /// Optional script run inside the fresh checkout before discovery,
    /// e.g. to prune non-book files. Failure is reported, not fatal.
    #[serde(default)]
    pub cleanup_script: Option<PathBuf>,
    #[serde(rename = "collection", default)]
    pub collections: Vec<CollectionSpec>,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".source")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("books")
}

fn default_stylesheet() -> PathBuf {
    PathBuf::from("assets/epub.css")
}

fn default_cover() -> PathBuf {
    PathBuf::from("assets/cover.jpg")
}

impl Default for BuildConfig {
    fn default() -> BuildConfig {
        BuildConfig {
            source_dir: default_source_dir(),
            output_dir: default_output_dir(),
            stylesheet: default_stylesheet(),
            cover: default_cover(),
            cleanup_script: None,
            collections: Vec::new(),
        }
    }
}

/// Load `bookbind.toml` from `path`.
pub fn load(path: &Path) -> Result<BuildConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// A documented stock config, printed by `bookbind gen-config`.
pub fn stock_config_toml() -> &'static str {
    r#"# bookbind.toml — build configuration
#
# Paths are relative to the directory bookbind runs in.

# Where the repository is checked out. Removed before and after each build.
source_dir = ".source"

# Generated EPUBs land in <output_dir>/<branch>/<title>.epub
output_dir = "books"

# Stylesheet passed to pandoc for every book.
stylesheet = "assets/epub.css"

# Cover used when a book folder has no cover image of its own.
cover = "assets/cover.jpg"

# Optional: script run inside the fresh checkout before discovery,
# e.g. to delete non-book files. A failing script is reported but
# does not stop the build.
# cleanup_script = "cleanup.sh"

# One [[collection]] per repository/branch to bind.
[[collection]]
repo = "getify/You-Dont-Know-JS"
branch = "1st-ed"
author = "Kyle Simpson"

[[collection]]
repo = "getify/You-Dont-Know-JS"
branch = "2nd-ed"
author = "Kyle Simpson"
"#
}
