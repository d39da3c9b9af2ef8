//! Directory discovery: immediate children as named entries.
//!
//! Every listing in bookbind goes through this module. A child becomes an
//! [`Entry`] with a derived `name` — the filename with a known short
//! extension stripped — so callers match on `"cover"` rather than
//! `"cover.jpg"` and chapter order falls out of a plain name sort.
//!
//! ## Rules
//!
//! - Hidden entries (leading dot) are never surfaced.
//! - Listings are sorted ascending by derived name, so results are
//!   deterministic regardless of OS enumeration order.
//! - Only extensions in a fixed allow-list are stripped. A filename whose
//!   final dot segment is not a known extension keeps its full name —
//!   `release.v2` stays `release.v2`.
//! - Two files can derive the same name (`ch01.md` next to `ch01.txt`).
//!   [`named`] returns the first in sort order; [`prefixed`] returns both.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot resolve path {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Extensions stripped when deriving an entry's name. Deliberately a short
/// allow-list: stripping "any 2-3 trailing word characters" would mangle
/// filenames with legitimate dotted suffixes.
const STRIPPED_EXTENSIONS: &[&str] = &["md", "txt", "jpg", "png", "gif", "css"];

/// One immediate child of a scanned directory.
///
/// `name` is the matching key used everywhere else: `foreword.md` → name
/// `"foreword"`, `cover.jpg` → name `"cover"`, directory `1-get-started` →
/// name `"1-get-started"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Filename with a known short extension stripped.
    pub name: String,
    /// Full path as produced by the listing (absolute when the scanned
    /// root was absolute).
    pub path: PathBuf,
    /// Final dot segment, if any. Kept even when it was not stripped from
    /// the name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Entry {
    fn from_path(path: PathBuf) -> Entry {
        let raw = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = match raw.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_string()),
            _ => None,
        };

        let name = match raw.rsplit_once('.') {
            Some((stem, ext))
                if !stem.is_empty()
                    && STRIPPED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) =>
            {
                stem.to_string()
            }
            _ => raw,
        };

        Entry { name, path, extension }
    }
}

/// List the immediate subdirectories of `path`, sorted by name.
pub fn folders(path: &Path) -> Result<Vec<Entry>, ScanError> {
    entries(path, |p| p.is_dir())
}

/// List the immediate non-directory children of `path`, sorted by name.
pub fn files(path: &Path) -> Result<Vec<Entry>, ScanError> {
    entries(path, |p| !p.is_dir())
}

fn entries(path: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<Entry>, ScanError> {
    let read_dir = fs::read_dir(path).map_err(|source| ScanError::ReadDir {
        path: path.to_path_buf(),
        source,
    })?;

    let mut out = Vec::new();
    for child in read_dir {
        let child = child.map_err(|source| ScanError::ReadDir {
            path: path.to_path_buf(),
            source,
        })?;
        if child.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let child_path = child.path();
        if keep(&child_path) {
            out.push(Entry::from_path(child_path));
        }
    }

    out.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(out)
}

/// First entry whose derived name equals `name` exactly.
pub fn named<'a>(name: &str, entries: &'a [Entry]) -> Option<&'a Entry> {
    entries.iter().find(|entry| entry.name == name)
}

/// All entries whose derived name starts with `prefix`, sorted ascending
/// by name. This ordering is how chapter and appendix numbering is
/// encoded: name files so that a lexicographic sort equals reading order
/// (zero-padded prefixes).
pub fn prefixed(prefix: &str, entries: &[Entry]) -> Vec<Entry> {
    let mut matched: Vec<Entry> = entries
        .iter()
        .filter(|entry| entry.name.starts_with(prefix))
        .cloned()
        .collect();
    matched.sort_by(|a, b| a.name.cmp(&b.name));
    matched
}
