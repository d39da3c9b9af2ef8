//! Per-folder book manifests.
//!
//! A [`Book`] is the assembled plan for one EPUB: which folder it comes
//! from, which files make up its pages and in what order, what it is
//! called, and where its output lands. Assembly is a pure read of the
//! folder — rendering happens later, through the [`crate::render::Renderer`]
//! seam.
//!
//! ## Page Order
//!
//! ```text
//! foreword    (0 or 1, file named "foreword" in the folder)
//! preface     (0 or 1, shared file from the collection root)
//! chapters    (0..n, "ch" prefix, name-sorted)
//! appendixes  (0..n, "ap" prefix, name-sorted)
//! ```
//!
//! Absent pieces are dropped, never left as empty slots. A folder with no
//! chapters at all still assembles — an empty book is the repository
//! author's problem, not ours.

use crate::config::BuildConfig;
use crate::naming;
use crate::render::RenderJob;
use crate::scan::{self, Entry, ScanError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Paths shared by every book in a run: output root, stylesheet, and the
/// fallback cover. Absolutized once so render jobs survive the working
/// directory change into each book's folder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderAssets {
    pub output_root: PathBuf,
    pub stylesheet: PathBuf,
    pub default_cover: PathBuf,
}

impl RenderAssets {
    pub fn from_config(config: &BuildConfig) -> std::io::Result<RenderAssets> {
        Ok(RenderAssets {
            output_root: std::path::absolute(&config.output_dir)?,
            stylesheet: std::path::absolute(&config.stylesheet)?,
            default_cover: std::path::absolute(&config.cover)?,
        })
    }
}

/// One book to be produced. Immutable once assembled; every accessor is a
/// pure function of the listing captured at assembly time.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    collection: String,
    folder: PathBuf,
    author: String,
    branch: String,
    preface: Option<Entry>,
    assets: RenderAssets,
    files: Vec<Entry>,
}

/// Serializable view of a [`Book`] for the `scan` subcommand's JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub title: String,
    pub author: String,
    pub output: PathBuf,
    pub cover: PathBuf,
    pub pages: Vec<PathBuf>,
}

impl Book {
    /// Assemble a book from one content folder. Lists the folder's files
    /// once; fails only if the folder cannot be read.
    pub fn assemble(
        collection: &str,
        folder: &Path,
        preface: Option<Entry>,
        author: &str,
        branch: &str,
        assets: &RenderAssets,
    ) -> Result<Book, ScanError> {
        let files = scan::files(folder)?;
        Ok(Book {
            collection: collection.to_string(),
            folder: folder.to_path_buf(),
            author: author.to_string(),
            branch: branch.to_string(),
            preface,
            assets: assets.clone(),
            files,
        })
    }

    /// Last segment of the book's folder path.
    pub fn folder_name(&self) -> String {
        self.folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// `"{collection}: {titleized folder name}"`.
    pub fn title(&self) -> String {
        format!("{}: {}", self.collection, naming::titleize(&self.folder_name()))
    }

    pub fn output_filename(&self) -> String {
        format!("{}.epub", self.title())
    }

    pub fn output_path(&self) -> PathBuf {
        self.assets
            .output_root
            .join(&self.branch)
            .join(self.output_filename())
    }

    pub fn chapters(&self) -> Vec<Entry> {
        scan::prefixed("ch", &self.files)
    }

    pub fn appendixes(&self) -> Vec<Entry> {
        scan::prefixed("ap", &self.files)
    }

    pub fn foreword(&self) -> Option<&Entry> {
        scan::named("foreword", &self.files)
    }

    /// Cover image path: the folder's own `cover` entry, or the shared
    /// default asset.
    pub fn cover(&self) -> PathBuf {
        scan::named("cover", &self.files)
            .map(|entry| entry.path.clone())
            .unwrap_or_else(|| self.assets.default_cover.clone())
    }

    /// All pages in reading order, absent pieces dropped.
    pub fn pages(&self) -> Vec<Entry> {
        let mut pages = Vec::new();
        if let Some(foreword) = self.foreword() {
            pages.push(foreword.clone());
        }
        if let Some(preface) = &self.preface {
            pages.push(preface.clone());
        }
        pages.extend(self.chapters());
        pages.extend(self.appendixes());
        pages
    }

    /// Renderer metadata: author and title. Kept apart from the option
    /// flags so the two namespaces cannot collide.
    pub fn metadata(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("author".to_string(), self.author.clone()),
            ("title".to_string(), self.title()),
        ])
    }

    /// The fully assembled renderer invocation for this book.
    pub fn render_job(&self) -> RenderJob {
        let options = BTreeMap::from([
            ("--read".to_string(), "markdown+smart".to_string()),
            (
                "--output".to_string(),
                self.output_path().display().to_string(),
            ),
            (
                "--css".to_string(),
                self.assets.stylesheet.display().to_string(),
            ),
            ("--highlight-style".to_string(), "tango".to_string()),
            (
                "--epub-cover-image".to_string(),
                self.cover().display().to_string(),
            ),
        ]);

        RenderJob {
            title: self.title(),
            working_dir: self.folder.clone(),
            inputs: self.pages().into_iter().map(|entry| entry.path).collect(),
            options,
            metadata: self.metadata(),
        }
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            title: self.title(),
            author: self.author.clone(),
            output: self.output_path(),
            cover: self.cover(),
            pages: self.pages().into_iter().map(|entry| entry.path).collect(),
        }
    }
}
