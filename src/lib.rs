//! # bookbind
//!
//! Turns a repository of documentation-style markdown into EPUB books.
//! Your filesystem is the data source: each top-level folder of the fetched
//! repository becomes one book, chapters are ordered by filename, and a
//! shared preface in the repository root is stitched into every book.
//!
//! # Pipeline
//!
//! For every configured collection, `bookbind build` runs four steps:
//!
//! ```text
//! 1. Fetch     git clone --single-branch   →  .source/
//! 2. Clean     optional cleanup script     →  .source/ (pruned)
//! 3. Assemble  folder/file discovery       →  one manifest per folder
//! 4. Render    pandoc per manifest         →  books/<branch>/<title>.epub
//! ```
//!
//! Steps 1, 2 and 4 are external processes behind narrow seams ([`fetch`],
//! [`render`]); everything bookbind decides for itself lives in step 3.
//!
//! # Content Conventions
//!
//! ```text
//! .source/                         # Fetched checkout (content root)
//! ├── preface.md                   # Shared by every book (optional)
//! ├── 1-get-started/               # One folder = one book
//! │   ├── foreword.md              # First page if present
//! │   ├── ch01.md                  # Chapters: "ch" prefix, name-sorted
//! │   ├── ch02.md
//! │   ├── apA.md                   # Appendixes: "ap" prefix, name-sorted
//! │   └── cover.jpg                # Per-book cover (falls back to shared)
//! └── 2-scope-closures/
//!     └── ch01.md
//! ```
//!
//! Page order inside a book is always foreword, preface, chapters,
//! appendixes — absent pieces are simply skipped. Chapter and appendix
//! order is lexicographic by stripped filename, so zero-padded numeric
//! prefixes encode reading order.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Slug-to-title normalization with fixed acronym overrides |
//! | [`scan`] | Directory listing into [`scan::Entry`] values, lookup and prefix filters |
//! | [`book`] | Per-folder book manifest: title, page order, output path, render job |
//! | [`collection`] | Groups books sharing a preface, author and branch; drives rendering |
//! | [`render`] | [`render::Renderer`] seam and the pandoc implementation |
//! | [`fetch`] | git clone, cleanup script, checkout removal |
//! | [`config`] | Immutable `bookbind.toml` build configuration |
//! | [`output`] | CLI output formatting — listing of assembled collections |
//!
//! # Design Decisions
//!
//! ## Deterministic Ordering
//!
//! Every directory listing is sorted by derived name before use, so book
//! and page order never depends on what order the operating system happens
//! to enumerate entries in. Two runs over the same tree produce identical
//! manifests.
//!
//! ## Renderer Failures Are Errors
//!
//! pandoc's exit status is inspected, and a non-zero exit aborts the run
//! with the failing book named. A silent half-finished output directory is
//! worse than a loud stop.
//!
//! ## No Shell
//!
//! External tools are invoked through `std::process::Command` with argv
//! passed directly. Titles with spaces, quotes or `$` in them need no
//! escaping because no shell ever sees them.

pub mod book;
pub mod collection;
pub mod config;
pub mod fetch;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
