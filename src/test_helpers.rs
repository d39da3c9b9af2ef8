//! Shared test utilities for the bookbind test suite.
//!
//! Builds a throwaway content checkout in a `TempDir`, shaped like the
//! repositories bookbind is pointed at, plus a recording [`FakeRenderer`]
//! for exercising the renderer seam without pandoc.

use std::cell::RefCell;
use std::fs;
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::book::{Book, RenderAssets};
use crate::config::CollectionSpec;
use crate::render::{RenderError, RenderJob, Renderer};
use crate::scan;

/// A sample checkout with two books, a shared preface, and render assets.
///
/// ```text
/// <tmp>/source/
/// ├── .gitignore                  # hidden, never surfaced
/// ├── preface.md                  # shared
/// ├── 1-get-started/
/// │   ├── foreword.md
/// │   ├── ch01.md  ch02.md  ch03.md
/// │   ├── apA.md   apB.md
/// │   └── cover.jpg
/// └── 2-scope-closures/
///     ├── ch01.md  ch02.md
///     └── notes.txt               # neither chapter nor appendix
/// ```
pub struct SampleTree {
    #[allow(dead_code)] // holds the directory alive for the test's duration
    tmp: TempDir,
    root: PathBuf,
    pub spec: CollectionSpec,
    pub assets: RenderAssets,
}

impl SampleTree {
    /// Content root of the sample checkout.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

pub fn sample_tree() -> SampleTree {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("source");

    fs::create_dir(&root).unwrap();
    fs::write(root.join(".gitignore"), "books/\n").unwrap();
    fs::write(root.join("preface.md"), "# Preface\n").unwrap();

    let first = root.join("1-get-started");
    fs::create_dir(&first).unwrap();
    for name in ["foreword.md", "ch01.md", "ch02.md", "ch03.md", "apA.md", "apB.md"] {
        fs::write(first.join(name), format!("# {name}\n")).unwrap();
    }
    fs::write(first.join("cover.jpg"), b"\xff\xd8fake").unwrap();

    let second = root.join("2-scope-closures");
    fs::create_dir(&second).unwrap();
    for name in ["ch01.md", "ch02.md", "notes.txt"] {
        fs::write(second.join(name), format!("# {name}\n")).unwrap();
    }

    let assets = RenderAssets {
        output_root: tmp.path().join("books"),
        stylesheet: tmp.path().join("assets/epub.css"),
        default_cover: tmp.path().join("assets/cover.jpg"),
    };

    let spec = CollectionSpec {
        repo: "getify/You-Dont-Know-JS".to_string(),
        branch: "2nd-ed".to_string(),
        author: "Kyle Simpson".to_string(),
    };

    SampleTree { tmp, root, spec, assets }
}

/// Assemble one book from the sample tree, sharing the root preface.
pub fn assemble_book(tree: &SampleTree, folder: &str) -> Book {
    let files = scan::files(tree.root()).unwrap();
    let preface = scan::named("preface", &files).cloned();
    Book::assemble(
        &tree.spec.name(),
        &tree.root().join(folder),
        preface,
        &tree.spec.author,
        &tree.spec.branch,
        &tree.assets,
    )
    .unwrap()
}

/// Records every job it is asked to render; optionally fails them all.
pub struct FakeRenderer {
    pub jobs: RefCell<Vec<RenderJob>>,
    fail: bool,
}

impl FakeRenderer {
    pub fn new() -> FakeRenderer {
        FakeRenderer {
            jobs: RefCell::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> FakeRenderer {
        FakeRenderer {
            jobs: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    /// Output paths of every recorded job, in render order.
    pub fn outputs(&self) -> Vec<PathBuf> {
        self.jobs
            .borrow()
            .iter()
            .filter_map(|job| job.options.get("--output").map(PathBuf::from))
            .collect()
    }
}

impl Renderer for FakeRenderer {
    fn render(&self, job: &RenderJob) -> Result<(), RenderError> {
        self.jobs.borrow_mut().push(job.clone());
        if self.fail {
            return Err(RenderError::Failed {
                tool: "fake",
                status: std::process::ExitStatus::from_raw(256),
                title: job.title.clone(),
            });
        }
        Ok(())
    }
}
