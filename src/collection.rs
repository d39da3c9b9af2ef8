//! Collection assembly: one content root, many books.
//!
//! A [`Collection`] groups every book built from one fetched checkout.
//! Top-level folders become books, a root-level file named `preface` is
//! shared by all of them, and all books carry the same author, branch and
//! collection name. Folders are processed in name order, so output is
//! reproducible run to run.

use crate::book::{Book, BookSummary, RenderAssets};
use crate::config::CollectionSpec;
use crate::render::{RenderError, Renderer};
use crate::scan::{self, Entry, ScanError};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("cannot create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// All books assembled from one checkout. Immutable after [`assemble`].
#[derive(Debug, Clone)]
pub struct Collection {
    pub name: String,
    pub author: String,
    pub branch: String,
    pub preface: Option<Entry>,
    pub books: Vec<Book>,
    assets: RenderAssets,
}

/// Serializable view for the `scan` subcommand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSummary {
    pub name: String,
    pub author: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preface: Option<PathBuf>,
    pub books: Vec<BookSummary>,
}

/// Assemble a collection from a content root.
///
/// Lists top-level folders (sorted by name — each becomes one book) and
/// top-level files (looking for the shared `preface`). The root is
/// resolved to an absolute path first so every page path handed to the
/// renderer survives the working-directory change into a book's folder.
pub fn assemble(
    root: &Path,
    spec: &CollectionSpec,
    assets: &RenderAssets,
) -> Result<Collection, ScanError> {
    let root = root.canonicalize().map_err(|source| ScanError::Resolve {
        path: root.to_path_buf(),
        source,
    })?;

    let folders = scan::folders(&root)?;
    let files = scan::files(&root)?;
    let preface = scan::named("preface", &files).cloned();

    let name = spec.name();
    let books = folders
        .iter()
        .map(|folder| {
            Book::assemble(
                &name,
                &folder.path,
                preface.clone(),
                &spec.author,
                &spec.branch,
                assets,
            )
        })
        .collect::<Result<Vec<Book>, ScanError>>()?;

    Ok(Collection {
        name,
        author: spec.author.clone(),
        branch: spec.branch.clone(),
        preface,
        books,
        assets: assets.clone(),
    })
}

impl Collection {
    /// Output directory for this collection's branch.
    pub fn output_dir(&self) -> PathBuf {
        self.assets.output_root.join(&self.branch)
    }

    /// Render every book, in assembly (name-sorted) order.
    ///
    /// Creates the branch output directory first. The first renderer
    /// failure aborts the remaining books — a loud stop beats a silently
    /// half-filled output directory.
    pub fn generate_all(&self, renderer: &dyn Renderer) -> Result<(), BuildError> {
        let output_dir = self.output_dir();
        fs::create_dir_all(&output_dir).map_err(|source| BuildError::CreateOutputDir {
            path: output_dir.clone(),
            source,
        })?;

        for book in &self.books {
            renderer.render(&book.render_job())?;
        }
        Ok(())
    }

    pub fn summary(&self) -> CollectionSummary {
        CollectionSummary {
            name: self.name.clone(),
            author: self.author.clone(),
            branch: self.branch.clone(),
            preface: self.preface.as_ref().map(|entry| entry.path.clone()),
            books: self.books.iter().map(Book::summary).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;

    #[test]
    fn one_book_per_top_level_folder_in_name_order() {
        let tree = sample_tree();
        let collection = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();

        let titles: Vec<String> = collection.books.iter().map(Book::title).collect();
        assert_eq!(
            titles,
            vec![
                "You Dont Know JS: 1 Get Started",
                "You Dont Know JS: 2 Scope Closures",
            ]
        );
    }

    #[test]
    fn preface_is_shared_across_books() {
        let tree = sample_tree();
        let collection = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();

        let preface = collection.preface.as_ref().unwrap();
        assert_eq!(preface.name, "preface");
        for book in &collection.books {
            let pages = book.pages();
            assert!(pages.iter().any(|page| page.path == preface.path));
        }
    }

    #[test]
    fn missing_preface_is_simply_absent() {
        let tree = sample_tree();
        fs::remove_file(tree.root().join("preface.md")).unwrap();

        let collection = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();
        assert!(collection.preface.is_none());

        let names: Vec<String> = collection.books[1]
            .pages()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["ch01", "ch02"]);
    }

    #[test]
    fn assembly_is_idempotent() {
        let tree = sample_tree();
        let first = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();
        let second = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();
        assert_eq!(first.summary(), second.summary());
    }

    #[test]
    fn missing_root_propagates() {
        let tree = sample_tree();
        let gone = tree.root().join("nope");
        assert!(assemble(&gone, &tree.spec, &tree.assets).is_err());
    }

    #[test]
    fn generate_all_renders_each_book_in_order() {
        let tree = sample_tree();
        let collection = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();

        let renderer = FakeRenderer::new();
        collection.generate_all(&renderer).unwrap();

        let jobs = renderer.jobs.borrow();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "You Dont Know JS: 1 Get Started");
        assert_eq!(jobs[1].title, "You Dont Know JS: 2 Scope Closures");
        assert!(collection.output_dir().is_dir());

        let outputs = renderer.outputs();
        assert!(outputs[0].ends_with("2nd-ed/You Dont Know JS: 1 Get Started.epub"));
    }

    #[test]
    fn first_render_failure_aborts_the_run() {
        let tree = sample_tree();
        let collection = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();

        let renderer = FakeRenderer::failing();
        let result = collection.generate_all(&renderer);

        assert!(matches!(result, Err(BuildError::Render(_))));
        assert_eq!(renderer.jobs.borrow().len(), 1);
    }

    #[test]
    fn render_inputs_are_absolute() {
        // jobs run with the book folder as cwd; relative inputs would
        // resolve against the wrong directory
        let tree = sample_tree();
        let collection = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();

        for book in &collection.books {
            for input in book.render_job().inputs {
                assert!(input.is_absolute(), "not absolute: {}", input.display());
            }
        }
    }

    #[test]
    fn summary_serializes_to_json() {
        let tree = sample_tree();
        let collection = assemble(tree.root(), &tree.spec, &tree.assets).unwrap();

        let json = serde_json::to_string_pretty(&collection.summary()).unwrap();
        assert!(json.contains("You Dont Know JS: 1 Get Started"));
        assert!(json.contains("\"branch\": \"2nd-ed\""));
    }
}
