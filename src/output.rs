//! CLI output formatting for assembled collections.
//!
//! Information-first: each book leads with its positional index and title;
//! source folders and output paths are indented context lines underneath.
//! Format functions are pure and return `Vec<String>` so tests can assert
//! on them; `print_*` wrappers write to stdout.
//!
//! ```text
//! You Dont Know JS (2nd-ed) by Kyle Simpson
//!
//! Books
//! 001 You Dont Know JS: 1 Get Started (7 pages)
//!     Source: 1-get-started/
//!     Output: books/2nd-ed/You Dont Know JS: 1 Get Started.epub
//!     001 foreword
//!     002 preface (shared)
//!     003 ch01
//!
//! 2 books, 12 pages
//! ```

use crate::collection::Collection;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Format the assembled collection as an indented listing.
pub fn format_collection_output(collection: &Collection) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} ({}) by {}",
        collection.name, collection.branch, collection.author
    ));
    lines.push(String::new());
    lines.push("Books".to_string());

    let shared_preface = collection.preface.as_ref().map(|entry| entry.path.clone());
    let mut total_pages = 0;

    for (i, book) in collection.books.iter().enumerate() {
        let pages = book.pages();
        total_pages += pages.len();

        lines.push(format!(
            "{} {} ({} pages)",
            format_index(i + 1),
            book.title(),
            pages.len()
        ));
        lines.push(format!("    Source: {}/", book.folder_name()));
        lines.push(format!("    Output: {}", book.output_path().display()));

        for (j, page) in pages.iter().enumerate() {
            let shared_marker = match &shared_preface {
                Some(path) if *path == page.path => " (shared)",
                _ => "",
            };
            lines.push(format!(
                "    {} {}{}",
                format_index(j + 1),
                page.name,
                shared_marker
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} books, {} pages",
        collection.books.len(),
        total_pages
    ));
    lines
}

pub fn print_collection_output(collection: &Collection) {
    for line in format_collection_output(collection) {
        println!("{}", line);
    }
}
