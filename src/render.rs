//! The document-renderer seam and its pandoc implementation.
//!
//! A [`RenderJob`] is everything one invocation needs: the ordered input
//! files, the flag/value options, the `-M` metadata pairs, and the working
//! directory (the book's folder, so relative links inside chapters resolve).
//! Options and metadata live in separate maps — pandoc namespaces them
//! differently on the command line (`--flag=value` vs `-M key=value`), so
//! a metadata key can never collide with an option flag.
//!
//! [`Renderer`] is a trait so tests can substitute a recording fake; the
//! real implementation shells out to `pandoc` and, unlike the classic
//! "fire and forget" converter scripts, treats a non-zero exit as an error.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {status} while rendering '{title}'")]
    Failed {
        tool: &'static str,
        status: std::process::ExitStatus,
        title: String,
    },
}

/// One renderer invocation, fully assembled and inert until rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    /// Book title, used only for error reporting.
    pub title: String,
    /// Directory the renderer runs in (the book's folder).
    pub working_dir: PathBuf,
    /// Input files in reading order.
    pub inputs: Vec<PathBuf>,
    /// `--flag` → value pairs.
    pub options: BTreeMap<String, String>,
    /// `-M key=value` metadata pairs.
    pub metadata: BTreeMap<String, String>,
}

pub trait Renderer {
    fn render(&self, job: &RenderJob) -> Result<(), RenderError>;
}

/// Renders via the system `pandoc` binary.
pub struct Pandoc;

impl Pandoc {
    const TOOL: &'static str = "pandoc";

    /// Build the argv for a job: options first as `--flag=value`, then
    /// metadata as `-M key=value`, then the inputs in page order.
    pub fn build_args(job: &RenderJob) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();
        for (flag, value) in &job.options {
            args.push(format!("{flag}={value}").into());
        }
        for (key, value) in &job.metadata {
            args.push("-M".into());
            args.push(format!("{key}={value}").into());
        }
        for input in &job.inputs {
            args.push(input.clone().into_os_string());
        }
        args
    }
}

impl Renderer for Pandoc {
    fn render(&self, job: &RenderJob) -> Result<(), RenderError> {
        let status = Command::new(Self::TOOL)
            .args(Self::build_args(job))
            .current_dir(&job.working_dir)
            .status()
            .map_err(|source| RenderError::Spawn {
                tool: Self::TOOL,
                source,
            })?;

        if !status.success() {
            return Err(RenderError::Failed {
                tool: Self::TOOL,
                status,
                title: job.title.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_job() -> RenderJob {
        let mut options = BTreeMap::new();
        options.insert("--read".to_string(), "markdown+smart".to_string());
        options.insert("--output".to_string(), "/out/Book.epub".to_string());

        let mut metadata = BTreeMap::new();
        metadata.insert("author".to_string(), "Kyle Simpson".to_string());
        metadata.insert("title".to_string(), "YDKJS: Get Started".to_string());

        RenderJob {
            title: "YDKJS: Get Started".to_string(),
            working_dir: "/src/1-get-started".into(),
            inputs: vec!["/src/preface.md".into(), "/src/1-get-started/ch01.md".into()],
            options,
            metadata,
        }
    }

    #[test]
    fn args_are_options_then_metadata_then_inputs() {
        let args = Pandoc::build_args(&sample_job());
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            rendered,
            vec![
                "--output=/out/Book.epub",
                "--read=markdown+smart",
                "-M",
                "author=Kyle Simpson",
                "-M",
                "title=YDKJS: Get Started",
                "/src/preface.md",
                "/src/1-get-started/ch01.md",
            ]
        );
    }

    #[test]
    fn inputs_keep_page_order() {
        let mut job = sample_job();
        job.inputs = vec!["b.md".into(), "a.md".into()];

        let args = Pandoc::build_args(&job);
        let tail: Vec<String> = args[args.len() - 2..]
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(tail, vec!["b.md", "a.md"]);
    }

    #[test]
    fn titles_with_shell_characters_need_no_escaping() {
        let mut job = sample_job();
        job.metadata
            .insert("title".to_string(), "It's $HOME \"sweet\" home".to_string());

        let args = Pandoc::build_args(&job);
        let has_raw = args
            .iter()
            .any(|a| a.to_string_lossy() == "title=It's $HOME \"sweet\" home");
        assert!(has_raw, "argv entries are passed verbatim, no quoting layer");
    }
}
