use bookbind::book::RenderAssets;
use bookbind::config::{self, BuildConfig, CollectionSpec, ConfigError};
use bookbind::{collection, fetch, output, render};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bookbind")]
#[command(about = "Turn a repository of markdown books into EPUBs")]
#[command(long_about = "\
Turn a repository of markdown books into EPUBs

Your filesystem is the data source. Each top-level folder of the fetched
repository becomes one book; chapters are ordered by filename.

Content structure:

  .source/                         # Fetched checkout
  ├── preface.md                   # Shared by every book (optional)
  ├── 1-get-started/               # One folder = one book
  │   ├── foreword.md              # First page if present
  │   ├── ch01.md                  # Chapters: 'ch' prefix, name-sorted
  │   ├── apA.md                   # Appendixes: 'ap' prefix, name-sorted
  │   └── cover.jpg                # Per-book cover (falls back to shared)
  └── 2-scope-closures/
      └── ch01.md

Output: <output_dir>/<branch>/<collection>: <title>.epub, one per folder.

Run 'bookbind gen-config' to generate a documented bookbind.toml.")]
#[command(version)]
struct Cli {
    /// Build configuration file
    #[arg(long, default_value = "bookbind.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch each configured collection and render every book
    Build,
    /// Assemble manifests from an existing checkout and print the listing
    Check {
        /// Content root to inspect (defaults to the configured source_dir)
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Like check, but print the assembled manifest as JSON
    Scan {
        /// Content root to inspect (defaults to the configured source_dir)
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Print a documented bookbind.toml with all options
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let cfg = config::load(&cli.config)?;
            if cfg.collections.is_empty() {
                return Err(ConfigError::NoCollections {
                    path: cli.config.clone(),
                }
                .into());
            }
            let assets = RenderAssets::from_config(&cfg)?;
            for spec in &cfg.collections {
                build_collection(&cfg, spec, &assets)?;
            }
            println!("==> Done: {}", cfg.output_dir.display());
        }
        Command::Check { source } => {
            let cfg = config::load(&cli.config)?;
            let assets = RenderAssets::from_config(&cfg)?;
            let root = source.unwrap_or_else(|| cfg.source_dir.clone());
            let spec = first_collection(&cfg, &cli.config)?;
            let assembled = collection::assemble(&root, spec, &assets)?;
            output::print_collection_output(&assembled);
        }
        Command::Scan { source } => {
            let cfg = config::load(&cli.config)?;
            let assets = RenderAssets::from_config(&cfg)?;
            let root = source.unwrap_or_else(|| cfg.source_dir.clone());
            let spec = first_collection(&cfg, &cli.config)?;
            let assembled = collection::assemble(&root, spec, &assets)?;
            println!("{}", serde_json::to_string_pretty(&assembled.summary())?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Fetch, assemble and render one collection, removing the checkout on
/// both sides of the build.
fn build_collection(
    cfg: &BuildConfig,
    spec: &CollectionSpec,
    assets: &RenderAssets,
) -> Result<(), Box<dyn std::error::Error>> {
    let url = fetch::repository_url(&spec.repo);

    if fetch::remove_tree(&cfg.source_dir)? {
        println!("--> Cleaning stale checkout");
    }

    println!("==> Cloning {} ({})", url, spec.branch);
    fetch::clone(&url, &spec.branch, &cfg.source_dir)?;

    if let Some(script) = &cfg.cleanup_script
        && !fetch::run_cleanup_script(script, &cfg.source_dir)
    {
        println!("--> Cleanup script {} failed; continuing", script.display());
    }

    println!("==> Generating books");
    let assembled = collection::assemble(&cfg.source_dir, spec, assets)?;
    output::print_collection_output(&assembled);
    assembled.generate_all(&render::Pandoc)?;

    fetch::remove_tree(&cfg.source_dir)?;
    Ok(())
}

fn first_collection<'a>(
    cfg: &'a BuildConfig,
    config_path: &Path,
) -> Result<&'a CollectionSpec, ConfigError> {
    cfg.collections
        .first()
        .ok_or_else(|| ConfigError::NoCollections {
            path: config_path.to_path_buf(),
        })
}
