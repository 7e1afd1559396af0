//! # Docflow CLI (`dox`)
//!
//! The `dox` binary is the primary interface for Docflow. It provides
//! commands for scaffolding the content tree, validating the three
//! collections, and moving content through the capture → staging → docs
//! pipeline.
//!
//! ## Usage
//!
//! ```bash
//! dox --config ./dox.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dox init` | Create the collection directories and a starter page |
//! | `dox collections` | List collections and their health |
//! | `dox check` | Validate frontmatter schemas and cross-references |
//! | `dox capture <title>` | Create a brain dump |
//! | `dox extract <dump> --title <t>` | Extract a staging entry from a dump |
//! | `dox advance <entry> <status>` | Advance a staging entry's review state |
//! | `dox promote <entry>` | Promote a ready entry into docs |
//! | `dox list <collection>` | List entries with filters |
//! | `dox get <collection> <slug>` | Print one entry |
//! | `dox stats` | Pipeline overview |
//! | `dox export` | Dump the content graph as JSON |
//!
//! ## Examples
//!
//! ```bash
//! # Scaffold a fresh content tree
//! dox init
//!
//! # Capture this morning's voice-note transcript
//! dox capture "Sprint planning ramble" --source transcript --tags planning
//!
//! # Pull a topic out of it into the staging landing zone
//! dox extract sprint-planning-ramble --title "Deploy checklist"
//!
//! # Review it through to publication
//! dox advance deploy-checklist reviewed
//! dox advance deploy-checklist ready
//! dox promote deploy-checklist --publish
//!
//! # Gate CI on a clean tree
//! dox check --strict
//! ```

mod advance;
mod capture;
mod check;
mod collection;
mod collections_cmd;
mod config;
mod export;
mod extract;
mod frontmatter;
mod get;
mod list;
mod models;
mod promote;
mod scaffold;
mod stats;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Docflow CLI — a three-tier content pipeline for git-backed
/// documentation sites.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file describing the content tree layout.
#[derive(Parser)]
#[command(
    name = "dox",
    about = "Docflow — a three-tier content pipeline for git-backed documentation sites",
    version,
    long_about = "Docflow manages a documentation site's content tree: brain dumps are captured, \
    discrete topics are extracted into a staging landing zone with review state, and reviewed \
    entries are promoted into canonical docs. Frontmatter schemas and cross-references are \
    validated with `dox check`."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./dox.toml`. The content root and collection directory
    /// names are read from this file.
    #[arg(long, global = true, default_value = "./dox.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Scaffold the content tree.
    ///
    /// Creates the brain-dumps, staging, and docs directories under the
    /// configured content root, plus a starter doc page. Idempotent —
    /// running it multiple times is safe.
    Init,

    /// List collections and their health.
    ///
    /// Shows each collection's directory, entry count, and whether any
    /// files fail to parse. Useful for verifying configuration.
    Collections,

    /// Validate the content tree.
    ///
    /// Checks every file's frontmatter against its collection schema and
    /// verifies cross-collection invariants: staging entries must reference
    /// an existing brain dump, stagedItems must reference existing staging
    /// entries, and processed dumps should have staged items. Exits nonzero
    /// on errors (or on warnings with `--strict`), which makes it suitable
    /// as a CI gate.
    Check {
        /// Restrict findings to one collection (`brain-dumps`, `staging`, `docs`).
        #[arg(long)]
        collection: Option<String>,

        /// Treat warnings as errors.
        #[arg(long)]
        strict: bool,

        /// Emit findings as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Capture a new brain dump.
    ///
    /// Creates a file in the brain-dumps collection with `processed: false`.
    /// The body comes from `--body-file` or is left empty for later editing.
    Capture {
        /// Title of the dump; the filename slug is derived from it.
        title: String,

        /// Origin of the capture: `audio`, `text`, `transcript`, or `conversation`.
        #[arg(long, default_value = "text")]
        source: String,

        /// Capture date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// Comma-separated tags.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Recording length for audio/transcript dumps (e.g. "14m").
        #[arg(long)]
        duration: Option<String>,

        /// File whose contents become the dump body.
        #[arg(long)]
        body_file: Option<PathBuf>,
    },

    /// Extract a staging entry from a brain dump.
    ///
    /// Creates a staging entry with status `new` referencing the dump, and
    /// rewrites the dump's frontmatter: `processed` becomes true and the new
    /// slug is appended to `stagedItems`. The dump's body is not touched.
    Extract {
        /// Slug of the source brain dump.
        dump: String,

        /// Title for the extracted topic; the staging slug is derived from it.
        #[arg(long)]
        title: String,

        /// One-line description. Defaults to naming the source dump.
        #[arg(long)]
        description: Option<String>,

        /// Target docs category for eventual integration.
        #[arg(long)]
        category: Option<String>,

        /// Comma-separated tags.
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Extraction date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// File whose contents become the staging entry body.
        #[arg(long)]
        body_file: Option<PathBuf>,
    },

    /// Advance a staging entry's review state.
    ///
    /// States move one way: new → reviewed → ready → integrated. Backward
    /// and same-state moves are refused.
    Advance {
        /// Slug of the staging entry.
        entry: String,

        /// Target status: `reviewed`, `ready`, or `integrated`.
        status: String,
    },

    /// Promote a ready staging entry into the docs collection.
    ///
    /// Copies the entry's body into a new doc page with mapped frontmatter
    /// and advances the staging entry to `integrated`. The staging file is
    /// kept for traceability. New pages are drafts unless `--publish`.
    Promote {
        /// Slug of the staging entry (must be `ready`).
        entry: String,

        /// Docs category; defaults to the entry's targetCategory.
        #[arg(long)]
        category: Option<String>,

        /// Sidebar ordering weight.
        #[arg(long)]
        order: Option<i64>,

        /// Create the page with `draft: false`.
        #[arg(long)]
        publish: bool,
    },

    /// List entries in a collection.
    List {
        /// Collection to list: `brain-dumps`, `staging`, or `docs`.
        collection: String,

        /// Filter staging entries by review state.
        #[arg(long)]
        status: Option<String>,

        /// Filter entries carrying this tag.
        #[arg(long)]
        tag: Option<String>,

        /// Docs only: exclude drafts.
        #[arg(long)]
        published: bool,

        /// Emit rows as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Print one entry's frontmatter and body.
    Get {
        /// Collection: `brain-dumps`, `staging`, or `docs`.
        collection: String,

        /// Entry slug.
        slug: String,
    },

    /// Pipeline overview: counts and status breakdowns.
    Stats,

    /// Export the full content graph as JSON.
    ///
    /// Writes every entry of every collection, frontmatter flattened
    /// alongside slug and body.
    Export {
        /// Output file. Writes to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Init => {
            scaffold::run_init(&cfg)?;
        }
        Commands::Collections => {
            collections_cmd::run_collections(&cfg)?;
        }
        Commands::Check {
            collection,
            strict,
            json,
        } => {
            check::run_check(&cfg, collection, strict, json)?;
        }
        Commands::Capture {
            title,
            source,
            date,
            tags,
            duration,
            body_file,
        } => {
            capture::run_capture(&cfg, &title, &source, date, tags, duration, body_file)?;
        }
        Commands::Extract {
            dump,
            title,
            description,
            category,
            tags,
            date,
            body_file,
        } => {
            extract::run_extract(
                &cfg,
                &dump,
                &title,
                description,
                category,
                tags,
                date,
                body_file,
            )?;
        }
        Commands::Advance { entry, status } => {
            advance::run_advance(&cfg, &entry, &status)?;
        }
        Commands::Promote {
            entry,
            category,
            order,
            publish,
        } => {
            promote::run_promote(&cfg, &entry, category, order, publish)?;
        }
        Commands::List {
            collection,
            status,
            tag,
            published,
            json,
        } => {
            list::run_list(&cfg, &collection, status, tag, published, json)?;
        }
        Commands::Get { collection, slug } => {
            get::run_get(&cfg, &collection, &slug)?;
        }
        Commands::Stats => {
            stats::run_stats(&cfg)?;
        }
        Commands::Export { output } => {
            export::run_export(&cfg, output.as_deref())?;
        }
    }

    Ok(())
}
