//! Export the content graph as JSON.
//!
//! Produces a single JSON document containing every entry in all three
//! collections, frontmatter flattened alongside slug and body. Suitable for
//! feeding a static-site search index or external reporting without
//! reparsing the tree.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::collection::{self, Collection, Loaded};
use crate::config::Config;
use crate::models::{BrainDump, DocPage, StagingEntry};

#[derive(Serialize)]
struct ExportEntry<T> {
    slug: String,
    #[serde(flatten)]
    front: T,
    body: String,
}

#[derive(Serialize)]
struct ExportData {
    brain_dumps: Vec<ExportEntry<BrainDump>>,
    staging: Vec<ExportEntry<StagingEntry>>,
    docs: Vec<ExportEntry<DocPage>>,
}

/// Export all collections as JSON.
///
/// If `output` is `Some`, writes to that file path. Otherwise writes to
/// stdout for piping.
pub fn run_export(config: &Config, output: Option<&Path>) -> Result<()> {
    let dumps = collection::load::<BrainDump>(config, Collection::BrainDumps)?;
    let staging = collection::load::<StagingEntry>(config, Collection::Staging)?;
    let docs = collection::load::<DocPage>(config, Collection::Docs)?;

    let skipped = dumps.errors.len() + staging.errors.len() + docs.errors.len();
    if skipped > 0 {
        eprintln!(
            "warning: {} file(s) failed to parse and were skipped (run `dox check`)",
            skipped
        );
    }

    let data = ExportData {
        brain_dumps: to_export(dumps),
        staging: to_export(staging),
        docs: to_export(docs),
    };

    let counts = (
        data.brain_dumps.len(),
        data.staging.len(),
        data.docs.len(),
    );
    let json = serde_json::to_string_pretty(&data)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &json)?;
            eprintln!(
                "Exported {} dumps, {} staging entries, {} docs to {}",
                counts.0,
                counts.1,
                counts.2,
                path.display()
            );
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

fn to_export<T>(loaded: Loaded<T>) -> Vec<ExportEntry<T>> {
    loaded
        .entries
        .into_iter()
        .map(|e| ExportEntry {
            slug: e.slug,
            front: e.front,
            body: e.body,
        })
        .collect()
}
