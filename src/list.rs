//! Entry listing with pipeline-aware filters.
//!
//! `--status` narrows staging entries by review state, `--published` drops
//! draft doc pages, `--tag` works everywhere. `--json` emits the rows for
//! scripting instead of the table.

use anyhow::{bail, Result};
use serde::Serialize;

use crate::collection::{self, Collection, Entry};
use crate::config::Config;
use crate::models::{BrainDump, DocPage, StagingEntry, StagingStatus};

/// JSON row shape: slug plus the entry's frontmatter, flattened.
#[derive(Serialize)]
struct Row<'a, T: Serialize> {
    slug: &'a str,
    #[serde(flatten)]
    front: &'a T,
}

pub fn run_list(
    config: &Config,
    collection: &str,
    status: Option<String>,
    tag: Option<String>,
    published: bool,
    json: bool,
) -> Result<()> {
    let collection = match Collection::parse(collection) {
        Some(c) => c,
        None => bail!(
            "Unknown collection: '{}'. Available: brain-dumps, staging, docs",
            collection
        ),
    };

    if status.is_some() && collection != Collection::Staging {
        bail!("--status only applies to the staging collection");
    }
    if published && collection != Collection::Docs {
        bail!("--published only applies to the docs collection");
    }

    match collection {
        Collection::BrainDumps => {
            let loaded = collection::load::<BrainDump>(config, collection)?;
            warn_on_parse_errors(&loaded.errors);
            let entries: Vec<&Entry<BrainDump>> = loaded
                .entries
                .iter()
                .filter(|e| tag_matches(tag.as_deref(), e.front.tags.as_deref()))
                .collect();

            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No entries.");
                return Ok(());
            }
            println!(
                "{:<28} {:<12} {:<14} {:<10} TITLE",
                "SLUG", "DATE", "SOURCE", "PROCESSED"
            );
            for e in entries {
                println!(
                    "{:<28} {:<12} {:<14} {:<10} {}",
                    e.slug,
                    e.front.date.to_string(),
                    e.front.source.as_str(),
                    e.front.processed,
                    e.front.title
                );
            }
        }
        Collection::Staging => {
            let status_filter = match status.as_deref() {
                None => None,
                Some(s) => match StagingStatus::parse(s) {
                    Some(parsed) => Some(parsed),
                    None => bail!(
                        "Unknown status: '{}'. Use new, reviewed, ready, or integrated.",
                        s
                    ),
                },
            };

            let loaded = collection::load::<StagingEntry>(config, collection)?;
            warn_on_parse_errors(&loaded.errors);
            let entries: Vec<&Entry<StagingEntry>> = loaded
                .entries
                .iter()
                .filter(|e| status_filter.map_or(true, |s| e.front.status == s))
                .filter(|e| tag_matches(tag.as_deref(), Some(&e.front.tags)))
                .collect();

            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No entries.");
                return Ok(());
            }
            println!(
                "{:<28} {:<12} {:<12} TITLE",
                "SLUG", "STATUS", "EXTRACTED"
            );
            for e in entries {
                println!(
                    "{:<28} {:<12} {:<12} {}",
                    e.slug,
                    e.front.status.as_str(),
                    e.front.extracted_date.to_string(),
                    e.front.title
                );
            }
        }
        Collection::Docs => {
            let loaded = collection::load::<DocPage>(config, collection)?;
            warn_on_parse_errors(&loaded.errors);
            let entries: Vec<&Entry<DocPage>> = loaded
                .entries
                .iter()
                .filter(|e| !published || !e.front.draft)
                .filter(|e| tag_matches(tag.as_deref(), e.front.tags.as_deref()))
                .collect();

            if json {
                return print_json(&entries);
            }
            if entries.is_empty() {
                println!("No entries.");
                return Ok(());
            }
            println!(
                "{:<28} {:<8} {:<16} TITLE",
                "SLUG", "DRAFT", "CATEGORY"
            );
            for e in entries {
                println!(
                    "{:<28} {:<8} {:<16} {}",
                    e.slug,
                    e.front.draft,
                    e.front.category.as_deref().unwrap_or("-"),
                    e.front.title
                );
            }
        }
    }

    Ok(())
}

fn tag_matches(wanted: Option<&str>, tags: Option<&[String]>) -> bool {
    match wanted {
        None => true,
        Some(t) => tags.is_some_and(|tags| tags.iter().any(|x| x == t)),
    }
}

fn print_json<T: Serialize>(entries: &[&Entry<T>]) -> Result<()> {
    let rows: Vec<Row<'_, T>> = entries
        .iter()
        .map(|e| Row {
            slug: &e.slug,
            front: &e.front,
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn warn_on_parse_errors(errors: &[collection::LoadError]) {
    if !errors.is_empty() {
        eprintln!(
            "warning: {} file(s) failed to parse and were skipped (run `dox check`)",
            errors.len()
        );
    }
}
