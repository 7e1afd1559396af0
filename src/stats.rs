//! Pipeline statistics and health overview.
//!
//! Gives a quick picture of where content sits in the pipeline: how many
//! dumps await extraction, how staging entries spread across review states,
//! and how much of the docs collection is actually published. Used by
//! `dox stats` to sanity-check the tree between syncs of real work.

use anyhow::Result;

use crate::collection::{self, Collection};
use crate::config::Config;
use crate::models::{BrainDump, DocPage, StagingEntry, StagingStatus};

pub fn run_stats(config: &Config) -> Result<()> {
    let dumps = collection::load::<BrainDump>(config, Collection::BrainDumps)?;
    let staging = collection::load::<StagingEntry>(config, Collection::Staging)?;
    let docs = collection::load::<DocPage>(config, Collection::Docs)?;

    let parse_failures = dumps.errors.len() + staging.errors.len() + docs.errors.len();

    println!("Docflow — Pipeline Stats");
    println!("========================");
    println!();
    println!("  Content root: {}", config.content.root.display());
    println!();

    let unprocessed = dumps.entries.iter().filter(|e| !e.front.processed).count();
    println!("  Brain dumps:  {}", dumps.entries.len());
    println!("    unprocessed: {}", unprocessed);
    println!(
        "    processed:   {}",
        dumps.entries.len() - unprocessed
    );

    println!();
    println!("  Staging:      {}", staging.entries.len());
    for status in [
        StagingStatus::New,
        StagingStatus::Reviewed,
        StagingStatus::Ready,
        StagingStatus::Integrated,
    ] {
        let count = staging
            .entries
            .iter()
            .filter(|e| e.front.status == status)
            .count();
        println!("    {:<11} {}", format!("{}:", status.as_str()), count);
    }

    let published = docs.entries.iter().filter(|e| !e.front.draft).count();
    println!();
    println!("  Docs:         {}", docs.entries.len());
    println!(
        "    published:   {} / {} ({}%)",
        published,
        docs.entries.len(),
        if docs.entries.is_empty() {
            0
        } else {
            (published * 100) / docs.entries.len()
        }
    );
    println!("    drafts:      {}", docs.entries.len() - published);

    if parse_failures > 0 {
        println!();
        println!(
            "  Parse failures: {} (run `dox check` for details)",
            parse_failures
        );
    }

    println!();
    Ok(())
}
