//! Single-entry retrieval by collection and slug.

use anyhow::{bail, Result};

use crate::collection::{self, Collection, Entry};
use crate::config::Config;
use crate::models::{BrainDump, DocPage, StagingEntry};

pub fn run_get(config: &Config, collection: &str, slug: &str) -> Result<()> {
    let parsed = match Collection::parse(collection) {
        Some(c) => c,
        None => bail!(
            "Unknown collection: '{}'. Available: brain-dumps, staging, docs",
            collection
        ),
    };

    match parsed {
        Collection::BrainDumps => {
            let entry = require::<BrainDump>(config, parsed, slug)?;
            print_header(&entry, parsed);
            println!("title:       {}", entry.front.title);
            println!("date:        {}", entry.front.date);
            println!("source:      {}", entry.front.source.as_str());
            if let Some(ref duration) = entry.front.duration {
                println!("duration:    {}", duration);
            }
            print_tags(entry.front.tags.as_deref());
            println!("processed:   {}", entry.front.processed);
            if !entry.front.staged_slugs().is_empty() {
                println!("stagedItems: {}", entry.front.staged_slugs().join(", "));
            }
            print_body(&entry.body);
        }
        Collection::Staging => {
            let entry = require::<StagingEntry>(config, parsed, slug)?;
            print_header(&entry, parsed);
            println!("title:       {}", entry.front.title);
            println!("description: {}", entry.front.description);
            println!("sourceFile:  {}", entry.front.source_file);
            println!("extracted:   {}", entry.front.extracted_date);
            println!("status:      {}", entry.front.status.as_str());
            if let Some(ref cat) = entry.front.target_category {
                println!("category:    {}", cat);
            }
            print_tags(Some(&entry.front.tags));
            if let Some(ref topics) = entry.front.related_topics {
                println!("related:     {}", topics.join(", "));
            }
            if let Some(ref notes) = entry.front.integration_notes {
                println!("notes:       {}", notes);
            }
            print_body(&entry.body);
        }
        Collection::Docs => {
            let entry = require::<DocPage>(config, parsed, slug)?;
            print_header(&entry, parsed);
            println!("title:       {}", entry.front.title);
            println!("description: {}", entry.front.description);
            if let Some(date) = entry.front.date {
                println!("date:        {}", date);
            }
            println!("draft:       {}", entry.front.draft);
            if let Some(order) = entry.front.order {
                println!("order:       {}", order);
            }
            if let Some(ref cat) = entry.front.category {
                println!("category:    {}", cat);
            }
            print_tags(entry.front.tags.as_deref());
            println!("sidebar:     {}", entry.front.sidebar);
            print_body(&entry.body);
        }
    }

    Ok(())
}

fn require<T: serde::de::DeserializeOwned>(
    config: &Config,
    collection: Collection,
    slug: &str,
) -> Result<Entry<T>> {
    match collection::find::<T>(config, collection, slug)? {
        Some(entry) => Ok(entry),
        None => bail!("entry not found: {}/{}", collection.as_str(), slug),
    }
}

fn print_header<T>(entry: &Entry<T>, collection: Collection) {
    println!("--- Entry ---");
    println!("slug:        {}", entry.slug);
    println!("collection:  {}", collection.as_str());
    println!("file:        {}", entry.path.display());
}

fn print_tags(tags: Option<&[String]>) {
    if let Some(tags) = tags {
        if !tags.is_empty() {
            println!("tags:        {}", tags.join(", "));
        }
    }
}

fn print_body(body: &str) {
    println!();
    println!("--- Body ---");
    println!("{}", body.trim_start_matches('\n'));
}
