//! Staging extraction — pull a discrete topic out of a brain dump.
//!
//! Creates a staging entry with status `new` pointing back at its source
//! dump, then rewrites the dump's frontmatter: `processed` flips to true and
//! the new slug lands in `stagedItems`. The dump's body is carried through
//! unchanged, so repeated extractions from one dump are safe.

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::capture::parse_date_or_today;
use crate::collection::{self, Collection};
use crate::config::Config;
use crate::models::{BrainDump, StagingEntry, StagingStatus};

#[allow(clippy::too_many_arguments)]
pub fn run_extract(
    config: &Config,
    dump_slug: &str,
    title: &str,
    description: Option<String>,
    category: Option<String>,
    tags: Vec<String>,
    date: Option<String>,
    body_file: Option<PathBuf>,
) -> Result<()> {
    let dump = match collection::find::<BrainDump>(config, Collection::BrainDumps, dump_slug)? {
        Some(entry) => entry,
        None => bail!("brain dump not found: {}", dump_slug),
    };

    let slug = collection::slugify(title);
    if slug.is_empty() {
        bail!("title '{}' does not produce a usable slug", title);
    }

    let staging_path = collection::new_entry_path(config, Collection::Staging, &slug);
    if staging_path.exists() {
        bail!("staging entry already exists: {}", staging_path.display());
    }

    let body = match body_file {
        Some(ref file) => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read body file: {}", file.display()))?;
            format!("\n{}", text)
        }
        None => String::new(),
    };

    let entry = StagingEntry {
        title: title.to_string(),
        description: description
            .unwrap_or_else(|| format!("Extracted from \"{}\"", dump.front.title)),
        source_file: dump_slug.to_string(),
        extracted_date: parse_date_or_today(date.as_deref())?,
        target_category: category,
        status: StagingStatus::New,
        tags,
        related_topics: None,
        integration_notes: None,
    };

    collection::save(&staging_path, &entry, &body)?;

    // Flip the dump to processed and record the extraction. Body untouched.
    let mut front = dump.front;
    front.processed = true;
    let staged = front.staged_items.get_or_insert_with(Vec::new);
    if !staged.iter().any(|s| s == &slug) {
        staged.push(slug.clone());
    }
    collection::save(&dump.path, &front, &dump.body)?;

    println!("extract {} <- {}", slug, dump_slug);
    println!("  staged: {}", staging_path.display());
    println!("  status: new");
    println!("  dump marked processed ({} staged item{})",
        front.staged_slugs().len(),
        if front.staged_slugs().len() == 1 { "" } else { "s" }
    );
    println!("ok");
    Ok(())
}
