//! Integration — promote a ready staging entry into the docs collection.
//!
//! Copies the entry's body into a new doc page, maps the frontmatter
//! (title, description, tags, category), and advances the staging entry to
//! `integrated`. The staging file stays behind for traceability.

use anyhow::{bail, Result};

use crate::collection::{self, Collection};
use crate::config::Config;
use crate::models::{DocPage, StagingEntry, StagingStatus};

pub fn run_promote(
    config: &Config,
    slug: &str,
    category: Option<String>,
    order: Option<i64>,
    publish: bool,
) -> Result<()> {
    let entry = match collection::find::<StagingEntry>(config, Collection::Staging, slug)? {
        Some(e) => e,
        None => bail!("staging entry not found: {}", slug),
    };

    match entry.front.status {
        StagingStatus::Ready => {}
        StagingStatus::Integrated => {
            bail!("staging entry '{}' is already integrated", slug)
        }
        other => bail!(
            "staging entry '{}' is '{}' — advance it to 'ready' before promoting",
            slug,
            other.as_str()
        ),
    }

    let doc_path = collection::new_entry_path(config, Collection::Docs, slug);
    if doc_path.exists() {
        bail!("doc page already exists: {}", doc_path.display());
    }

    let page = DocPage {
        title: entry.front.title.clone(),
        description: entry.front.description.clone(),
        date: Some(chrono::Local::now().date_naive()),
        draft: !publish,
        order,
        category: category.or_else(|| entry.front.target_category.clone()),
        tags: if entry.front.tags.is_empty() {
            None
        } else {
            Some(entry.front.tags.clone())
        },
        sidebar: true,
    };

    collection::save(&doc_path, &page, &entry.body)?;

    let mut front = entry.front;
    front.status = StagingStatus::Integrated;
    collection::save(&entry.path, &front, &entry.body)?;

    println!("promote {}", slug);
    println!("  doc: {}", doc_path.display());
    println!("  draft: {}", page.draft);
    println!("  staging status: integrated");
    println!("ok");
    Ok(())
}
