//! Brain dump capture — the pipeline's entry point.
//!
//! Creates a new dump file in the capture collection with `processed: false`
//! and no staged items. Dumps are archival: nothing ever deletes them, and
//! the only later mutation is extraction marking them processed.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;

use crate::collection::{self, Collection};
use crate::config::Config;
use crate::models::{BrainDump, SourceKind};

#[allow(clippy::too_many_arguments)]
pub fn run_capture(
    config: &Config,
    title: &str,
    source: &str,
    date: Option<String>,
    tags: Vec<String>,
    duration: Option<String>,
    body_file: Option<PathBuf>,
) -> Result<()> {
    let source = match SourceKind::parse(source) {
        Some(kind) => kind,
        None => bail!(
            "Unknown source kind: '{}'. Use audio, text, transcript, or conversation.",
            source
        ),
    };

    let date = parse_date_or_today(date.as_deref())?;

    let slug = collection::slugify(title);
    if slug.is_empty() {
        bail!("title '{}' does not produce a usable slug", title);
    }

    let path = collection::new_entry_path(config, Collection::BrainDumps, &slug);
    if path.exists() {
        bail!("brain dump already exists: {}", path.display());
    }

    let body = match body_file {
        Some(ref file) => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read body file: {}", file.display()))?;
            format!("\n{}", text)
        }
        None => String::new(),
    };

    let dump = BrainDump {
        title: title.to_string(),
        date,
        source,
        duration,
        tags: if tags.is_empty() { None } else { Some(tags) },
        processed: false,
        staged_items: None,
    };

    collection::save(&path, &dump, &body)?;

    println!("capture {}", slug);
    println!("  file: {}", path.display());
    println!("  source: {}", dump.source.as_str());
    println!("  date: {}", dump.date);
    println!("ok");
    Ok(())
}

/// Parse a `YYYY-MM-DD` argument, defaulting to today.
pub fn parse_date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (expected YYYY-MM-DD)", s)),
        None => Ok(chrono::Local::now().date_naive()),
    }
}
