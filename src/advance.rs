//! Review-state transitions for staging entries.
//!
//! States only move forward: new → reviewed → ready → integrated. A hand
//! edit can still write any status, but this command is the sanctioned way
//! to change one and it refuses to go backwards.

use anyhow::{bail, Result};

use crate::collection::{self, Collection};
use crate::config::Config;
use crate::models::{StagingEntry, StagingStatus};

pub fn run_advance(config: &Config, slug: &str, status: &str) -> Result<()> {
    let next = match StagingStatus::parse(status) {
        Some(s) => s,
        None => bail!(
            "Unknown status: '{}'. Use new, reviewed, ready, or integrated.",
            status
        ),
    };

    let entry = match collection::find::<StagingEntry>(config, Collection::Staging, slug)? {
        Some(e) => e,
        None => bail!("staging entry not found: {}", slug),
    };

    let current = entry.front.status;
    if current == next {
        bail!("staging entry '{}' is already '{}'", slug, current.as_str());
    }
    if !current.can_advance_to(next) {
        bail!(
            "cannot move '{}' from '{}' back to '{}' (status only advances)",
            slug,
            current.as_str(),
            next.as_str()
        );
    }

    let mut front = entry.front;
    front.status = next;
    collection::save(&entry.path, &front, &entry.body)?;

    println!("advance {}", slug);
    println!("  {} -> {}", current.as_str(), next.as_str());
    println!("ok");
    Ok(())
}
