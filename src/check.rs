//! Collection validation: frontmatter schemas plus cross-collection
//! invariants.
//!
//! This is the pipeline's enforced error boundary — the same role the site
//! framework's build-time schema validation plays. Findings are collected
//! across the whole tree, reported together, and only then turned into an
//! exit code: errors always fail the run, warnings only under `--strict`.

use anyhow::{bail, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

use crate::collection::{self, Collection, Entry, LoadError};
use crate::config::Config;
use crate::models::{BrainDump, DocPage, StagingEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// One validation finding, addressed by collection and slug (or relative
/// path for files that never parsed).
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub collection: &'static str,
    pub entry: String,
    pub message: String,
}

impl Finding {
    fn error(collection: Collection, entry: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            collection: collection.as_str(),
            entry: entry.into(),
            message: message.into(),
        }
    }

    fn warning(
        collection: Collection,
        entry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            collection: collection.as_str(),
            entry: entry.into(),
            message: message.into(),
        }
    }
}

pub fn run_check(
    config: &Config,
    collection_filter: Option<String>,
    strict: bool,
    json: bool,
) -> Result<()> {
    let filter = match collection_filter.as_deref() {
        None => None,
        Some(name) => match Collection::parse(name) {
            Some(c) => Some(c),
            None => bail!(
                "Unknown collection: '{}'. Available: brain-dumps, staging, docs",
                name
            ),
        },
    };

    let dumps = collection::load::<BrainDump>(config, Collection::BrainDumps)?;
    let staging = collection::load::<StagingEntry>(config, Collection::Staging)?;
    let docs = collection::load::<DocPage>(config, Collection::Docs)?;

    let entry_count = dumps.entries.len() + staging.entries.len() + docs.entries.len();
    let mut findings = collect_findings(config, &dumps, &staging, &docs);

    if let Some(c) = filter {
        findings.retain(|f| f.collection == c.as_str());
    }

    let errors = findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = findings.len() - errors;

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
    } else {
        if !findings.is_empty() {
            println!(
                "{:<9} {:<12} {:<32} MESSAGE",
                "SEVERITY", "COLLECTION", "ENTRY"
            );
            for f in &findings {
                println!(
                    "{:<9} {:<12} {:<32} {}",
                    f.severity.as_str(),
                    f.collection,
                    f.entry,
                    f.message
                );
            }
            println!();
        }
        println!(
            "check: {} entries, {} error{}, {} warning{}",
            entry_count,
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" }
        );
    }

    let strict = strict || config.check.strict;
    if errors > 0 || (strict && warnings > 0) {
        bail!(
            "validation failed: {} error(s), {} warning(s)",
            errors,
            warnings
        );
    }
    if !json {
        println!("ok");
    }
    Ok(())
}

/// Pure validation core shared by the CLI command and tests.
fn collect_findings(
    config: &Config,
    dumps: &collection::Loaded<BrainDump>,
    staging: &collection::Loaded<StagingEntry>,
    docs: &collection::Loaded<DocPage>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for c in Collection::ALL {
        if !c.dir(config).is_dir() {
            findings.push(Finding::warning(
                c,
                ".",
                format!("collection directory missing: {}", c.dir(config).display()),
            ));
        }
    }

    schema_errors(Collection::BrainDumps, &dumps.errors, &mut findings);
    schema_errors(Collection::Staging, &staging.errors, &mut findings);
    schema_errors(Collection::Docs, &docs.errors, &mut findings);

    let dump_slugs: HashSet<&str> = dumps.entries.iter().map(|e| e.slug.as_str()).collect();
    let staging_slugs: HashSet<&str> = staging.entries.iter().map(|e| e.slug.as_str()).collect();

    for dump in &dumps.entries {
        if dump.front.title.trim().is_empty() {
            findings.push(Finding::error(
                Collection::BrainDumps,
                dump.slug.as_str(),
                "title must be a non-empty string",
            ));
        }
        // stagedItems entries must reference existing staging entries
        for staged in dump.front.staged_slugs() {
            if !staging_slugs.contains(staged.as_str()) {
                findings.push(Finding::error(
                    Collection::BrainDumps,
                    dump.slug.as_str(),
                    format!("stagedItems references unknown staging entry '{}'", staged),
                ));
            }
        }
        // processed dumps should have produced at least one staging entry
        if dump.front.processed && dump.front.staged_slugs().is_empty() {
            findings.push(Finding::warning(
                Collection::BrainDumps,
                dump.slug.as_str(),
                "processed is true but stagedItems is empty",
            ));
        }
    }

    for entry in &staging.entries {
        if entry.front.title.trim().is_empty() {
            findings.push(Finding::error(
                Collection::Staging,
                entry.slug.as_str(),
                "title must be a non-empty string",
            ));
        }
        if entry.front.description.trim().is_empty() {
            findings.push(Finding::error(
                Collection::Staging,
                entry.slug.as_str(),
                "description must be a non-empty string",
            ));
        }
        if !dump_slugs.contains(entry.front.source_file.as_str()) {
            findings.push(Finding::error(
                Collection::Staging,
                entry.slug.as_str(),
                format!(
                    "sourceFile '{}' does not resolve to a brain dump",
                    entry.front.source_file
                ),
            ));
        }
    }

    for page in &docs.entries {
        if page.front.title.trim().is_empty() {
            findings.push(Finding::error(
                Collection::Docs,
                page.slug.as_str(),
                "title must be a non-empty string",
            ));
        }
        if page.front.description.trim().is_empty() {
            findings.push(Finding::error(
                Collection::Docs,
                page.slug.as_str(),
                "description must be a non-empty string",
            ));
        }
    }

    if config.check.duplicate_bodies {
        duplicate_bodies(dumps, staging, docs, &mut findings);
    }

    findings
}

fn schema_errors(collection: Collection, errors: &[LoadError], findings: &mut Vec<Finding>) {
    for err in errors {
        findings.push(Finding::error(collection, err.rel.as_str(), err.message.clone()));
    }
}

/// Flag entries whose bodies hash identically — usually a copy that was
/// promoted without pruning, or the same topic extracted twice.
fn duplicate_bodies(
    dumps: &collection::Loaded<BrainDump>,
    staging: &collection::Loaded<StagingEntry>,
    docs: &collection::Loaded<DocPage>,
    findings: &mut Vec<Finding>,
) {
    let mut by_hash: HashMap<String, Vec<(Collection, String)>> = HashMap::new();

    fn record<T>(
        by_hash: &mut HashMap<String, Vec<(Collection, String)>>,
        collection: Collection,
        entries: &[Entry<T>],
    ) {
        for entry in entries {
            let body = entry.body.trim();
            if body.is_empty() {
                continue;
            }
            let mut hasher = Sha256::new();
            hasher.update(body.as_bytes());
            let hash = format!("{:x}", hasher.finalize());
            by_hash
                .entry(hash)
                .or_default()
                .push((collection, entry.slug.clone()));
        }
    }

    record(&mut by_hash, Collection::BrainDumps, &dumps.entries);
    record(&mut by_hash, Collection::Staging, &staging.entries);
    record(&mut by_hash, Collection::Docs, &docs.entries);

    let mut groups: Vec<Vec<(Collection, String)>> =
        by_hash.into_values().filter(|g| g.len() > 1).collect();
    groups.sort_by(|a, b| a[0].1.cmp(&b[0].1));

    for group in groups {
        let listing = group
            .iter()
            .map(|(c, slug)| format!("{}/{}", c.as_str(), slug))
            .collect::<Vec<_>>()
            .join(", ");
        // one finding per member so filters still surface it
        for (c, slug) in &group {
            findings.push(Finding::warning(
                *c,
                slug.as_str(),
                format!("body is identical to: {}", listing),
            ));
        }
    }
}
