//! Content-tree scanning and typed entry loading.
//!
//! Walks a collection directory with include/exclude globs, splits each
//! matching file into frontmatter and body, and pairs it with a slug derived
//! from its relative path. Schema failures accumulate alongside the parsed
//! entries so validation can report every broken file in one pass.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Config;
use crate::frontmatter;

/// The three collections of the pipeline, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    BrainDumps,
    Staging,
    Docs,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::BrainDumps, Collection::Staging, Collection::Docs];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "brain-dumps" | "dumps" => Some(Self::BrainDumps),
            "staging" => Some(Self::Staging),
            "docs" => Some(Self::Docs),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BrainDumps => "brain-dumps",
            Self::Staging => "staging",
            Self::Docs => "docs",
        }
    }

    /// Absolute directory of this collection under the content root.
    pub fn dir(self, config: &Config) -> PathBuf {
        let name = match self {
            Self::BrainDumps => &config.content.dumps_dir,
            Self::Staging => &config.content.staging_dir,
            Self::Docs => &config.content.docs_dir,
        };
        config.content.root.join(name)
    }
}

/// A parsed content file.
#[derive(Debug, Clone)]
pub struct Entry<T> {
    /// Relative path with the extension stripped; unique within a collection.
    pub slug: String,
    pub path: PathBuf,
    pub front: T,
    pub body: String,
}

/// A file that matched the include globs but failed to parse.
#[derive(Debug, Clone)]
pub struct LoadError {
    pub path: PathBuf,
    pub rel: String,
    pub message: String,
}

/// Result of scanning one collection.
#[derive(Debug)]
pub struct Loaded<T> {
    pub entries: Vec<Entry<T>>,
    pub errors: Vec<LoadError>,
}

/// Scan a collection directory and parse every matching file.
///
/// A missing directory yields an empty result; `check` and `collections`
/// surface that separately.
pub fn load<T: DeserializeOwned>(config: &Config, collection: Collection) -> Result<Loaded<T>> {
    let dir = collection.dir(config);
    let mut loaded = Loaded {
        entries: Vec::new(),
        errors: Vec::new(),
    };

    if !dir.is_dir() {
        return Ok(loaded);
    }

    let include = build_globset(&config.content.include_globs)?;

    let mut default_excludes = vec!["**/.git/**".to_string(), "**/node_modules/**".to_string()];
    default_excludes.extend(config.content.exclude_globs.clone());
    let exclude = build_globset(&default_excludes)?;

    let walker = WalkDir::new(&dir).follow_links(config.content.follow_symlinks);
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(&dir).unwrap_or(path);
        let rel_str = relative.to_string_lossy().replace('\\', "/");

        if exclude.is_match(&rel_str) {
            continue;
        }
        if !include.is_match(&rel_str) {
            tracing::debug!(file = %rel_str, "skipping non-content file");
            continue;
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;

        match frontmatter::parse::<T>(&text) {
            Ok((front, body)) => loaded.entries.push(Entry {
                slug: slug_for(&rel_str),
                path: path.to_path_buf(),
                front,
                body,
            }),
            Err(e) => loaded.errors.push(LoadError {
                path: path.to_path_buf(),
                rel: rel_str,
                message: e.to_string(),
            }),
        }
    }

    // Sort for deterministic ordering
    loaded.entries.sort_by(|a, b| a.slug.cmp(&b.slug));
    loaded.errors.sort_by(|a, b| a.rel.cmp(&b.rel));

    Ok(loaded)
}

/// Look up a single entry by slug.
///
/// Returns `Ok(None)` when no file carries the slug; a file that carries it
/// but fails to parse is a hard error, since the caller is about to operate
/// on it.
pub fn find<T: DeserializeOwned>(
    config: &Config,
    collection: Collection,
    slug: &str,
) -> Result<Option<Entry<T>>> {
    let loaded = load::<T>(config, collection)?;

    if let Some(entry) = loaded.entries.into_iter().find(|e| e.slug == slug) {
        return Ok(Some(entry));
    }
    if let Some(err) = loaded.errors.iter().find(|e| slug_for(&e.rel) == slug) {
        bail!("{}: {}", err.path.display(), err.message);
    }
    Ok(None)
}

/// Write an entry to disk, creating parent directories as needed.
pub fn save<T: Serialize>(path: &Path, front: &T, body: &str) -> Result<()> {
    let text = frontmatter::render(front, body)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)
        .with_context(|| format!("Failed to write content file: {}", path.display()))
}

/// Path for a new top-level entry in a collection.
pub fn new_entry_path(config: &Config, collection: Collection, slug: &str) -> PathBuf {
    collection.dir(config).join(format!("{}.mdx", slug))
}

/// Derive a filesystem slug from a human title: lowercase ASCII
/// alphanumerics with runs of anything else collapsed to a single dash.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    out
}

fn slug_for(rel: &str) -> String {
    match rel.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => rel.to_string(),
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
