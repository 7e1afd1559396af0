use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub content: ContentConfig,
    #[serde(default)]
    pub check: CheckConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Root of the content tree, e.g. `src/content`.
    pub root: PathBuf,
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,
    #[serde(default = "default_dumps_dir")]
    pub dumps_dir: String,
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_dumps_dir() -> String {
    "brain-dumps".to_string()
}
fn default_staging_dir() -> String {
    "staging".to_string()
}
fn default_include_globs() -> Vec<String> {
    vec!["**/*.mdx".to_string(), "**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct CheckConfig {
    /// Treat warnings as errors.
    #[serde(default)]
    pub strict: bool,
    /// Warn when two entries share an identical body.
    #[serde(default = "default_duplicate_bodies")]
    pub duplicate_bodies: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            strict: false,
            duplicate_bodies: true,
        }
    }
}

fn default_duplicate_bodies() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.content.root.as_os_str().is_empty() {
        anyhow::bail!("content.root must not be empty");
    }

    let dirs = [
        &config.content.docs_dir,
        &config.content.dumps_dir,
        &config.content.staging_dir,
    ];
    for dir in dirs {
        if dir.is_empty() {
            anyhow::bail!("collection directory names must not be empty");
        }
    }
    if dirs[0] == dirs[1] || dirs[0] == dirs[2] || dirs[1] == dirs[2] {
        anyhow::bail!(
            "collection directories must be distinct (got '{}', '{}', '{}')",
            dirs[0],
            dirs[1],
            dirs[2]
        );
    }

    if config.content.include_globs.is_empty() {
        anyhow::bail!("content.include_globs must list at least one pattern");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config = parse_config("[content]\nroot = \"src/content\"\n").unwrap();
        assert_eq!(config.content.docs_dir, "docs");
        assert_eq!(config.content.dumps_dir, "brain-dumps");
        assert_eq!(config.content.staging_dir, "staging");
        assert_eq!(config.content.include_globs.len(), 2);
        assert!(!config.content.follow_symlinks);
        assert!(!config.check.strict);
        assert!(config.check.duplicate_bodies);
    }

    #[test]
    fn colliding_dirs_rejected() {
        let result =
            parse_config("[content]\nroot = \"c\"\ndocs_dir = \"x\"\nstaging_dir = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn empty_root_rejected() {
        assert!(parse_config("[content]\nroot = \"\"\n").is_err());
    }

    #[test]
    fn empty_include_globs_rejected() {
        assert!(parse_config("[content]\nroot = \"c\"\ninclude_globs = []\n").is_err());
    }
}
