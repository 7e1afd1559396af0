//! YAML frontmatter codec for content files.
//!
//! Every content file is a `---` fenced YAML block followed by a markdown
//! body. All reads and writes go through this module so that mutations
//! (capture, extract, promote) carry the body through byte-for-byte.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Codec error. Callers branch on missing-vs-malformed fences, so this is
/// its own enum rather than an opaque anyhow error.
#[derive(Debug)]
pub enum FrontmatterError {
    /// File does not open with a `---` fence.
    Missing,
    /// Opening fence with no closing `---` line.
    Unterminated,
    Yaml(String),
}

impl std::fmt::Display for FrontmatterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontmatterError::Missing => write!(f, "no frontmatter block (expected leading ---)"),
            FrontmatterError::Unterminated => write!(f, "frontmatter block is not terminated"),
            FrontmatterError::Yaml(e) => write!(f, "invalid frontmatter: {}", e),
        }
    }
}

impl std::error::Error for FrontmatterError {}

/// Split a file into its raw YAML block and body. The closing fence is a
/// `---` alone on its own line; everything after that line is the body.
pub fn split(text: &str) -> Result<(&str, &str), FrontmatterError> {
    let after_open = text
        .strip_prefix("---\r\n")
        .or_else(|| text.strip_prefix("---\n"))
        .ok_or(FrontmatterError::Missing)?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end_matches(|c| c == '\r' || c == '\n') == "---" {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// Parse a file into a typed frontmatter record plus its body.
pub fn parse<T: DeserializeOwned>(text: &str) -> Result<(T, String), FrontmatterError> {
    let (yaml, body) = split(text)?;
    let record =
        serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
    Ok((record, body.to_string()))
}

/// Render a record and body back into file text.
pub fn render<T: Serialize>(record: &T, body: &str) -> Result<String, FrontmatterError> {
    let yaml =
        serde_yaml::to_string(record).map_err(|e| FrontmatterError::Yaml(e.to_string()))?;
    Ok(format!("---\n{}---\n{}", yaml, body))
}
