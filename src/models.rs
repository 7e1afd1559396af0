//! Core data models for the three content collections.
//!
//! These types are the frontmatter schemas of the documentation site's
//! collections: brain dumps (capture), staging entries (review), and doc
//! pages (production). Field names are camelCase on disk to match the
//! content files; unknown keys are rejected so a typo fails validation
//! instead of being silently dropped.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Origin of a captured brain dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Audio,
    Text,
    Transcript,
    Conversation,
}

impl SourceKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "audio" => Some(Self::Audio),
            "text" => Some(Self::Text),
            "transcript" => Some(Self::Transcript),
            "conversation" => Some(Self::Conversation),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Text => "text",
            Self::Transcript => "transcript",
            Self::Conversation => "conversation",
        }
    }
}

/// Review state of a staging entry.
///
/// States advance one-way: new → reviewed → ready → integrated. The files
/// carry no history, so only the `advance` command can enforce direction;
/// validation checks membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagingStatus {
    New,
    Reviewed,
    Ready,
    Integrated,
}

impl StagingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "reviewed" => Some(Self::Reviewed),
            "ready" => Some(Self::Ready),
            "integrated" => Some(Self::Integrated),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewed => "reviewed",
            Self::Ready => "ready",
            Self::Integrated => "integrated",
        }
    }

    /// Position in the pipeline; transitions must strictly increase.
    pub fn rank(self) -> u8 {
        match self {
            Self::New => 0,
            Self::Reviewed => 1,
            Self::Ready => 2,
            Self::Integrated => 3,
        }
    }

    pub fn can_advance_to(self, next: StagingStatus) -> bool {
        next.rank() > self.rank()
    }
}

/// Frontmatter of a captured brain dump. Never deleted; extraction flips
/// `processed` and records the staging slugs it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BrainDump {
    pub title: String,
    pub date: NaiveDate,
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staged_items: Option<Vec<String>>,
}

impl BrainDump {
    /// Slugs of staging entries extracted from this dump.
    pub fn staged_slugs(&self) -> &[String] {
        self.staged_items.as_deref().unwrap_or(&[])
    }
}

/// Frontmatter of a staging entry — the landing zone between a raw dump
/// and canonical docs. Persists after integration for traceability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StagingEntry {
    pub title: String,
    pub description: String,
    /// Slug of the brain dump this entry was extracted from.
    pub source_file: String,
    pub extracted_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_category: Option<String>,
    pub status: StagingStatus,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_topics: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_notes: Option<String>,
}

/// Frontmatter of a published doc page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DocPage {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default = "default_sidebar")]
    pub sidebar: bool,
}

fn default_sidebar() -> bool {
    true
}
