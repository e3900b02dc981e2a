//! Legacy article integration types.
//!
//! Mapping rows link external legacy articles to CMS content items so a
//! migration can proceed gradually; migration jobs track the bulk side of
//! that work.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a legacy article relates to its CMS counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingType {
    /// The content item was imported from the legacy article.
    Imported,
    /// The content item mirrors the legacy article while both systems run.
    Linked,
    /// The legacy article redirects to the content item.
    Redirect,
}

impl MappingType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imported => "imported",
            Self::Linked => "linked",
            Self::Redirect => "redirect",
        }
    }

    /// Parses the wire tag back into a mapping type.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "imported" => Some(Self::Imported),
            "linked" => Some(Self::Linked),
            "redirect" => Some(Self::Redirect),
            _ => None,
        }
    }
}

/// Which side wins when both records change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncDirection {
    LegacyToCms,
    CmsToLegacy,
    None,
}

impl SyncDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LegacyToCms => "legacy_to_cms",
            Self::CmsToLegacy => "cms_to_legacy",
            Self::None => "none",
        }
    }

    /// Parses the wire tag back into a direction.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "legacy_to_cms" => Some(Self::LegacyToCms),
            "cms_to_legacy" => Some(Self::CmsToLegacy),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

/// A link between a legacy article and a content item.
///
/// Unique per (content item, legacy article) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyMapping {
    pub id: String,
    pub legacy_article_id: i64,
    pub content_id: String,
    pub mapping_type: MappingType,
    pub is_active: bool,
    pub sync_direction: SyncDirection,
}

/// Terminal-or-running status of a migration job.
///
/// The only legal transitions are `Running -> {Completed, Failed, Cancelled}`;
/// terminal states never re-enter `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl JobStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }

    /// Parses the wire tag back into a status.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked unit of bulk migration work.
///
/// Progress counters are written by the external worker driving the job;
/// `processed_items` never exceeds `total_items`. Timestamps are UNIX
/// seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationJob {
    pub job_id: String,
    /// Job family, e.g. `bulk_import` or `resync`.
    pub kind: String,
    pub status: JobStatus,
    pub started_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<i64>,
    pub total_items: i64,
    pub processed_items: i64,
    pub error_count: i64,
    pub warning_count: i64,
}

impl MigrationJob {
    /// Completion ratio in `[0, 1]`; zero-item jobs report `0.0` until a
    /// terminal state is reached.
    #[must_use]
    pub fn progress_ratio(&self) -> f64 {
        if self.total_items <= 0 {
            return if self.status.is_terminal() { 1.0 } else { 0.0 };
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.processed_items as f64 / self.total_items as f64
        }
    }
}
