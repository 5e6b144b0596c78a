//! Data models for the admin panel client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Status Vocabulary
// =============================================================================

/// Review status of a housing application.
///
/// The backend speaks two vocabularies for the same four states: canonical
/// codes (`PENDING`, ...) and their localized synonyms (`Yangi`, ...). Both
/// parse into the same variant at the ingestion boundary; serialization
/// egresses the canonical code. Statuses outside the table are carried
/// verbatim in [`ApplicationStatus::Other`] and compare by exact string
/// equality only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    /// Parse a canonical code or its localized synonym.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "PENDING" | "Yangi" => Self::Pending,
            "REVIEWING" | "Ko'rib chiqilmoqda" => Self::Reviewing,
            "APPROVED" | "Qabul qilindi" => Self::Approved,
            "REJECTED" | "Rad etilgan" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    /// Canonical machine-readable code; unknown statuses pass through unchanged.
    pub fn code(&self) -> &str {
        match self {
            Self::Pending => "PENDING",
            Self::Reviewing => "REVIEWING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Other(raw) => raw,
        }
    }

    /// Localized display label; unknown statuses pass through unchanged.
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Yangi",
            Self::Reviewing => "Ko'rib chiqilmoqda",
            Self::Approved => "Qabul qilindi",
            Self::Rejected => "Rad etilgan",
            Self::Other(raw) => raw,
        }
    }

    /// Display-color category for status badges.
    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Pending => StatusTone::New,
            Self::Reviewing => StatusTone::Reviewing,
            Self::Approved => StatusTone::Approved,
            Self::Rejected => StatusTone::Rejected,
            Self::Other(_) => StatusTone::Neutral,
        }
    }

    /// Whether this status passes the given filter value.
    ///
    /// An empty filter admits every status. Known statuses match through the
    /// equivalence table, so a localized record status passes the canonical
    /// filter value and vice versa. Unknown statuses match by exact string
    /// equality only.
    pub fn matches_filter(&self, filter: &str) -> bool {
        if filter.is_empty() {
            return true;
        }
        *self == Self::parse(filter)
    }
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        // A record without a status stays out of every badge count and only
        // passes the empty filter.
        Self::Other(String::new())
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ApplicationStatus> for String {
    fn from(status: ApplicationStatus) -> Self {
        status.code().to_string()
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Display-color category tag for a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    New,
    Reviewing,
    Approved,
    Rejected,
    Neutral,
}

// =============================================================================
// Application
// =============================================================================

/// Opaque record identifier; the backend sends either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => n.fmt(f),
            Self::Text(s) => f.pad(s),
        }
    }
}

/// A housing application as received from the backend.
///
/// The collection is a read-only snapshot: records are never mutated here and
/// the whole snapshot is replaced on refetch. The display name may arrive
/// under any of four keys; they are kept as separate fields and resolved in a
/// fixed priority order by [`Application::display_name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: RecordId,

    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(rename = "full_name", default, skip_serializing_if = "Option::is_none")]
    pub full_name_alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Application {
    /// Resolve the display name: first non-empty of `fullName`, `full_name`,
    /// `name`, `fio`, in that order, falling back to the placeholder label.
    pub fn display_name(&self) -> String {
        [&self.full_name, &self.full_name_alt, &self.name, &self.fio]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Ariza #{}", self.id))
    }

    /// Resolve the review comment: `comment` wins over `admin_comment`,
    /// empty strings count as absent.
    pub fn display_comment(&self) -> Option<&str> {
        [&self.comment, &self.admin_comment]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }

    /// Submission timestamp, when the backend sent a parseable one.
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.date.as_deref().or(self.created_at.as_deref())?;
        raw.parse::<DateTime<Utc>>().ok()
    }
}

// =============================================================================
// Wire DTOs
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Optional structured error body on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}
