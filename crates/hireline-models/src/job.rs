//! Job posting models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where the role is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    OnSite,
    Remote,
    Hybrid,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::OnSite => "on-site",
            LocationType::Remote => "remote",
            LocationType::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Seniority bands recognized by the screening backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeniorityLevel {
    Intern,
    Junior,
    MidLevel,
    Senior,
    Lead,
    Principal,
}

impl SeniorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Intern => "intern",
            SeniorityLevel::Junior => "junior",
            SeniorityLevel::MidLevel => "mid-level",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Lead => "lead",
            SeniorityLevel::Principal => "principal",
        }
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A job posting as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job ID
    pub id: Uuid,

    /// Posting title
    pub title: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,

    /// Human-readable location
    #[serde(default)]
    pub location: Option<String>,

    /// On-site / remote / hybrid
    #[serde(default)]
    pub location_type: Option<LocationType>,

    /// Seniority band being hired for
    #[serde(default)]
    pub seniority_level: Option<SeniorityLevel>,

    /// Owning user
    pub created_by_user_id: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Number of candidates attached to this job
    #[serde(default)]
    pub candidate_count: u32,

    /// Mean phone-screen score across scored candidates
    #[serde(default)]
    pub average_score: Option<f64>,

    /// Shareable link candidates use to start a screen
    #[serde(default)]
    pub screening_link: Option<String>,
}

/// Payload for creating a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCreate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_level: Option<SeniorityLevel>,
}

impl JobCreate {
    /// Create a payload with only a title set.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            location: None,
            location_type: None,
            seniority_level: None,
        }
    }
}

/// Partial update payload. Unset fields are omitted from the request body,
/// so the backend only touches fields that actually changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority_level: Option<SeniorityLevel>,
}

impl JobUpdate {
    /// True when no field is set, i.e. the update would be a no-op.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.location_type.is_none()
            && self.seniority_level.is_none()
    }
}
