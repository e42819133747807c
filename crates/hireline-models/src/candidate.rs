//! Candidate models and phone-screen status.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Status of a candidate's AI phone screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScreenStatus {
    /// No call placed yet
    #[default]
    Pending,
    /// Call handed to the telephony provider
    Initiated,
    /// Phone is ringing
    Ringing,
    /// Screen in progress
    InProgress,
    /// Screen finished and scored
    Completed,
    /// Call errored out
    Failed,
    /// Line was busy
    Busy,
    /// Candidate did not pick up
    NoAnswer,
}

impl ScreenStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScreenStatus::Pending => "pending",
            ScreenStatus::Initiated => "initiated",
            ScreenStatus::Ringing => "ringing",
            ScreenStatus::InProgress => "in_progress",
            ScreenStatus::Completed => "completed",
            ScreenStatus::Failed => "failed",
            ScreenStatus::Busy => "busy",
            ScreenStatus::NoAnswer => "no_answer",
        }
    }

    /// True when another screen attempt may be started for this candidate.
    pub fn can_retry(&self) -> bool {
        matches!(
            self,
            ScreenStatus::Pending | ScreenStatus::Failed | ScreenStatus::Busy | ScreenStatus::NoAnswer
        )
    }
}

impl fmt::Display for ScreenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload for adding a candidate to a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateCreate {
    pub full_name: String,
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A candidate as returned by the backend, including screen results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Unique candidate ID
    pub id: Uuid,

    /// Job this candidate belongs to
    pub job_id: Uuid,

    pub full_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,

    /// Phone-screen status, absent until the backend schedules a call
    #[serde(default)]
    pub status: Option<ScreenStatus>,

    /// AI screen score, present once the screen completes
    #[serde(default)]
    pub score: Option<f64>,

    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
