//! Screening question models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A screening question attached to a job. The AI screener asks these in
/// order during the phone screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobQuestion {
    /// Unique question ID
    pub id: Uuid,

    /// Job this question belongs to
    pub job_id: Uuid,

    /// The question as read to the candidate
    pub question_text: String,

    pub created_at: DateTime<Utc>,
}

/// Payload for creating a screening question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobQuestionCreate {
    pub question_text: String,
}

impl JobQuestionCreate {
    pub fn new(question_text: impl Into<String>) -> Self {
        Self {
            question_text: question_text.into(),
        }
    }
}
