//! Screening question endpoints.

use hireline_models::{JobQuestion, JobQuestionCreate};
use reqwest::Method;
use uuid::Uuid;

use crate::client::{ApiClient, NO_BODY};
use crate::error::ClientResult;

/// Typed access to the screening question endpoints.
#[derive(Clone)]
pub struct QuestionsApi {
    client: ApiClient,
}

impl QuestionsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List a job's screening questions.
    pub async fn list(&self, job_id: Uuid) -> ClientResult<Vec<JobQuestion>> {
        self.client
            .request(
                Method::GET,
                &format!("/api/v1/jobs/{job_id}/questions"),
                NO_BODY,
            )
            .await
    }

    /// Attach a screening question to a job.
    pub async fn create(
        &self,
        job_id: Uuid,
        data: &JobQuestionCreate,
    ) -> ClientResult<JobQuestion> {
        self.client
            .request(
                Method::POST,
                &format!("/api/v1/jobs/{job_id}/questions"),
                Some(data),
            )
            .await
    }

    /// Delete a screening question. The backend answers 204 with no body.
    pub async fn delete(&self, job_id: Uuid, question_id: Uuid) -> ClientResult<()> {
        self.client
            .request(
                Method::DELETE,
                &format!("/api/v1/jobs/{job_id}/questions/{question_id}"),
                NO_BODY,
            )
            .await
    }
}
