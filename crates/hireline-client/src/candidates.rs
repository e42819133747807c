//! Candidate endpoints.

use hireline_models::{Candidate, CandidateCreate};
use reqwest::Method;
use uuid::Uuid;

use crate::client::{ApiClient, NO_BODY};
use crate::error::ClientResult;

/// Typed access to the candidate endpoints.
#[derive(Clone)]
pub struct CandidatesApi {
    client: ApiClient,
}

impl CandidatesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List candidates attached to a job, screen results included.
    pub async fn list_for_job(&self, job_id: Uuid) -> ClientResult<Vec<Candidate>> {
        self.client
            .request(
                Method::GET,
                &format!("/api/v1/jobs/{job_id}/candidates"),
                NO_BODY,
            )
            .await
    }

    /// Add a candidate to a job.
    pub async fn create(&self, job_id: Uuid, data: &CandidateCreate) -> ClientResult<Candidate> {
        self.client
            .request(Method::POST, &format!("/api/v1/candidates/{job_id}"), Some(data))
            .await
    }
}
