//! Job endpoints.

use hireline_models::{Job, JobCreate, JobUpdate};
use reqwest::Method;
use uuid::Uuid;

use crate::client::{ApiClient, NO_BODY};
use crate::error::ClientResult;

/// Typed access to the job endpoints.
#[derive(Clone)]
pub struct JobsApi {
    client: ApiClient,
}

impl JobsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List the caller's job postings.
    pub async fn list(&self) -> ClientResult<Vec<Job>> {
        self.client.request(Method::GET, "/api/v1/jobs/", NO_BODY).await
    }

    /// Create a job posting.
    pub async fn create(&self, data: &JobCreate) -> ClientResult<Job> {
        self.client
            .request(Method::POST, "/api/v1/jobs/", Some(data))
            .await
    }

    /// Fetch one job by ID.
    pub async fn get(&self, job_id: Uuid) -> ClientResult<Job> {
        self.client
            .request(Method::GET, &format!("/api/v1/jobs/{job_id}"), NO_BODY)
            .await
    }

    /// Apply a partial update; unset fields are left untouched by the backend.
    pub async fn update(&self, job_id: Uuid, changes: &JobUpdate) -> ClientResult<Job> {
        self.client
            .request(Method::PUT, &format!("/api/v1/jobs/{job_id}"), Some(changes))
            .await
    }
}
