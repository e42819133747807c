//! Authenticated HTTP client for the Hireline recruiting API.
//!
//! This crate provides:
//! - `ApiClient`: the generic authenticated fetch wrapper every call funnels
//!   through
//! - Typed endpoint wrappers for jobs, candidates and screening questions
//! - One error shape (`ClientError`) for every failure mode

pub mod candidates;
pub mod client;
pub mod error;
pub mod jobs;
pub mod questions;

pub use candidates::CandidatesApi;
pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, ClientResult};
pub use jobs::JobsApi;
pub use questions::QuestionsApi;
