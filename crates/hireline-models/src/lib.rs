//! Shared data models for the Hireline recruiting API.
//!
//! This crate provides Serde-serializable types for:
//! - Job postings and their create/update payloads
//! - Candidates and AI phone-screen results
//! - Screening questions attached to a job
//!
//! All types mirror the backend's wire format and pass through the HTTP
//! client as plain JSON.

pub mod candidate;
pub mod job;
pub mod question;

// Re-export common types
pub use candidate::{Candidate, CandidateCreate, ScreenStatus};
pub use job::{Job, JobCreate, JobUpdate, LocationType, SeniorityLevel};
pub use question::{JobQuestion, JobQuestionCreate};
