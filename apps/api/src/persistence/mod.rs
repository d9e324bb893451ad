//! Persistence adapter: moves Job aggregates in and out of a backing store.
//!
//! Three interchangeable backends implement [`JobStore`]:
//! - [`postgres::PgJobStore`]: jobs and applicants in their own tables
//! - [`redis_store::RedisJobStore`]: the whole jobs map as one JSON blob under a fixed key
//! - [`memory::MemoryJobStore`]: the same blob held in process

pub mod blob;
pub mod memory;
pub mod postgres;
pub mod redis_store;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job::{ApplicantPatch, Job, JobPatch, NewApplicant, NewJob};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("job {0} not found")]
    JobNotFound(Uuid),

    #[error("applicant {applicant_id} not found in job {job_id}")]
    ApplicantNotFound { job_id: Uuid, applicant_id: Uuid },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),

    #[error("malformed stored document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CRUD over job documents with embedded applicants.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Inserts a job with no applicants and a store-assigned creation time.
    async fn create_job(&self, job: NewJob) -> Result<Uuid, StoreError>;

    /// All jobs, newest first.
    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError>;

    /// `Ok(None)` when the job does not exist.
    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError>;

    async fn update_job(&self, id: Uuid, patch: JobPatch) -> Result<(), StoreError>;

    /// Returns whether a job was removed. Its applicants go with it.
    async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Appends an applicant with a generated id and store-assigned submission time.
    async fn add_applicant(&self, job_id: Uuid, applicant: NewApplicant)
        -> Result<Uuid, StoreError>;

    /// Merges a patch into exactly one applicant.
    async fn update_applicant(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        patch: ApplicantPatch,
    ) -> Result<(), StoreError>;
}
