use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::models::job::{ApplicantPatch, Job, JobPatch, NewApplicant, NewJob};
use crate::persistence::blob::JobsBlob;
use crate::persistence::{JobStore, StoreError};

/// In-process store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryJobStore {
    blob: Mutex<JobsBlob>,
}

impl MemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create_job(&self, job: NewJob) -> Result<Uuid, StoreError> {
        Ok(self.blob.lock().await.insert_job(job))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.blob.lock().await.list())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        Ok(self.blob.lock().await.get(id))
    }

    async fn update_job(&self, id: Uuid, patch: JobPatch) -> Result<(), StoreError> {
        self.blob.lock().await.update_job(id, &patch)
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.blob.lock().await.remove(id))
    }

    async fn add_applicant(
        &self,
        job_id: Uuid,
        applicant: NewApplicant,
    ) -> Result<Uuid, StoreError> {
        self.blob.lock().await.add_applicant(job_id, applicant)
    }

    async fn update_applicant(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        patch: ApplicantPatch,
    ) -> Result<(), StoreError> {
        self.blob
            .lock()
            .await
            .update_applicant(job_id, applicant_id, &patch)
    }
}
