use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::models::job::{ApplicantPatch, Job, JobPatch, NewApplicant, NewJob};
use crate::persistence::blob::JobsBlob;
use crate::persistence::{JobStore, StoreError};

/// Fixed key holding the full jobs map.
pub const JOBS_BLOB_KEY: &str = "hiring-assistant:jobs";

/// Keyed-blob store: every read loads the whole map, every mutation writes it back.
///
/// Mutations are serialized by `write_lock`, so one process never loses its own
/// writes. Several processes sharing one key are not coordinated.
pub struct RedisJobStore {
    client: redis::Client,
    write_lock: Mutex<()>,
}

impl RedisJobStore {
    pub fn new(client: redis::Client) -> Self {
        Self {
            client,
            write_lock: Mutex::new(()),
        }
    }

    async fn load(&self) -> Result<JobsBlob, StoreError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = con.get(JOBS_BLOB_KEY).await?;
        match raw {
            Some(raw) => JobsBlob::from_json(&raw),
            None => Ok(JobsBlob::default()),
        }
    }

    async fn save(&self, blob: &JobsBlob) -> Result<(), StoreError> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.set::<_, _, ()>(JOBS_BLOB_KEY, blob.to_json()?).await?;
        Ok(())
    }

    /// Load, apply `f`, and write back only when `f` succeeds.
    async fn mutate<T>(
        &self,
        f: impl FnOnce(&mut JobsBlob) -> Result<T, StoreError> + Send,
    ) -> Result<T, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut blob = self.load().await?;
        let out = f(&mut blob)?;
        self.save(&blob).await?;
        Ok(out)
    }
}

#[async_trait]
impl JobStore for RedisJobStore {
    async fn create_job(&self, job: NewJob) -> Result<Uuid, StoreError> {
        let id = self.mutate(|blob| Ok(blob.insert_job(job))).await?;
        info!("Stored job {id} under {JOBS_BLOB_KEY}");
        Ok(id)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        Ok(self.load().await?.list())
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        Ok(self.load().await?.get(id))
    }

    async fn update_job(&self, id: Uuid, patch: JobPatch) -> Result<(), StoreError> {
        self.mutate(|blob| blob.update_job(id, &patch)).await
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError> {
        self.mutate(|blob| Ok(blob.remove(id))).await
    }

    async fn add_applicant(
        &self,
        job_id: Uuid,
        applicant: NewApplicant,
    ) -> Result<Uuid, StoreError> {
        self.mutate(|blob| blob.add_applicant(job_id, applicant))
            .await
    }

    async fn update_applicant(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        patch: ApplicantPatch,
    ) -> Result<(), StoreError> {
        self.mutate(|blob| blob.update_applicant(job_id, applicant_id, &patch))
            .await
    }
}
