//! Process-wide cache of jobs in front of a [`JobStore`].
//!
//! The backing store is authoritative: every mutator writes through first and
//! then either re-fetches or patches the cached copy. Mutators flip a shared
//! loading flag and record the last failure message. Calls are not queued or
//! isolated from each other, so concurrent mutators race on those flags and
//! the last cache write wins.

pub mod ranking;

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::job::{Applicant, ApplicantPatch, Job, JobPatch, NewApplicant, NewJob};
use crate::persistence::{JobStore, StoreError};

#[derive(Debug, Clone, Default)]
struct CacheState {
    jobs: Vec<Job>,
    current_job: Option<Job>,
    is_loading: bool,
    error: Option<String>,
}

/// Snapshot of the cache flags for status reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub is_loading: bool,
    pub error: Option<String>,
    pub cached_jobs: usize,
    pub current_job_id: Option<Uuid>,
}

pub struct StateStore {
    backend: Arc<dyn JobStore>,
    state: RwLock<CacheState>,
}

impl StateStore {
    pub fn new(backend: Arc<dyn JobStore>) -> Self {
        Self {
            backend,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Runs one backend operation between the loading/error flag updates.
    /// No cache lock is held while `op` is pending.
    async fn track<T, F>(&self, action: &str, op: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        let result = op.await;

        let mut state = self.state.write().await;
        state.is_loading = false;
        if let Err(e) = &result {
            warn!("Failed to {action}: {e}");
            state.error = Some(format!("Failed to {action}: {e}"));
        }
        result
    }

    /// Replaces the cached job list with the backing store's, newest first.
    pub async fn fetch_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let jobs = self.track("fetch jobs", self.backend.list_jobs()).await?;
        self.state.write().await.jobs = jobs.clone();
        Ok(jobs)
    }

    /// Loads one job, makes it the current job and upserts it into the list.
    /// `Ok(None)` when the job does not exist, which also drops any cached copy.
    pub async fn fetch_job_by_id(&self, job_id: Uuid) -> Result<Option<Job>, StoreError> {
        self.state.write().await.current_job = None;

        let job = self
            .track(&format!("fetch job {job_id}"), self.backend.get_job(job_id))
            .await?;

        let mut state = self.state.write().await;
        state.current_job = job.clone();
        match &job {
            Some(job) => match state.jobs.iter_mut().find(|j| j.id == job_id) {
                Some(cached) => *cached = job.clone(),
                None => state.jobs.push(job.clone()),
            },
            // removed elsewhere
            None => state.jobs.retain(|j| j.id != job_id),
        }
        Ok(job)
    }

    /// Like [`fetch_job_by_id`](Self::fetch_job_by_id) but absence is an error.
    pub async fn require_job(&self, job_id: Uuid) -> Result<Job, StoreError> {
        self.fetch_job_by_id(job_id)
            .await?
            .ok_or(StoreError::JobNotFound(job_id))
    }

    /// Persists a new job and refreshes the list. Returns the new id.
    pub async fn create_job(&self, job: NewJob) -> Result<Uuid, StoreError> {
        let id = self.track("create job", self.backend.create_job(job)).await?;
        info!("Created job {id}");
        self.fetch_jobs().await?;
        Ok(id)
    }

    /// Persists a patch, then merges it into the cached job and current job.
    pub async fn update_job(&self, job_id: Uuid, patch: JobPatch) -> Result<(), StoreError> {
        self.track(
            &format!("update job {job_id}"),
            self.backend.update_job(job_id, patch.clone()),
        )
        .await?;

        let mut state = self.state.write().await;
        if let Some(cached) = state.jobs.iter_mut().find(|j| j.id == job_id) {
            cached.apply_patch(&patch);
        }
        if let Some(current) = state.current_job.as_mut().filter(|j| j.id == job_id) {
            current.apply_patch(&patch);
        }
        Ok(())
    }

    /// Deletes a job and drops it from the cache.
    pub async fn delete_job(&self, job_id: Uuid) -> Result<(), StoreError> {
        let removed = self
            .track(&format!("delete job {job_id}"), self.backend.delete_job(job_id))
            .await?;

        let mut state = self.state.write().await;
        state.jobs.retain(|j| j.id != job_id);
        if state.current_job.as_ref().is_some_and(|j| j.id == job_id) {
            state.current_job = None;
        }
        if !removed {
            return Err(StoreError::JobNotFound(job_id));
        }
        info!("Deleted job {job_id}");
        Ok(())
    }

    /// Persists an applicant and refreshes the owning job. Returns the applicant id.
    pub async fn add_applicant(
        &self,
        job_id: Uuid,
        applicant: NewApplicant,
    ) -> Result<Uuid, StoreError> {
        let id = self
            .track(
                &format!("add applicant to job {job_id}"),
                self.backend.add_applicant(job_id, applicant),
            )
            .await?;
        info!("Added applicant {id} to job {job_id}");
        self.fetch_job_by_id(job_id).await?;
        Ok(id)
    }

    /// Persists an applicant patch and refreshes the owning job.
    pub async fn update_applicant(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        patch: ApplicantPatch,
    ) -> Result<(), StoreError> {
        self.track(
            &format!("update applicant {applicant_id}"),
            self.backend.update_applicant(job_id, applicant_id, patch),
        )
        .await?;
        self.fetch_job_by_id(job_id).await?;
        Ok(())
    }

    pub async fn job_from_cache(&self, job_id: Uuid) -> Option<Job> {
        let state = self.state.read().await;
        state
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .or_else(|| state.current_job.as_ref().filter(|j| j.id == job_id))
            .cloned()
    }

    pub async fn applicant_from_cache(&self, job_id: Uuid, applicant_id: Uuid) -> Option<Applicant> {
        self.job_from_cache(job_id)
            .await
            .and_then(|job| job.applicant(applicant_id).cloned())
    }

    /// Cached jobs, newest first.
    pub async fn all_jobs_from_cache(&self) -> Vec<Job> {
        let mut jobs = self.state.read().await.jobs.clone();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    pub async fn status(&self) -> StoreStatus {
        let state = self.state.read().await;
        StoreStatus {
            is_loading: state.is_loading,
            error: state.error.clone(),
            cached_jobs: state.jobs.len(),
            current_job_id: state.current_job.as_ref().map(|j| j.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::models::job::{OverallScore, SoftSkill, Survey};
    use crate::persistence::memory::MemoryJobStore;

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            description_input: "Own the services that power our hiring product end to end."
                .to_string(),
            generated_listing_text: Some(format!("Job Title: {title}")),
        }
    }

    fn store() -> StateStore {
        StateStore::new(Arc::new(MemoryJobStore::new()))
    }

    struct UnavailableStore;

    #[async_trait]
    impl JobStore for UnavailableStore {
        async fn create_job(&self, _job: NewJob) -> Result<Uuid, StoreError> {
            Err(StoreError::Serialization(
                serde_json::from_str::<()>("down").unwrap_err(),
            ))
        }
        async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
            Err(StoreError::Serialization(
                serde_json::from_str::<()>("down").unwrap_err(),
            ))
        }
        async fn get_job(&self, _id: Uuid) -> Result<Option<Job>, StoreError> {
            Ok(None)
        }
        async fn update_job(&self, id: Uuid, _patch: JobPatch) -> Result<(), StoreError> {
            Err(StoreError::JobNotFound(id))
        }
        async fn delete_job(&self, _id: Uuid) -> Result<bool, StoreError> {
            Ok(false)
        }
        async fn add_applicant(
            &self,
            job_id: Uuid,
            _applicant: NewApplicant,
        ) -> Result<Uuid, StoreError> {
            Err(StoreError::JobNotFound(job_id))
        }
        async fn update_applicant(
            &self,
            job_id: Uuid,
            _applicant_id: Uuid,
            _patch: ApplicantPatch,
        ) -> Result<(), StoreError> {
            Err(StoreError::JobNotFound(job_id))
        }
    }

    #[tokio::test]
    async fn test_create_job_refreshes_cache() {
        let store = store();
        let first = store.create_job(new_job("First")).await.unwrap();
        let second = store.create_job(new_job("Second")).await.unwrap();

        let cached: Vec<Uuid> = store
            .all_jobs_from_cache()
            .await
            .into_iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(cached, vec![second, first]);

        let status = store.status().await;
        assert!(!status.is_loading);
        assert_eq!(status.error, None);
        assert_eq!(status.cached_jobs, 2);
    }

    #[tokio::test]
    async fn test_update_job_patches_cache_and_current_job() {
        let store = store();
        let id = store.create_job(new_job("Backend Engineer")).await.unwrap();
        store.fetch_job_by_id(id).await.unwrap();

        let survey = Survey {
            questions: vec!["Q1".to_string(), "Q2".to_string()],
            top_skills: vec![SoftSkill::Communication],
        };
        store
            .update_job(
                id,
                JobPatch {
                    survey: Some(survey.clone()),
                    ..JobPatch::default()
                },
            )
            .await
            .unwrap();

        let cached = store.job_from_cache(id).await.unwrap();
        assert_eq!(cached.survey, Some(survey));
        assert_eq!(cached.title, "Backend Engineer");
        assert_eq!(store.status().await.current_job_id, Some(id));
    }

    #[tokio::test]
    async fn test_fetch_missing_job_clears_current_job() {
        let store = store();
        let id = store.create_job(new_job("Backend Engineer")).await.unwrap();
        store.fetch_job_by_id(id).await.unwrap();

        let missing = store.fetch_job_by_id(Uuid::new_v4()).await.unwrap();
        assert!(missing.is_none());
        assert_eq!(store.status().await.current_job_id, None);
    }

    #[tokio::test]
    async fn test_delete_job_drops_it_from_cache() {
        let store = store();
        let id = store.create_job(new_job("Backend Engineer")).await.unwrap();
        store.delete_job(id).await.unwrap();

        assert!(store.job_from_cache(id).await.is_none());
        assert!(store.fetch_job_by_id(id).await.unwrap().is_none());
        assert!(store.fetch_jobs().await.unwrap().is_empty());

        let err = store.delete_job(id).await.unwrap_err();
        assert!(matches!(err, StoreError::JobNotFound(_)));
    }

    #[tokio::test]
    async fn test_applicant_mutations_refetch_the_job() {
        let store = store();
        let job_id = store.create_job(new_job("Backend Engineer")).await.unwrap();
        let applicant_id = store
            .add_applicant(
                job_id,
                NewApplicant {
                    name: "Jane Doe".to_string(),
                    job_id,
                    responses: vec![],
                },
            )
            .await
            .unwrap();

        let cached = store.applicant_from_cache(job_id, applicant_id).await.unwrap();
        assert!(cached.is_pending_analysis());

        store
            .update_applicant(
                job_id,
                applicant_id,
                ApplicantPatch {
                    overall_score_data: Some(OverallScore {
                        summary: "Great".to_string(),
                        overall_score: 92.0,
                    }),
                    ..ApplicantPatch::default()
                },
            )
            .await
            .unwrap();

        let cached = store.applicant_from_cache(job_id, applicant_id).await.unwrap();
        assert_eq!(cached.overall_score(), Some(92.0));
    }

    #[tokio::test]
    async fn test_backend_failure_records_error_and_clears_loading() {
        let store = StateStore::new(Arc::new(UnavailableStore));

        assert!(store.fetch_jobs().await.is_err());
        let status = store.status().await;
        assert!(!status.is_loading);
        assert!(status.error.unwrap().starts_with("Failed to fetch jobs"));

        // a later success clears the recorded error
        assert!(store.fetch_job_by_id(Uuid::new_v4()).await.unwrap().is_none());
        assert_eq!(store.status().await.error, None);
    }

    #[tokio::test]
    async fn test_job_deleted_behind_the_cache_is_dropped_on_fetch() {
        let backend = Arc::new(MemoryJobStore::new());
        let store = StateStore::new(backend.clone());
        let gone = store.create_job(new_job("Removed elsewhere")).await.unwrap();
        let kept = store.create_job(new_job("Still here")).await.unwrap();

        assert!(backend.delete_job(gone).await.unwrap());
        assert!(store.job_from_cache(gone).await.is_some());

        assert!(store.fetch_job_by_id(gone).await.unwrap().is_none());
        assert!(store.job_from_cache(gone).await.is_none());
        let cached: Vec<Uuid> = store
            .all_jobs_from_cache()
            .await
            .into_iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(cached, vec![kept]);
    }
}
