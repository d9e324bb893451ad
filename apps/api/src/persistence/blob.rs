//! The keyed-blob document: every job, with embedded applicants, in one map.
//!
//! Pure data operations shared by the Redis and memory backends. Callers
//! own the single-writer discipline around load → mutate → save.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::job::{Applicant, ApplicantPatch, Job, JobPatch, NewApplicant, NewJob};
use crate::persistence::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsBlob {
    jobs: BTreeMap<Uuid, Job>,
}

impl JobsBlob {
    pub fn from_json(raw: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Wall-clock milliseconds, bumped past the newest job so creation order is total.
    fn next_created_at(&self) -> i64 {
        let newest = self.jobs.values().map(|j| j.created_at).max();
        let now = Utc::now().timestamp_millis();
        match newest {
            Some(newest) if newest >= now => newest + 1,
            _ => now,
        }
    }

    pub fn insert_job(&mut self, job: NewJob) -> Uuid {
        let id = Uuid::new_v4();
        let created_at = self.next_created_at();
        self.jobs.insert(
            id,
            Job {
                id,
                title: job.title,
                description_input: job.description_input,
                generated_listing_text: job.generated_listing_text,
                survey: None,
                applicants: Vec::new(),
                created_at,
            },
        );
        id
    }

    /// Newest first.
    pub fn list(&self) -> Vec<Job> {
        let mut jobs: Vec<Job> = self.jobs.values().cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    pub fn get(&self, id: Uuid) -> Option<Job> {
        self.jobs.get(&id).cloned()
    }

    pub fn update_job(&mut self, id: Uuid, patch: &JobPatch) -> Result<(), StoreError> {
        let job = self.jobs.get_mut(&id).ok_or(StoreError::JobNotFound(id))?;
        job.apply_patch(patch);
        Ok(())
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        self.jobs.remove(&id).is_some()
    }

    pub fn add_applicant(&mut self, job_id: Uuid, applicant: NewApplicant) -> Result<Uuid, StoreError> {
        let job = self
            .jobs
            .get_mut(&job_id)
            .ok_or(StoreError::JobNotFound(job_id))?;
        let id = Uuid::new_v4();
        job.applicants.push(Applicant {
            id,
            name: applicant.name,
            job_id: applicant.job_id,
            responses: applicant.responses,
            analysis_output: None,
            overall_score_data: None,
            submitted_at: Utc::now().timestamp_millis(),
        });
        Ok(id)
    }

    pub fn update_applicant(
        &mut self,
        job_id: Uuid,
        applicant_id: Uuid,
        patch: &ApplicantPatch,
    ) -> Result<(), StoreError> {
        let job = self
            .jobs
            .get_mut(&job_id)
            .ok_or(StoreError::JobNotFound(job_id))?;
        let applicant = job
            .applicants
            .iter_mut()
            .find(|a| a.id == applicant_id)
            .ok_or(StoreError::ApplicantNotFound {
                job_id,
                applicant_id,
            })?;
        applicant.apply_patch(patch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            description_input: "A description".to_string(),
            generated_listing_text: None,
        }
    }

    #[test]
    fn test_jobs_created_back_to_back_have_distinct_times() {
        let mut blob = JobsBlob::default();
        let first = blob.insert_job(new_job("first"));
        let second = blob.insert_job(new_job("second"));
        let third = blob.insert_job(new_job("third"));

        let ids: Vec<Uuid> = blob.list().into_iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![third, second, first]);
    }

    #[test]
    fn test_blob_json_round_trip() {
        let mut blob = JobsBlob::default();
        let id = blob.insert_job(new_job("Backend Engineer"));
        blob.add_applicant(
            id,
            NewApplicant {
                name: "Jane Doe".to_string(),
                job_id: id,
                responses: vec![],
            },
        )
        .unwrap();

        let restored = JobsBlob::from_json(&blob.to_json().unwrap()).unwrap();
        assert_eq!(restored, blob);
    }

    #[test]
    fn test_unknown_applicant_is_reported() {
        let mut blob = JobsBlob::default();
        let id = blob.insert_job(new_job("t"));
        let missing = Uuid::new_v4();
        let err = blob
            .update_applicant(id, missing, &ApplicantPatch::default())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::ApplicantNotFound { applicant_id, .. } if applicant_id == missing
        ));
    }

    #[test]
    fn test_corrupt_blob_is_a_serialization_error() {
        let err = JobsBlob::from_json("{not json").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
