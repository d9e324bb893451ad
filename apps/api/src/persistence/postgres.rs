//! PostgreSQL backend. Applicants live in their own table keyed by id, so
//! updating one applicant is a single-row UPDATE and never rewrites siblings.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job::{ApplicantPatch, Job, JobPatch, NewApplicant, NewJob};
use crate::models::rows::{ApplicantRow, JobRow};
use crate::persistence::{JobStore, StoreError};

const JOB_COLUMNS: &str =
    "id, title, description_input, generated_listing_text, survey, created_at";
const APPLICANT_COLUMNS: &str =
    "id, job_id, name, responses, analysis_output, overall_score_data, submitted_at";

#[derive(Clone)]
pub struct PgJobStore {
    pool: PgPool,
}

impl PgJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn applicants_for(&self, job_ids: &[Uuid]) -> Result<Vec<ApplicantRow>, StoreError> {
        Ok(sqlx::query_as::<_, ApplicantRow>(&format!(
            "SELECT {APPLICANT_COLUMNS} FROM applicants WHERE job_id = ANY($1) ORDER BY seq"
        ))
        .bind(job_ids)
        .fetch_all(&self.pool)
        .await?)
    }
}

fn to_json<T: serde::Serialize>(value: &Option<T>) -> Result<Option<serde_json::Value>, StoreError> {
    Ok(value.as_ref().map(serde_json::to_value).transpose()?)
}

#[async_trait]
impl JobStore for PgJobStore {
    async fn create_job(&self, job: NewJob) -> Result<Uuid, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO jobs (id, title, description_input, generated_listing_text)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&job.title)
        .bind(&job.description_input)
        .bind(&job.generated_listing_text)
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted job {id}");
        Ok(id)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs ORDER BY created_at DESC, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut by_job: HashMap<Uuid, Vec<ApplicantRow>> = HashMap::new();
        for applicant in self.applicants_for(&ids).await? {
            by_job.entry(applicant.job_id).or_default().push(applicant);
        }

        rows.into_iter()
            .map(|row| -> Result<Job, StoreError> {
                let applicants = by_job.remove(&row.id).unwrap_or_default();
                Ok(row.into_job(applicants)?)
            })
            .collect()
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(&format!(
            "SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let applicants = self.applicants_for(&[id]).await?;
        Ok(Some(row.into_job(applicants)?))
    }

    async fn update_job(&self, id: Uuid, patch: JobPatch) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                description_input = COALESCE($3, description_input),
                generated_listing_text = COALESCE($4, generated_listing_text),
                survey = COALESCE($5, survey)
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.description_input)
        .bind(&patch.generated_listing_text)
        .bind(to_json(&patch.survey)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::JobNotFound(id));
        }
        info!("Updated job {id}");
        Ok(())
    }

    async fn delete_job(&self, id: Uuid) -> Result<bool, StoreError> {
        // applicants are removed by ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_applicant(
        &self,
        job_id: Uuid,
        applicant: NewApplicant,
    ) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        let responses = serde_json::to_value(&applicant.responses)?;
        let result = sqlx::query(
            r#"
            INSERT INTO applicants (id, job_id, name, responses)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (SELECT 1 FROM jobs WHERE id = $2)
            "#,
        )
        .bind(id)
        .bind(job_id)
        .bind(&applicant.name)
        .bind(responses)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::JobNotFound(job_id));
        }
        info!("Inserted applicant {id} for job {job_id}");
        Ok(id)
    }

    async fn update_applicant(
        &self,
        job_id: Uuid,
        applicant_id: Uuid,
        patch: ApplicantPatch,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE applicants SET
                name = COALESCE($3, name),
                responses = COALESCE($4, responses),
                analysis_output = COALESCE($5, analysis_output),
                overall_score_data = COALESCE($6, overall_score_data)
            WHERE id = $1 AND job_id = $2
            "#,
        )
        .bind(applicant_id)
        .bind(job_id)
        .bind(&patch.name)
        .bind(to_json(&patch.responses)?)
        .bind(to_json(&patch.analysis_output)?)
        .bind(to_json(&patch.overall_score_data)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let job_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM jobs WHERE id = $1)")
                .bind(job_id)
                .fetch_one(&self.pool)
                .await?;
        if job_exists {
            Err(StoreError::ApplicantNotFound {
                job_id,
                applicant_id,
            })
        } else {
            Err(StoreError::JobNotFound(job_id))
        }
    }
}
