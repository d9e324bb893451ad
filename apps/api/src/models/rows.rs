use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::job::{Applicant, Job};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description_input: String,
    pub generated_listing_text: Option<String>,
    pub survey: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicantRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub name: String,
    pub responses: Value,
    pub analysis_output: Option<Value>,
    pub overall_score_data: Option<Value>,
    pub submitted_at: DateTime<Utc>,
}

impl ApplicantRow {
    pub fn into_applicant(self) -> Result<Applicant, serde_json::Error> {
        Ok(Applicant {
            id: self.id,
            name: self.name,
            job_id: self.job_id,
            responses: serde_json::from_value(self.responses)?,
            analysis_output: self.analysis_output.map(serde_json::from_value).transpose()?,
            overall_score_data: self
                .overall_score_data
                .map(serde_json::from_value)
                .transpose()?,
            submitted_at: self.submitted_at.timestamp_millis(),
        })
    }
}

impl JobRow {
    /// Builds the aggregate from a job row and its applicants, already in
    /// submission order. Server timestamps become integer milliseconds.
    pub fn into_job(self, applicants: Vec<ApplicantRow>) -> Result<Job, serde_json::Error> {
        Ok(Job {
            id: self.id,
            title: self.title,
            description_input: self.description_input,
            generated_listing_text: self.generated_listing_text,
            survey: self.survey.map(serde_json::from_value).transpose()?,
            applicants: applicants
                .into_iter()
                .map(ApplicantRow::into_applicant)
                .collect::<Result<_, _>>()?,
            created_at: self.created_at.timestamp_millis(),
        })
    }
}
