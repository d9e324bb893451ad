//! Hiring workflow: listing → survey → submission → scoring.
//!
//! Each step persists through the [`StateStore`] before the next model call,
//! so a failure part way leaves whatever was already written in place.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::ai::analysis::{analyze_responses, AnalyzeResponsesInput};
use crate::ai::listing::generate_listing;
use crate::ai::summary::{summarize_responses, SummarizeResponsesInput};
use crate::ai::survey;
use crate::errors::AppError;
use crate::hiring::validation::{validate_new_job, validate_submission};
use crate::llm_client::LlmClient;
use crate::models::job::{ApplicantPatch, Job, JobPatch, NewApplicant, NewJob, SurveyResponse};
use crate::store::StateStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub job_description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSurveyRequest {
    pub name: String,
    /// In survey question order.
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub applicant_id: Uuid,
    pub summary: String,
    pub overall_score: f64,
}

/// Public URL candidates open to take a job's survey.
pub fn survey_link(public_base_url: &str, job_id: Uuid) -> String {
    format!(
        "{}/job/{job_id}/take-survey",
        public_base_url.trim_end_matches('/')
    )
}

/// Validates the request, generates a listing and persists the job with it.
pub async fn create_job_with_listing(
    store: &StateStore,
    llm: &LlmClient,
    req: &CreateJobRequest,
) -> Result<Job, AppError> {
    validate_new_job(&req.title, &req.job_description)?;

    let description = req.job_description.trim();
    let listing = generate_listing(llm, description).await?;

    let id = store
        .create_job(NewJob {
            title: req.title.trim().to_string(),
            description_input: description.to_string(),
            generated_listing_text: Some(listing),
        })
        .await?;

    Ok(store.require_job(id).await?)
}

/// Generates a survey from the job's listing and attaches it, replacing any
/// earlier survey.
pub async fn create_survey(
    store: &StateStore,
    llm: &LlmClient,
    job_id: Uuid,
    question_count: usize,
) -> Result<Job, AppError> {
    let job = store.require_job(job_id).await?;
    let listing = job.generated_listing_text.as_deref().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Job {job_id} has no generated listing"))
    })?;

    let survey = survey::create_survey(llm, listing, question_count).await?;
    info!(
        "Generated {} survey questions for job {job_id} ({})",
        survey.questions.len(),
        survey
            .top_skills
            .iter()
            .map(|s| s.label())
            .collect::<Vec<_>>()
            .join(", ")
    );

    store
        .update_job(
            job_id,
            JobPatch {
                survey: Some(survey),
                ..JobPatch::default()
            },
        )
        .await?;

    Ok(store.require_job(job_id).await?)
}

/// Records an applicant, then scores them: analysis first, overall summary
/// second. Each result is written as soon as it arrives. On a model failure
/// the applicant stays pending and the error is returned.
pub async fn submit_survey(
    store: &StateStore,
    llm: &LlmClient,
    job_id: Uuid,
    req: &SubmitSurveyRequest,
) -> Result<SubmissionOutcome, AppError> {
    let job = store.require_job(job_id).await?;
    let survey = job.survey.as_ref().ok_or_else(|| {
        AppError::UnprocessableEntity(format!("Job {job_id} has no survey"))
    })?;
    validate_submission(&req.name, &req.answers, survey)?;

    let responses: Vec<SurveyResponse> = survey
        .questions
        .iter()
        .zip(&req.answers)
        .map(|(question, answer)| SurveyResponse {
            question: question.clone(),
            answer: answer.trim().to_string(),
        })
        .collect();

    let applicant_id = store
        .add_applicant(
            job_id,
            NewApplicant {
                name: req.name.trim().to_string(),
                job_id,
                responses: responses.clone(),
            },
        )
        .await?;

    let listing = job.listing_or_description();

    let analysis_input = AnalyzeResponsesInput {
        job_listing: listing.to_string(),
        soft_skills: survey.top_skills.clone(),
        responses: responses.clone(),
    };
    let analysis = analyze_responses(llm, &analysis_input)
        .await
        .inspect_err(|e| warn!("Applicant {applicant_id} left pending: {e}"))?;
    store
        .update_applicant(
            job_id,
            applicant_id,
            ApplicantPatch {
                analysis_output: Some(analysis),
                ..ApplicantPatch::default()
            },
        )
        .await?;

    let summary_input = SummarizeResponsesInput::new(listing, &responses, &survey.top_skills);
    let overall = summarize_responses(llm, &summary_input)
        .await
        .inspect_err(|e| warn!("Applicant {applicant_id} left pending: {e}"))?;
    store
        .update_applicant(
            job_id,
            applicant_id,
            ApplicantPatch {
                overall_score_data: Some(overall.clone()),
                ..ApplicantPatch::default()
            },
        )
        .await?;

    info!(
        "Scored applicant {applicant_id} for job {job_id}: {}",
        overall.overall_score
    );
    Ok(SubmissionOutcome {
        applicant_id,
        summary: overall.summary,
        overall_score: overall.overall_score,
    })
}
