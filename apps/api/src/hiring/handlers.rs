use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::hiring::service::{
    self, survey_link, CreateJobRequest, SubmissionOutcome, SubmitSurveyRequest,
};
use crate::hiring::validation::validate_job_patch;
use crate::models::job::{Applicant, Job, JobPatch, SoftSkill};
use crate::state::AppState;
use crate::store::ranking::{pending_count, rank_applicants};
use crate::store::StoreStatus;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobWithSurveyLink {
    pub job: Job,
    pub survey_link: String,
}

/// What a candidate sees: no applicants, no other candidates' data.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSurvey {
    pub job_id: Uuid,
    pub title: String,
    pub job_listing: String,
    pub questions: Vec<String>,
    pub top_skills: Vec<SoftSkill>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedApplicant {
    pub rank: usize,
    pub id: Uuid,
    pub name: String,
    pub overall_score: f64,
    pub summary: String,
    pub submitted_at: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingDashboard {
    pub job_id: Uuid,
    pub title: String,
    pub survey_link: String,
    pub ranked_applicants: Vec<RankedApplicant>,
    /// Submitted but not yet scored, or scoring failed.
    pub pending_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDetail {
    pub job_id: Uuid,
    pub job_title: String,
    pub top_skills: Vec<SoftSkill>,
    pub applicant: Applicant,
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Result<Json<Vec<Job>>, AppError> {
    state.store.fetch_jobs().await?;
    Ok(Json(state.store.all_jobs_from_cache().await))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = service::create_job_with_listing(&state.store, &state.llm, &req).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(state.store.require_job(job_id).await?))
}

/// PATCH /api/v1/jobs/:job_id
pub async fn handle_update_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(patch): Json<JobPatch>,
) -> Result<Json<Job>, AppError> {
    validate_job_patch(&patch)?;
    state.store.update_job(job_id, patch).await?;
    Ok(Json(state.store.require_job(job_id).await?))
}

/// DELETE /api/v1/jobs/:job_id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.store.delete_job(job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/jobs/:job_id/survey
pub async fn handle_create_survey(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobWithSurveyLink>, AppError> {
    let job = service::create_survey(
        &state.store,
        &state.llm,
        job_id,
        state.config.survey_question_count,
    )
    .await?;
    Ok(Json(JobWithSurveyLink {
        survey_link: survey_link(&state.config.public_base_url, job.id),
        job,
    }))
}

/// GET /api/v1/jobs/:job_id/survey
pub async fn handle_get_survey(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<PublicSurvey>, AppError> {
    let job = state.store.require_job(job_id).await?;
    let listing = job.listing_or_description().to_string();
    let survey = job
        .survey
        .ok_or_else(|| AppError::UnprocessableEntity(format!("Job {job_id} has no survey")))?;
    Ok(Json(PublicSurvey {
        job_id,
        title: job.title,
        job_listing: listing,
        questions: survey.questions,
        top_skills: survey.top_skills,
    }))
}

/// POST /api/v1/jobs/:job_id/applicants
pub async fn handle_submit_survey(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(req): Json<SubmitSurveyRequest>,
) -> Result<(StatusCode, Json<SubmissionOutcome>), AppError> {
    let outcome = service::submit_survey(&state.store, &state.llm, job_id, &req).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// GET /api/v1/jobs/:job_id/applicants
pub async fn handle_ranking(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<RankingDashboard>, AppError> {
    let job = state.store.require_job(job_id).await?;
    let ranked_applicants = rank_applicants(&job.applicants)
        .into_iter()
        .enumerate()
        .filter_map(|(i, a)| {
            let overall = a.overall_score_data.as_ref()?;
            Some(RankedApplicant {
                rank: i + 1,
                id: a.id,
                name: a.name.clone(),
                overall_score: overall.overall_score,
                summary: overall.summary.clone(),
                submitted_at: a.submitted_at,
            })
        })
        .collect();

    Ok(Json(RankingDashboard {
        job_id,
        survey_link: survey_link(&state.config.public_base_url, job_id),
        pending_count: pending_count(&job),
        title: job.title,
        ranked_applicants,
    }))
}

/// GET /api/v1/jobs/:job_id/applicants/:applicant_id
pub async fn handle_get_applicant(
    State(state): State<AppState>,
    Path((job_id, applicant_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApplicantDetail>, AppError> {
    let job = state.store.require_job(job_id).await?;
    Ok(Json(applicant_detail(job, applicant_id)?))
}

/// Builds the detail view from one fetched copy of the job.
fn applicant_detail(job: Job, applicant_id: Uuid) -> Result<ApplicantDetail, AppError> {
    let applicant = job.applicant(applicant_id).cloned().ok_or_else(|| {
        AppError::NotFound(format!(
            "Applicant {applicant_id} not found in job {}",
            job.id
        ))
    })?;

    Ok(ApplicantDetail {
        job_id: job.id,
        job_title: job.title,
        top_skills: job.survey.map(|s| s.top_skills).unwrap_or_default(),
        applicant,
    })
}

/// GET /api/v1/store/status
pub async fn handle_store_status(State(state): State<AppState>) -> Json<StoreStatus> {
    Json(state.store.status().await)
}
