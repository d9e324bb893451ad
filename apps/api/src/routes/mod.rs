pub mod health;

use axum::{routing::get, Router};

use crate::hiring::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(handlers::handle_list_jobs).post(handlers::handle_create_job),
        )
        .route(
            "/api/v1/jobs/:job_id",
            get(handlers::handle_get_job)
                .patch(handlers::handle_update_job)
                .delete(handlers::handle_delete_job),
        )
        // Survey
        .route(
            "/api/v1/jobs/:job_id/survey",
            get(handlers::handle_get_survey).post(handlers::handle_create_survey),
        )
        // Applicants
        .route(
            "/api/v1/jobs/:job_id/applicants",
            get(handlers::handle_ranking).post(handlers::handle_submit_survey),
        )
        .route(
            "/api/v1/jobs/:job_id/applicants/:applicant_id",
            get(handlers::handle_get_applicant),
        )
        .route("/api/v1/store/status", get(handlers::handle_store_status))
        .with_state(state)
}
