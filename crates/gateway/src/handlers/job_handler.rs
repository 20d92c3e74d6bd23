//! Job handlers.

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{JobResponse, NewJob};
use query::{ApplicationSearchParams, JobManagementParams, JobSearchParams};

use super::envelope::{ApplicantsPage, JobsPage};
use super::parse_id;
use crate::extractors::{StrictQuery, ValidatedJson};
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// Job posting request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Backend Engineer")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = "SP")]
    pub state: Option<String>,
    #[schema(example = "Campinas")]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "Modality is required"))]
    #[schema(example = "Remote")]
    pub modality: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    #[schema(example = "CLT")]
    pub job_type: String,
    #[serde(default)]
    pub pcd: bool,
    #[validate(range(min = 0.0, message = "Salary cannot be negative"))]
    pub salary: Option<f64>,
    /// Show the company name on the posting
    #[serde(default)]
    pub identify_company: bool,
}

impl From<CreateJobRequest> for NewJob {
    fn from(request: CreateJobRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            state: request.state,
            city: request.city,
            modality: request.modality,
            job_type: request.job_type,
            pcd: request.pcd,
            salary: request.salary,
            identify_company: request.identify_company,
        }
    }
}

/// Submitted application
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReceipt {
    pub id: String,
    pub job: String,
    #[schema(example = "Pending")]
    pub status: String,
    pub submission_date: DateTime<Utc>,
}

pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/search", get(search_jobs))
        .route("/jobs/:id/status", patch(toggle_job_status))
        .route("/jobs/:id/apply", post(apply_to_job))
        .route("/jobs/:id/candidates", get(job_candidates))
}

/// Search active postings
#[utoipa::path(
    get,
    path = "/api/jobs/search",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(JobSearchParams),
    responses(
        (status = 200, description = "Matching active jobs", body = JobsPage),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn search_jobs(
    State(state): State<AppState>,
    StrictQuery(params): StrictQuery<JobSearchParams>,
) -> AppResult<Json<JobsPage>> {
    let page = state.jobs.search(&params).await?;
    Ok(Json(JobsPage::from(page)))
}

/// Postings managed by the caller (own jobs, or all for admins)
#[utoipa::path(
    get,
    path = "/api/jobs",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(JobManagementParams),
    responses(
        (status = 200, description = "Managed jobs", body = JobsPage),
        (status = 400, description = "Invalid filter"),
        (status = 403, description = "Candidates cannot manage jobs")
    )
)]
pub async fn list_jobs(
    Extension(current): Extension<CurrentPrincipal>,
    State(state): State<AppState>,
    StrictQuery(params): StrictQuery<JobManagementParams>,
) -> AppResult<Json<JobsPage>> {
    let page = state
        .jobs
        .list_managed(current.principal(), &params)
        .await?;
    Ok(Json(JobsPage::from(page)))
}

/// Publish a posting (companies only)
#[utoipa::path(
    post,
    path = "/api/jobs",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job published", body = JobResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Only companies publish jobs")
    )
)]
pub async fn create_job(
    Extension(current): Extension<CurrentPrincipal>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateJobRequest>,
) -> AppResult<(StatusCode, Json<JobResponse>)> {
    let company = current.company()?;
    let job = state.jobs.create(company, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Activate or deactivate a posting
#[utoipa::path(
    patch,
    path = "/api/jobs/{id}/status",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 200, description = "Updated job", body = JobResponse),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn toggle_job_status(
    Extension(current): Extension<CurrentPrincipal>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<JobResponse>> {
    let job = state
        .jobs
        .toggle_status(current.principal(), parse_id(&id)?)
        .await?;
    Ok(Json(job))
}

/// Apply to an active posting (candidates only)
#[utoipa::path(
    post,
    path = "/api/jobs/{id}/apply",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ID")),
    responses(
        (status = 201, description = "Application submitted", body = ApplicationReceipt),
        (status = 403, description = "Only candidates apply"),
        (status = 404, description = "Job not found or inactive"),
        (status = 409, description = "Already applied")
    )
)]
pub async fn apply_to_job(
    Extension(current): Extension<CurrentPrincipal>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<(StatusCode, Json<ApplicationReceipt>)> {
    let user = current.user()?;
    let application = state.jobs.apply(user, parse_id(&id)?).await?;

    let receipt = ApplicationReceipt {
        id: application.id.to_hex(),
        job: application.job.to_hex(),
        status: application.status,
        submission_date: application.submission_date.to_chrono(),
    };
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// Applicants to one posting
#[utoipa::path(
    get,
    path = "/api/jobs/{id}/candidates",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Job ID"), ApplicationSearchParams),
    responses(
        (status = 200, description = "Applicants", body = ApplicantsPage),
        (status = 403, description = "Not the owning company"),
        (status = 404, description = "Job not found")
    )
)]
pub async fn job_candidates(
    Extension(current): Extension<CurrentPrincipal>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    StrictQuery(params): StrictQuery<ApplicationSearchParams>,
) -> AppResult<Json<ApplicantsPage>> {
    let page = state
        .candidates
        .job_candidates(current.principal(), parse_id(&id)?, &params)
        .await?;
    Ok(Json(ApplicantsPage::from(page)))
}
