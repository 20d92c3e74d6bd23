//! Candidate handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use query::{ApplicationSearchParams, CandidateListParams};

use super::envelope::{ApplicationsPage, CandidatesPage};
use crate::extractors::StrictQuery;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/applications", get(my_applications))
}

/// Routes behind the admin guard
pub fn user_admin_routes() -> Router<AppState> {
    Router::new().route("/user/candidates", get(list_candidates))
}

/// List registered candidates (admin only)
#[utoipa::path(
    get,
    path = "/api/user/candidates",
    tag = "Candidates",
    security(("bearer_auth" = [])),
    params(CandidateListParams),
    responses(
        (status = 200, description = "Candidates", body = CandidatesPage),
        (status = 400, description = "Invalid filter"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_candidates(
    State(state): State<AppState>,
    StrictQuery(params): StrictQuery<CandidateListParams>,
) -> AppResult<Json<CandidatesPage>> {
    let page = state.candidates.list_candidates(&params).await?;
    Ok(Json(CandidatesPage::from(page)))
}

/// The caller's own applications
#[utoipa::path(
    get,
    path = "/api/user/applications",
    tag = "Candidates",
    security(("bearer_auth" = [])),
    params(ApplicationSearchParams),
    responses(
        (status = 200, description = "Applications", body = ApplicationsPage),
        (status = 403, description = "Candidates only")
    )
)]
pub async fn my_applications(
    Extension(current): Extension<CurrentPrincipal>,
    State(state): State<AppState>,
    StrictQuery(params): StrictQuery<ApplicationSearchParams>,
) -> AppResult<Json<ApplicationsPage>> {
    let user = current.user()?;
    let page = state.candidates.my_applications(user.id, &params).await?;
    Ok(Json(ApplicationsPage::from(page)))
}
