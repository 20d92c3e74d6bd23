//! Company handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};

use common::AppResult;
use query::{ApplicationSearchParams, CompanyListParams};

use super::envelope::{ApplicantsPage, CompaniesPage};
use crate::extractors::StrictQuery;
use crate::middleware::CurrentPrincipal;
use crate::state::AppState;

/// Routes for the authenticated company
pub fn company_routes() -> Router<AppState> {
    Router::new().route("/company/candidates", get(company_candidates))
}

/// Routes behind the admin guard
pub fn company_admin_routes() -> Router<AppState> {
    Router::new().route("/company", get(list_companies))
}

/// List companies (admin only)
#[utoipa::path(
    get,
    path = "/api/company",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(CompanyListParams),
    responses(
        (status = 200, description = "Companies", body = CompaniesPage),
        (status = 400, description = "Invalid filter"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_companies(
    State(state): State<AppState>,
    StrictQuery(params): StrictQuery<CompanyListParams>,
) -> AppResult<Json<CompaniesPage>> {
    let page = state.companies.list(&params).await?;
    Ok(Json(CompaniesPage::from(page)))
}

/// Applicants across all of the company's postings
#[utoipa::path(
    get,
    path = "/api/company/candidates",
    tag = "Companies",
    security(("bearer_auth" = [])),
    params(ApplicationSearchParams),
    responses(
        (status = 200, description = "Applicants", body = ApplicantsPage),
        (status = 403, description = "Companies only")
    )
)]
pub async fn company_candidates(
    Extension(current): Extension<CurrentPrincipal>,
    State(state): State<AppState>,
    StrictQuery(params): StrictQuery<ApplicationSearchParams>,
) -> AppResult<Json<ApplicantsPage>> {
    let company = current.company()?;
    let page = state
        .candidates
        .company_candidates(company, &params)
        .await?;
    Ok(Json(ApplicantsPage::from(page)))
}
