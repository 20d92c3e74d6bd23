//! Use cases behind the listing and job endpoints.

mod candidate_service;
mod company_service;
mod job_service;

pub use candidate_service::{CandidateManager, CandidateService};
pub use company_service::{CompanyManager, CompanyService};
pub use job_service::{JobManager, JobService};

use common::{AppError, AppResult};
use domain::{Job, Principal};

/// Admins manage every posting; companies only their own.
pub(crate) fn ensure_manages(principal: &Principal, job: &Job) -> AppResult<()> {
    match principal {
        Principal::Admin(_) => Ok(()),
        Principal::Company(company) if job.is_owned_by(company.id) => Ok(()),
        _ => Err(AppError::Forbidden),
    }
}
