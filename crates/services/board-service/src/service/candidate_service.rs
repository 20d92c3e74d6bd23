//! Candidate service - applicant listings for companies, admins and candidates.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use common::{AppResult, OptionExt};
use domain::{
    CandidateApplicationResponse, CandidateResponse, Company, ObjectId, Principal,
    SubmittedApplicationResponse,
};
use query::{ApplicationScope, ApplicationSearchParams, CandidateListParams, Paginated};

use super::ensure_manages;
use crate::infra::DocumentStore;
use crate::repository::{ApplicationRepository, JobRepository, PrincipalStore};

#[async_trait]
pub trait CandidateService: Send + Sync {
    /// Every registered candidate (admin listing)
    async fn list_candidates(
        &self,
        params: &CandidateListParams,
    ) -> AppResult<Paginated<CandidateResponse>>;

    /// Applicants to one posting, visible to its company and to admins
    async fn job_candidates(
        &self,
        principal: &Principal,
        job_id: ObjectId,
        params: &ApplicationSearchParams,
    ) -> AppResult<Paginated<CandidateApplicationResponse>>;

    /// Applicants across all of a company's postings
    async fn company_candidates(
        &self,
        company: &Company,
        params: &ApplicationSearchParams,
    ) -> AppResult<Paginated<CandidateApplicationResponse>>;

    /// A candidate's own applications
    async fn my_applications(
        &self,
        user_id: ObjectId,
        params: &ApplicationSearchParams,
    ) -> AppResult<Paginated<SubmittedApplicationResponse>>;
}

pub struct CandidateManager {
    accounts: PrincipalStore,
    jobs: JobRepository,
    applications: ApplicationRepository,
}

impl CandidateManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            accounts: PrincipalStore::new(store.clone()),
            jobs: JobRepository::new(store.clone()),
            applications: ApplicationRepository::new(store),
        }
    }
}

#[async_trait]
impl CandidateService for CandidateManager {
    async fn list_candidates(
        &self,
        params: &CandidateListParams,
    ) -> AppResult<Paginated<CandidateResponse>> {
        let plan = params.to_plan()?;
        debug!(filter = %plan.filter_document(), "Candidate listing plan");

        let page = self.accounts.list_users(&plan).await?;
        Ok(page.map(CandidateResponse::from))
    }

    async fn job_candidates(
        &self,
        principal: &Principal,
        job_id: ObjectId,
        params: &ApplicationSearchParams,
    ) -> AppResult<Paginated<CandidateApplicationResponse>> {
        let job = self.jobs.find_by_id(job_id).await?.ok_or_not_found()?;
        ensure_manages(principal, &job)?;

        let plan = params.candidate_plan(ApplicationScope::Job(job.id));
        let page = self.applications.candidates(&plan).await?;
        Ok(page.map(CandidateApplicationResponse::from))
    }

    async fn company_candidates(
        &self,
        company: &Company,
        params: &ApplicationSearchParams,
    ) -> AppResult<Paginated<CandidateApplicationResponse>> {
        let job_ids = self.jobs.ids_of_company(company.id).await?;
        debug!(company_id = %company.id, jobs = job_ids.len(), "Company candidate search");

        let plan = params.candidate_plan(ApplicationScope::Jobs(job_ids));
        let page = self.applications.candidates(&plan).await?;
        Ok(page.map(CandidateApplicationResponse::from))
    }

    async fn my_applications(
        &self,
        user_id: ObjectId,
        params: &ApplicationSearchParams,
    ) -> AppResult<Paginated<SubmittedApplicationResponse>> {
        let plan = params.submitted_plan(user_id);
        let page = self.applications.submitted(&plan).await?;
        Ok(page.map(SubmittedApplicationResponse::from))
    }
}
