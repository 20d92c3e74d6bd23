//! Job service - public search, company job management and applications.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

use common::{AppError, AppResult, OptionExt};
use domain::{Company, Job, JobApplication, JobResponse, NewJob, ObjectId, Principal, User};
use query::{JobManagementParams, JobSearchParams, LocationSchema, Paginated};

use super::ensure_manages;
use crate::infra::DocumentStore;
use crate::repository::{ApplicationRepository, JobRepository};

/// Job use cases, injected into the HTTP layer as `Arc<dyn JobService>`.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Active postings matching the public search filters
    async fn search(&self, params: &JobSearchParams) -> AppResult<Paginated<JobResponse>>;

    /// A company's own postings, or every posting for an administrator
    async fn list_managed(
        &self,
        principal: &Principal,
        params: &JobManagementParams,
    ) -> AppResult<Paginated<JobResponse>>;

    async fn create(&self, company: &Company, job: NewJob) -> AppResult<JobResponse>;

    /// Flip a posting between active and inactive
    async fn toggle_status(&self, principal: &Principal, job_id: ObjectId)
        -> AppResult<JobResponse>;

    /// Submit a candidate's application to an active posting
    async fn apply(&self, user: &User, job_id: ObjectId) -> AppResult<JobApplication>;
}

pub struct JobManager {
    jobs: JobRepository,
    applications: ApplicationRepository,
    location: LocationSchema,
}

impl JobManager {
    pub fn new(store: Arc<dyn DocumentStore>, location: LocationSchema) -> Self {
        Self {
            jobs: JobRepository::new(store.clone()),
            applications: ApplicationRepository::new(store),
            location,
        }
    }

    async fn managed_job(&self, principal: &Principal, job_id: ObjectId) -> AppResult<Job> {
        let job = self.jobs.find_by_id(job_id).await?.ok_or_not_found()?;
        ensure_manages(principal, &job)?;
        Ok(job)
    }
}

#[async_trait]
impl JobService for JobManager {
    async fn search(&self, params: &JobSearchParams) -> AppResult<Paginated<JobResponse>> {
        let plan = params.to_plan(self.location)?;
        debug!(filter = %plan.filter_document(), "Job search plan");

        let page = self.jobs.find_page(&plan).await?;
        Ok(page.map(JobResponse::from))
    }

    async fn list_managed(
        &self,
        principal: &Principal,
        params: &JobManagementParams,
    ) -> AppResult<Paginated<JobResponse>> {
        let owner = match principal {
            Principal::Company(company) => Some(company.id),
            Principal::Admin(_) => None,
            Principal::User(_) => return Err(AppError::Forbidden),
        };

        let plan = params.to_plan(owner)?;
        debug!(filter = %plan.filter_document(), "Job management plan");

        let page = self.jobs.find_page(&plan).await?;
        Ok(page.map(JobResponse::for_owner))
    }

    async fn create(&self, company: &Company, job: NewJob) -> AppResult<JobResponse> {
        let job = job.publish(company.id, Utc::now());
        self.jobs.insert(&job).await?;

        info!(job_id = %job.id, company_id = %company.id, "Job published");
        Ok(JobResponse::for_owner(job))
    }

    async fn toggle_status(
        &self,
        principal: &Principal,
        job_id: ObjectId,
    ) -> AppResult<JobResponse> {
        let mut job = self.managed_job(principal, job_id).await?;
        let active = job.toggle_status();
        self.jobs.save(&job).await?;

        info!(job_id = %job.id, active, "Job status changed");
        Ok(JobResponse::for_owner(job))
    }

    async fn apply(&self, user: &User, job_id: ObjectId) -> AppResult<JobApplication> {
        // Inactive postings are hidden from candidates entirely
        let job = self
            .jobs
            .find_by_id(job_id)
            .await?
            .filter(|job| job.status)
            .ok_or_not_found()?;

        // Check-then-insert; concurrent duplicates are not prevented here
        if self.applications.exists(job.id, user.id).await? {
            return Err(AppError::conflict("Application"));
        }

        let application = JobApplication::submit(job.id, user.id, Utc::now());
        self.applications.insert(&application).await?;

        info!(job_id = %job.id, user_id = %user.id, "Application submitted");
        Ok(application)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MemoryStore, MockDocumentStore};
    use domain::Admin;

    fn company() -> Company {
        Company::new(
            "Acme".into(),
            "12345678000199".into(),
            Some("Tech".into()),
            "jobs@acme.com".into(),
            "hash".into(),
        )
    }

    fn candidate() -> User {
        User::new(
            "Ana".into(),
            "Souza".into(),
            "12345678901".into(),
            "ana@example.com".into(),
            "hash".into(),
        )
    }

    fn posting(title: &str) -> NewJob {
        NewJob {
            title: title.to_string(),
            description: "Build things".into(),
            state: Some("SP".into()),
            city: Some("Campinas".into()),
            modality: "Remote".into(),
            job_type: "CLT".into(),
            pcd: false,
            salary: Some(5000.0),
            identify_company: false,
        }
    }

    fn manager() -> JobManager {
        JobManager::new(Arc::new(MemoryStore::new()), LocationSchema::Split)
    }

    #[tokio::test]
    async fn test_search_hides_inactive_and_anonymous_owner() {
        let manager = manager();
        let owner = company();
        let open = manager.create(&owner, posting("Rust Engineer")).await.unwrap();
        let closed = manager.create(&owner, posting("Go Engineer")).await.unwrap();
        let closed_id = ObjectId::parse_str(&closed.id).unwrap();
        manager
            .toggle_status(&Principal::Company(owner.clone()), closed_id)
            .await
            .unwrap();

        let page = manager.search(&JobSearchParams::default()).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, open.id);
        assert!(page.items[0].company.is_none());
    }

    #[tokio::test]
    async fn test_company_lists_only_own_jobs() {
        let manager = manager();
        let mine = company();
        let other = company();
        manager.create(&mine, posting("Mine")).await.unwrap();
        manager.create(&other, posting("Theirs")).await.unwrap();

        let page = manager
            .list_managed(&Principal::Company(mine.clone()), &JobManagementParams::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].title, "Mine");
        assert_eq!(page.items[0].company.as_deref(), Some(mine.id.to_hex().as_str()));

        let admin = Admin::new("Root".into(), "root@example.com".into(), "hash".into());
        let all = manager
            .list_managed(&Principal::Admin(admin), &JobManagementParams::default())
            .await
            .unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn test_candidate_cannot_manage_jobs() {
        let result = manager()
            .list_managed(&Principal::User(candidate()), &JobManagementParams::default())
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_toggle_by_other_company_is_forbidden() {
        let manager = manager();
        let job = manager.create(&company(), posting("Mine")).await.unwrap();
        let job_id = ObjectId::parse_str(&job.id).unwrap();

        let result = manager
            .toggle_status(&Principal::Company(company()), job_id)
            .await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_toggle_missing_job_is_not_found() {
        let result = manager()
            .toggle_status(&Principal::Company(company()), ObjectId::new())
            .await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_duplicate_application_conflicts() {
        let manager = manager();
        let job = manager.create(&company(), posting("Rust Engineer")).await.unwrap();
        let job_id = ObjectId::parse_str(&job.id).unwrap();
        let user = candidate();

        let application = manager.apply(&user, job_id).await.unwrap();
        assert_eq!(application.status, "Pending");

        let again = manager.apply(&user, job_id).await;
        assert!(matches!(again, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_apply_to_inactive_job_is_not_found() {
        let manager = manager();
        let owner = company();
        let job = manager.create(&owner, posting("Closed")).await.unwrap();
        let job_id = ObjectId::parse_str(&job.id).unwrap();
        manager
            .toggle_status(&Principal::Company(owner), job_id)
            .await
            .unwrap();

        let result = manager.apply(&candidate(), job_id).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_invalid_filter_is_rejected_before_store() {
        let mut store = MockDocumentStore::new();
        store.expect_find().never();
        store.expect_count().never();
        let manager = JobManager::new(Arc::new(store), LocationSchema::Split);

        let params = JobSearchParams {
            pcd: Some("maybe".into()),
            ..Default::default()
        };
        let result = manager.search(&params).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
