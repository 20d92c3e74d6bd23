//! Job postings and applications.

use std::sync::Arc;

use bson::oid::ObjectId;

use common::{AppError, AppResult};
use domain::{
    CandidateApplication, Job, JobApplication, SubmittedApplication, APPLICATIONS_COLLECTION,
    JOBS_COLLECTION,
};
use query::{AggregationPlan, FilterPlan, Paginated, Predicate, Stage};

use super::base::{aggregate_page, fetch_page, find_by_id, from_document, to_document};
use crate::infra::DocumentStore;

#[derive(Clone)]
pub struct JobRepository {
    store: Arc<dyn DocumentStore>,
}

impl JobRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn find_page(&self, plan: &FilterPlan) -> AppResult<Paginated<Job>> {
        fetch_page(self.store.as_ref(), JOBS_COLLECTION, plan).await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> AppResult<Option<Job>> {
        find_by_id(self.store.as_ref(), JOBS_COLLECTION, id).await
    }

    pub async fn insert(&self, job: &Job) -> AppResult<()> {
        self.store.insert(JOBS_COLLECTION, to_document(job)?).await
    }

    pub async fn save(&self, job: &Job) -> AppResult<()> {
        if self.store.replace(JOBS_COLLECTION, to_document(job)?).await? {
            Ok(())
        } else {
            Err(AppError::NotFound)
        }
    }

    /// Ids of every posting owned by `company`, active or not.
    pub async fn ids_of_company(&self, company: ObjectId) -> AppResult<Vec<ObjectId>> {
        let documents = self
            .store
            .aggregate(
                JOBS_COLLECTION,
                vec![Stage::Match(vec![Predicate::equals("company", company)])],
            )
            .await?;

        documents
            .into_iter()
            .map(|document| from_document::<Job>(document).map(|job| job.id))
            .collect()
    }
}

#[derive(Clone)]
pub struct ApplicationRepository {
    store: Arc<dyn DocumentStore>,
}

impl ApplicationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn exists(&self, job: ObjectId, user: ObjectId) -> AppResult<bool> {
        let count = self
            .store
            .count(
                APPLICATIONS_COLLECTION,
                vec![Predicate::equals("job", job), Predicate::equals("user", user)],
            )
            .await?;
        Ok(count > 0)
    }

    pub async fn insert(&self, application: &JobApplication) -> AppResult<()> {
        self.store
            .insert(APPLICATIONS_COLLECTION, to_document(application)?)
            .await
    }

    pub async fn candidates(
        &self,
        plan: &AggregationPlan,
    ) -> AppResult<Paginated<CandidateApplication>> {
        aggregate_page(self.store.as_ref(), APPLICATIONS_COLLECTION, plan).await
    }

    pub async fn submitted(
        &self,
        plan: &AggregationPlan,
    ) -> AppResult<Paginated<SubmittedApplication>> {
        aggregate_page(self.store.as_ref(), APPLICATIONS_COLLECTION, plan).await
    }
}
