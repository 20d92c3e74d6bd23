//! Job postings and applications.

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::company::Company;
use crate::constants::APPLICATION_STATUS_PENDING;
use crate::user::{CandidateResponse, User};

/// Job posting as stored in the `jobs` collection.
///
/// Current documents carry `state`/`city`; older ones carry a single
/// free-text `location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub modality: String,
    #[serde(rename = "type")]
    pub job_type: String,
    #[serde(default)]
    pub pcd: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    /// Active postings show up in public search
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub identify_company: bool,
    /// Owning company
    pub company: ObjectId,
    pub published_at: bson::DateTime,
}

impl Job {
    pub fn toggle_status(&mut self) -> bool {
        self.status = !self.status;
        self.status
    }

    pub fn is_owned_by(&self, company_id: ObjectId) -> bool {
        self.company == company_id
    }
}

/// Fields a company supplies when publishing a job.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub description: String,
    pub state: Option<String>,
    pub city: Option<String>,
    pub modality: String,
    pub job_type: String,
    pub pcd: bool,
    pub salary: Option<f64>,
    pub identify_company: bool,
}

impl NewJob {
    /// Published jobs start active.
    pub fn publish(self, company: ObjectId, at: DateTime<Utc>) -> Job {
        Job {
            id: ObjectId::new(),
            title: self.title,
            description: self.description,
            state: self.state,
            city: self.city,
            location: None,
            modality: self.modality,
            job_type: self.job_type,
            pcd: self.pcd,
            salary: self.salary,
            status: true,
            identify_company: self.identify_company,
            company,
            published_at: bson::DateTime::from_chrono(at),
        }
    }
}

/// A candidate's application, stored in the `applications` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub job: ObjectId,
    pub user: ObjectId,
    pub submission_date: bson::DateTime,
    pub status: String,
}

impl JobApplication {
    pub fn submit(job: ObjectId, user: ObjectId, at: DateTime<Utc>) -> Self {
        Self {
            id: ObjectId::new(),
            job,
            user,
            submission_date: bson::DateTime::from_chrono(at),
            status: APPLICATION_STATUS_PENDING.to_string(),
        }
    }
}

/// Application row joined with the applicant profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplication {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub job: ObjectId,
    pub submission_date: bson::DateTime,
    pub status: String,
    pub applicant: User,
}

/// Application row joined with the job and its company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplication {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub submission_date: bson::DateTime,
    pub status: String,
    #[serde(rename = "job")]
    pub posting: Job,
    pub company: Company,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub modality: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub pcd: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    pub status: bool,
    pub identify_company: bool,
    /// Owning company id, hidden when the posting is anonymous
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_hex(),
            company: job.identify_company.then(|| job.company.to_hex()),
            title: job.title,
            description: job.description,
            state: job.state,
            city: job.city,
            location: job.location,
            modality: job.modality,
            job_type: job.job_type,
            pcd: job.pcd,
            salary: job.salary,
            status: job.status,
            identify_company: job.identify_company,
            published_at: job.published_at.to_chrono(),
        }
    }
}

/// Owner's view: the company id is always present.
impl JobResponse {
    pub fn for_owner(job: Job) -> Self {
        let company = job.company.to_hex();
        Self {
            company: Some(company),
            ..Self::from(job)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CandidateApplicationResponse {
    pub id: String,
    pub job: String,
    pub submission_date: DateTime<Utc>,
    pub status: String,
    pub applicant: CandidateResponse,
}

impl From<CandidateApplication> for CandidateApplicationResponse {
    fn from(row: CandidateApplication) -> Self {
        Self {
            id: row.id.to_hex(),
            job: row.job.to_hex(),
            submission_date: row.submission_date.to_chrono(),
            status: row.status,
            applicant: CandidateResponse::from(row.applicant),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SubmittedApplicationResponse {
    pub id: String,
    pub submission_date: DateTime<Utc>,
    pub status: String,
    pub job: JobResponse,
    /// Only disclosed when the posting identifies its company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl From<SubmittedApplication> for SubmittedApplicationResponse {
    fn from(row: SubmittedApplication) -> Self {
        let company_name = row
            .posting
            .identify_company
            .then_some(row.company.name);
        Self {
            id: row.id.to_hex(),
            submission_date: row.submission_date.to_chrono(),
            status: row.status,
            job: JobResponse::from(row.posting),
            company_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_job(identify_company: bool) -> NewJob {
        NewJob {
            title: "Backend Engineer".to_string(),
            description: String::new(),
            state: Some("SP".to_string()),
            city: Some("Campinas".to_string()),
            modality: "Remoto".to_string(),
            job_type: "CLT".to_string(),
            pcd: false,
            salary: Some(5000.0),
            identify_company,
        }
    }

    #[test]
    fn test_published_job_is_active() {
        let company = ObjectId::new();
        let job = new_job(true).publish(company, Utc::now());

        assert!(job.status);
        assert!(job.is_owned_by(company));
    }

    #[test]
    fn test_anonymous_job_hides_company() {
        let job = new_job(false).publish(ObjectId::new(), Utc::now());

        assert!(JobResponse::from(job.clone()).company.is_none());
        assert!(JobResponse::for_owner(job).company.is_some());
    }

    #[test]
    fn test_job_type_is_stored_as_type() {
        let job = new_job(true).publish(ObjectId::new(), Utc::now());
        let document = bson::to_document(&job).unwrap();

        assert_eq!(document.get_str("type").unwrap(), "CLT");
        assert!(!document.contains_key("location"));
    }

    #[test]
    fn test_new_application_is_pending() {
        let application = JobApplication::submit(ObjectId::new(), ObjectId::new(), Utc::now());
        assert_eq!(application.status, "Pending");
    }
}
