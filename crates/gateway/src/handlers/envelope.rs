//! Paginated response bodies.
//!
//! Every listing answers `{<items>, totalPages, currentPage, total<Items>}`.

use serde::Serialize;
use utoipa::ToSchema;

use domain::{
    CandidateApplicationResponse, CandidateResponse, CompanyResponse, JobResponse,
    SubmittedApplicationResponse,
};
use query::Paginated;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobsPage {
    pub jobs: Vec<JobResponse>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_jobs: u64,
}

impl From<Paginated<JobResponse>> for JobsPage {
    fn from(page: Paginated<JobResponse>) -> Self {
        Self {
            jobs: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total_jobs: page.total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompaniesPage {
    pub companies: Vec<CompanyResponse>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_companies: u64,
}

impl From<Paginated<CompanyResponse>> for CompaniesPage {
    fn from(page: Paginated<CompanyResponse>) -> Self {
        Self {
            companies: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total_companies: page.total,
        }
    }
}

/// Registered candidates (admin listing).
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CandidatesPage {
    pub candidates: Vec<CandidateResponse>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_candidates: u64,
}

impl From<Paginated<CandidateResponse>> for CandidatesPage {
    fn from(page: Paginated<CandidateResponse>) -> Self {
        Self {
            candidates: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total_candidates: page.total,
        }
    }
}

/// Applicants to a company's postings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantsPage {
    pub candidates: Vec<CandidateApplicationResponse>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_candidates: u64,
}

impl From<Paginated<CandidateApplicationResponse>> for ApplicantsPage {
    fn from(page: Paginated<CandidateApplicationResponse>) -> Self {
        Self {
            candidates: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total_candidates: page.total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsPage {
    pub applications: Vec<SubmittedApplicationResponse>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total_applications: u64,
}

impl From<Paginated<SubmittedApplicationResponse>> for ApplicationsPage {
    fn from(page: Paginated<SubmittedApplicationResponse>) -> Self {
        Self {
            applications: page.items,
            total_pages: page.total_pages,
            current_page: page.current_page,
            total_applications: page.total,
        }
    }
}
