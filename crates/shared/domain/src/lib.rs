//! Domain layer - job-board entities and value objects.
//!
//! Pure types and rules. Persistence and transport live in other crates;
//! documents are (de)serialized with serde into BSON by the store.

pub mod company;
pub mod constants;
pub mod error;
pub mod job;
pub mod password;
pub mod principal;
pub mod role;
pub mod user;
pub mod verification;

pub use bson::oid::ObjectId;

pub use company::{Admin, Company, CompanyResponse};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use job::{
    CandidateApplication, CandidateApplicationResponse, Job, JobApplication, JobResponse, NewJob,
    SubmittedApplication, SubmittedApplicationResponse,
};
pub use password::{Password, DUMMY_PASSWORD_HASH};
pub use principal::{Principal, PrincipalResponse};
pub use role::Role;
pub use user::{CandidateResponse, Education, Experience, User};
