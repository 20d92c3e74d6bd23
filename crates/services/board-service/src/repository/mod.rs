//! Typed collections over the document store.

mod base;
mod job_repository;
mod principal_repository;

pub use job_repository::{ApplicationRepository, JobRepository};
pub use principal_repository::PrincipalStore;
