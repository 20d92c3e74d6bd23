//! Board Service Library
//!
//! Job postings, applications and the paginated listings over them.
//! Persistence goes through the [`infra::DocumentStore`] port, backed by
//! MongoDB in production and by an in-process store in tests and demos.

pub mod infra;
pub mod repository;
pub mod service;

pub use infra::{connect, DocumentStore, MemoryStore, MongoStore};
pub use repository::{ApplicationRepository, JobRepository, PrincipalStore};
pub use service::{
    CandidateManager, CandidateService, CompanyManager, CompanyService, JobManager, JobService,
};
