//! Query construction for list and search endpoints.
//!
//! Request parameters become a [`FilterPlan`] (single-collection predicates,
//! sort, page) or an [`AggregationPlan`] (join, filter on joined fields,
//! page, plus a matching count pipeline). Plans render to MongoDB documents
//! and can be evaluated in memory against plain BSON documents.

pub mod aggregation;
pub mod document;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod predicate;

pub use aggregation::{
    AggregationPlan, ApplicationScope, CandidateSearch, Stage, SubmittedApplicationSearch,
    COUNT_FIELD,
};
pub use filter::{
    FilterConfig, FilterPlan, FilterPlanBuilder, LocationParams, LocationSchema, Sort,
    SortDirection, TIE_BREAKER,
};
pub use pagination::{Paginated, Pagination};
pub use params::{
    ApplicationSearchParams, CandidateListParams, CompanyListParams, JobManagementParams,
    JobSearchParams,
};
pub use predicate::Predicate;
