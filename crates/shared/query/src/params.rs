//! Query-string shapes, one per listing endpoint.
//!
//! Unknown parameters are rejected at deserialization. Numbers and flags
//! arrive as text and are coerced by the builders so a bad value produces a
//! precise message.

use bson::oid::ObjectId;
use serde::Deserialize;

use domain::DomainResult;

use crate::aggregation::{AggregationPlan, ApplicationScope, CandidateSearch, SubmittedApplicationSearch};
use crate::filter::{FilterConfig, FilterPlan, LocationParams, LocationSchema, Sort};
use crate::pagination::{Pagination, DEFAULT_LIST_PAGE_SIZE, DEFAULT_SEARCH_PAGE_SIZE};

// =============================================================================
// Job search (public, active postings only)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearchParams {
    /// Matched against title, location, modality and type
    pub keyword: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    /// Only with the free-text location schema
    pub location: Option<String>,
    /// Repeat to match any of several values
    #[serde(default)]
    pub modality: Vec<String>,
    #[serde(default, rename = "type")]
    pub job_type: Vec<String>,
    /// `true` or `false`
    pub pcd: Option<String>,
    pub min_salary: Option<String>,
    pub max_salary: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl JobSearchParams {
    pub fn config(schema: LocationSchema) -> FilterConfig {
        let keyword_fields = match schema {
            LocationSchema::Split => vec!["title", "state", "city", "modality", "type"],
            LocationSchema::FreeText => vec!["title", "location", "modality", "type"],
        };
        FilterConfig {
            keyword_fields,
            location: Some(schema),
            default_sort: Sort::desc("publishedAt"),
            sortable: Vec::new(),
            default_limit: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }

    pub fn to_plan(&self, schema: LocationSchema) -> DomainResult<FilterPlan> {
        let config = Self::config(schema);
        FilterPlan::builder(&config)
            .scope("status", true)
            .keyword(self.keyword.as_deref())
            .location(LocationParams {
                state: self.state.as_deref(),
                city: self.city.as_deref(),
                location: self.location.as_deref(),
            })
            .categorical("modality", &self.modality)
            .categorical("type", &self.job_type)
            .flag("pcd", "pcd", self.pcd.as_deref())
            .range(
                "salary",
                ("minSalary", self.min_salary.as_deref()),
                ("maxSalary", self.max_salary.as_deref()),
            )
            .paginate(self.page.as_deref(), self.limit.as_deref())
            .build()
    }
}

// =============================================================================
// Job management (owner-scoped for companies, everything for admins)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobManagementParams {
    pub keyword: Option<String>,
    /// `true` for active postings, `false` for inactive
    pub status: Option<String>,
    #[serde(default)]
    pub modality: Vec<String>,
    #[serde(default, rename = "type")]
    pub job_type: Vec<String>,
    pub pcd: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

impl JobManagementParams {
    pub fn config() -> FilterConfig {
        FilterConfig {
            keyword_fields: vec!["title", "modality", "type"],
            location: None,
            default_sort: Sort::desc("publishedAt"),
            sortable: vec!["title", "publishedAt", "salary", "modality", "type", "status"],
            default_limit: DEFAULT_LIST_PAGE_SIZE,
        }
    }

    /// `owner` restricts the listing to one company's postings.
    pub fn to_plan(&self, owner: Option<ObjectId>) -> DomainResult<FilterPlan> {
        let config = Self::config();
        let mut builder = FilterPlan::builder(&config);
        if let Some(owner) = owner {
            builder = builder.scope("company", owner);
        }
        builder
            .keyword(self.keyword.as_deref())
            .flag("status", "status", self.status.as_deref())
            .categorical("modality", &self.modality)
            .categorical("type", &self.job_type)
            .flag("pcd", "pcd", self.pcd.as_deref())
            .sort(self.sort_column.as_deref(), self.sort_direction.as_deref())
            .paginate(self.page.as_deref(), self.limit.as_deref())
            .build()
    }
}

// =============================================================================
// Company listing (admin)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyListParams {
    /// Matched against name, CNPJ, sector and email
    pub keyword: Option<String>,
    /// `true` for enabled companies, `false` for disabled
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

impl CompanyListParams {
    pub fn config() -> FilterConfig {
        FilterConfig {
            keyword_fields: vec!["name", "cnpj", "sector", "email"],
            location: None,
            default_sort: Sort::asc("name"),
            sortable: vec!["name", "sector", "email", "createdAt"],
            default_limit: DEFAULT_LIST_PAGE_SIZE,
        }
    }

    pub fn to_plan(&self) -> DomainResult<FilterPlan> {
        let config = Self::config();
        FilterPlan::builder(&config)
            .keyword(self.keyword.as_deref())
            .flag("status", "status", self.status.as_deref())
            .sort(self.sort_column.as_deref(), self.sort_direction.as_deref())
            .paginate(self.page.as_deref(), self.limit.as_deref())
            .build()
    }
}

// =============================================================================
// Candidate listing (admin)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CandidateListParams {
    /// Matched against name, surname and email
    pub keyword: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_column: Option<String>,
    pub sort_direction: Option<String>,
}

impl CandidateListParams {
    pub fn config() -> FilterConfig {
        FilterConfig {
            keyword_fields: vec!["name", "surname", "email"],
            location: None,
            default_sort: Sort::asc("name"),
            sortable: vec!["name", "surname", "email", "createdAt", "lastAccess"],
            default_limit: DEFAULT_LIST_PAGE_SIZE,
        }
    }

    pub fn to_plan(&self) -> DomainResult<FilterPlan> {
        let config = Self::config();
        FilterPlan::builder(&config)
            .keyword(self.keyword.as_deref())
            .sort(self.sort_column.as_deref(), self.sort_direction.as_deref())
            .paginate(self.page.as_deref(), self.limit.as_deref())
            .build()
    }
}

// =============================================================================
// Application searches (aggregations)
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ApplicationSearchParams {
    /// Free text matched after the join
    pub search_term: Option<String>,
    /// Application status, repeat for several
    #[serde(default)]
    pub status: Vec<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ApplicationSearchParams {
    fn pagination(&self) -> Pagination {
        Pagination::from_params(
            self.page.as_deref(),
            self.limit.as_deref(),
            DEFAULT_LIST_PAGE_SIZE,
        )
    }

    /// Company side: applicants to one or several postings.
    pub fn candidate_plan(&self, scope: ApplicationScope) -> AggregationPlan {
        CandidateSearch::new(scope, self.pagination())
            .statuses(&self.status)
            .search_term(self.search_term.as_deref())
            .build()
    }

    /// Candidate side: their own applications.
    pub fn submitted_plan(&self, user: ObjectId) -> AggregationPlan {
        SubmittedApplicationSearch::new(user, self.pagination())
            .statuses(&self.status)
            .search_term(self.search_term.as_deref())
            .build()
    }
}
