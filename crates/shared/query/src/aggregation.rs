//! Aggregation plans for searches that need joined fields.
//!
//! Stage order is fixed by the builders: scope match, join + unwind, optional
//! text match over the joined rows, then sort/skip/limit. The count pipeline
//! replays the filtering stages and ends in `$count`, so totals always agree
//! with the pages.

use bson::{oid::ObjectId, Bson, Document};
use domain::{COMPANIES_COLLECTION, JOBS_COLLECTION, USERS_COLLECTION};

use crate::filter::Sort;
use crate::pagination::Pagination;
use crate::predicate::{conjunction, Predicate};

/// Field holding the result of the count pipeline.
pub const COUNT_FIELD: &str = "total";

/// Applicant profile fields searched by `searchTerm`.
pub const APPLICANT_SEARCH_FIELDS: &[&str] = &[
    "applicant.name",
    "applicant.surname",
    "applicant.experiences.company",
    "applicant.experiences.role",
    "applicant.experiences.activities",
    "applicant.education.institution",
    "applicant.education.course",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// All predicates must hold
    Match(Vec<Predicate>),
    /// Left outer join into the `alias` array
    Lookup {
        from: String,
        local_field: String,
        foreign_field: String,
        alias: String,
    },
    /// One row per element of the array at the path; empty arrays drop the row
    Unwind(String),
    Sort(Sort),
    Skip(u64),
    Limit(u64),
    Count(String),
}

impl Stage {
    fn join(from: &str, local_field: &str, alias: &str) -> [Stage; 2] {
        [
            Stage::Lookup {
                from: from.to_string(),
                local_field: local_field.to_string(),
                foreign_field: "_id".to_string(),
                alias: alias.to_string(),
            },
            Stage::Unwind(alias.to_string()),
        ]
    }

    pub fn to_document(&self) -> Document {
        let mut stage = Document::new();
        match self {
            Stage::Match(predicates) => {
                stage.insert("$match", conjunction(predicates));
            }
            Stage::Lookup {
                from,
                local_field,
                foreign_field,
                alias,
            } => {
                let mut lookup = Document::new();
                lookup.insert("from", from.as_str());
                lookup.insert("localField", local_field.as_str());
                lookup.insert("foreignField", foreign_field.as_str());
                lookup.insert("as", alias.as_str());
                stage.insert("$lookup", lookup);
            }
            Stage::Unwind(path) => {
                stage.insert("$unwind", format!("${}", path));
            }
            Stage::Sort(sort) => {
                stage.insert("$sort", sort.to_document());
            }
            Stage::Skip(n) => {
                stage.insert("$skip", to_i64(*n));
            }
            Stage::Limit(n) => {
                stage.insert("$limit", to_i64(*n));
            }
            Stage::Count(field) => {
                stage.insert("$count", field.as_str());
            }
        }
        stage
    }
}

fn to_i64(n: u64) -> Bson {
    Bson::Int64(i64::try_from(n).unwrap_or(i64::MAX))
}

/// A paginated aggregation and its count twin.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationPlan {
    filtering: Vec<Stage>,
    sort: Sort,
    pagination: Pagination,
}

impl AggregationPlan {
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Filtering stages followed by sort, skip and limit.
    pub fn stages(&self) -> Vec<Stage> {
        let mut stages = self.filtering.clone();
        stages.push(Stage::Sort(self.sort.clone()));
        stages.push(Stage::Skip(self.pagination.skip()));
        stages.push(Stage::Limit(self.pagination.limit()));
        stages
    }

    /// Filtering stages followed by `$count`.
    pub fn count_stages(&self) -> Vec<Stage> {
        let mut stages = self.filtering.clone();
        stages.push(Stage::Count(COUNT_FIELD.to_string()));
        stages
    }

    pub fn pipeline(&self) -> Vec<Document> {
        self.stages().iter().map(Stage::to_document).collect()
    }

    pub fn count_pipeline(&self) -> Vec<Document> {
        self.count_stages().iter().map(Stage::to_document).collect()
    }
}

/// Which applications a company-side search covers.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationScope {
    Job(ObjectId),
    /// Every posting of one company
    Jobs(Vec<ObjectId>),
}

impl ApplicationScope {
    fn predicate(&self) -> Predicate {
        match self {
            ApplicationScope::Job(id) => Predicate::equals("job", *id),
            ApplicationScope::Jobs(ids) => Predicate::one_of("job", ids.iter().copied()),
        }
    }
}

/// Applications joined to applicant profiles, searchable by profile text.
#[derive(Debug, Clone)]
pub struct CandidateSearch {
    scope: ApplicationScope,
    statuses: Vec<String>,
    search_term: Option<String>,
    pagination: Pagination,
}

impl CandidateSearch {
    pub fn new(scope: ApplicationScope, pagination: Pagination) -> Self {
        Self {
            scope,
            statuses: Vec::new(),
            search_term: None,
            pagination,
        }
    }

    pub fn statuses(mut self, statuses: &[String]) -> Self {
        self.statuses = clean(statuses);
        self
    }

    pub fn search_term(mut self, term: Option<&str>) -> Self {
        self.search_term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    pub fn build(self) -> AggregationPlan {
        let mut scope = vec![self.scope.predicate()];
        scope.extend(status_predicate(&self.statuses));

        let mut filtering = vec![Stage::Match(scope)];
        filtering.extend(Stage::join(USERS_COLLECTION, "user", "applicant"));
        if let Some(term) = &self.search_term {
            filtering.push(Stage::Match(vec![Predicate::contains_any(
                APPLICANT_SEARCH_FIELDS,
                term,
            )]));
        }

        AggregationPlan {
            filtering,
            sort: Sort::desc("submissionDate"),
            pagination: self.pagination,
        }
    }
}

/// A candidate's own applications joined to job and company.
#[derive(Debug, Clone)]
pub struct SubmittedApplicationSearch {
    user: ObjectId,
    statuses: Vec<String>,
    search_term: Option<String>,
    pagination: Pagination,
}

impl SubmittedApplicationSearch {
    pub fn new(user: ObjectId, pagination: Pagination) -> Self {
        Self {
            user,
            statuses: Vec::new(),
            search_term: None,
            pagination,
        }
    }

    pub fn statuses(mut self, statuses: &[String]) -> Self {
        self.statuses = clean(statuses);
        self
    }

    pub fn search_term(mut self, term: Option<&str>) -> Self {
        self.search_term = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        self
    }

    /// The company name is only searchable on postings that disclose it.
    pub fn build(self) -> AggregationPlan {
        let mut scope = vec![Predicate::equals("user", self.user)];
        scope.extend(status_predicate(&self.statuses));

        let mut filtering = vec![Stage::Match(scope)];
        filtering.extend(Stage::join(JOBS_COLLECTION, "job", "job"));
        filtering.extend(Stage::join(COMPANIES_COLLECTION, "job.company", "company"));
        if let Some(term) = &self.search_term {
            filtering.push(Stage::Match(vec![Predicate::Any(vec![
                Predicate::contains("job.title", term.as_str()),
                Predicate::All(vec![
                    Predicate::equals("job.identifyCompany", true),
                    Predicate::contains("company.name", term.as_str()),
                ]),
            ])]));
        }

        AggregationPlan {
            filtering,
            sort: Sort::desc("submissionDate"),
            pagination: self.pagination,
        }
    }
}

fn clean(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

fn status_predicate(statuses: &[String]) -> Option<Predicate> {
    match statuses {
        [] => None,
        [single] => Some(Predicate::equals("status", single.as_str())),
        many => Some(Predicate::one_of("status", many.iter().map(String::as_str))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn test_candidate_pipeline_stage_order() {
        let job = ObjectId::new();
        let plan = CandidateSearch::new(ApplicationScope::Job(job), Pagination::new(2, 10))
            .search_term(Some("react"))
            .build();

        let pipeline = plan.pipeline();
        let keys: Vec<&str> = pipeline
            .iter()
            .map(|stage| stage.keys().next().map(String::as_str).unwrap_or(""))
            .collect();

        assert_eq!(
            keys,
            vec!["$match", "$lookup", "$unwind", "$match", "$sort", "$skip", "$limit"]
        );
        assert_eq!(pipeline[0], doc! { "$match": { "job": job } });
        assert_eq!(pipeline[2], doc! { "$unwind": "$applicant" });
        assert_eq!(pipeline[5], doc! { "$skip": 10_i64 });
    }

    #[test]
    fn test_count_pipeline_mirrors_filtering_stages() {
        let plan = CandidateSearch::new(ApplicationScope::Job(ObjectId::new()), Pagination::new(3, 5))
            .statuses(&["Pending".to_string()])
            .search_term(Some("react"))
            .build();

        let stages = plan.stages();
        let count = plan.count_stages();

        assert_eq!(count.len(), 5);
        assert_eq!(&count[..4], &stages[..4]);
        assert_eq!(count[4], Stage::Count(COUNT_FIELD.to_string()));
        assert!(!count
            .iter()
            .any(|s| matches!(s, Stage::Sort(_) | Stage::Skip(_) | Stage::Limit(_))));
    }

    #[test]
    fn test_no_search_term_skips_secondary_match() {
        let plan = CandidateSearch::new(ApplicationScope::Job(ObjectId::new()), Pagination::new(1, 10))
            .search_term(Some("   "))
            .build();

        assert_eq!(plan.count_stages().len(), 4);
    }

    #[test]
    fn test_company_wide_scope_uses_membership() {
        let jobs = vec![ObjectId::new(), ObjectId::new()];
        let plan = CandidateSearch::new(ApplicationScope::Jobs(jobs.clone()), Pagination::new(1, 10))
            .build();

        assert_eq!(
            plan.pipeline()[0],
            doc! { "$match": { "job": { "$in": [jobs[0], jobs[1]] } } }
        );
    }

    #[test]
    fn test_submitted_applications_join_job_then_company() {
        let plan = SubmittedApplicationSearch::new(ObjectId::new(), Pagination::new(1, 10))
            .search_term(Some("acme"))
            .build();
        let pipeline = plan.pipeline();

        assert_eq!(
            pipeline[1],
            doc! { "$lookup": { "from": "jobs", "localField": "job", "foreignField": "_id", "as": "job" } }
        );
        assert_eq!(
            pipeline[3],
            doc! { "$lookup": { "from": "companies", "localField": "job.company", "foreignField": "_id", "as": "company" } }
        );
        assert_eq!(pipeline[6], doc! { "$sort": { "submissionDate": -1, "_id": -1 } });
    }
}
