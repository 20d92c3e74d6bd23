//! Filter plans: predicates, sort and page derived from query parameters.
//!
//! A [`FilterPlanBuilder`] is consumed step by step. Each step appends
//! predicates or records a problem; [`FilterPlanBuilder::build`] reports every
//! problem at once or yields an immutable [`FilterPlan`].

use std::str::FromStr;

use bson::{Bson, Document};
use domain::{DomainError, DomainResult};

use crate::pagination::Pagination;
use crate::predicate::{conjunction, matches_all, Predicate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_i32(&self) -> i32 {
        match self {
            SortDirection::Asc => 1,
            SortDirection::Desc => -1,
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(DomainError::validation(format!(
                "sortDirection must be 'asc' or 'desc', got '{}'",
                other
            ))),
        }
    }
}

/// Secondary sort key appended to every sort.
pub const TIE_BREAKER: &str = "_id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// `$sort` spec. `_id` breaks ties so equal keys page deterministically.
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(self.field.as_str(), self.direction.as_i32());
        if self.field != TIE_BREAKER {
            document.insert(TIE_BREAKER, self.direction.as_i32());
        }
        document
    }
}

/// How job locations are stored. Exactly one shape is active per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationSchema {
    /// Separate `state` and `city` fields
    #[default]
    Split,
    /// A single free-text `location` field
    FreeText,
}

impl FromStr for LocationSchema {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "split" => Ok(LocationSchema::Split),
            "free-text" | "freetext" => Ok(LocationSchema::FreeText),
            other => Err(format!("unknown location schema '{}'", other)),
        }
    }
}

/// Raw location parameters as they arrive on the query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationParams<'a> {
    pub state: Option<&'a str>,
    pub city: Option<&'a str>,
    pub location: Option<&'a str>,
}

/// Per-endpoint field mapping.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    /// Text fields the `keyword` parameter is OR-ed across
    pub keyword_fields: Vec<&'static str>,
    /// `None` when the endpoint has no location filter
    pub location: Option<LocationSchema>,
    pub default_sort: Sort,
    /// Columns a caller may sort by; empty disables overrides
    pub sortable: Vec<&'static str>,
    pub default_limit: u64,
}

/// Resolved predicates, sort and page for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPlan {
    predicates: Vec<Predicate>,
    sort: Sort,
    pagination: Pagination,
}

impl FilterPlan {
    pub fn builder(config: &FilterConfig) -> FilterPlanBuilder<'_> {
        FilterPlanBuilder {
            config,
            predicates: Vec::new(),
            sort: config.default_sort.clone(),
            pagination: Pagination::new(1, config.default_limit),
            problems: Vec::new(),
        }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Filter document shared by the page query and the count query.
    pub fn filter_document(&self) -> Document {
        conjunction(&self.predicates)
    }

    pub fn sort_document(&self) -> Document {
        self.sort.to_document()
    }

    pub fn matches(&self, document: &Document) -> bool {
        matches_all(&self.predicates, document)
    }
}

#[derive(Debug)]
pub struct FilterPlanBuilder<'a> {
    config: &'a FilterConfig,
    predicates: Vec<Predicate>,
    sort: Sort,
    pagination: Pagination,
    problems: Vec<String>,
}

impl<'a> FilterPlanBuilder<'a> {
    /// Unconditional restriction, e.g. the owning company or active-only.
    pub fn scope(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.predicates.push(Predicate::equals(field, value));
        self
    }

    /// Substring search OR-ed across the configured keyword fields.
    pub fn keyword(mut self, raw: Option<&str>) -> Self {
        if let Some(keyword) = non_blank(raw) {
            self.predicates
                .push(Predicate::contains_any(&self.config.keyword_fields, keyword));
        }
        self
    }

    /// One value is an exact match, several become set membership.
    pub fn categorical(mut self, field: &str, values: &[String]) -> Self {
        let values: Vec<&str> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .collect();

        match values.as_slice() {
            [] => {}
            [single] => self.predicates.push(Predicate::equals(field, *single)),
            many => self.predicates.push(Predicate::one_of(field, many.iter().copied())),
        }
        self
    }

    /// `'true'`/`'false'` become an exact boolean match; absent means no filter.
    pub fn flag(mut self, param: &str, field: &str, raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => {}
            Some("true") => self.predicates.push(Predicate::equals(field, true)),
            Some("false") => self.predicates.push(Predicate::equals(field, false)),
            Some(other) => self.problems.push(format!(
                "{} must be 'true' or 'false', got '{}'",
                param, other
            )),
        }
        self
    }

    /// Inclusive bounds; either side may be given on its own.
    pub fn range(
        mut self,
        field: &str,
        (min_param, min_raw): (&str, Option<&str>),
        (max_param, max_raw): (&str, Option<&str>),
    ) -> Self {
        let min = self.number(min_param, min_raw);
        let max = self.number(max_param, max_raw);

        if let (Some(low), Some(high)) = (min, max) {
            if low > high {
                self.problems
                    .push(format!("{} must not exceed {}", min_param, max_param));
                return self;
            }
        }
        if min.is_some() || max.is_some() {
            self.predicates.push(Predicate::range(field, min, max));
        }
        self
    }

    /// State/city or free-text location, whichever shape is configured.
    pub fn location(mut self, params: LocationParams<'_>) -> Self {
        let state = non_blank(params.state);
        let city = non_blank(params.city);
        let location = non_blank(params.location);

        match self.config.location {
            None => {
                if state.is_some() || city.is_some() || location.is_some() {
                    self.problems
                        .push("location filters are not supported here".to_string());
                }
            }
            Some(LocationSchema::Split) => {
                if location.is_some() {
                    self.problems
                        .push("location is not supported; filter by state and city".to_string());
                }
                if let Some(state) = state {
                    self.predicates.push(Predicate::contains("state", state));
                }
                if let Some(city) = city {
                    self.predicates.push(Predicate::contains("city", city));
                }
            }
            Some(LocationSchema::FreeText) => {
                if state.is_some() || city.is_some() {
                    self.problems
                        .push("state and city are not supported; filter by location".to_string());
                }
                if let Some(location) = location {
                    self.predicates.push(Predicate::contains("location", location));
                }
            }
        }
        self
    }

    /// Caller override of the default sort, limited to allowed columns.
    pub fn sort(mut self, column: Option<&str>, direction: Option<&str>) -> Self {
        let direction = match non_blank(direction).map(str::parse::<SortDirection>) {
            None => None,
            Some(Ok(direction)) => Some(direction),
            Some(Err(e)) => {
                self.problems.push(message_of(e));
                None
            }
        };

        match non_blank(column) {
            Some(column) if self.config.sortable.iter().any(|allowed| *allowed == column) => {
                self.sort = Sort {
                    field: column.to_string(),
                    direction: direction.unwrap_or(SortDirection::Asc),
                };
            }
            Some(column) => {
                self.problems.push(format!("cannot sort by '{}'", column));
            }
            None => {
                if let Some(direction) = direction {
                    if self.config.sortable.is_empty() {
                        self.problems
                            .push("sorting cannot be changed here".to_string());
                    } else {
                        self.sort.direction = direction;
                    }
                }
            }
        }
        self
    }

    pub fn paginate(mut self, page: Option<&str>, limit: Option<&str>) -> Self {
        self.pagination = Pagination::from_params(page, limit, self.config.default_limit);
        self
    }

    pub fn build(self) -> DomainResult<FilterPlan> {
        if !self.problems.is_empty() {
            return Err(DomainError::validation(self.problems.join("; ")));
        }

        tracing::debug!(
            predicates = self.predicates.len(),
            sort = %self.sort.field,
            page = self.pagination.page(),
            limit = self.pagination.limit(),
            "Built filter plan"
        );

        Ok(FilterPlan {
            predicates: self.predicates,
            sort: self.sort,
            pagination: self.pagination,
        })
    }

    fn number(&mut self, param: &str, raw: Option<&str>) -> Option<f64> {
        let raw = non_blank(raw)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                self.problems
                    .push(format!("{} must be a number, got '{}'", param, raw));
                None
            }
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

fn message_of(error: DomainError) -> String {
    match error {
        DomainError::Validation(message) => message,
        other => other.to_string(),
    }
}
