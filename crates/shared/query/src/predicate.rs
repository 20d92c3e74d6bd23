//! Match rules over document fields.
//!
//! A predicate renders to a MongoDB filter fragment and can also be
//! evaluated directly against an in-memory document; both readings agree.

use bson::{Bson, Document};

use std::cmp::Ordering;

use crate::document::{as_number, compare_values, resolve_path, values_equal};

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value
    Equals { field: String, value: Bson },
    /// Case-insensitive substring; the needle is matched literally
    Contains { field: String, needle: String },
    /// Field equals one of the values
    In { field: String, values: Vec<Bson> },
    /// Inclusive numeric bounds, either may be absent
    Range {
        field: String,
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Field sorts strictly after the value, e.g. an expiry still in the future
    After { field: String, value: Bson },
    /// At least one nested predicate holds
    Any(Vec<Predicate>),
    /// Every nested predicate holds
    All(Vec<Predicate>),
}

impl Predicate {
    pub fn equals(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Predicate::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Predicate::Contains {
            field: field.into(),
            needle: needle.into(),
        }
    }

    pub fn one_of<V: Into<Bson>>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        Predicate::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn range(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Predicate::Range {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn after(field: impl Into<String>, value: impl Into<Bson>) -> Self {
        Predicate::After {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Case-insensitive substring OR-ed across `fields`.
    pub fn contains_any(fields: &[&str], needle: &str) -> Self {
        Predicate::Any(
            fields
                .iter()
                .map(|field| Predicate::contains(*field, needle))
                .collect(),
        )
    }

    /// MongoDB filter fragment for this predicate.
    pub fn to_document(&self) -> Document {
        let mut document = Document::new();
        match self {
            Predicate::Equals { field, value } => {
                document.insert(field.as_str(), value.clone());
            }
            Predicate::Contains { field, needle } => {
                let mut rule = Document::new();
                rule.insert("$regex", regex::escape(needle));
                rule.insert("$options", "i");
                document.insert(field.as_str(), rule);
            }
            Predicate::In { field, values } => {
                let mut rule = Document::new();
                rule.insert("$in", values.clone());
                document.insert(field.as_str(), rule);
            }
            Predicate::Range { field, min, max } => {
                let mut rule = Document::new();
                if let Some(min) = min {
                    rule.insert("$gte", *min);
                }
                if let Some(max) = max {
                    rule.insert("$lte", *max);
                }
                document.insert(field.as_str(), rule);
            }
            Predicate::After { field, value } => {
                let mut rule = Document::new();
                rule.insert("$gt", value.clone());
                document.insert(field.as_str(), rule);
            }
            Predicate::Any(predicates) => {
                document.insert("$or", render_all(predicates));
            }
            Predicate::All(predicates) => {
                document.insert("$and", render_all(predicates));
            }
        }
        document
    }

    /// Evaluate against a document already in memory.
    pub fn matches(&self, document: &Document) -> bool {
        match self {
            Predicate::Equals { field, value } => resolve_path(document, field)
                .into_iter()
                .any(|candidate| values_equal(candidate, value)),
            Predicate::Contains { field, needle } => {
                let needle = needle.to_lowercase();
                resolve_path(document, field).into_iter().any(|candidate| {
                    matches!(candidate, Bson::String(text) if text.to_lowercase().contains(&needle))
                })
            }
            Predicate::In { field, values } => resolve_path(document, field)
                .into_iter()
                .any(|candidate| values.iter().any(|value| values_equal(candidate, value))),
            Predicate::Range { field, min, max } => resolve_path(document, field)
                .into_iter()
                .filter_map(as_number)
                .any(|n| min.map_or(true, |min| n >= min) && max.map_or(true, |max| n <= max)),
            Predicate::After { field, value } => resolve_path(document, field)
                .into_iter()
                .filter(|candidate| same_bracket(candidate, value))
                .any(|candidate| compare_values(Some(candidate), Some(value)) == Ordering::Greater),
            Predicate::Any(predicates) => predicates.iter().any(|p| p.matches(document)),
            Predicate::All(predicates) => predicates.iter().all(|p| p.matches(document)),
        }
    }
}

/// `$gt` only compares numbers with numbers and otherwise values of one type.
fn same_bracket(left: &Bson, right: &Bson) -> bool {
    (as_number(left).is_some() && as_number(right).is_some())
        || std::mem::discriminant(left) == std::mem::discriminant(right)
}

fn render_all(predicates: &[Predicate]) -> Vec<Document> {
    predicates.iter().map(Predicate::to_document).collect()
}

/// AND of `predicates` as one filter document; empty matches everything.
pub fn conjunction(predicates: &[Predicate]) -> Document {
    match predicates {
        [] => Document::new(),
        [single] => single.to_document(),
        many => {
            let mut document = Document::new();
            document.insert("$and", render_all(many));
            document
        }
    }
}

/// True when every predicate holds.
pub fn matches_all(predicates: &[Predicate], document: &Document) -> bool {
    predicates.iter().all(|p| p.matches(document))
}
