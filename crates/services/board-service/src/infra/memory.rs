//! Process-local document store.
//!
//! Evaluates the same plans and pipeline stages as the MongoDB backend, with
//! document-database semantics for dotted paths, joins and unwinding. Data is
//! lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use bson::{Bson, Document};
use tokio::sync::RwLock;

use common::{AppError, AppResult};
use query::document::{compare_values, first_value, resolve_path, set_path, values_equal};
use query::predicate::matches_all;
use query::{FilterPlan, Predicate, Sort, SortDirection, Stage, TIE_BREAKER};

use super::store::DocumentStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert many documents at once, e.g. fixtures.
    pub async fn seed(&self, collection: &str, documents: impl IntoIterator<Item = Document>) {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .extend(documents);
    }
}

fn sort_rows(rows: &mut [Document], sort: &Sort) {
    rows.sort_by(|a, b| {
        let ordering = compare_values(first_value(a, &sort.field), first_value(b, &sort.field))
            .then_with(|| compare_values(a.get(TIE_BREAKER), b.get(TIE_BREAKER)));
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

fn window(rows: Vec<Document>, skip: u64, limit: u64) -> Vec<Document> {
    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    rows.into_iter().skip(skip).take(limit).collect()
}

fn lookup(
    rows: Vec<Document>,
    foreign: &[Document],
    local_field: &str,
    foreign_field: &str,
    alias: &str,
) -> Vec<Document> {
    rows.into_iter()
        .map(|mut row| {
            let keys: Vec<Bson> = resolve_path(&row, local_field).into_iter().cloned().collect();
            let joined: Vec<Bson> = foreign
                .iter()
                .filter(|candidate| {
                    resolve_path(candidate, foreign_field)
                        .into_iter()
                        .any(|value| keys.iter().any(|key| values_equal(key, value)))
                })
                .cloned()
                .map(Bson::Document)
                .collect();
            set_path(&mut row, alias, Bson::Array(joined));
            row
        })
        .collect()
}

/// Missing or empty arrays drop the row.
fn unwind(rows: Vec<Document>, path: &str) -> Vec<Document> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let values: Vec<Bson> = resolve_path(&row, path).into_iter().cloned().collect();
        for value in values {
            let mut expanded = row.clone();
            set_path(&mut expanded, path, value);
            out.push(expanded);
        }
    }
    out
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, plan: &FilterPlan) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut rows: Vec<Document> = collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|document| plan.matches(document))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        sort_rows(&mut rows, plan.sort());
        let pagination = plan.pagination();
        Ok(window(rows, pagination.skip(), pagination.limit()))
    }

    async fn find_one(
        &self,
        collection: &str,
        predicates: Vec<Predicate>,
    ) -> AppResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).and_then(|documents| {
            documents
                .iter()
                .find(|document| matches_all(&predicates, document))
                .cloned()
        }))
    }

    async fn count(&self, collection: &str, predicates: Vec<Predicate>) -> AppResult<u64> {
        let collections = self.collections.read().await;
        let count = collections.get(collection).map_or(0, |documents| {
            documents
                .iter()
                .filter(|document| matches_all(&predicates, document))
                .count()
        });
        Ok(count as u64)
    }

    async fn insert(&self, collection: &str, document: Document) -> AppResult<()> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        if let Some(id) = document.get("_id") {
            if documents.iter().any(|existing| existing.get("_id") == Some(id)) {
                return Err(AppError::conflict("Document"));
            }
        }
        documents.push(document);
        Ok(())
    }

    async fn replace(&self, collection: &str, document: Document) -> AppResult<bool> {
        let id = document
            .get("_id")
            .cloned()
            .ok_or_else(|| AppError::internal("Replacement document has no _id"))?;

        let mut collections = self.collections.write().await;
        let slot = collections.get_mut(collection).and_then(|documents| {
            documents
                .iter_mut()
                .find(|existing| existing.get("_id") == Some(&id))
        });

        match slot {
            Some(existing) => {
                *existing = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn aggregate(&self, collection: &str, stages: Vec<Stage>) -> AppResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let mut rows = collections.get(collection).cloned().unwrap_or_default();

        for stage in &stages {
            rows = match stage {
                Stage::Match(predicates) => rows
                    .into_iter()
                    .filter(|row| matches_all(predicates, row))
                    .collect(),
                Stage::Lookup {
                    from,
                    local_field,
                    foreign_field,
                    alias,
                } => {
                    let foreign = collections.get(from).map(Vec::as_slice).unwrap_or(&[]);
                    lookup(rows, foreign, local_field, foreign_field, alias)
                }
                Stage::Unwind(path) => unwind(rows, path),
                Stage::Sort(sort) => {
                    sort_rows(&mut rows, sort);
                    rows
                }
                Stage::Skip(n) => window(rows, *n, u64::MAX),
                Stage::Limit(n) => window(rows, 0, *n),
                Stage::Count(field) => {
                    if rows.is_empty() {
                        Vec::new()
                    } else {
                        let mut counted = Document::new();
                        counted.insert(field.as_str(), rows.len() as i64);
                        vec![counted]
                    }
                }
            };
        }

        Ok(rows)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
