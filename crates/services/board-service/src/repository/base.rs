//! Shared typed access over the document store.

use bson::{oid::ObjectId, Document};
use serde::{de::DeserializeOwned, Serialize};

use common::{AppError, AppResult};
use query::document::as_number;
use query::{AggregationPlan, FilterPlan, Paginated, Predicate, COUNT_FIELD};

use crate::infra::DocumentStore;

pub(crate) fn to_document<T: Serialize>(value: &T) -> AppResult<Document> {
    bson::to_document(value)
        .map_err(|e| AppError::internal(format!("BSON encoding failed: {}", e)))
}

pub(crate) fn from_document<T: DeserializeOwned>(document: Document) -> AppResult<T> {
    bson::from_document(document)
        .map_err(|e| AppError::internal(format!("BSON decoding failed: {}", e)))
}

pub(crate) async fn find_by_id<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: ObjectId,
) -> AppResult<Option<T>> {
    find_first(store, collection, vec![Predicate::equals("_id", id)]).await
}

pub(crate) async fn find_first<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    predicates: Vec<Predicate>,
) -> AppResult<Option<T>> {
    store
        .find_one(collection, predicates)
        .await?
        .map(from_document)
        .transpose()
}

/// Page and total from the same predicates.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    plan: &FilterPlan,
) -> AppResult<Paginated<T>> {
    let documents = store.find(collection, plan).await?;
    let total = store.count(collection, plan.predicates().to_vec()).await?;

    let items = documents
        .into_iter()
        .map(from_document)
        .collect::<AppResult<Vec<T>>>()?;

    Ok(Paginated::new(items, total, plan.pagination()))
}

/// Run the paginated pipeline and its count twin.
pub(crate) async fn aggregate_page<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    plan: &AggregationPlan,
) -> AppResult<Paginated<T>> {
    let rows = store.aggregate(collection, plan.stages()).await?;
    let counted = store.aggregate(collection, plan.count_stages()).await?;

    // $count emits no document at all for an empty input
    let total = counted
        .first()
        .and_then(|row| row.get(COUNT_FIELD))
        .and_then(as_number)
        .map_or(0, |n| n as u64);

    let items = rows
        .into_iter()
        .map(from_document)
        .collect::<AppResult<Vec<T>>>()?;

    Ok(Paginated::new(items, total, plan.pagination()))
}
