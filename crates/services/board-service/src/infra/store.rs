//! Document store port.

use async_trait::async_trait;
use bson::Document;

use common::AppResult;
use query::{FilterPlan, Predicate, Stage};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Collection-oriented persistence used by every repository.
///
/// Plans and stages arrive in their structured form so each backend can
/// render or evaluate them natively. There are no transactions: a
/// check-then-insert sequence can race.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// One page of matching documents, sorted and sliced per the plan
    async fn find(&self, collection: &str, plan: &FilterPlan) -> AppResult<Vec<Document>>;

    async fn find_one(
        &self,
        collection: &str,
        predicates: Vec<Predicate>,
    ) -> AppResult<Option<Document>>;

    async fn count(&self, collection: &str, predicates: Vec<Predicate>) -> AppResult<u64>;

    async fn insert(&self, collection: &str, document: Document) -> AppResult<()>;

    /// Replace the document with the same `_id`. Returns false when none matched.
    async fn replace(&self, collection: &str, document: Document) -> AppResult<bool>;

    async fn aggregate(&self, collection: &str, stages: Vec<Stage>) -> AppResult<Vec<Document>>;

    /// Connectivity check for health reporting
    async fn ping(&self) -> AppResult<()>;
}
