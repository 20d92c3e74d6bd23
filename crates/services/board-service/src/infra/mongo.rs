//! MongoDB-backed document store.

use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{Client, Collection, Database};

use common::{AppError, AppResult};
use domain::{ADMINS_COLLECTION, APPLICATIONS_COLLECTION, COMPANIES_COLLECTION, USERS_COLLECTION};
use query::{predicate::conjunction, FilterPlan, Predicate, Stage};

use super::indexes::initialize_indexes;
use super::store::DocumentStore;

const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

/// Unique-index violations become conflicts; everything else stays a store error.
fn write_error(collection: &str, error: mongodb::error::Error) -> AppError {
    if !is_duplicate_key_error(&error) {
        return AppError::from(error);
    }

    let entity = match collection {
        USERS_COLLECTION => "Account",
        ADMINS_COLLECTION => "Admin",
        COMPANIES_COLLECTION => "Company",
        APPLICATIONS_COLLECTION => "Application",
        _ => "Document",
    };
    tracing::warn!(collection, "Rejected duplicate key");
    AppError::conflict(entity)
}

/// Store over one MongoDB database.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect, select the database and ensure its indexes. Index creation
    /// is the first round trip, so an unreachable server fails here.
    pub async fn connect(uri: &str, database: &str) -> AppResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        initialize_indexes(&db).await?;

        tracing::info!(database = %database, "MongoDB client initialised");
        Ok(Self { db })
    }

    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, plan: &FilterPlan) -> AppResult<Vec<Document>> {
        let pagination = plan.pagination();
        let cursor = self
            .collection(collection)
            .find(plan.filter_document())
            .sort(plan.sort_document())
            .skip(pagination.skip())
            .limit(i64::try_from(pagination.limit()).unwrap_or(i64::MAX))
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_one(
        &self,
        collection: &str,
        predicates: Vec<Predicate>,
    ) -> AppResult<Option<Document>> {
        Ok(self
            .collection(collection)
            .find_one(conjunction(&predicates))
            .await?)
    }

    async fn count(&self, collection: &str, predicates: Vec<Predicate>) -> AppResult<u64> {
        Ok(self
            .collection(collection)
            .count_documents(conjunction(&predicates))
            .await?)
    }

    async fn insert(&self, collection: &str, document: Document) -> AppResult<()> {
        self.collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| write_error(collection, e))?;
        Ok(())
    }

    async fn replace(&self, collection: &str, document: Document) -> AppResult<bool> {
        let id = document
            .get("_id")
            .cloned()
            .ok_or_else(|| AppError::internal("Replacement document has no _id"))?;
        let result = self
            .collection(collection)
            .replace_one(doc! { "_id": id }, document)
            .await
            .map_err(|e| write_error(collection, e))?;
        Ok(result.matched_count > 0)
    }

    async fn aggregate(&self, collection: &str, stages: Vec<Stage>) -> AppResult<Vec<Document>> {
        let pipeline: Vec<Document> = stages.iter().map(Stage::to_document).collect();
        let cursor = self.collection(collection).aggregate(pipeline).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn ping(&self) -> AppResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::error::WriteError;

    fn write_failure(code: i32) -> mongodb::error::Error {
        let write_error: WriteError =
            bson::from_document(doc! { "code": code, "errmsg": "write failed" }).unwrap();
        mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_duplicate_key_becomes_conflict() {
        let error = write_error(USERS_COLLECTION, write_failure(DUPLICATE_KEY));
        assert!(matches!(&error, AppError::Conflict(entity) if entity == "Account"));

        let error = write_error(APPLICATIONS_COLLECTION, write_failure(DUPLICATE_KEY));
        assert_eq!(error.user_message(), "Application already exists");
    }

    #[test]
    fn test_other_write_failures_stay_store_errors() {
        let error = write_error(USERS_COLLECTION, write_failure(121));
        assert!(matches!(error, AppError::Database(_)));
    }
}
