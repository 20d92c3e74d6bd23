//! Infrastructure layer - document store backends.

mod indexes;
mod memory;
mod mongo;
mod store;

use std::sync::Arc;

use common::{AppResult, DatabaseConfig, StoreBackend};

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::DocumentStore;

#[cfg(any(test, feature = "test-utils"))]
pub use store::MockDocumentStore;

/// Open the configured backend.
pub async fn connect(config: &DatabaseConfig) -> AppResult<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Mongo => {
            let store = MongoStore::connect(&config.uri, &config.database).await?;
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
