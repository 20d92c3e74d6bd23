//! MongoDB index initialisation.
//!
//! Unique indexes back the check-then-insert sequences in the services: two
//! racing registrations or applications cannot both land.

use bson::{doc, Document};
use mongodb::{options::IndexOptions, Database, IndexModel};
use tracing::info;

use domain::{
    ADMINS_COLLECTION, APPLICATIONS_COLLECTION, COMPANIES_COLLECTION, JOBS_COLLECTION,
    USERS_COLLECTION,
};

fn unique(keys: Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

fn plain(keys: Document) -> IndexModel {
    IndexModel::builder().keys(keys).build()
}

/// Every index, grouped by collection.
pub(crate) fn index_models() -> Vec<(&'static str, Vec<IndexModel>)> {
    vec![
        (
            USERS_COLLECTION,
            vec![
                unique(doc! { "email": 1 }),
                unique(doc! { "cpf": 1 }),
                plain(doc! { "emailVerificationToken": 1 }),
            ],
        ),
        (ADMINS_COLLECTION, vec![unique(doc! { "email": 1 })]),
        (
            COMPANIES_COLLECTION,
            vec![unique(doc! { "email": 1 }), unique(doc! { "cnpj": 1 })],
        ),
        (
            JOBS_COLLECTION,
            vec![
                plain(doc! { "company": 1 }),
                plain(doc! { "status": 1, "publishedAt": -1 }),
            ],
        ),
        (
            APPLICATIONS_COLLECTION,
            vec![
                unique(doc! { "job": 1, "user": 1 }),
                plain(doc! { "user": 1 }),
            ],
        ),
    ]
}

/// Create missing indexes. Existing ones with the same spec are left alone.
pub(crate) async fn initialize_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
    for (collection, models) in index_models() {
        db.collection::<Document>(collection)
            .create_indexes(models)
            .await?;
        info!(collection, "Ensured indexes");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_unique(collection: &str, keys: Document) -> bool {
        index_models()
            .into_iter()
            .filter(|(name, _)| *name == collection)
            .flat_map(|(_, models)| models)
            .any(|model| {
                model.keys == keys
                    && model
                        .options
                        .as_ref()
                        .and_then(|options| options.unique)
                        .unwrap_or(false)
            })
    }

    #[test]
    fn test_account_identifiers_are_unique() {
        assert!(is_unique(USERS_COLLECTION, doc! { "email": 1 }));
        assert!(is_unique(USERS_COLLECTION, doc! { "cpf": 1 }));
        assert!(is_unique(ADMINS_COLLECTION, doc! { "email": 1 }));
        assert!(is_unique(COMPANIES_COLLECTION, doc! { "email": 1 }));
        assert!(is_unique(COMPANIES_COLLECTION, doc! { "cnpj": 1 }));
    }

    #[test]
    fn test_one_application_per_job_and_user() {
        assert!(is_unique(APPLICATIONS_COLLECTION, doc! { "job": 1, "user": 1 }));
        assert!(!is_unique(APPLICATIONS_COLLECTION, doc! { "user": 1 }));
    }
}
