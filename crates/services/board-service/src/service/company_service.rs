//! Company service - the administrator's company listing.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use common::AppResult;
use domain::CompanyResponse;
use query::{CompanyListParams, Paginated};

use crate::infra::DocumentStore;
use crate::repository::PrincipalStore;

#[async_trait]
pub trait CompanyService: Send + Sync {
    async fn list(&self, params: &CompanyListParams) -> AppResult<Paginated<CompanyResponse>>;
}

pub struct CompanyManager {
    accounts: PrincipalStore,
}

impl CompanyManager {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            accounts: PrincipalStore::new(store),
        }
    }
}

#[async_trait]
impl CompanyService for CompanyManager {
    async fn list(&self, params: &CompanyListParams) -> AppResult<Paginated<CompanyResponse>> {
        let plan = params.to_plan()?;
        debug!(filter = %plan.filter_document(), sort = %plan.sort_document(), "Company listing plan");

        let page = self.accounts.list_companies(&plan).await?;
        Ok(page.map(CompanyResponse::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryStore;
    use common::AppError;
    use domain::Company;

    async fn seeded() -> CompanyManager {
        let store = Arc::new(MemoryStore::new());
        let accounts = PrincipalStore::new(store.clone());
        for (name, sector, enabled) in [
            ("Umbrella", "Pharma", true),
            ("Acme", "Tech", true),
            ("Globex", "Tech", false),
        ] {
            let mut company = Company::new(
                name.into(),
                "12345678000199".into(),
                Some(sector.into()),
                format!("{}@example.com", name.to_lowercase()),
                "hash".into(),
            );
            company.status = enabled;
            accounts.insert_company(&company).await.unwrap();
        }
        CompanyManager::new(store)
    }

    #[tokio::test]
    async fn test_default_sort_is_name_ascending() {
        let page = seeded()
            .await
            .list(&CompanyListParams::default())
            .await
            .unwrap();

        let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Globex", "Umbrella"]);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn test_keyword_and_status_combine() {
        let params = CompanyListParams {
            keyword: Some("tech".into()),
            status: Some("true".into()),
            ..Default::default()
        };
        let page = seeded().await.list(&params).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Acme");
    }

    #[tokio::test]
    async fn test_unknown_sort_column_is_rejected() {
        let params = CompanyListParams {
            sort_column: Some("passwordHash".into()),
            ..Default::default()
        };
        let result = seeded().await.list(&params).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
