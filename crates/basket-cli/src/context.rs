use basket_core::{AppConfig, BasketResult};
use basket_domain::ListService;
use basket_persistence::SqliteListStore;
use std::path::Path;

pub struct CliContext {
    service: ListService<SqliteListStore>,
}

impl CliContext {
    pub async fn open(db_path: &Path, config: &AppConfig) -> BasketResult<Self> {
        let store = SqliteListStore::new(db_path);
        if config.effective_seed_default_list() {
            store
                .seed_default_list(config.effective_default_list_name())
                .await?;
        }
        tracing::debug!("Using database {}", store.path().display());
        Ok(Self {
            service: ListService::new(store),
        })
    }

    pub fn service(&self) -> &ListService<SqliteListStore> {
        &self.service
    }
}
