use async_trait::async_trait;
use basket_core::BasketResult;
use chrono::{DateTime, Utc};

use crate::{ListId, NewList, StoredList};

/// Storage operations for shopping lists.
///
/// `items_raw` arguments are stored verbatim; callers format them with the
/// item codec first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn insert(&self, list: NewList) -> BasketResult<StoredList>;
    async fn find_by_id(&self, id: ListId) -> BasketResult<Option<StoredList>>;
    /// All lists, ordered by id.
    async fn find_all(&self) -> BasketResult<Vec<StoredList>>;
    /// Most recently performed lists first; never-performed lists come last.
    async fn find_recent(&self, limit: usize) -> BasketResult<Vec<StoredList>>;
    /// Case-insensitive lookup by name.
    async fn find_by_name_ci(&self, name: &str) -> BasketResult<Option<StoredList>>;
    async fn update_name(&self, id: ListId, name: &str) -> BasketResult<()>;
    async fn update_items(&self, id: ListId, items_raw: &str) -> BasketResult<()>;
    async fn set_last_performed(&self, id: ListId, at: DateTime<Utc>) -> BasketResult<()>;
    /// Writes the reconciled items and the performed timestamp together.
    async fn complete_session(
        &self,
        id: ListId,
        items_raw: &str,
        at: DateTime<Utc>,
    ) -> BasketResult<()>;
    /// Returns whether a row was deleted.
    async fn delete(&self, id: ListId) -> BasketResult<bool>;
    async fn count(&self) -> BasketResult<i64>;
}
