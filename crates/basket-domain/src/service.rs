use basket_core::{BasketError, BasketResult};
use chrono::Utc;

use crate::codec;
use crate::validation::{validate_items_input, validate_list_name};
use crate::{ListId, ListRepository, ListSummary, NewList, SessionOutcome, ShoppingSession, StoredList};

/// The list flows: creation, editing, performing and shopping sessions.
pub struct ListService<R: ListRepository> {
    repo: R,
}

impl<R: ListRepository> ListService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_list(
        &self,
        name: &str,
        items_input: Option<&str>,
        is_temporary: bool,
    ) -> BasketResult<StoredList> {
        validate_list_name(name)?;
        let name = name.trim();
        if self.repo.find_by_name_ci(name).await?.is_some() {
            return Err(BasketError::DuplicateName(name.to_string()));
        }

        let items = match items_input {
            Some(input) => {
                validate_items_input(input)?;
                codec::normalize_input(input)
            }
            None => Vec::new(),
        };

        let new_list = NewList::new(name)
            .with_items(items)
            .temporary(is_temporary);
        let list = self.repo.insert(new_list).await?;
        tracing::info!("Created list {} '{}'", list.id, list.name);
        Ok(list)
    }

    pub async fn get_list(&self, id: ListId) -> BasketResult<Option<StoredList>> {
        tracing::debug!("Looking up list {}", id);
        self.repo.find_by_id(id).await
    }

    pub async fn list_all(&self) -> BasketResult<Vec<StoredList>> {
        self.repo.find_all().await
    }

    pub async fn list_summaries(&self) -> BasketResult<Vec<ListSummary>> {
        Ok(self
            .repo
            .find_all()
            .await?
            .iter()
            .map(StoredList::summary)
            .collect())
    }

    /// Most recently performed lists, as offered for quick access.
    pub async fn recent_lists(&self, limit: usize) -> BasketResult<Vec<ListSummary>> {
        tracing::debug!("Looking up {} recent lists", limit);
        Ok(self
            .repo
            .find_recent(limit)
            .await?
            .iter()
            .map(StoredList::summary)
            .collect())
    }

    pub async fn rename_list(&self, id: ListId, name: &str) -> BasketResult<StoredList> {
        validate_list_name(name)?;
        let name = name.trim();
        self.require_list(id).await?;

        if let Some(existing) = self.repo.find_by_name_ci(name).await? {
            if existing.id != id {
                return Err(BasketError::DuplicateName(name.to_string()));
            }
        }

        self.repo.update_name(id, name).await?;
        tracing::info!("Renamed list {} to '{}'", id, name);
        self.require_list(id).await
    }

    /// Replaces a list's items with user input, normalizing every item.
    pub async fn set_items(&self, id: ListId, input: &str) -> BasketResult<StoredList> {
        validate_items_input(input)?;
        self.require_list(id).await?;

        let items_raw = codec::format(&codec::normalize_input(input));
        self.repo.update_items(id, &items_raw).await?;
        tracing::info!("Updated items of list {}: '{}'", id, items_raw);
        self.require_list(id).await
    }

    pub async fn mark_performed(&self, id: ListId) -> BasketResult<StoredList> {
        self.require_list(id).await?;
        self.repo.set_last_performed(id, Utc::now()).await?;
        tracing::info!("Marked list {} as performed", id);
        self.require_list(id).await
    }

    pub async fn delete_list(&self, id: ListId) -> BasketResult<()> {
        if !self.repo.delete(id).await? {
            return Err(BasketError::not_found_list(id));
        }
        tracing::info!("Deleted list {}", id);
        Ok(())
    }

    pub async fn open_session(&self, id: ListId) -> BasketResult<ShoppingSession> {
        let list = self.require_list(id).await?;
        tracing::debug!("Opened session for list {} ({} items)", id, list.item_count());
        Ok(ShoppingSession::open(list))
    }

    /// Finishes a session and stores what is left to buy. Checked items are
    /// removed from the list.
    pub async fn save_session(&self, session: ShoppingSession) -> BasketResult<SessionOutcome> {
        let outcome = session.finish()?;
        self.repo
            .complete_session(outcome.list_id, &outcome.items_raw, Utc::now())
            .await?;
        tracing::info!(
            "Saved session for list {}: {} purchased, {} remaining",
            outcome.list_id,
            outcome.purchased.len(),
            outcome.remaining.len()
        );
        Ok(outcome)
    }

    async fn require_list(&self, id: ListId) -> BasketResult<StoredList> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BasketError::not_found_list(id))
    }
}
