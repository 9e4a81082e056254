use basket_core::{BasketError, BasketResult};
use serde::Serialize;

use crate::codec;
use crate::validation::names_match;
use crate::{DisplayItem, ListId, StoredList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// Result of saving a session: the new stored item string and what was
/// bought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub list_id: ListId,
    pub items_raw: String,
    pub remaining: Vec<String>,
    pub purchased: Vec<String>,
}

/// In-memory checking of a list's items. Nothing is written until the
/// session is finished; completed items are then dropped from the list.
#[derive(Debug, Clone)]
pub struct ShoppingSession {
    list: StoredList,
    items: Vec<DisplayItem>,
}

impl ShoppingSession {
    pub fn open(list: StoredList) -> Self {
        let items = codec::display_items(Some(list.items_raw.as_str()));
        Self { list, items }
    }

    pub fn list(&self) -> &StoredList {
        &self.list
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn toggle(&mut self, id: usize) -> BasketResult<bool> {
        Ok(self.item_mut(id)?.toggle())
    }

    pub fn set_completed(&mut self, id: usize, completed: bool) -> BasketResult<()> {
        self.item_mut(id)?.set_completed(completed);
        Ok(())
    }

    /// Checks the first unchecked item with a matching name and returns its
    /// position.
    pub fn check_by_name(&mut self, name: &str) -> BasketResult<usize> {
        let item = self
            .items
            .iter_mut()
            .find(|item| !item.completed && names_match(&item.name, name))
            .ok_or_else(|| {
                BasketError::NotFound(format!(
                    "Unchecked item '{}' in list {}",
                    name.trim(),
                    self.list.id
                ))
            })?;
        item.set_completed(true);
        Ok(item.id)
    }

    pub fn check_all(&mut self) {
        for item in &mut self.items {
            item.set_completed(true);
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.items.iter().filter(|item| item.completed).count(),
            total: self.items.len(),
        }
    }

    /// A temporary list can only be closed once every item is checked.
    pub fn can_finish(&self) -> bool {
        !self.list.is_temporary || self.progress().is_complete()
    }

    pub fn finish(self) -> BasketResult<SessionOutcome> {
        if !self.can_finish() {
            let progress = self.progress();
            return Err(BasketError::Validation(format!(
                "temporary list '{}' requires every item to be checked ({}/{})",
                self.list.name, progress.completed, progress.total
            )));
        }

        let remaining = codec::reconcile(&self.items);
        let purchased = self
            .items
            .iter()
            .filter(|item| item.completed)
            .map(|item| item.name.clone())
            .collect();

        Ok(SessionOutcome {
            list_id: self.list.id,
            items_raw: codec::format(&remaining),
            remaining,
            purchased,
        })
    }

    pub fn discard(self) {
        tracing::debug!("Discarded session for list {}", self.list.id);
    }

    fn item_mut(&mut self, id: usize) -> BasketResult<&mut DisplayItem> {
        let list_id = self.list.id;
        self.items
            .get_mut(id)
            .ok_or_else(|| BasketError::NotFound(format!("Item {} in list {}", id, list_id)))
    }
}
