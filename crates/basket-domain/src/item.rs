use serde::{Deserialize, Serialize};

/// A checkable item built from a list's stored item string.
///
/// `id` is the item's position in the parse that produced it. It is only
/// meaningful within that parse and is never written back to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayItem {
    pub id: usize,
    pub name: String,
    pub completed: bool,
}

impl DisplayItem {
    pub fn new(id: usize, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            completed: false,
        }
    }

    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}
