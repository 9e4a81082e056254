use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(pub i64);

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ListId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ListId)
    }
}

impl From<i64> for ListId {
    fn from(id: i64) -> Self {
        ListId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredList {
    pub id: ListId,
    pub name: String,
    #[serde(rename = "items")]
    pub items_raw: String,
    pub is_temporary: bool,
    pub created_at: DateTime<Utc>,
    pub last_performed_at: Option<DateTime<Utc>>,
}

impl StoredList {
    pub fn items(&self) -> Vec<String> {
        codec::parse(Some(self.items_raw.as_str()))
    }

    pub fn item_count(&self) -> usize {
        self.items().len()
    }

    pub fn has_been_performed(&self) -> bool {
        self.last_performed_at.is_some()
    }

    pub fn summary(&self) -> ListSummary {
        ListSummary {
            id: self.id,
            name: self.name.clone(),
            item_count: self.item_count(),
            is_temporary: self.is_temporary,
            last_performed_at: self.last_performed_at,
        }
    }
}

/// Payload for inserting a list; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    pub name: String,
    pub items: Vec<String>,
    pub is_temporary: bool,
}

impl NewList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            is_temporary: false,
        }
    }

    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }

    pub fn temporary(mut self, is_temporary: bool) -> Self {
        self.is_temporary = is_temporary;
        self
    }

    pub fn items_raw(&self) -> String {
        codec::format(&self.items)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
    pub item_count: usize,
    pub is_temporary: bool,
    pub last_performed_at: Option<DateTime<Utc>>,
}
