//! The local view of the remote store.

use crate::entity::{Category, RecordItem, User};
use crate::ids::{CategoryId, RecordId, UserId};
use serde::{Deserialize, Serialize};

/// The complete in-memory copy of all three collections as of the last
/// successful refresh. The sync engine only ever replaces a snapshot as a
/// whole; there is no partial patching, so the view can never hold a mix of
/// two fetch generations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Users, ordered by id ascending.
    pub users: Vec<User>,
    /// Categories, ordered by id ascending.
    pub categories: Vec<Category>,
    /// Records, ordered by id ascending.
    pub records: Vec<RecordItem>,
}

impl Snapshot {
    /// True when all three collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.categories.is_empty() && self.records.is_empty()
    }

    /// Total number of entities across the three collections.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.users.len() + self.categories.len() + self.records.len()
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Looks up a category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&RecordItem> {
        self.records.iter().find(|r| r.id == id)
    }
}
