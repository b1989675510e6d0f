//! Drafts and patches — the write side of the entity model.
//!
//! A draft is an entity pending creation: all required fields, no identity.
//! A patch is a typed partial update: one `Option` per mutable column, so a
//! field that is not being changed is simply absent rather than overwritten
//! with a default. The per-kind types replace the untyped merged-map updates
//! of earlier designs; a misspelled field name is a compile error here.

use crate::entity::Role;
use crate::ids::{CategoryId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three tables of the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Users,
    Categories,
    Records,
}

impl Table {
    /// The table name as the store knows it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Table::Users => "users",
            Table::Categories => "categories",
            Table::Records => "records",
        }
    }

    /// All tables, in the order the snapshot holds them.
    pub const ALL: [Table; 3] = [Table::Users, Table::Categories, Table::Records];
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user pending creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A category pending creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
}

/// A record pending creation. Leaving `created_on` unset lets the store
/// apply its column default at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub title: String,
    pub content: String,
    pub author: UserId,
    pub category: CategoryId,
    pub created_on: Option<NaiveDate>,
}

/// An entity pending creation, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    User(NewUser),
    Category(NewCategory),
    Record(NewRecord),
}

impl Draft {
    /// The table this draft will be inserted into.
    #[must_use]
    pub const fn table(&self) -> Table {
        match self {
            Draft::User(_) => Table::Users,
            Draft::Category(_) => Table::Categories,
            Draft::Record(_) => Table::Records,
        }
    }
}

/// Partial update for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserPatch {
    /// True when no field is being changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.role.is_none()
    }
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryPatch {
    /// True when no field is being changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// Partial update for a record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<UserId>,
    pub category: Option<CategoryId>,
    pub created_on: Option<NaiveDate>,
}

impl RecordPatch {
    /// True when no field is being changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.category.is_none()
            && self.created_on.is_none()
    }
}

/// A partial update, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    User(UserPatch),
    Category(CategoryPatch),
    Record(RecordPatch),
}

impl Patch {
    /// The table this patch applies to.
    #[must_use]
    pub const fn table(&self) -> Table {
        match self {
            Patch::User(_) => Table::Users,
            Patch::Category(_) => Table::Categories,
            Patch::Record(_) => Table::Records,
        }
    }

    /// True when no field is being changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Patch::User(p) => p.is_empty(),
            Patch::Category(p) => p.is_empty(),
            Patch::Record(p) => p.is_empty(),
        }
    }
}
