//! Field mapping between the application model and the store's columns.
//!
//! Row types carry the store's snake_case column names; the application
//! model names the record's references `author` / `category` and its date
//! `created_on`, while the store calls them `user_id` / `category_id` /
//! `created_at`. Conversions are pure renames — no value transformation —
//! with one reading accommodation: the store's `created_at` column is a
//! timestamp, and we keep only its date part.
//!
//! On the outbound side `created_at` is omitted (not sent as null) when the
//! draft did not supply a date, so the store's column default applies.

use chrono::NaiveDate;
use recdesk_types::{
    Category, CategoryId, CategoryPatch, NewCategory, NewRecord, NewUser, RecordId, RecordItem,
    RecordPatch, Role, User, UserId, UserPatch,
};
use serde::{Deserialize, Deserializer, Serialize};

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Insert payload for the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserRow {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Partial update payload for the `users` table. Unset fields are absent
/// from the serialized row, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// A row of the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

/// Insert payload for the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategoryRow {
    pub name: String,
    pub description: String,
}

/// Partial update payload for the `categories` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A row of the `records` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: RecordId,
    pub title: String,
    pub content: String,
    pub user_id: UserId,
    pub category_id: CategoryId,
    #[serde(default, deserialize_with = "date_part")]
    pub created_at: Option<NaiveDate>,
}

/// Insert payload for the `records` table. A missing `created_at` is left
/// out of the payload so the store's `DEFAULT NOW()` applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecordRow {
    pub title: String,
    pub content: String,
    pub user_id: UserId,
    pub category_id: CategoryId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
}

/// Partial update payload for the `records` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPatchRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDate>,
}

/// Deserializes a timestamp or date string to its date part. The store's
/// `created_at` column is `TIMESTAMP DEFAULT NOW()`; this layer only keeps
/// date granularity.
fn date_part<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => {
            let date = match s.find('T') {
                Some(idx) => &s[..idx],
                None => s.as_str(),
            };
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

// ── users ───────────────────────────────────────────────────────

/// Builds the insert payload for a user draft.
pub fn user_to_row(draft: &NewUser) -> NewUserRow {
    NewUserRow {
        name: draft.name.clone(),
        email: draft.email.clone(),
        role: draft.role,
    }
}

/// Reads a user out of a store row.
pub fn user_from_row(row: UserRow) -> User {
    User {
        id: row.id,
        name: row.name,
        email: row.email,
        role: row.role,
    }
}

/// Translates a user patch to store column names.
pub fn user_patch_to_row(patch: &UserPatch) -> UserPatchRow {
    UserPatchRow {
        name: patch.name.clone(),
        email: patch.email.clone(),
        role: patch.role,
    }
}

// ── categories ──────────────────────────────────────────────────

/// Builds the insert payload for a category draft.
pub fn category_to_row(draft: &NewCategory) -> NewCategoryRow {
    NewCategoryRow {
        name: draft.name.clone(),
        description: draft.description.clone(),
    }
}

/// Reads a category out of a store row.
pub fn category_from_row(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        name: row.name,
        description: row.description,
    }
}

/// Translates a category patch to store column names.
pub fn category_patch_to_row(patch: &CategoryPatch) -> CategoryPatchRow {
    CategoryPatchRow {
        name: patch.name.clone(),
        description: patch.description.clone(),
    }
}

// ── records ─────────────────────────────────────────────────────

/// Builds the insert payload for a record draft, renaming the two foreign
/// keys and the creation date to their column names.
pub fn record_to_row(draft: &NewRecord) -> NewRecordRow {
    NewRecordRow {
        title: draft.title.clone(),
        content: draft.content.clone(),
        user_id: draft.author,
        category_id: draft.category,
        created_at: draft.created_on,
    }
}

/// Reads a record out of a store row, renaming columns back to the
/// application model.
pub fn record_from_row(row: RecordRow) -> RecordItem {
    RecordItem {
        id: row.id,
        title: row.title,
        content: row.content,
        author: row.user_id,
        category: row.category_id,
        created_on: row.created_at,
    }
}

/// Translates a record patch to store column names. Only renamed fields
/// (`author`, `category`, `created_on`) change their name; the rest pass
/// through untouched.
pub fn record_patch_to_row(patch: &RecordPatch) -> RecordPatchRow {
    RecordPatchRow {
        title: patch.title.clone(),
        content: patch.content.clone(),
        user_id: patch.author,
        category_id: patch.category,
        created_at: patch.created_on,
    }
}
