//! Entity model for RecDesk.
//!
//! This crate defines the types shared between the sync layer and its
//! callers:
//! - Server-assigned identifiers for the three entity kinds
//! - The entities themselves (`User`, `Category`, `RecordItem`)
//! - Drafts (entities pending creation, no identity yet)
//! - Typed patches (partial updates, one field set per changed column)
//! - The `Snapshot` holding the complete local view of all three collections
//!
//! Identity is always assigned by the remote store; none of these types can
//! mint an identifier locally.

mod change;
mod entity;
mod ids;
mod snapshot;

pub use change::{CategoryPatch, Draft, NewCategory, NewRecord, NewUser, Patch, RecordPatch, Table, UserPatch};
pub use entity::{Category, ParseRoleError, RecordItem, Role, User};
pub use ids::{CategoryId, RecordId, UserId};
pub use snapshot::Snapshot;
