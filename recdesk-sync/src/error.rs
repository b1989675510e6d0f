//! Error taxonomy for the sync layer.
//!
//! Every failure a mutating operation can surface lands in exactly one
//! `SyncError` kind. The first two arise locally before any network call;
//! the rest classify gateway failures. Classification keys on the backend's
//! structured error code first; the message substring checks are a fallback
//! for backends that omit the code.

use crate::gateway::GatewayError;
use thiserror::Error;

/// PostgreSQL code for an insufficient-privilege / row-level-security denial.
const CODE_RLS_DENIED: &str = "42501";
/// PostgreSQL code for a foreign-key violation.
const CODE_FK_VIOLATION: &str = "23503";
/// PostgreSQL code for an undefined table.
const CODE_UNDEFINED_TABLE: &str = "42P01";

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur in sync operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The simulated-connectivity toggle is off. Raised before the gateway
    /// is touched; toggling back online is the remedy.
    #[error("connection lost (simulated): the offline toggle is blocking writes")]
    Offline,

    /// Input rejected by the validator before any network call.
    #[error("validation failed: {reason}")]
    Validation { reason: String },

    /// The store's access-control policy denied the write. The remedy is a
    /// policy or schema change, not different input.
    #[error("access denied by store policy (RLS): {message}")]
    AccessDenied { message: String },

    /// A delete was rejected because dependent rows still reference the
    /// target. Remove the dependents or enable cascading delete.
    #[error("still referenced by dependent rows: {message}")]
    ReferentialConflict { message: String },

    /// A delete reported no error but removed nothing — a masked policy
    /// denial or a stale identity.
    #[error("nothing was deleted: the row may be protected by a policy or already gone")]
    SilentNoOp,

    /// The backing tables do not exist yet. Run the initialization script.
    #[error("store schema missing (tables not found): {message}")]
    SchemaMissing { message: String },

    /// Any other gateway failure: transport, malformed request, or an
    /// unrecognized backend code.
    #[error("store error: {message}")]
    Backend { message: String },
}

impl SyncError {
    /// Classifies a failed fetch. `refresh()` can only surface
    /// `SchemaMissing` or `Backend`.
    pub fn classify_fetch(err: GatewayError) -> Self {
        if err.has_code(CODE_UNDEFINED_TABLE) || err.message.contains("does not exist") {
            SyncError::SchemaMissing { message: err.message }
        } else {
            SyncError::Backend { message: err.message }
        }
    }

    /// Classifies a failed insert or update.
    pub fn classify_write(err: GatewayError) -> Self {
        if err.has_code(CODE_RLS_DENIED) || err.message.contains("row-level security") {
            SyncError::AccessDenied { message: err.message }
        } else {
            SyncError::Backend { message: err.message }
        }
    }

    /// Classifies a failed delete. Foreign-key violations are distinct from
    /// policy denials because their remedies differ.
    pub fn classify_delete(err: GatewayError) -> Self {
        if err.has_code(CODE_FK_VIOLATION) {
            SyncError::ReferentialConflict { message: err.message }
        } else if err.has_code(CODE_RLS_DENIED) || err.message.contains("row-level security") {
            SyncError::AccessDenied { message: err.message }
        } else {
            SyncError::Backend { message: err.message }
        }
    }
}
