//! Sync engine — the single mediator between callers and the remote store.
//!
//! Owns the authoritative in-memory snapshot, the simulated-connectivity
//! toggle, and the last-error slot. Every mutating call runs the same
//! pipeline: connectivity gate, validation gate, field mapping, gateway
//! call, then a full snapshot refresh. Failures are classified into the
//! taxonomy in [`crate::error`] before anything is exposed.
//!
//! The engine is constructed once per session and handed to callers
//! explicitly (typically behind an `Arc`); there is no ambient instance.

use crate::error::{SyncError, SyncResult};
use crate::gateway::RemoteGateway;
use crate::mapping::{self, CategoryRow, RecordRow, UserRow};
use crate::validate;
use recdesk_types::{Draft, Patch, Snapshot, Table};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// The sync engine. All state lives behind locks so a shared reference is
/// enough for every operation.
pub struct SyncEngine {
    gateway: Arc<dyn RemoteGateway>,
    /// Local view of the store; replaced as a whole, never patched.
    snapshot: RwLock<Snapshot>,
    /// The simulated-connectivity toggle. Blocks writes only; refresh
    /// always goes to the real store.
    simulated_online: RwLock<bool>,
    /// Whether the store actually answered the last refresh.
    store_reachable: RwLock<bool>,
    /// Message of the most recent failure, cleared on success.
    last_error: RwLock<Option<String>>,
}

impl SyncEngine {
    /// Creates an engine over the given gateway. The snapshot starts empty;
    /// call [`SyncEngine::refresh`] to populate it.
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        Self {
            gateway,
            snapshot: RwLock::new(Snapshot::default()),
            simulated_online: RwLock::new(true),
            store_reachable: RwLock::new(false),
            last_error: RwLock::new(None),
        }
    }

    // ── Caller-facing state ──────────────────────────────────────

    /// The current snapshot (cloned read view). Entities held before a
    /// mutation are stale immediately after it.
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    /// The simulated-connectivity toggle.
    pub async fn is_online(&self) -> bool {
        *self.simulated_online.read().await
    }

    /// Whether the store answered the last refresh.
    pub async fn is_store_reachable(&self) -> bool {
        *self.store_reachable.read().await
    }

    /// The most recent failure message, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Flips the simulated-connectivity toggle and clears the error slot.
    /// Purely local; no network call. Returns the new state.
    pub async fn toggle_connectivity(&self) -> bool {
        let mut online = self.simulated_online.write().await;
        *online = !*online;
        *self.last_error.write().await = None;
        info!(
            "Simulated connectivity toggled {}",
            if *online { "online" } else { "offline" }
        );
        *online
    }

    /// Clears the error slot. Idempotent.
    pub async fn clear_error(&self) {
        *self.last_error.write().await = None;
    }

    // ── Operations ───────────────────────────────────────────────

    /// Fetches all three collections in parallel and replaces the snapshot
    /// atomically. Ignores the simulated toggle; this is the one operation
    /// that always reaches for the real store. On any sub-fetch failing the
    /// snapshot is left untouched.
    pub async fn refresh(&self) -> SyncResult<()> {
        debug!("Refreshing snapshot");

        let fetched = tokio::try_join!(
            self.gateway.select(Table::Users),
            self.gateway.select(Table::Categories),
            self.gateway.select(Table::Records),
        );

        let (users, categories, records) = match fetched {
            Ok(rows) => rows,
            Err(e) => {
                *self.store_reachable.write().await = false;
                let err = SyncError::classify_fetch(e);
                warn!("Refresh failed: {err}");
                self.record_failure(&err).await;
                return Err(err);
            }
        };

        let fresh = match Self::decode_snapshot(users, categories, records) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                *self.store_reachable.write().await = false;
                warn!("Refresh returned malformed rows: {err}");
                self.record_failure(&err).await;
                return Err(err);
            }
        };

        info!("Snapshot refreshed: {} entities", fresh.entity_count());
        *self.snapshot.write().await = fresh;
        *self.store_reachable.write().await = true;
        *self.last_error.write().await = None;
        Ok(())
    }

    /// Creates an entity: gate, validate, map, insert, refresh.
    pub async fn create(&self, draft: Draft) -> SyncResult<()> {
        self.clear_error().await;
        self.gate().await?;

        if let Err(reason) = validate::validate_draft(&draft) {
            let err = SyncError::Validation { reason };
            self.record_failure(&err).await;
            return Err(err);
        }

        let table = draft.table();
        let row = match &draft {
            Draft::User(u) => encode(mapping::user_to_row(u))?,
            Draft::Category(c) => encode(mapping::category_to_row(c))?,
            Draft::Record(r) => encode(mapping::record_to_row(r))?,
        };

        match self.gateway.insert(table, row).await {
            Ok(()) => {
                debug!("Inserted into {table}");
                self.resync().await;
                Ok(())
            }
            Err(e) => {
                let err = SyncError::classify_write(e);
                warn!("Insert into {table} failed: {err}");
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Updates an entity by id: gate, validate supplied fields, map, patch,
    /// refresh. Fields absent from the patch are left untouched.
    pub async fn update(&self, id: i64, patch: Patch) -> SyncResult<()> {
        self.clear_error().await;
        self.gate().await?;

        if let Err(reason) = validate::validate_patch(&patch) {
            let err = SyncError::Validation { reason };
            self.record_failure(&err).await;
            return Err(err);
        }

        let table = patch.table();
        let partial = match &patch {
            Patch::User(p) => encode(mapping::user_patch_to_row(p))?,
            Patch::Category(p) => encode(mapping::category_patch_to_row(p))?,
            Patch::Record(p) => encode(mapping::record_patch_to_row(p))?,
        };

        match self.gateway.update(table, id, partial).await {
            Ok(()) => {
                debug!("Updated {table} id {id}");
                self.resync().await;
                Ok(())
            }
            Err(e) => {
                let err = SyncError::classify_write(e);
                warn!("Update of {table} id {id} failed: {err}");
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    /// Deletes an entity by id: gate, delete requesting the removed rows
    /// back, refresh. A reply with no error and no rows means the store
    /// silently removed nothing, which is a failure here.
    pub async fn delete(&self, table: Table, id: i64) -> SyncResult<()> {
        self.clear_error().await;
        self.gate().await?;

        match self.gateway.delete(table, id).await {
            Ok(deleted) if deleted.is_empty() => {
                let err = SyncError::SilentNoOp;
                warn!("Delete of {table} id {id} removed nothing");
                self.record_failure(&err).await;
                Err(err)
            }
            Ok(deleted) => {
                debug!("Deleted {} row(s) from {table}", deleted.len());
                self.resync().await;
                Ok(())
            }
            Err(e) => {
                let err = SyncError::classify_delete(e);
                warn!("Delete of {table} id {id} failed: {err}");
                self.record_failure(&err).await;
                Err(err)
            }
        }
    }

    /// The reset of the original local-storage build is disabled against a
    /// live remote store: record an advisory message and resynchronize.
    pub async fn reset(&self) {
        let _ = self.refresh().await;
        *self.last_error.write().await = Some(
            "reset is disabled against a live remote store; delete rows individually".to_string(),
        );
    }

    // ── Internals ────────────────────────────────────────────────

    /// The simulated-disconnect gate. Applies to mutating calls only.
    async fn gate(&self) -> SyncResult<()> {
        if *self.simulated_online.read().await {
            return Ok(());
        }
        let err = SyncError::Offline;
        self.record_failure(&err).await;
        Err(err)
    }

    async fn record_failure(&self, err: &SyncError) {
        *self.last_error.write().await = Some(err.to_string());
    }

    /// The mutation has already landed; a failed resync is reported through
    /// the error slot only, matching the store's view being authoritative.
    async fn resync(&self) {
        if let Err(e) = self.refresh().await {
            warn!("Post-mutation refresh failed: {e}");
        }
    }

    fn decode_snapshot(
        users: Vec<Value>,
        categories: Vec<Value>,
        records: Vec<Value>,
    ) -> SyncResult<Snapshot> {
        Ok(Snapshot {
            users: decode_rows::<UserRow>(users, Table::Users)?
                .into_iter()
                .map(mapping::user_from_row)
                .collect(),
            categories: decode_rows::<CategoryRow>(categories, Table::Categories)?
                .into_iter()
                .map(mapping::category_from_row)
                .collect(),
            records: decode_rows::<RecordRow>(records, Table::Records)?
                .into_iter()
                .map(mapping::record_from_row)
                .collect(),
        })
    }
}

fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, table: Table) -> SyncResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| SyncError::Backend {
                message: format!("malformed {table} row: {e}"),
            })
        })
        .collect()
}

fn encode<T: serde::Serialize>(row: T) -> SyncResult<Value> {
    serde_json::to_value(row).map_err(|e| SyncError::Backend {
        message: format!("failed to encode row: {e}"),
    })
}
