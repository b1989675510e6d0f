//! Data synchronization and fault-simulation layer for RecDesk.
//!
//! Mediates every read and write between the UI and the remote store,
//! reconciling three independent failure sources — the simulated-disconnect
//! toggle, validation rejections, and real backend error codes — into one
//! error taxonomy, while keeping the local snapshot consistent with the
//! store after every mutation.
//!
//! # Components
//!
//! - **Validator** ([`validate`]): pure accept/reject of drafts and patches
//!   before any network call
//! - **Field Mapper** ([`mapping`]): pure renames between the application
//!   model and the store's column names
//! - **Remote Gateway** ([`gateway`], [`postgrest`]): the call boundary to
//!   the backing store, plus the PostgREST HTTP implementation
//! - **Sync Engine** ([`SyncEngine`]): the orchestrator — gate, validate,
//!   map, call, refresh
//!
//! # Control flow
//!
//! Caller action → engine mutating operation → connectivity gate →
//! validation gate → field mapping → gateway call → full re-fetch of all
//! three collections, replacing the snapshot atomically. Failures are
//! classified ([`SyncError`]) and stored in the engine's last-error slot
//! before being returned.
//!
//! # Example
//!
//! ```no_run
//! use recdesk_sync::{PostgrestConfig, PostgrestGateway, SyncEngine};
//! use std::sync::Arc;
//!
//! # async fn run() -> recdesk_sync::SyncResult<()> {
//! let gateway = PostgrestGateway::new(PostgrestConfig {
//!     base_url: "https://myproject.example.co".to_string(),
//!     api_key: "anon-key".to_string(),
//!     ..Default::default()
//! });
//! let engine = Arc::new(SyncEngine::new(Arc::new(gateway)));
//! engine.refresh().await?;
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
pub mod gateway;
pub mod mapping;
pub mod postgrest;
pub mod validate;

pub use engine::SyncEngine;
pub use error::{SyncError, SyncResult};
pub use gateway::{GatewayError, GatewayResult, RemoteGateway};
pub use postgrest::{PostgrestConfig, PostgrestGateway};
