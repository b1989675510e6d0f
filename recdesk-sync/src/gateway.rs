//! Remote gateway abstraction.
//!
//! The call boundary to the backing store. The engine speaks to any
//! implementation of [`RemoteGateway`]; production uses the PostgREST
//! client, tests use the in-memory mock below.

use async_trait::async_trait;
use recdesk_types::Table;
use serde_json::Value;
use std::fmt;

/// Result type for gateway calls.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// The minimum failure payload any backing store must expose: a
/// machine-readable code (when the backend provides one) and a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    /// Backend error code, e.g. a PostgreSQL SQLSTATE like `42501`.
    pub code: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl GatewayError {
    /// A failure carrying a backend code.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// A code-less failure (transport error, unparsable body).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// True when the failure carries exactly this backend code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{code}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for GatewayError {}

/// The call shape the sync engine requires of any backing store client.
/// Rows cross this boundary already in the store's naming convention.
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetches all rows of a table, ordered by id ascending.
    async fn select(&self, table: Table) -> GatewayResult<Vec<Value>>;

    /// Inserts one row. No row payload is required back; identity assignment
    /// is observed through the following refresh.
    async fn insert(&self, table: Table, row: Value) -> GatewayResult<()>;

    /// Applies a partial row to the row with the given id.
    async fn update(&self, table: Table, id: i64, partial: Value) -> GatewayResult<()>;

    /// Deletes the row with the given id and returns the deleted row set.
    /// An empty set with no error means the store silently removed nothing.
    async fn delete(&self, table: Table, id: i64) -> GatewayResult<Vec<Value>>;
}

/// An in-memory gateway for testing.
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// The four gateway operations, for scripting failures.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum Op {
        Select,
        Insert,
        Update,
        Delete,
    }

    /// One recorded gateway invocation.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Select(Table),
        Insert(Table),
        Update(Table, i64),
        Delete(Table, i64),
    }

    /// A scriptable in-memory store. Assigns serial ids on insert, keeps
    /// rows per table, and records every call so tests can assert that a
    /// gate short-circuited before the network.
    #[derive(Debug, Default)]
    pub struct MockGateway {
        rows: Mutex<HashMap<Table, Vec<Value>>>,
        failures: Mutex<HashMap<Op, GatewayError>>,
        calls: Mutex<Vec<Call>>,
        next_id: Mutex<i64>,
    }

    impl MockGateway {
        /// Creates an empty mock store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds a table with rows (ids taken as-is from the rows).
        pub fn seed(&self, table: Table, rows: Vec<Value>) {
            self.rows.lock().unwrap().insert(table, rows);
        }

        /// Scripts the next call of the given operation to fail.
        pub fn fail_next(&self, op: Op, error: GatewayError) {
            self.failures.lock().unwrap().insert(op, error);
        }

        /// All calls made so far.
        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// Number of calls made so far.
        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Current rows of a table, sorted by id.
        pub fn table(&self, table: Table) -> Vec<Value> {
            let mut rows = self
                .rows
                .lock()
                .unwrap()
                .get(&table)
                .cloned()
                .unwrap_or_default();
            rows.sort_by_key(row_id);
            rows
        }

        fn take_failure(&self, op: Op) -> Option<GatewayError> {
            self.failures.lock().unwrap().remove(&op)
        }
    }

    fn row_id(row: &Value) -> i64 {
        row.get("id").and_then(Value::as_i64).unwrap_or(0)
    }

    #[async_trait]
    impl RemoteGateway for MockGateway {
        async fn select(&self, table: Table) -> GatewayResult<Vec<Value>> {
            self.calls.lock().unwrap().push(Call::Select(table));
            if let Some(err) = self.take_failure(Op::Select) {
                return Err(err);
            }
            Ok(self.table(table))
        }

        async fn insert(&self, table: Table, row: Value) -> GatewayResult<()> {
            self.calls.lock().unwrap().push(Call::Insert(table));
            if let Some(err) = self.take_failure(Op::Insert) {
                return Err(err);
            }

            let id = {
                let mut next = self.next_id.lock().unwrap();
                *next += 1;
                *next
            };

            let mut stored = row;
            if let Some(map) = stored.as_object_mut() {
                map.insert("id".to_string(), Value::from(id));
                // Column default: records get a creation timestamp.
                if table == Table::Records && !map.contains_key("created_at") {
                    map.insert(
                        "created_at".to_string(),
                        Value::from(chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string()),
                    );
                }
            }
            self.rows.lock().unwrap().entry(table).or_default().push(stored);
            Ok(())
        }

        async fn update(&self, table: Table, id: i64, partial: Value) -> GatewayResult<()> {
            self.calls.lock().unwrap().push(Call::Update(table, id));
            if let Some(err) = self.take_failure(Op::Update) {
                return Err(err);
            }

            let mut rows = self.rows.lock().unwrap();
            if let Some(rows) = rows.get_mut(&table) {
                for row in rows.iter_mut() {
                    if row_id(row) == id {
                        if let (Some(target), Some(changes)) =
                            (row.as_object_mut(), partial.as_object())
                        {
                            for (key, value) in changes {
                                target.insert(key.clone(), value.clone());
                            }
                        }
                    }
                }
            }
            Ok(())
        }

        async fn delete(&self, table: Table, id: i64) -> GatewayResult<Vec<Value>> {
            self.calls.lock().unwrap().push(Call::Delete(table, id));
            if let Some(err) = self.take_failure(Op::Delete) {
                return Err(err);
            }

            let mut rows = self.rows.lock().unwrap();
            let Some(rows) = rows.get_mut(&table) else {
                return Ok(Vec::new());
            };
            let (deleted, kept): (Vec<Value>, Vec<Value>) =
                rows.drain(..).partition(|row| row_id(row) == id);
            *rows = kept;
            Ok(deleted)
        }
    }
}
