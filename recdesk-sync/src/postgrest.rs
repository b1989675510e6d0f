//! PostgREST gateway implementation.
//!
//! Speaks the REST dialect managed Postgres services expose over
//! `/rest/v1/{table}`: query-string filters (`id=eq.{id}`), `order=` for
//! server-side ordering, and `Prefer: return=representation` to get affected
//! rows back. Backend failures arrive as a JSON body carrying a SQLSTATE
//! `code` and a `message`; both are passed through to classification.

use crate::gateway::{GatewayError, GatewayResult, RemoteGateway};
use async_trait::async_trait;
use recdesk_types::Table;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Configuration for the PostgREST gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgrestConfig {
    /// Base URL of the service, e.g. `https://myproject.example.co`.
    pub base_url: String,
    /// API key, sent both as the `apikey` header and as a bearer token.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PostgrestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Failure body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// HTTP client for a PostgREST-style store.
pub struct PostgrestGateway {
    config: PostgrestConfig,
    client: Client,
}

impl PostgrestGateway {
    /// Creates a new gateway from the given configuration.
    pub fn new(config: PostgrestConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    fn endpoint(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table.as_str())
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Turns a non-success response into a gateway error, preserving the
    /// backend code when the body parses.
    async fn read_failure(response: Response) -> GatewayError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) if parsed.code.is_some() || parsed.message.is_some() => GatewayError {
                message: parsed.message.unwrap_or_else(|| format!("HTTP {status}")),
                code: parsed.code,
            },
            _ => GatewayError::transport(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl RemoteGateway for PostgrestGateway {
    async fn select(&self, table: Table) -> GatewayResult<Vec<Value>> {
        debug!("Selecting all rows from {}", table);

        let response = self
            .authed(self.client.get(self.endpoint(table)))
            .query(&[("select", "*"), ("order", "id.asc")])
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("select {table} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::transport(format!("failed to parse {table} rows: {e}")))
    }

    async fn insert(&self, table: Table, row: Value) -> GatewayResult<()> {
        debug!("Inserting into {}", table);

        let response = self
            .authed(self.client.post(self.endpoint(table)))
            .header("Prefer", "return=minimal")
            .json(&row)
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("insert into {table} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }
        Ok(())
    }

    async fn update(&self, table: Table, id: i64, partial: Value) -> GatewayResult<()> {
        debug!("Updating {} id {}", table, id);

        let response = self
            .authed(self.client.patch(self.endpoint(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(&partial)
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("update {table} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }
        Ok(())
    }

    async fn delete(&self, table: Table, id: i64) -> GatewayResult<Vec<Value>> {
        debug!("Deleting {} id {}", table, id);

        // return=representation: the deleted row set is the only way to tell
        // a real deletion from one the store silently filtered out.
        let response = self
            .authed(self.client.delete(self.endpoint(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| GatewayError::transport(format!("delete from {table} failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Self::read_failure(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::transport(format!("failed to parse deleted rows: {e}")))
    }
}
