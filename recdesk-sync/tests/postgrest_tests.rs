use recdesk_sync::{PostgrestConfig, PostgrestGateway, RemoteGateway};
use recdesk_types::Table;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway_for(server: &MockServer) -> PostgrestGateway {
    PostgrestGateway::new(PostgrestConfig {
        base_url: server.uri(),
        api_key: "anon-key".to_string(),
        ..Default::default()
    })
}

// ── config ──────────────────────────────────────────────────────

#[test]
fn config_default_is_unconfigured() {
    let cfg = PostgrestConfig::default();
    assert!(cfg.base_url.is_empty());
    assert!(cfg.api_key.is_empty());
    assert_eq!(cfg.timeout_secs, 30);
}

#[test]
fn config_serde_roundtrip() {
    let cfg = PostgrestConfig {
        base_url: "https://myproject.example.co".to_string(),
        api_key: "anon".to_string(),
        timeout_secs: 10,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    let parsed: PostgrestConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.base_url, cfg.base_url);
    assert_eq!(parsed.timeout_secs, 10);
}

// ── select ──────────────────────────────────────────────────────

#[tokio::test]
async fn select_requests_ordered_rows_with_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("select", "*"))
        .and(query_param("order", "id.asc"))
        .and(header("apikey", "anon-key"))
        .and(header("Authorization", "Bearer anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Ann", "email": "ann@example.com", "role": "Admin" }
        ])))
        .mount(&server)
        .await;

    let rows = gateway_for(&server).select(Table::Users).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Ann");
}

#[tokio::test]
async fn select_surfaces_the_backend_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/records"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "message": "relation \"public.records\" does not exist",
        })))
        .mount(&server)
        .await;

    let err = gateway_for(&server).select(Table::Records).await.unwrap_err();
    assert!(err.has_code("42P01"));
    assert!(err.message.contains("does not exist"));
}

#[tokio::test]
async fn unparsable_error_body_falls_back_to_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = gateway_for(&server).select(Table::Users).await.unwrap_err();
    assert_eq!(err.code, None);
    assert!(err.message.contains("502"));
    assert!(err.message.contains("bad gateway"));
}

// ── insert / update ─────────────────────────────────────────────

#[tokio::test]
async fn insert_posts_the_row_as_given() {
    let server = MockServer::start().await;
    let row = json!({ "name": "Ann", "email": "ann@example.com", "role": "Viewer" });
    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(header("Prefer", "return=minimal"))
        .and(body_json(&row))
        .respond_with(ResponseTemplate::new(201))
        .mount(&server)
        .await;

    gateway_for(&server).insert(Table::Users, row).await.unwrap();
}

#[tokio::test]
async fn insert_failure_carries_the_policy_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": "42501",
            "message": "new row violates row-level security policy",
        })))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .insert(Table::Categories, json!({ "name": "Notes", "description": "" }))
        .await
        .unwrap_err();
    assert!(err.has_code("42501"));
}

#[tokio::test]
async fn update_patches_by_id_filter() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/records"))
        .and(query_param("id", "eq.5"))
        .and(body_json(json!({ "title": "Renamed" })))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    gateway_for(&server)
        .update(Table::Records, 5, json!({ "title": "Renamed" }))
        .await
        .unwrap();
}

// ── delete ──────────────────────────────────────────────────────

#[tokio::test]
async fn delete_requests_the_removed_rows_back() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/records"))
        .and(query_param("id", "eq.5"))
        .and(header("Prefer", "return=representation"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 5, "title": "First", "content": "body", "user_id": 1, "category_id": 1 }
        ])))
        .mount(&server)
        .await;

    let deleted = gateway_for(&server).delete(Table::Records, 5).await.unwrap();
    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0]["id"], 5);
}

#[tokio::test]
async fn delete_of_a_filtered_row_returns_no_rows_without_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let deleted = gateway_for(&server).delete(Table::Records, 99).await.unwrap();
    assert!(deleted.is_empty());
}

#[tokio::test]
async fn delete_failure_carries_the_fk_code() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23503",
            "message": "update or delete on table \"users\" violates foreign key constraint",
        })))
        .mount(&server)
        .await;

    let err = gateway_for(&server).delete(Table::Users, 1).await.unwrap_err();
    assert!(err.has_code("23503"));
}
