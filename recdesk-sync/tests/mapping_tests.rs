use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use recdesk_sync::mapping::{self, CategoryRow, RecordRow, UserRow};
use recdesk_types::{NewCategory, NewRecord, NewUser, RecordPatch, Role, UserPatch};
use serde_json::json;

// ── renames ───────────────────────────────────────────────────────

#[test]
fn record_row_uses_store_column_names() {
    let draft = NewRecord {
        title: "First".to_string(),
        content: "body".to_string(),
        author: 1.into(),
        category: 2.into(),
        created_on: Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
    };
    let value = serde_json::to_value(mapping::record_to_row(&draft)).unwrap();

    assert_eq!(
        value,
        json!({
            "title": "First",
            "content": "body",
            "user_id": 1,
            "category_id": 2,
            "created_at": "2024-05-01",
        })
    );
}

#[test]
fn omitted_creation_date_is_absent_not_null() {
    let draft = NewRecord {
        title: "First".to_string(),
        content: "body".to_string(),
        author: 1.into(),
        category: 2.into(),
        created_on: None,
    };
    let value = serde_json::to_value(mapping::record_to_row(&draft)).unwrap();
    // The store's column default must be allowed to apply.
    assert!(value.get("created_at").is_none());
}

#[test]
fn record_patch_renames_only_the_renamed_fields() {
    let patch = RecordPatch {
        title: Some("Renamed".to_string()),
        author: Some(7.into()),
        ..Default::default()
    };
    let value = serde_json::to_value(mapping::record_patch_to_row(&patch)).unwrap();

    assert_eq!(value, json!({ "title": "Renamed", "user_id": 7 }));
}

#[test]
fn user_patch_is_a_plain_projection() {
    let patch = UserPatch {
        email: Some("new@example.com".to_string()),
        ..Default::default()
    };
    let value = serde_json::to_value(mapping::user_patch_to_row(&patch)).unwrap();
    assert_eq!(value, json!({ "email": "new@example.com" }));
}

// ── round trips ───────────────────────────────────────────────────

#[test]
fn user_round_trip() {
    let draft = NewUser {
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        role: Role::Editor,
    };
    let row = serde_json::to_value(mapping::user_to_row(&draft)).unwrap();

    // Simulate the store assigning identity, then read the row back.
    let mut stored = row;
    stored["id"] = json!(5);
    let user = mapping::user_from_row(serde_json::from_value::<UserRow>(stored).unwrap());

    assert_eq!(user.id.as_i64(), 5);
    assert_eq!(user.name, draft.name);
    assert_eq!(user.email, draft.email);
    assert_eq!(user.role, draft.role);
}

#[test]
fn category_round_trip() {
    let draft = NewCategory {
        name: "Notes".to_string(),
        description: "General".to_string(),
    };
    let mut stored = serde_json::to_value(mapping::category_to_row(&draft)).unwrap();
    stored["id"] = json!(3);
    let category =
        mapping::category_from_row(serde_json::from_value::<CategoryRow>(stored).unwrap());

    assert_eq!(category.id.as_i64(), 3);
    assert_eq!(category.name, draft.name);
    assert_eq!(category.description, draft.description);
}

#[test]
fn record_round_trip_preserves_supplied_date() {
    let draft = NewRecord {
        title: "First".to_string(),
        content: "body".to_string(),
        author: 1.into(),
        category: 2.into(),
        created_on: Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
    };
    let mut stored = serde_json::to_value(mapping::record_to_row(&draft)).unwrap();
    stored["id"] = json!(9);
    let record = mapping::record_from_row(serde_json::from_value::<RecordRow>(stored).unwrap());

    assert_eq!(record.id.as_i64(), 9);
    assert_eq!(record.author, draft.author);
    assert_eq!(record.category, draft.category);
    assert_eq!(record.created_on, draft.created_on);
}

#[test]
fn record_round_trip_keeps_absent_date_absent() {
    let draft = NewRecord {
        title: "First".to_string(),
        content: "body".to_string(),
        author: 1.into(),
        category: 2.into(),
        created_on: None,
    };
    let mut stored = serde_json::to_value(mapping::record_to_row(&draft)).unwrap();
    stored["id"] = json!(9);
    let record = mapping::record_from_row(serde_json::from_value::<RecordRow>(stored).unwrap());

    // No date must be fabricated on the way back.
    assert_eq!(record.created_on, None);
}

// ── reading store rows ────────────────────────────────────────────

#[test]
fn record_row_truncates_timestamp_to_date() {
    let row: RecordRow = serde_json::from_value(json!({
        "id": 1,
        "title": "First",
        "content": "body",
        "user_id": 2,
        "category_id": 3,
        "created_at": "2024-05-01T12:34:56.789",
    }))
    .unwrap();

    assert_eq!(row.created_at, Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
}

#[test]
fn record_row_accepts_null_creation_date() {
    let row: RecordRow = serde_json::from_value(json!({
        "id": 1,
        "title": "First",
        "content": "body",
        "user_id": 2,
        "category_id": 3,
        "created_at": null,
    }))
    .unwrap();

    assert_eq!(row.created_at, None);
}
