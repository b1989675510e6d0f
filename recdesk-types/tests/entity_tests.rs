use chrono::NaiveDate;
use recdesk_types::{Category, CategoryId, RecordId, RecordItem, Role, User, UserId};
use std::str::FromStr;

// ── Role ──────────────────────────────────────────────────────────

#[test]
fn role_serializes_to_store_strings() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
    assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"Editor\"");
    assert_eq!(serde_json::to_string(&Role::Viewer).unwrap(), "\"Viewer\"");
}

#[test]
fn role_parse_roundtrip() {
    for role in [Role::Admin, Role::Editor, Role::Viewer] {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
}

#[test]
fn role_parse_unknown_fails() {
    let err = Role::from_str("Superuser").unwrap_err();
    assert!(err.to_string().contains("Superuser"));
}

// ── entities ──────────────────────────────────────────────────────

#[test]
fn user_serde_roundtrip() {
    let user = User {
        id: UserId::new(1),
        name: "Ann".to_string(),
        email: "ann@example.com".to_string(),
        role: Role::Editor,
    };
    let json = serde_json::to_string(&user).unwrap();
    let parsed: User = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, user);
}

#[test]
fn category_serde_roundtrip() {
    let category = Category {
        id: CategoryId::new(2),
        name: "Notes".to_string(),
        description: "General notes".to_string(),
    };
    let json = serde_json::to_string(&category).unwrap();
    let parsed: Category = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, category);
}

#[test]
fn record_keeps_optional_creation_date() {
    let record = RecordItem {
        id: RecordId::new(3),
        title: "First".to_string(),
        content: "body".to_string(),
        author: UserId::new(1),
        category: CategoryId::new(2),
        created_on: Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
    };
    let json = serde_json::to_string(&record).unwrap();
    let parsed: RecordItem = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn record_creation_date_can_be_absent() {
    let record = RecordItem {
        id: RecordId::new(3),
        title: "First".to_string(),
        content: "body".to_string(),
        author: UserId::new(1),
        category: CategoryId::new(2),
        created_on: None,
    };
    let json = serde_json::to_string(&record).unwrap();
    let parsed: RecordItem = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.created_on, None);
}
