use recdesk_types::{Category, CategoryId, RecordId, RecordItem, Role, Snapshot, User, UserId};

fn sample() -> Snapshot {
    Snapshot {
        users: vec![User {
            id: UserId::new(1),
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            role: Role::Admin,
        }],
        categories: vec![Category {
            id: CategoryId::new(10),
            name: "Notes".to_string(),
            description: "General".to_string(),
        }],
        records: vec![RecordItem {
            id: RecordId::new(100),
            title: "First".to_string(),
            content: "body".to_string(),
            author: UserId::new(1),
            category: CategoryId::new(10),
            created_on: None,
        }],
    }
}

#[test]
fn default_snapshot_is_empty() {
    let snapshot = Snapshot::default();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.entity_count(), 0);
}

#[test]
fn entity_count_spans_collections() {
    assert_eq!(sample().entity_count(), 3);
    assert!(!sample().is_empty());
}

#[test]
fn lookups_find_present_entities() {
    let snapshot = sample();
    assert_eq!(snapshot.user(UserId::new(1)).unwrap().name, "Ann");
    assert_eq!(snapshot.category(CategoryId::new(10)).unwrap().name, "Notes");
    assert_eq!(snapshot.record(RecordId::new(100)).unwrap().title, "First");
}

#[test]
fn lookups_miss_dangling_references() {
    // The snapshot does not enforce referential integrity; a dangling
    // reference just resolves to None.
    let snapshot = sample();
    assert!(snapshot.user(UserId::new(99)).is_none());
    assert!(snapshot.category(CategoryId::new(99)).is_none());
    assert!(snapshot.record(RecordId::new(99)).is_none());
}
