//! Ordering properties shared by both annotation backends.

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

use impact_notes::prelude::*;

fn base_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn assert_newest_first(notes: &[Annotation]) {
    for pair in notes.windows(2) {
        let (newer, older) = (&pair[0], &pair[1]);
        assert!(
            newer.timestamp > older.timestamp
                || (newer.timestamp == older.timestamp && newer.id > older.id),
            "{} listed before {}",
            newer.id,
            older.id
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn memory_store_lists_newest_first(offsets in prop::collection::vec(0i64..50, 0..20)) {
        let store = InMemoryAnnotationStore::new();
        for (i, minutes) in offsets.iter().enumerate() {
            store
                .append_at("tester", &format!("note {i}"), base_time() + Duration::minutes(*minutes))
                .unwrap();
        }

        let notes = store.list_all().unwrap();
        prop_assert_eq!(notes.len(), offsets.len());
        assert_newest_first(&notes);
    }

    #[test]
    fn file_store_lists_newest_first(offsets in prop::collection::vec(0i64..50, 1..10)) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileAnnotationStore::open(dir.path().join("notes.json"));
        for (i, minutes) in offsets.iter().enumerate() {
            store
                .append_at("tester", &format!("note {i}"), base_time() + Duration::minutes(*minutes))
                .unwrap();
        }

        let notes = store.list_all().unwrap();
        prop_assert_eq!(notes.len(), offsets.len());
        assert_newest_first(&notes);
    }
}

#[test]
fn test_backends_are_object_safe() {
    let dir = tempfile::tempdir().unwrap();
    let stores: Vec<Box<dyn AnnotationStore>> = vec![
        Box::new(InMemoryAnnotationStore::new()),
        Box::new(JsonFileAnnotationStore::open(dir.path().join("notes.json"))),
    ];

    for store in &stores {
        let id = store.append("lead@example.com", "Pilot first").unwrap();
        assert_eq!(id, RecordId(1));
        assert_eq!(store.count().unwrap(), 1);
    }
}
