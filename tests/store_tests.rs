use rfidlog::ErrorKind;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

mod common;
use common::{days_ago, insert_at, open_store};

#[test]
fn scenario_three_scans_two_users() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    let events = store.events();

    events.append("A1", Some("Alice")).unwrap();
    events.append("B2", Some("Bob")).unwrap();
    events.append("A1", Some("Alice")).unwrap();

    let stats = store.queries().stats().unwrap();
    assert_eq!(stats.total_count, 3);
    assert_eq!(stats.unique_user_count, 2);
    assert_eq!(stats.today_count, 3);

    let hits = store.queries().search("a1", 10).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|e| e.uid == "A1"));
    assert_eq!(hits[0].id, 3);
    assert_eq!(hits[1].id, 1);
}

#[test]
fn concurrent_appends_get_contiguous_unique_ids() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(open_store(&dir));
    store.events().append("SEED", None).unwrap();

    let threads = 8;
    let per_thread = 10;
    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..per_thread)
                    .map(|i| {
                        store
                            .events()
                            .append(&format!("T{t}-{i}"), Some("worker"))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: Vec<i64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let unique: BTreeSet<i64> = ids.iter().copied().collect();

    assert_eq!(ids.len(), threads * per_thread);
    assert_eq!(unique.len(), ids.len());
    let expected: BTreeSet<i64> = (2..=(1 + (threads * per_thread) as i64)).collect();
    assert_eq!(unique, expected);
}

#[test]
fn recent_orders_by_time_then_id() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    insert_at(&store, "U1", "a", "2024-01-10 10:00:00");
    insert_at(&store, "U2", "b", "2024-01-12 10:00:00");
    insert_at(&store, "U3", "c", "2024-01-12 10:00:00");
    insert_at(&store, "U4", "d", "2024-01-11 10:00:00");

    let recent = store.queries().recent(3).unwrap();
    let ids: Vec<i64> = recent.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2, 4]);
}

#[test]
fn recent_clamps_to_configured_maximum() {
    let dir = TempDir::new().unwrap();
    let mut cfg = rfidlog::config::Config::for_database(common::db_path(&dir));
    cfg.max_query_limit = 2;
    let store = common::open_store_with(cfg);
    for i in 0..5 {
        insert_at(&store, &format!("U{i}"), "x", "2024-01-10 10:00:00");
    }

    assert_eq!(store.queries().recent(1000).unwrap().len(), 2);
    assert_eq!(
        store.queries().recent(0).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn search_matches_uid_or_user_case_insensitively() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    insert_at(&store, "xABCx", "Zed", "2024-01-10 10:00:00");
    insert_at(&store, "Q1", "Mabcy", "2024-01-10 11:00:00");
    insert_at(&store, "Q2", "Nobody", "2024-01-10 12:00:00");
    insert_at(&store, "ab-c", "a bc", "2024-01-10 13:00:00");

    let hits = store.queries().search("abc", 50).unwrap();
    let ids: Vec<i64> = hits.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1]);

    let err = store.queries().search("", 50).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn by_date_returns_only_that_day() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    insert_at(&store, "U1", "a", "2024-01-14 23:59:59");
    insert_at(&store, "U2", "b", "2024-01-15 00:00:00");
    insert_at(&store, "U3", "c", "2024-01-15 23:59:59");
    insert_at(&store, "U4", "d", "2024-01-16 00:00:00");

    let day = store.queries().by_date("2024-01-15", 50).unwrap();
    let uids: Vec<&str> = day.iter().map(|e| e.uid.as_str()).collect();
    assert_eq!(uids, vec!["U3", "U2"]);

    let err = store.queries().by_date("2024-13-40", 50).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn prune_older_than_removes_exactly_old_rows() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);

    insert_at(&store, "OLD1", "a", &days_ago(120));
    insert_at(&store, "OLD2", "b", &days_ago(91));
    insert_at(&store, "KEEP1", "c", &days_ago(89));
    insert_at(&store, "KEEP2", "d", &days_ago(1));

    let retention = store.retention();
    assert_eq!(retention.prune_older_than(90).unwrap(), 2);
    assert_eq!(retention.prune_older_than(90).unwrap(), 0);

    let left: Vec<String> = store
        .queries()
        .recent(10)
        .unwrap()
        .into_iter()
        .map(|e| e.uid)
        .collect();
    assert_eq!(left, vec!["KEEP2", "KEEP1"]);

    assert_eq!(
        retention.prune_older_than(0).unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn prune_default_uses_configured_window() {
    let dir = TempDir::new().unwrap();
    let mut cfg = rfidlog::config::Config::for_database(common::db_path(&dir));
    cfg.log_retention_days = 7;
    let store = common::open_store_with(cfg);

    insert_at(&store, "OLD", "a", &days_ago(10));
    insert_at(&store, "NEW", "b", &days_ago(2));

    assert_eq!(store.retention().prune_default().unwrap(), 1);
}

#[test]
fn initialize_twice_keeps_data() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir);
    store.events().append("A1", Some("Alice")).unwrap();

    store.events().initialize().unwrap();
    let again = open_store(&dir);

    assert_eq!(again.queries().stats().unwrap().total_count, 1);
}

#[test]
fn queries_on_missing_store_are_not_found() {
    let dir = TempDir::new().unwrap();
    let store = rfidlog::LogStore::new(rfidlog::config::Config::for_database(
        dir.path().join("missing.db"),
    ));
    assert_eq!(
        store.queries().stats().unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert!(!dir.path().join("missing.db").exists());
}
