mod common;

use common::{TempDb, fields};
use std::net::TcpListener;
use std::time::{Duration, Instant};
use student_roster::config::{Backend, DatabaseConfig};
use student_roster::db::{StudentStore, connect_store};
use student_roster::{ErrorKind, RosterError};

#[tokio::test]
async fn insert_list_update_delete_round() {
    let db = TempDb::new("store-crud");
    let store = db.store().await;

    assert!(store.list_all().await.expect("list").is_empty());

    let id = store
        .insert(&fields("Jane Doe", "Physics", "555-0100"))
        .await
        .expect("insert")
        .expect("sqlite reports the new rowid");

    let rows = store.list_all().await.expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].name, "Jane Doe");
    assert_eq!(rows[0].course, "Physics");
    assert_eq!(rows[0].mobile, "555-0100");

    let affected = store
        .update(id, &fields("Jane Doe", "Math", "555-0199"))
        .await
        .expect("update");
    assert_eq!(affected, 1);
    let rows = store.list_all().await.expect("list");
    assert_eq!(rows[0].id, id);
    assert_eq!(rows[0].course, "Math");
    assert_eq!(rows[0].mobile, "555-0199");

    assert_eq!(store.delete(id).await.expect("delete"), 1);
    assert!(store.list_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn missing_ids_affect_zero_rows_without_error() {
    let db = TempDb::new("store-missing");
    let store = db.store().await;
    store
        .insert(&fields("Alice", "Biology", "555-0101"))
        .await
        .expect("insert");
    let before = store.list_all().await.expect("list");

    assert_eq!(
        store
            .update(9_999, &fields("Nobody", "Math", "0"))
            .await
            .expect("update"),
        0
    );
    assert_eq!(store.delete(9_999).await.expect("delete"), 0);
    assert_eq!(store.list_all().await.expect("list"), before);
}

#[tokio::test]
async fn ids_are_never_reused() {
    let db = TempDb::new("store-ids");
    let store = db.store().await;

    let first = store
        .insert(&fields("Alice", "Biology", "1"))
        .await
        .expect("insert")
        .expect("id");
    store.delete(first).await.expect("delete");
    let second = store
        .insert(&fields("Bob", "Math", "2"))
        .await
        .expect("insert")
        .expect("id");

    assert_ne!(first, second);
}

#[tokio::test]
async fn find_by_name_is_exact_and_case_sensitive() {
    let db = TempDb::new("store-find");
    let store = db.store().await;
    for name in ["Alice", "alice", "Alice Cooper", "Bob"] {
        store
            .insert(&fields(name, "Math", "555-0100"))
            .await
            .expect("insert");
    }

    let found = store.find_by_name("Alice").await.expect("find");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Alice");

    assert!(store.find_by_name("Carol").await.expect("find").is_empty());
}

#[tokio::test]
async fn store_keeps_course_values_outside_the_known_set() {
    let db = TempDb::new("store-course");
    let store = db.store().await;
    store
        .insert(&fields("Alice", "Chemistry", "555-0100"))
        .await
        .expect("the store itself does not restrict courses");

    let rows = store.list_all().await.expect("list");
    assert_eq!(rows[0].course, "Chemistry");
    assert_eq!(rows[0].known_course(), None);
}

#[tokio::test]
async fn missing_table_is_a_query_error() {
    let db = TempDb::new("store-no-table");
    let config = DatabaseConfig {
        init_schema: false,
        ..db.config.clone()
    };
    let store = StudentStore::connect(&config).await.expect("connect");

    let err = store.list_all().await.expect_err("table does not exist");
    assert_eq!(err.kind(), ErrorKind::Query);
}

#[tokio::test]
async fn unreachable_database_is_a_connection_error() {
    let config = DatabaseConfig {
        url: Some("sqlite:///roster-no-such-dir/nested/roster.sqlite?mode=ro".to_string()),
        ..DatabaseConfig::default()
    };

    let store = StudentStore::connect(&config)
        .await
        .expect("per-call mode defers connecting");
    let err = store.list_all().await.expect_err("cannot open database");
    assert_eq!(err.kind(), ErrorKind::Connection);

    let err = connect_store(&config)
        .await
        .expect_err("schema bootstrap needs a connection");
    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn pooled_mode_serves_the_same_operations() {
    let db = TempDb::new("store-pool");
    let config = DatabaseConfig {
        pool_size: Some(2),
        ..db.config.clone()
    };
    let store = connect_store(&config).await.expect("connect pooled");
    assert_eq!(store.backend(), Backend::Sqlite);

    let id = store
        .insert(&fields("Jane Doe", "Astronomy", "555-0100"))
        .await
        .expect("insert")
        .expect("id");
    assert_eq!(store.find_by_name("Jane Doe").await.expect("find")[0].id, id);
    assert_eq!(store.delete(id).await.expect("delete"), 1);
}

#[tokio::test]
async fn silent_server_hits_the_connect_timeout() {
    // Accepts TCP connections but never sends the MySQL greeting.
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let config = DatabaseConfig {
        url: Some(format!("mysql://root@127.0.0.1:{port}/school")),
        connect_timeout_secs: 1,
        ..DatabaseConfig::default()
    };

    let store = StudentStore::connect(&config).await.expect("connect");
    assert_eq!(store.backend(), Backend::MySql);

    let started = Instant::now();
    let err = store.list_all().await.expect_err("server never answers");
    assert!(matches!(err, RosterError::ConnectTimeout(t) if t == Duration::from_secs(1)));
    assert_eq!(err.kind(), ErrorKind::Connection);
    assert!(started.elapsed() < Duration::from_secs(10));
    drop(listener);
}
