use std::time::Duration;

use queryplan::schema::{
    Column, Engine, SchemaSnapshot, Table,
    state::{SchemaState, schema_channel}
};

fn snapshot() -> SchemaSnapshot {
    let users = Table::new("users")
        .with_column(Column::new("id", "int"))
        .with_column(Column::new("email", "varchar"))
        .with_primary_keys(["id"]);
    SchemaSnapshot::new("app", Engine::MySql, vec![users])
}

#[test]
fn test_table_lookup() {
    let snapshot = snapshot();
    assert!(snapshot.table("users").is_some());
    assert!(snapshot.table("missing").is_none());
}

#[test]
fn test_has_column() {
    let snapshot = snapshot();
    let users = snapshot.table("users").unwrap();
    assert!(users.has_column("email"));
    assert!(!users.has_column("missing"));
}

#[test]
fn test_column_names_preserve_order() {
    let snapshot = snapshot();
    let names: Vec<&str> = snapshot.table("users").unwrap().column_names().collect();
    assert_eq!(names, vec!["id", "email"]);
}

#[test]
fn test_column_defaults() {
    let column = Column::new("id", "int");
    assert_eq!(column.column_type, "int");
    assert!(!column.is_nullable);
    assert!(column.column_default.is_none());
}

#[test]
fn test_engine_display() {
    assert_eq!(Engine::MySql.to_string(), "mysql");
    assert_eq!(Engine::Postgres.to_string(), "postgres");
}

#[test]
fn test_initial_state_rejects_analysis() {
    let (_tracker, watcher) = schema_channel();

    assert!(matches!(watcher.state(), SchemaState::NotLoaded));
    let err = watcher.snapshot().unwrap_err();
    assert!(err.to_string().contains("not ready"));
}

#[test]
fn test_loading_state_rejects_analysis() {
    let (tracker, watcher) = schema_channel();
    tracker.begin_loading();

    assert!(matches!(watcher.state(), SchemaState::Loading));
    assert!(watcher.snapshot().is_err());
}

#[test]
fn test_ready_state_serves_snapshot() {
    let (tracker, watcher) = schema_channel();
    tracker.begin_loading();
    tracker.mark_ready(snapshot());

    assert!(watcher.state().is_ready());
    let snap = watcher.snapshot().unwrap();
    assert_eq!(snap.database_name, "app");
    assert!(snap.table("users").is_some());
}

#[tokio::test]
async fn test_wait_ready_blocks_until_loaded() {
    let (tracker, mut watcher) = schema_channel();
    tracker.begin_loading();

    let loader = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        tracker.mark_ready(snapshot());
    });

    let snap = watcher.wait_ready().await.unwrap();
    assert_eq!(snap.database_name, "app");
    loader.await.unwrap();
}

#[tokio::test]
async fn test_wait_ready_surfaces_load_failure() {
    let (tracker, mut watcher) = schema_channel();
    tracker.begin_loading();
    tracker.mark_failed("connection refused");

    let err = watcher.wait_ready().await.unwrap_err();
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_dropped_tracker_cancels_waiters() {
    let (tracker, mut watcher) = schema_channel();
    tracker.begin_loading();
    drop(tracker);

    let err = watcher.wait_ready().await.unwrap_err();
    assert!(err.to_string().contains("cancelled"));
}

#[test]
fn test_subscribe_creates_independent_watcher() {
    let (tracker, _watcher) = schema_channel();
    let second = tracker.subscribe();
    tracker.mark_ready(snapshot());

    assert!(second.snapshot().is_ok());
}
