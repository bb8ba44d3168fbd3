use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use pushkind_catalog::schema::{categories, products};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new();
    let pool = test_db.pool();
    let conn = pool.get();
    assert!(conn.is_ok());
}

#[test]
fn migrations_create_empty_tables() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().unwrap();

    let categories: i64 = categories::table.count().get_result(&mut conn).unwrap();
    let products: i64 = products::table.count().get_result(&mut conn).unwrap();

    assert_eq!(categories, 0);
    assert_eq!(products, 0);
}

#[test]
fn migrations_are_idempotent() {
    let test_db = common::TestDb::new();
    assert!(pushkind_catalog::db::run_migrations(&test_db.pool()).is_ok());
}

#[derive(QueryableByName)]
struct JournalMode {
    #[diesel(sql_type = Text)]
    journal_mode: String,
}

#[derive(QueryableByName)]
struct BusyTimeout {
    #[diesel(sql_type = BigInt)]
    timeout: i64,
}

#[test]
fn pooled_connections_wait_for_locks_in_wal_mode() {
    let test_db = common::TestDb::new();
    let mut conn = test_db.pool().get().unwrap();

    let mode: JournalMode = diesel::sql_query("PRAGMA journal_mode")
        .get_result(&mut conn)
        .unwrap();
    let busy: BusyTimeout = diesel::sql_query("PRAGMA busy_timeout")
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(mode.journal_mode, "wal");
    assert_eq!(busy.timeout, 5000);
}
