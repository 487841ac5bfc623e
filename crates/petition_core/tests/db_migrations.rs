use petition_core::db::migrations::latest_version;
use petition_core::db::{open_db, open_db_in_memory, schema_version, DbError};
use petition_core::{RepoError, SqlitePetitionRepository};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(version_of(&conn), latest_version());
    assert_table_exists(&conn, "petitions");
    assert_index_exists(&conn, "idx_petitions_created_at");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("petitions.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(version_of(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(version_of(&conn_second), latest_version());
    assert_table_exists(&conn_second, "petitions");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let repo_err = SqlitePetitionRepository::open(&path).err().unwrap();
    assert!(matches!(
        repo_err,
        RepoError::Db(DbError::UnsupportedSchemaVersion { .. })
    ));
}

#[test]
fn schema_rejects_zero_signatures_and_unknown_status() {
    let conn = open_db_in_memory().unwrap();

    let zero = conn.execute(
        "INSERT INTO petitions (title, description, signature_count, created_at, last_updated)
         VALUES ('t', 'd', 0, 1, 1);",
        [],
    );
    assert!(zero.is_err());

    let bad_status = conn.execute(
        "INSERT INTO petitions (title, description, status, created_at, last_updated)
         VALUES ('t', 'd', 'archived', 1, 1);",
        [],
    );
    assert!(bad_status.is_err());
}

#[test]
fn corrupted_rows_surface_as_invalid_data() {
    use petition_core::PetitionRepository;

    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "PRAGMA ignore_check_constraints = ON;
         INSERT INTO petitions (title, description, status, created_at, last_updated)
         VALUES ('t', 'd', 'archived', 1, 1);
         PRAGMA ignore_check_constraints = OFF;",
    )
    .unwrap();

    let repo = SqlitePetitionRepository::try_new(conn).unwrap();
    let err = repo.list_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

fn version_of(conn: &Connection) -> u32 {
    schema_version(conn).unwrap()
}

fn assert_table_exists(conn: &Connection, name: &str) {
    assert!(schema_object_exists(conn, "table", name), "missing table {name}");
}

fn assert_index_exists(conn: &Connection, name: &str) {
    assert!(schema_object_exists(conn, "index", name), "missing index {name}");
}

fn schema_object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2;",
        [kind, name],
        |row| row.get::<_, i64>(0),
    )
    .unwrap()
        == 1
}
