use crate::errors::StorageError;
use log::info;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

/// Initialization script used when no schema file is configured.
pub const DEFAULT_SCHEMA: &str = include_str!("../../migrations/create_expenses.sql");

/// Owned connection to the expense database.
///
/// Built once at startup and lent to the repository by reference. Operations
/// only issue statements through it; nothing reconfigures the handle after
/// initialization.
#[derive(Debug)]
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Opens (or creates) the database file at `path`, checks the file is a
    /// readable SQLite database and runs `schema_script` against it.
    pub fn initialize(path: impl AsRef<Path>, schema_script: &str) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let storage = Self::bootstrap(conn, schema_script)?;
        info!("database initialized at {}", path.display());
        Ok(storage)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::Open {
            path: ":memory:".into(),
            source,
        })?;
        Self::bootstrap(conn, DEFAULT_SCHEMA)
    }

    fn bootstrap(conn: Connection, schema_script: &str) -> Result<Self, StorageError> {
        // Reads the file header, so a file that is not SQLite fails here.
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(StorageError::Verify)?;
        conn.execute_batch(schema_script)
            .map_err(StorageError::SchemaExec)?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

/// Returns the schema script to apply at startup: the file at `path` when one
/// is configured, the embedded default otherwise.
pub fn load_schema_script(path: Option<&Path>) -> Result<String, StorageError> {
    match path {
        Some(path) => fs::read_to_string(path).map_err(|source| StorageError::SchemaRead {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(DEFAULT_SCHEMA.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, tempdir};

    fn table_exists(storage: &Storage, name: &str) -> bool {
        storage
            .connection()
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [name],
                |row| row.get::<_, i64>(0),
            )
            .unwrap()
            == 1
    }

    #[test]
    fn test_open_in_memory_creates_expenses_table() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(table_exists(&storage, "expenses"));
    }

    #[test]
    fn test_initialize_creates_database_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.db");

        let storage = Storage::initialize(&path, DEFAULT_SCHEMA).unwrap();
        assert!(path.exists());
        assert!(table_exists(&storage, "expenses"));
    }

    #[test]
    fn test_initialize_twice_keeps_existing_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.db");

        let first = Storage::initialize(&path, DEFAULT_SCHEMA).unwrap();
        first
            .connection()
            .execute(
                "INSERT INTO expenses (description, amount, category, date) VALUES ('Coffee', 3.5, 'Food', '2026-01-29')",
                [],
            )
            .unwrap();
        drop(first);

        let second = Storage::initialize(&path, DEFAULT_SCHEMA).unwrap();
        let count: i64 = second
            .connection()
            .query_row("SELECT COUNT(*) FROM expenses", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_initialize_fails_when_directory_missing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("expenses.db");

        let result = Storage::initialize(&path, DEFAULT_SCHEMA);
        assert!(matches!(result, Err(StorageError::Open { .. })));
    }

    #[test]
    fn test_initialize_rejects_non_sqlite_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{}", "this is a plain text file, not a database\n".repeat(50)).unwrap();

        let result = Storage::initialize(tmp.path(), DEFAULT_SCHEMA);
        assert!(matches!(result, Err(StorageError::Verify(_))));
    }

    #[test]
    fn test_initialize_fails_on_broken_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.db");

        let result = Storage::initialize(&path, "CREATE TABLE expenses (");
        assert!(matches!(result, Err(StorageError::SchemaExec(_))));
    }

    #[test]
    fn test_load_schema_script_defaults_to_embedded() {
        let script = load_schema_script(None).unwrap();
        assert_eq!(script, DEFAULT_SCHEMA);
        assert!(script.contains("CREATE TABLE IF NOT EXISTS expenses"));
    }

    #[test]
    fn test_load_schema_script_reads_file() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "CREATE TABLE IF NOT EXISTS expenses (id INTEGER PRIMARY KEY);").unwrap();

        let script = load_schema_script(Some(tmp.path())).unwrap();
        assert!(script.starts_with("CREATE TABLE IF NOT EXISTS expenses"));
    }

    #[test]
    fn test_load_schema_script_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.sql");

        let result = load_schema_script(Some(&path));
        assert!(matches!(result, Err(StorageError::SchemaRead { .. })));
    }
}
