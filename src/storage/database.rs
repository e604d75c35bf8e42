//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.lockin/lockin.db` and holds a single
//! `kv_store` table of string values.

use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Paths;
use crate::error::LockinError;

use super::kv::KeyValueStore;
use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at the default location.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open(paths: &Paths) -> Result<Self, LockinError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, LockinError> {
        let conn = Connection::open(path).map_err(|e| {
            LockinError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, LockinError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            LockinError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Run database migrations.
    fn migrate(&self) -> Result<(), LockinError> {
        migrations::run(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, LockinError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| LockinError::Database(format!("Failed to read {key}: {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LockinError> {
        self.conn
            .execute(
                r"INSERT INTO kv_store (key, value) VALUES (?1, ?2)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .map_err(|e| LockinError::Database(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(migrations::get_version(&db.conn).unwrap(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let db = Database::open_in_memory().unwrap();

        assert_eq!(db.get("isRunning").unwrap(), None);

        db.set("isRunning", "true").unwrap();
        assert_eq!(db.get("isRunning").unwrap().as_deref(), Some("true"));

        db.set("isRunning", "false").unwrap();
        assert_eq!(db.get("isRunning").unwrap().as_deref(), Some("false"));

        let rows: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_table_holds_only_key_and_value() {
        let db = Database::open_in_memory().unwrap();
        let mut stmt = db.conn.prepare("SELECT name FROM pragma_table_info('kv_store')").unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(Result::unwrap)
            .collect();
        assert_eq!(columns, vec!["key".to_string(), "value".to_string()]);
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.set("totalWorkTime", "3600").unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        assert_eq!(db.get("totalWorkTime").unwrap().as_deref(), Some("3600"));
    }

    #[test]
    fn test_open_with_paths_creates_root() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("lockin"));

        let _db = Database::open(&paths).unwrap();
        assert!(paths.database.exists());
    }
}
