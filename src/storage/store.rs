//! Record store for the `user_logins` table.
//!
//! Every operation opens its own connection and drops it before returning,
//! so each insert commits independently of the others.

use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::{apply_pragmas, initialize_schema};
use crate::model::LoginRecord;

/// Error type for record store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Where the record store lives.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,
}

impl StoreConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

/// Insert, read and delete login records.
#[derive(Debug, Clone)]
pub struct RecordStore {
    config: StoreConfig,
}

impl RecordStore {
    /// Create a store. No connection is opened until the first operation.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Path of the backing database file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.config.path).map_err(|source| StoreError::Open {
            path: self.config.path.clone(),
            source,
        })?;
        apply_pragmas(&conn)?;
        initialize_schema(&conn)?;
        Ok(conn)
    }

    /// Append one record. Identical records produce duplicate rows.
    pub fn insert(&self, record: &LoginRecord) -> Result<(), StoreError> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO user_logins
                (user_id, device_type, masked_ip, masked_device_id, locale, app_version, create_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                record.user_id,
                record.device_type,
                record.masked_ip,
                record.masked_device_id,
                record.locale,
                record.app_version,
                record.create_date,
            ],
        )?;
        Ok(())
    }

    /// Every row in storage order. Meant for inspection, not for the ingest path.
    pub fn read_all(&self) -> Result<Vec<LoginRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT user_id, device_type, masked_ip, masked_device_id, locale, app_version, create_date
            FROM user_logins
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(LoginRecord {
                    user_id: row.get(0)?,
                    device_type: row.get(1)?,
                    masked_ip: row.get(2)?,
                    masked_device_id: row.get(3)?,
                    locale: row.get(4)?,
                    app_version: row.get(5)?,
                    create_date: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Remove every row. Returns the number of rows deleted.
    pub fn delete_all(&self) -> Result<usize, StoreError> {
        let conn = self.connect()?;
        Ok(conn.execute("DELETE FROM user_logins", [])?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymize::mask;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn record(user_id: &str) -> LoginRecord {
        LoginRecord {
            user_id: user_id.to_string(),
            device_type: "ios".into(),
            masked_ip: mask("1.2.3.4"),
            masked_device_id: mask("abc"),
            locale: "en-US".into(),
            app_version: 2,
            create_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[test]
    fn test_insert_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(temp_dir.path().join("test.db")));

        store.insert(&record("1")).unwrap();

        let rows = store.read_all().unwrap();
        assert_eq!(rows, vec![record("1")]);
    }

    #[test]
    fn test_duplicate_inserts_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(temp_dir.path().join("test.db")));

        store.insert(&record("1")).unwrap();
        store.insert(&record("1")).unwrap();

        assert_eq!(store.read_all().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_all() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(temp_dir.path().join("test.db")));

        store.insert(&record("1")).unwrap();
        store.insert(&record("2")).unwrap();

        assert_eq!(store.delete_all().unwrap(), 2);
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_all_on_fresh_database_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = RecordStore::new(StoreConfig::new(temp_dir.path().join("fresh.db")));
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_unreachable_database_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("test.db");
        let store = RecordStore::new(StoreConfig::new(&path));

        assert!(store.read_all().is_err());
        assert!(store.insert(&record("1")).is_err());
    }
}
