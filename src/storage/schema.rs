//! Schema and connection setup for the `user_logins` table.

use rusqlite::Connection;
use std::time::Duration;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Apply per-connection pragmas.
pub fn apply_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(
        r#"
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = FULL;
        "#,
    )
}

/// Create the `user_logins` table if it does not exist yet.
///
/// No key or uniqueness constraint: every insert
/// appends a row.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS user_logins (
            user_id          TEXT,
            device_type      TEXT,
            masked_ip        TEXT,
            masked_device_id TEXT,
            locale           TEXT,
            app_version      INTEGER,
            create_date      DATE
        );
        "#,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        initialize_schema(&conn).unwrap();

        let columns: Vec<String> = conn
            .prepare("SELECT name FROM pragma_table_info('user_logins')")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            columns,
            [
                "user_id",
                "device_type",
                "masked_ip",
                "masked_device_id",
                "locale",
                "app_version",
                "create_date"
            ]
        );
    }
}
