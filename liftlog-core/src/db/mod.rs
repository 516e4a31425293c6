pub mod models;
pub mod operations;
pub mod schema;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use log::{debug, info};

use crate::errors::{LogError, Result};

/// Database file used when neither `--database` nor `DATABASE_URL` is given.
pub const DEFAULT_DATABASE_URL: &str = "workout_logs.db";

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../migrations");

/// Picks the database location: explicit value, then `DATABASE_URL`, then the default file.
pub fn resolve_database_url(explicit: Option<&str>, env_value: Option<String>) -> String {
    explicit
        .map(str::to_string)
        .or(env_value)
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// Opens a fresh connection with foreign key enforcement switched on.
pub fn establish(database_url: &str) -> Result<SqliteConnection> {
    debug!("Opening database connection to {}", database_url);
    let mut conn =
        SqliteConnection::establish(database_url).map_err(|source| LogError::Connection {
            url: database_url.to_string(),
            source,
        })?;
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(&mut conn)?;
    Ok(conn)
}

/// Creates the workout tables if they are missing. Safe to call on every startup.
pub fn init_database(conn: &mut SqliteConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| LogError::Migration(e.to_string()))?;

    if applied.is_empty() {
        debug!("Schema up to date, no migrations applied");
    }
    for version in applied {
        info!("Migration {} applied successfully", version);
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::temp_database;
    use super::*;

    #[test]
    fn resolve_prefers_explicit_then_env_then_default() {
        assert_eq!(
            resolve_database_url(Some("a.db"), Some("b.db".into())),
            "a.db"
        );
        assert_eq!(resolve_database_url(None, Some("b.db".into())), "b.db");
        assert_eq!(resolve_database_url(None, None), DEFAULT_DATABASE_URL);
        assert_eq!(
            resolve_database_url(None, Some("  ".into())),
            DEFAULT_DATABASE_URL
        );
    }

    #[test]
    fn init_database_is_idempotent() {
        let (_dir, url) = temp_database();
        let mut conn = establish(&url).unwrap();
        init_database(&mut conn).unwrap();
        init_database(&mut conn).unwrap();

        #[derive(QueryableByName)]
        struct TableCount {
            #[diesel(sql_type = diesel::sql_types::BigInt)]
            count: i64,
        }

        let tables: TableCount = diesel::sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' \
             AND name IN ('workout_logs', 'exercise_logs', 'sets')",
        )
        .get_result(&mut conn)
        .unwrap();
        assert_eq!(tables.count, 3);
    }

    #[test]
    fn init_database_adopts_existing_tables_without_data_loss() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = dir.path().join("legacy.db").to_string_lossy().into_owned();
        let mut conn = establish(&url).unwrap();
        diesel::sql_query(
            "CREATE TABLE workout_logs (id INTEGER PRIMARY KEY, date TEXT NOT NULL, \
             workout_day_type TEXT NOT NULL)",
        )
        .execute(&mut conn)
        .unwrap();
        diesel::sql_query(
            "INSERT INTO workout_logs (date, workout_day_type) VALUES ('01-05-2024', 'Push')",
        )
        .execute(&mut conn)
        .unwrap();

        init_database(&mut conn).unwrap();

        let logs: i64 = schema::workout_logs::table
            .count()
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(logs, 1);
    }
}
