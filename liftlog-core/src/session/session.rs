use crate::db;
use crate::errors::Result;
use diesel::sqlite::SqliteConnection;
use log::info;

#[derive(Debug, Clone)]
pub struct Session {
    database_url: String,
}

impl Session {
    /// Opens the database at `database_url`, creating the file and the workout
    /// tables if needed.
    pub fn open(database_url: &str) -> Result<Self> {
        let mut conn = db::establish(database_url)?;
        db::init_database(&mut conn)?;
        info!("Using workout database {}", database_url);

        Ok(Self {
            database_url: database_url.to_string(),
        })
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub(crate) fn connect(&self) -> Result<SqliteConnection> {
        db::establish(&self.database_url)
    }
}
