use crate::db::models::LogRow;
use crate::db::operations::{list_log_rows, search_log_rows};
use crate::errors::Result;
use crate::session::Session;

impl Session {
    /// All stored sets as display rows, latest date first.
    pub fn list_rows(&self) -> Result<Vec<LogRow>> {
        let mut conn = self.connect()?;
        list_log_rows(&mut conn)
    }

    /// Rows matching `query` in date, workout day type or exercise. An empty
    /// query matches everything.
    pub fn search_rows(&self, query: &str) -> Result<Vec<LogRow>> {
        let mut conn = self.connect()?;
        search_log_rows(&mut conn, query)
    }
}
