use crate::{Db, ErrorRow};
use anyhow::Result;
use rusqlite::params;

impl Db {
    pub fn record_error(&self, message: &str, occurred_at: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO TZDB_ERROR_LOG (error, timestamp) VALUES (?1, ?2)",
            params![message, occurred_at],
        )?;
        Ok(())
    }

    pub fn error_records(&self) -> Result<Vec<ErrorRow>> {
        let mut stmt = self.conn.prepare("SELECT id, error, timestamp FROM TZDB_ERROR_LOG ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(ErrorRow { id: r.get(0)?, error: r.get(1)?, occurred_at: r.get(2)? })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
