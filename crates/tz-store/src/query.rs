use crate::{Db, StoreCounts};
use anyhow::Result;

impl Db {
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let cnt: i64 = self.conn.query_row(
            "SELECT COUNT(1) FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |r| r.get(0),
        )?;
        Ok(cnt > 0)
    }

    pub fn counts(&self) -> Result<StoreCounts> {
        let count = |table: &str| -> Result<i64> {
            Ok(self.conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
        };
        Ok(StoreCounts {
            catalog: count(crate::CATALOG_TABLE)?,
            details: count(crate::DETAILS_TABLE)?,
            errors: count(crate::ERROR_TABLE)?,
        })
    }
}
