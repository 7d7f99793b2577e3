use crate::models::read_epoch;
use crate::{CatalogRow, Db, EpochSecs};
use anyhow::{Context, Result};
use rusqlite::params;
use tzsync_core::ZoneKey;

impl Db {
    /// Replace the whole catalog with `zones` in a single transaction.
    ///
    /// Either every old row is gone and every new row is present, or nothing
    /// changed. Returns the number of rows written.
    pub fn replace_catalog(&mut self, zones: &[ZoneKey], fetched_at: EpochSecs) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM TZDB_TIMEZONES", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO TZDB_TIMEZONES (zoneName, countryCode, timestamp) VALUES (?1, ?2, ?3)",
            )?;
            for z in zones {
                stmt.execute(params![z.zone_name, z.country_code, fetched_at])
                    .with_context(|| format!("inserting catalog row {z}"))?;
            }
        }
        tx.commit().context("committing catalog replace")?;
        Ok(zones.len())
    }

    pub fn catalog_entries(&self) -> Result<Vec<CatalogRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, zoneName, countryCode, timestamp FROM TZDB_TIMEZONES ORDER BY id")?;
        let rows = stmt.query_map([], |r| {
            Ok(CatalogRow {
                id: r.get(0)?,
                zone_name: r.get(1)?,
                country_code: r.get(2)?,
                fetched_at: read_epoch(r, 3)?,
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn catalog_keys(&self) -> Result<Vec<ZoneKey>> {
        Ok(self.catalog_entries()?.iter().map(CatalogRow::key).collect())
    }
}
