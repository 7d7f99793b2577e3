use crate::models::read_epoch;
use crate::{DetailRow, Db, StagedDetail};
use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension, Row};
use tzsync_core::ZoneKey;

fn detail_row(r: &Row<'_>) -> rusqlite::Result<DetailRow> {
    Ok(DetailRow {
        id: r.get(0)?,
        zone_name: r.get(1)?,
        country_name: r.get(2)?,
        country_code: r.get(3)?,
        fetched_at: read_epoch(r, 4)?,
    })
}

impl Db {
    pub fn detail_exists(&self, key: &ZoneKey) -> Result<bool> {
        let found: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM TZDB_ZONE_DETAILS WHERE zoneName = ?1 AND countryCode = ?2)",
            params![key.zone_name, key.country_code],
            |r| r.get(0),
        )?;
        Ok(found != 0)
    }

    /// Merge staged rows with insert-if-absent semantics in one transaction.
    ///
    /// Rows whose (zoneName, countryCode) already exists are dropped and the
    /// existing row is left untouched. Returns how many rows were inserted.
    pub fn insert_details_if_absent(&mut self, staged: &[StagedDetail]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO TZDB_ZONE_DETAILS (zoneName, countryName, countryCode, timestamp) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for s in staged {
                let d = &s.detail;
                inserted += stmt
                    .execute(params![d.zone_name, d.country_name, d.country_code, s.fetched_at])
                    .with_context(|| format!("merging detail {}", d.key()))?;
            }
        }
        tx.commit().context("committing detail merge")?;
        Ok(inserted)
    }

    pub fn detail(&self, key: &ZoneKey) -> Result<Option<DetailRow>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, zoneName, countryName, countryCode, timestamp FROM TZDB_ZONE_DETAILS WHERE zoneName = ?1 AND countryCode = ?2",
                params![key.zone_name, key.country_code],
                detail_row,
            )
            .optional()?)
    }

    pub fn details(&self) -> Result<Vec<DetailRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, zoneName, countryName, countryCode, timestamp FROM TZDB_ZONE_DETAILS ORDER BY id",
        )?;
        let rows = stmt.query_map([], detail_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
