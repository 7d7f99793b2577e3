use rusqlite::types::ValueRef;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use tzsync_core::{ZoneDetail, ZoneKey};

/// Epoch seconds, stored as-is with no timezone normalisation.
pub type EpochSecs = i64;

// Older files hold fractional epoch values in the INTEGER columns.
pub(crate) fn read_epoch(r: &Row<'_>, idx: usize) -> rusqlite::Result<EpochSecs> {
    match r.get_ref(idx)? {
        ValueRef::Real(f) => Ok(f as EpochSecs),
        v => v
            .as_i64()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, v.data_type(), Box::new(e))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    pub id: i64,
    pub zone_name: String,
    pub country_code: String,
    pub fetched_at: EpochSecs,
}

impl CatalogRow {
    pub fn key(&self) -> ZoneKey {
        ZoneKey::new(self.zone_name.clone(), self.country_code.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRow {
    pub id: i64,
    pub zone_name: String,
    pub country_name: String,
    pub country_code: String,
    pub fetched_at: EpochSecs,
}

impl DetailRow {
    pub fn key(&self) -> ZoneKey {
        ZoneKey::new(self.zone_name.clone(), self.country_code.clone())
    }
}

/// A fetched detail waiting in the staging buffer for the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedDetail {
    pub detail: ZoneDetail,
    pub fetched_at: EpochSecs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRow {
    pub id: i64,
    pub error: String,
    pub occurred_at: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreCounts {
    pub catalog: i64,
    pub details: i64,
    pub errors: i64,
}
