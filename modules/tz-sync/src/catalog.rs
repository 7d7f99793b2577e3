use crate::{now_epoch, Syncer};
use anyhow::Result;
use tracing::info;
use tzsync_core::{list_zones, ZoneSource};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOutcome {
    Replaced { rows: usize },
    /// The list call failed; the previous catalog stays authoritative.
    Kept { reason: String },
}

impl<'a, S: ZoneSource + ?Sized> Syncer<'a, S> {
    /// Replace the catalog with the provider's current zone list, or leave it
    /// untouched if the list call fails.
    pub fn refresh_catalog(&mut self) -> Result<CatalogOutcome> {
        let zones = match list_zones(self.source) {
            Ok(z) => z,
            Err(e) => {
                self.note_failure("catalog refresh", &e)?;
                return Ok(CatalogOutcome::Kept { reason: e.to_string() });
            }
        };
        let rows = self.db.replace_catalog(&zones, now_epoch())?;
        info!(rows, "catalog replaced");
        Ok(CatalogOutcome::Replaced { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{ScriptedSource, key};
    use tz_store::Db;
    use tzsync_core::SyncConfig;

    #[test]
    fn successful_list_replaces_catalog() {
        let mut db = Db::open_in_memory().unwrap();
        db.replace_catalog(&[key("Europe/Paris", "FR")], 1).unwrap();
        let src = ScriptedSource::new()
            .zones(&[("America/New_York", "US"), ("Europe/London", "GB")]);
        let out = Syncer::new(&mut db, &src, &SyncConfig::default()).refresh_catalog().unwrap();
        assert_eq!(out, CatalogOutcome::Replaced { rows: 2 });
        assert_eq!(
            db.catalog_keys().unwrap(),
            vec![key("America/New_York", "US"), key("Europe/London", "GB")]
        );
        assert!(db.catalog_entries().unwrap().iter().all(|r| r.fetched_at > 1));
    }

    #[test]
    fn failed_list_keeps_previous_catalog() {
        let mut db = Db::open_in_memory().unwrap();
        db.replace_catalog(&[key("Europe/Paris", "FR"), key("Asia/Tokyo", "JP")], 1).unwrap();
        let before = db.catalog_entries().unwrap();
        let src = ScriptedSource::new().list_fails();
        let out = Syncer::new(&mut db, &src, &SyncConfig::default()).refresh_catalog().unwrap();
        assert!(matches!(out, CatalogOutcome::Kept { .. }));
        assert_eq!(db.catalog_entries().unwrap(), before);
        assert_eq!(src.list_calls(), 1);
    }

    #[test]
    fn empty_successful_list_empties_catalog() {
        let mut db = Db::open_in_memory().unwrap();
        db.replace_catalog(&[key("Europe/Paris", "FR")], 1).unwrap();
        let src = ScriptedSource::new().zones(&[]);
        let out = Syncer::new(&mut db, &src, &SyncConfig::default()).refresh_catalog().unwrap();
        assert_eq!(out, CatalogOutcome::Replaced { rows: 0 });
        assert!(db.catalog_keys().unwrap().is_empty());
    }
}
