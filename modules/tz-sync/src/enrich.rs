use crate::{now_epoch, Syncer};
use anyhow::Result;
use std::collections::HashSet;
use tracing::{debug, info};
use tz_store::StagedDetail;
use tzsync_core::{zone_detail, ZoneKey, ZoneSource};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnrichReport {
    /// Catalog pairs examined.
    pub checked: usize,
    /// Pairs that already had detail (or were staged earlier this run).
    pub skipped_existing: usize,
    pub fetched: usize,
    pub failed: usize,
    /// Rows held in the staging buffer at merge time.
    pub staged: usize,
    /// Staged rows that survived the insert-if-absent merge.
    pub inserted: usize,
}

impl<'a, S: ZoneSource + ?Sized> Syncer<'a, S> {
    /// Fetch detail for every catalog pair that has none yet, then merge the
    /// staged rows into the detail relation in one insert-if-absent batch.
    ///
    /// The existence check only saves network calls. Uniqueness is enforced by
    /// the merge, so rows that appear between check and merge are kept as they
    /// are and the staged copy is dropped.
    pub fn enrich_details(&mut self) -> Result<EnrichReport> {
        let work = self.db.catalog_keys()?;
        let mut report = EnrichReport::default();
        let mut staging: Vec<StagedDetail> = Vec::new();
        let mut staged: HashSet<ZoneKey> = HashSet::new();

        for key in work {
            report.checked += 1;
            if staged.contains(&key) || self.db.detail_exists(&key)? {
                report.skipped_existing += 1;
                continue;
            }
            match zone_detail(self.source, &key) {
                Ok(detail) => {
                    debug!(zone = %key.zone_name, country = %key.country_code, "staged detail");
                    report.fetched += 1;
                    staging.push(StagedDetail { detail, fetched_at: now_epoch() });
                    staged.insert(key);
                }
                Err(e) => {
                    report.failed += 1;
                    self.note_failure(&format!("detail for {key}"), &e)?;
                }
            }
        }

        report.staged = staging.len();
        report.inserted = self.db.insert_details_if_absent(&staging)?;
        info!(
            checked = report.checked,
            skipped_existing = report.skipped_existing,
            fetched = report.fetched,
            failed = report.failed,
            staged = report.staged,
            inserted = report.inserted,
            "detail enrichment merged"
        );
        Ok(report)
    }
}
