//! Schema → catalog refresh → incremental detail enrichment.
//!
//! Each step runs to completion before the next begins. Fetch failures are
//! logged and the affected item is skipped; store failures abort the run.

mod catalog;
mod enrich;
#[cfg(test)]
mod fake;

pub use catalog::CatalogOutcome;
pub use enrich::EnrichReport;

use anyhow::Result;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{error, info};
use tz_store::{Db, EpochSecs};
use tzsync_core::{FetchError, SyncConfig, ZoneSource};

pub(crate) fn now_epoch() -> EpochSecs {
    OffsetDateTime::now_utc().unix_timestamp()
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_else(|_| String::new())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub catalog: CatalogOutcome,
    pub enrich: EnrichReport,
}

pub struct Syncer<'a, S: ?Sized> {
    db: &'a mut Db,
    source: &'a S,
    audit_errors: bool,
}

impl<'a, S: ZoneSource + ?Sized> Syncer<'a, S> {
    pub fn new(db: &'a mut Db, source: &'a S, config: &SyncConfig) -> Self {
        Syncer { db, source, audit_errors: config.audit_errors_in_store }
    }

    pub fn ensure_schema(&self) -> Result<()> {
        self.db.ensure_schema()
    }

    /// The full job: schema, then catalog, then enrichment.
    pub fn run(&mut self) -> Result<RunReport> {
        self.ensure_schema()?;
        let catalog = self.refresh_catalog()?;
        let enrich = self.enrich_details()?;
        info!(?catalog, ?enrich, "sync finished");
        Ok(RunReport { catalog, enrich })
    }

    // Every skipped fetch goes to the error log; only writing the audit row
    // can fail the run.
    fn note_failure(&self, context: &str, err: &FetchError) -> Result<()> {
        error!(endpoint = %err.endpoint(), "skipping {context}: {err}");
        if self.audit_errors {
            self.db.record_error(&format!("{context}: {err}"), &now_rfc3339())?;
        }
        Ok(())
    }
}
