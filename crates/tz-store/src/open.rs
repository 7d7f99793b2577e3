use crate::schema::SCHEMA;
use anyhow::{Context, Result};
use rusqlite::Connection;

pub struct Db {
    pub conn: Connection,
}

impl Db {
    pub fn open_or_create(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("opening store {}", path.display()))?;
        apply_pragmas(&conn)?;
        let db = Db { conn };
        db.ensure_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Db { conn: Connection::open_in_memory()? };
        db.ensure_schema()?;
        Ok(db)
    }

    /// Create the three relations if they are missing. Safe to call on every run.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA).context("ensuring schema")?;
        tracing::debug!("schema ensured");
        Ok(())
    }
}

fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", &"WAL")?;
    conn.pragma_update(None, "synchronous", &"NORMAL")?;
    Ok(())
}
