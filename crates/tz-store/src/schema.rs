pub const CATALOG_TABLE: &str = "TZDB_TIMEZONES";
pub const DETAILS_TABLE: &str = "TZDB_ZONE_DETAILS";
pub const ERROR_TABLE: &str = "TZDB_ERROR_LOG";

// Create-if-absent only: existing tables are never altered or dropped.
pub const SCHEMA: &str = r#"
BEGIN;

CREATE TABLE IF NOT EXISTS TZDB_TIMEZONES (
  id              INTEGER PRIMARY KEY,
  zoneName        TEXT NOT NULL,
  countryCode     TEXT NOT NULL,
  timestamp       INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS TZDB_ZONE_DETAILS (
  id              INTEGER PRIMARY KEY,
  zoneName        TEXT NOT NULL,
  countryName     TEXT NOT NULL,
  countryCode     TEXT NOT NULL,
  timestamp       INTEGER NOT NULL,
  UNIQUE (zoneName, countryCode)
);

CREATE TABLE IF NOT EXISTS TZDB_ERROR_LOG (
  id              INTEGER PRIMARY KEY,
  error           TEXT NOT NULL,
  timestamp       TEXT NOT NULL
);

COMMIT;
"#;
