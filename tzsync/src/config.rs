use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tzsync_core::SyncConfig;

pub const DEFAULT_CONFIG_FILE: &str = "tzsync.yaml";
pub const CREDENTIAL_ENV: &str = "TZDB_API_KEY";

#[derive(Debug, Default, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub credential: Option<String>,
    pub store_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub error_log: Option<PathBuf>,
    pub min_request_interval_ms: Option<u64>,
    pub audit_errors_in_store: Option<bool>,
}

/// Settings given on the command line; these win over everything else.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub credential: Option<String>,
    pub store_path: Option<PathBuf>,
    pub base_url: Option<String>,
    pub error_log: Option<PathBuf>,
}

/// Load an explicit config file, or `./tzsync.yaml` if it exists.
pub fn load_config(path: Option<&Path>) -> Result<Option<FileConfig>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() { p.to_path_buf() } else { return Ok(None); }
        }
    };
    let s = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let cfg = serde_yaml::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(cfg))
}

/// Precedence: command line, then environment, then file, then defaults.
pub fn resolve(file: Option<FileConfig>, env_credential: Option<String>, cli: Overrides) -> SyncConfig {
    let file = file.unwrap_or_default();
    let defaults = SyncConfig::default();
    SyncConfig {
        credential: cli
            .credential
            .or(env_credential.filter(|k| !k.is_empty()))
            .or(file.credential)
            .unwrap_or(defaults.credential),
        store_path: cli.store_path.or(file.store_path).unwrap_or(defaults.store_path),
        base_url: cli.base_url.or(file.base_url).unwrap_or(defaults.base_url),
        error_log: cli.error_log.or(file.error_log).unwrap_or(defaults.error_log),
        min_request_interval_ms: file.min_request_interval_ms.unwrap_or(defaults.min_request_interval_ms),
        audit_errors_in_store: file.audit_errors_in_store.unwrap_or(defaults.audit_errors_in_store),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_file() {
        let cfg: FileConfig = serde_yaml::from_str(
            "credential: FILEKEY\nstore_path: /var/lib/tz.db\nmin_request_interval_ms: 1000\naudit_errors_in_store: true\n",
        )
        .unwrap();
        assert_eq!(cfg.credential.as_deref(), Some("FILEKEY"));
        assert_eq!(cfg.store_path, Some(PathBuf::from("/var/lib/tz.db")));
        assert_eq!(cfg.min_request_interval_ms, Some(1000));
        assert_eq!(cfg.audit_errors_in_store, Some(true));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(serde_yaml::from_str::<FileConfig>("api_key: X\n").is_err());
    }

    #[test]
    fn command_line_beats_env_beats_file() {
        let file = FileConfig {
            credential: Some("FILEKEY".into()),
            store_path: Some("file.db".into()),
            ..FileConfig::default()
        };
        let c = resolve(Some(file.clone()), Some("ENVKEY".into()), Overrides::default());
        assert_eq!(c.credential, "ENVKEY");
        assert_eq!(c.store_path, PathBuf::from("file.db"));

        let cli = Overrides { credential: Some("CLIKEY".into()), store_path: Some("cli.db".into()), ..Overrides::default() };
        let c = resolve(Some(file.clone()), Some("ENVKEY".into()), cli);
        assert_eq!(c.credential, "CLIKEY");
        assert_eq!(c.store_path, PathBuf::from("cli.db"));

        let c = resolve(Some(file), Some(String::new()), Overrides::default());
        assert_eq!(c.credential, "FILEKEY");
    }

    #[test]
    fn defaults_without_any_source() {
        let c = resolve(None, None, Overrides::default());
        assert_eq!(c, SyncConfig::default());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("tzsync-no-such-config.yaml");
        assert!(load_config(Some(&path)).is_err());
    }
}
