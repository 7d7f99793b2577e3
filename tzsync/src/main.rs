use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;
use tz_remote::HttpZoneSource;
use tz_store::Db;
use tz_sync::Syncer;
use tzsync_core::SyncConfig;

mod config;
mod logging;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat { Text, Json }

#[derive(Debug, Parser)]
#[command(name = "tzsync", version, about = "Mirror TimezoneDB zone data into a local SQLite store")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Optional config file (YAML). If omitted, loads ./tzsync.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// SQLite store path
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,
    /// TimezoneDB API key (falls back to TZDB_API_KEY)
    #[arg(long, global = true)]
    key: Option<String>,
    /// Provider base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// File that receives API failures
    #[arg(long, global = true, value_name = "FILE")]
    error_log: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Create the store schema if missing
    Init,
    /// Replace the zone catalog with the provider's current list
    Catalog,
    /// Fetch details for catalog zones that have none yet
    Enrich,
    /// Full job: schema, catalog refresh, detail enrichment
    Run,
    /// Row counts per relation
    Stats {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Version => {
            println!("tzsync {} (core {})", env!("CARGO_PKG_VERSION"), tzsync_core::version());
        }
        Commands::Init => {
            let (cfg, _db) = prepare(&cli.global)?;
            info!(store = %cfg.store_path.display(), "schema ready");
        }
        Commands::Stats { format } => {
            let (_cfg, db) = prepare(&cli.global)?;
            let counts = db.counts()?;
            match format {
                OutputFormat::Text => {
                    println!("catalog: {}", counts.catalog);
                    println!("details: {}", counts.details);
                    println!("errors:  {}", counts.errors);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&counts)?),
            }
        }
        Commands::Catalog => {
            let (cfg, mut db) = prepare(&cli.global)?;
            let source = remote(&cfg)?;
            Syncer::new(&mut db, &source, &cfg).refresh_catalog()?;
        }
        Commands::Enrich => {
            let (cfg, mut db) = prepare(&cli.global)?;
            let source = remote(&cfg)?;
            Syncer::new(&mut db, &source, &cfg).enrich_details()?;
        }
        Commands::Run => {
            let (cfg, mut db) = prepare(&cli.global)?;
            let source = remote(&cfg)?;
            Syncer::new(&mut db, &source, &cfg).run()?;
        }
    }
    Ok(())
}

/// Resolve settings, install logging and open the store (schema included).
fn prepare(args: &GlobalArgs) -> Result<(SyncConfig, Db)> {
    let file_cfg = config::load_config(args.config.as_deref())?;
    let overrides = config::Overrides {
        credential: args.key.clone(),
        store_path: args.store.clone(),
        base_url: args.base_url.clone(),
        error_log: args.error_log.clone(),
    };
    let cfg = config::resolve(file_cfg, std::env::var(config::CREDENTIAL_ENV).ok(), overrides);
    logging::init_logging(&cfg.error_log)?;
    let db = Db::open_or_create(&cfg.store_path)?;
    Ok((cfg, db))
}

fn remote(cfg: &SyncConfig) -> Result<HttpZoneSource> {
    cfg.validate()?;
    HttpZoneSource::new(cfg)
}
