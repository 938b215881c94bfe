//! Binary entrypoint for the arealift CLI.
//!
//! Commands:
//! - `migrate [--area-dir <dir>] [--workers <n>]` - parse every `.are`
//!   file in the directory and stream records to the backend services
//! - `inspect <file>` - parse one file and print the resulting area as
//!   JSON, without touching any sink
//! - `init` - create a starter `config.toml`
//!
//! See the library crate docs for module-level details: `arealift::`.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{error, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Semaphore;

use arealift::area::Area;
use arealift::config::Config;
use arealift::sink::{HttpSink, RecordSink};

#[derive(Parser)]
#[command(name = "arealift")]
#[command(about = "Migrates legacy ROM-style area files into a modern game backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every area file in a directory and post records to the backend
    Migrate {
        /// Directory of `.are` files (overrides the configured directory)
        #[arg(short, long)]
        area_dir: Option<String>,

        /// Parallel file workers (overrides the configured count)
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Parse one area file and print it as JSON (no sink)
    Inspect {
        /// Path to a single `.are` file
        file: String,
    },
    /// Initialize a new migration configuration
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init, which
    // writes the default config later).
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Migrate { area_dir, workers } => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            let dir = area_dir.unwrap_or_else(|| config.migration.area_dir.clone());
            let workers = workers.unwrap_or(config.migration.workers).max(1);
            migrate(&dir, workers, &config).await?;
        }
        Commands::Inspect { file } => {
            let area = Area::load(&file)
                .await
                .with_context(|| format!("parsing {}", file))?;
            println!("{}", serde_json::to_string_pretty(&area)?);
        }
        Commands::Init => {
            info!("Initializing new migration configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
    }

    Ok(())
}

/// Fan one worker task out per area file, bounded by a semaphore. Files
/// are independent of each other; ordering only matters within a file,
/// and `Area::deliver` takes care of that.
async fn migrate(dir: &str, workers: usize, config: &Config) -> Result<()> {
    let sink: Arc<dyn RecordSink> = Arc::new(HttpSink::new(config.sink.clone())?);
    let files = area_files(dir).await?;
    if files.is_empty() {
        warn!("no .are files found in {}", dir);
        return Ok(());
    }
    info!("migrating {} area file(s) from {} with {} worker(s)", files.len(), dir, workers);

    let semaphore = Arc::new(Semaphore::new(workers));
    let mut handles = Vec::with_capacity(files.len());
    for path in files {
        let sink = Arc::clone(&sink);
        let semaphore = Arc::clone(&semaphore);
        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire().await.ok()?;
            match Area::load(&path).await {
                Ok(area) => {
                    let failures = area.deliver(sink.as_ref()).await;
                    Some((path, failures))
                }
                Err(e) => {
                    error!("skipping {}: {}", path.display(), e);
                    None
                }
            }
        }));
    }

    let mut migrated = 0usize;
    let mut failed_records = 0usize;
    for handle in handles {
        if let Ok(Some((path, failures))) = handle.await {
            migrated += 1;
            failed_records += failures;
            if failures > 0 {
                warn!("{}: {} record(s) rejected by sink", path.display(), failures);
            }
        }
    }
    info!(
        "migration complete: {} file(s) processed, {} record(s) rejected",
        migrated, failed_records
    );
    Ok(())
}

async fn area_files(dir: &str) -> Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| format!("reading area directory {}", dir))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("are") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config.
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.as_ref().and_then(|c| c.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new().create(true).append(true).open(&file) {
            let mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            let is_tty = atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        } else {
            eprintln!("warning: could not open log file {}", file);
            builder.format(default_format);
        }
    } else {
        builder.format(default_format);
    }
    let _ = builder.try_init();
}

fn default_format(
    fmt: &mut env_logger::fmt::Formatter,
    record: &log::Record<'_>,
) -> std::io::Result<()> {
    use std::io::Write;
    writeln!(
        fmt,
        "{} [{}] {}",
        chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
        record.level(),
        record.args()
    )
}
