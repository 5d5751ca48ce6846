mod cli_messages;
mod client;
mod config;
mod consts;
mod error_classifier;
mod events;
mod logging;
mod provider;
mod server;
mod session;
mod snapshot;
mod ui;
mod workers;

use crate::config::{Config, get_config_path};
use crate::consts::cli_consts::provider::DEFAULT_DATA_FILE;
use crate::error_classifier::ErrorClassifier;
use crate::provider::{DataProvider, ProviderConfig};
use crate::server::SentimentServer;
use crate::session::{run_headless_mode, run_tui_mode, setup_session};
use crate::snapshot::display::SnapshotView;
use crate::snapshot::{ReturnBuckets, SentimentSnapshot};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve market sentiment snapshots over HTTP
    Serve {
        /// Path to the config file (defaults to ~/.velo-sentiment/config.json)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Address to bind to
        #[arg(long, value_name = "ADDR")]
        bind: Option<IpAddr>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,

        /// Where snapshots come from
        #[arg(long, value_enum)]
        provider: Option<ProviderKind>,

        /// Snapshot file for the file provider
        #[arg(long, value_name = "PATH")]
        data_file: Option<PathBuf>,

        /// Command that prints a snapshot as JSON, for the process provider. Goes after `--`
        #[arg(last = true, value_name = "PROG ARGS")]
        command: Option<Vec<String>>,
    },
    /// Show the sentiment dashboard
    Dashboard {
        /// Path to the config file (defaults to ~/.velo-sentiment/config.json)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Sentiment endpoint to poll
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Seconds between refreshes
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,

        /// Print updates instead of drawing the dashboard
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Fill the dashboard background
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Compute bias metrics from a bucket histogram and write a snapshot file
    BuildSnapshot {
        /// JSON object of return buckets, e.g. {"-9%": {"value": 12, "color": "red", "is_positive": false}}
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Output file, or `-` for stdout
        #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
        output: PathBuf,
    },
    /// Write a config file with the default settings
    InitConfig {
        /// Path to the config file (defaults to ~/.velo-sentiment/config.json)
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Replace an existing config file
        #[arg(long, action = clap::ArgAction::SetTrue)]
        force: bool,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    /// Read a snapshot JSON file on every request
    File,
    /// Serve a fixed demonstration snapshot
    Mock,
    /// Run a command and parse its stdout
    Process,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    match args.command {
        Command::Serve {
            config,
            bind,
            port,
            provider,
            data_file,
            command,
        } => {
            let config = load_config(config)?;
            let provider_config = resolve_provider(config.provider, provider, data_file, command)?;
            let bind = match bind {
                Some(addr) => addr,
                None => config.bind.parse::<IpAddr>().map_err(|e| {
                    format!("Invalid bind address `{}` in config: {}", config.bind, e)
                })?,
            };
            let addr = SocketAddr::new(bind, port.unwrap_or(config.port));
            serve(provider_config, addr).await
        }
        Command::Dashboard {
            config,
            url,
            interval,
            headless,
            with_background,
        } => {
            let config = load_config(config)?;
            let url = url.unwrap_or(config.dashboard_url);
            let interval = Duration::from_secs(interval.unwrap_or(config.poll_interval_secs));
            dashboard(url, interval, headless, with_background).await
        }
        Command::BuildSnapshot { input, output } => build_snapshot(&input, &output),
        Command::InitConfig { config, force } => init_config(config, force),
    }
}

/// Config from `path` or the default location. A missing file means defaults.
fn load_config(path: Option<PathBuf>) -> Result<Config, Box<dyn Error>> {
    let path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };
    Config::load_or_default(&path)
        .map_err(|e| format!("Failed to load config {}: {}", path.display(), e).into())
}

/// Apply CLI provider flags on top of the configured provider.
///
/// `--data-file` and a trailing command imply their provider kind when `--provider` is absent.
fn resolve_provider(
    configured: ProviderConfig,
    kind: Option<ProviderKind>,
    data_file: Option<PathBuf>,
    command: Option<Vec<String>>,
) -> Result<ProviderConfig, String> {
    let kind = kind.or_else(|| {
        if command.is_some() {
            Some(ProviderKind::Process)
        } else if data_file.is_some() {
            Some(ProviderKind::File)
        } else {
            None
        }
    });

    match kind {
        None => Ok(configured),
        Some(ProviderKind::Mock) => Ok(ProviderConfig::Mock),
        Some(ProviderKind::File) => {
            let path = match (data_file, configured) {
                (Some(path), _) => path,
                (None, ProviderConfig::StaticFile { path }) => path,
                (None, _) => PathBuf::from(DEFAULT_DATA_FILE),
            };
            Ok(ProviderConfig::StaticFile { path })
        }
        Some(ProviderKind::Process) => match (command, configured) {
            (Some(command), configured) => {
                let mut parts = command.into_iter();
                let program = parts
                    .next()
                    .ok_or_else(|| "The command after `--` needs a program to run".to_string())?;
                let timeout_secs = match configured {
                    ProviderConfig::ExternalProcess { timeout_secs, .. } => timeout_secs,
                    _ => consts::cli_consts::provider::EXTERNAL_TIMEOUT_SECS,
                };
                Ok(ProviderConfig::ExternalProcess {
                    program,
                    args: parts.collect(),
                    timeout_secs,
                })
            }
            (None, configured @ ProviderConfig::ExternalProcess { .. }) => Ok(configured),
            (None, _) => {
                Err("The process provider needs a command after `--` or a configured program".to_string())
            }
        },
    }
}

fn init_config(path: Option<PathBuf>, force: bool) -> Result<(), Box<dyn Error>> {
    let path = match path {
        Some(path) => path,
        None => get_config_path()?,
    };
    if path.exists() && !force {
        print_cmd_warn!(
            "Config already exists",
            "{} was left unchanged. Use --force to overwrite it.",
            path.display()
        );
        return Ok(());
    }

    Config::default()
        .save(&path)
        .map_err(|e| format!("Failed to save config {}: {}", path.display(), e))?;
    print_cmd_success!("Config written", "{}", path.display());
    Ok(())
}

async fn serve(provider_config: ProviderConfig, addr: SocketAddr) -> Result<(), Box<dyn Error>> {
    logging::init();

    let provider = DataProvider::from(provider_config);

    // Probe once so a misconfigured provider shows up before the first request
    match provider.snapshot().await {
        Ok(snapshot) => log::info!(
            "Provider ready: {}",
            SnapshotView::of(&snapshot).summary()
        ),
        Err(e) => {
            let level: log::Level = ErrorClassifier::new().classify_provider_error(&e).into();
            log::log!(level, "Provider not ready yet ({}): {}", provider, e);
        }
    }

    SentimentServer::new(provider).run(addr).await?;
    Ok(())
}

async fn dashboard(
    url: String,
    interval: Duration,
    headless: bool,
    with_background: bool,
) -> Result<(), Box<dyn Error>> {
    if headless {
        logging::init();
    }

    let session = setup_session(url, interval).await?;
    if headless {
        run_headless_mode(session).await
    } else {
        run_tui_mode(session, with_background).await
    }
}

fn build_snapshot(input: &Path, output: &Path) -> Result<(), Box<dyn Error>> {
    let buckets = read_buckets(input)
        .map_err(|e| format!("Failed to read buckets from {}: {}", input.display(), e))?;
    if buckets.is_empty() {
        return Err(format!("No return buckets in {}; nothing written", input.display()).into());
    }
    let bucket_count = buckets.len();

    let snapshot = SentimentSnapshot::from_buckets(buckets, chrono::Utc::now());

    if output == Path::new("-") {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    snapshot
        .save(output)
        .map_err(|e| format!("Failed to save snapshot to {}: {}", output.display(), e))?;
    print_cmd_success!(
        "Snapshot written",
        "{} from {} buckets ({})",
        output.display(),
        bucket_count,
        SnapshotView::of(&snapshot).summary()
    );
    Ok(())
}

/// A bare histogram, or an existing snapshot whose metrics get recomputed.
fn read_buckets(input: &Path) -> Result<ReturnBuckets, std::io::Error> {
    match ReturnBuckets::load_from_file(input) {
        Ok(buckets) => Ok(buckets),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
            SentimentSnapshot::load_from_file(input)
                .map(|snapshot| snapshot.data)
                .map_err(|_| e)
        }
        Err(e) => Err(e),
    }
}
