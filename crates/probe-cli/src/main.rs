use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use probe_core::config::ProbeConfig;
use probe_core::controller::Harness;

mod shell;

use shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "storage-probe")]
#[command(about = "Manual test harness for a remote file-storage HTTP API")]
#[command(version)]
struct Cli {
    /// Base URL of the API under test (trailing slash ignored)
    #[arg(long, env = "PROBE_API_URL", global = true)]
    api_url: Option<String>,

    /// Path to config file
    #[arg(long, env = "PROBE_CONFIG_PATH", global = true)]
    config_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "PROBE_LOG_LEVEL", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and render the stored-file listing
    List,
    /// Encode a local file and upload it
    Upload {
        /// Local file to upload
        path: PathBuf,
        /// Name to store it under (default: the file's basename)
        #[arg(long)]
        name: Option<String>,
    },
    /// Download a stored file and write it to disk
    Download {
        /// Filename as shown in the listing
        filename: String,
        /// Destination path (default: basename in the download dir)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config_path = cli
        .config_path
        .map(PathBuf::from)
        .unwrap_or_else(ProbeConfig::default_path);

    let config = if config_path.exists() {
        info!("loading config from {}", config_path.display());
        ProbeConfig::load(&config_path)?
    } else {
        ProbeConfig::default()
    };

    let mut harness = Harness::new();
    if let Some(url) = &cli.api_url {
        harness.set_api_url(url);
    }

    let (mut shell, event_rx) = Shell::new(harness, config);

    match cli.command {
        Some(Commands::List) => {
            anyhow::ensure!(shell.do_list().await, "list failed");
        }
        Some(Commands::Upload { path, name }) => {
            anyhow::ensure!(
                shell.do_upload(&path, name.as_deref()).await,
                "upload failed"
            );
        }
        Some(Commands::Download { filename, out }) => {
            anyhow::ensure!(
                shell.do_download(&filename, out.as_deref()).await,
                "download failed"
            );
        }
        None => shell::run(shell, event_rx).await?,
    }

    Ok(())
}
