//! 🚀 invx-cli: the front door of invx.
//!
//! 📦 Thin wrapper: set up logging, parse flags, load config, hand off to the
//! library, and turn whatever went wrong into a readable log line and exit code 1.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use invx::InventoryError;
use invx::app_config::{ConfigOverrides, load_config};

/// 📦 Periodically ship a software inventory and EOL indicators to Elasticsearch.
#[derive(Debug, Parser)]
#[command(name = "invx", version, about)]
struct Cli {
    /// TOML config file (INVX_* env vars are always read)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// CSV file with `username` and `password` columns
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Static Elasticsearch endpoint URL
    #[arg(long, conflicts_with = "discover")]
    endpoint: Option<String>,

    /// Find the endpoint through the Elastic Cloud control plane
    #[arg(long)]
    discover: bool,

    /// Secret file holding the control-plane API key (ignored unless discovering)
    #[arg(long)]
    api_key_file: Option<PathBuf>,

    /// Seconds between steady-state software sends
    #[arg(long)]
    interval: Option<u64>,

    /// Keep payloads in memory instead of POSTing them
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bootstrap the EOL indicators, then ship software records forever (default)
    Run,
    /// Print a Kibana Dev Tools `POST _bulk` snippet for the EOL indicators
    PrintEol,
    /// Resolve the Elasticsearch endpoint, print it, and exit
    Resolve,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            credentials_file: self.credentials.clone(),
            endpoint: self.endpoint.clone(),
            discover: self.discover,
            api_key_file: self.api_key_file.clone(),
            interval_secs: self.interval,
            dry_run: self.dry_run,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // 📡 RUST_LOG wins; otherwise info, so every send shows up.
    // stderr, so `print-eol` and `resolve` keep a clean stdout.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(err) = dispatch(cli).await {
        error!("💀 error: {}", err);
        let mut the_vibes_are_giving_connection_issues = false;
        for cause in err.chain().skip(1) {
            error!("⚠️  cause: {}", cause);
            let cause_str = cause.to_string();
            if cause_str.contains("error sending request")
                || cause_str.contains("connection refused")
                || cause_str.contains("Connection refused")
                || cause_str.contains("tcp connect error")
                || cause_str.contains("dns error")
            {
                the_vibes_are_giving_connection_issues = true;
            }
        }

        match err.downcast_ref::<InventoryError>() {
            Some(InventoryError::Configuration(_)) => error!(
                "🔧 hint: check the credentials CSV path, the API key file or $EC_API_KEY, and the [catalog] table."
            ),
            Some(InventoryError::Discovery(_)) => error!(
                "🔧 hint: the API key reached the control plane but no usable deployment endpoint came back. \
                 Try `invx resolve` with RUST_LOG=debug, or pin one with --endpoint."
            ),
            None if the_vibes_are_giving_connection_issues => error!(
                "🔧 hint: looks like Elasticsearch isn't reachable. Check the endpoint URL, DNS, \
                 and that the cluster is actually up."
            ),
            None => {}
        }

        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<()> {
    let command = cli.command.as_ref().unwrap_or(&Command::Run);

    if let Command::PrintEol = command {
        // -- 🖨️ no credentials, no network: just the catalog and a clock
        let app_config = load_config(cli.config.as_deref())?;
        app_config.catalog.validate()?;
        let snippet =
            invx::documents::render_console_snippet(&app_config.catalog.threats, chrono::Utc::now())?;
        print!("{}", snippet);
        return Ok(());
    }

    if let Some(path) = cli.config.as_deref() {
        let exists = path.try_exists().with_context(|| {
            format!("💀 Couldn't check whether the config file '{}' exists.", path.display())
        })?;
        if !exists {
            anyhow::bail!(
                "💀 Config file '{}' doesn't exist. If it's a relative path, check the working directory.",
                path.display()
            );
        }
    }

    let app_config = load_config(cli.config.as_deref())
        .context("💀 In invx-cli, we couldn't load the config. Take a look at the file and INVX_* env vars.")?
        .with_overrides(cli.overrides());

    match command {
        Command::Resolve => {
            let url = invx::resolve(&app_config).await?;
            println!("{}", url);
            Ok(())
        }
        _ => invx::run(app_config).await,
    }
}
