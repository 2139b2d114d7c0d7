//! certforge - bulk training-certificate generation service

use anyhow::Context;
use certforge::{Config, server, utils::logging};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "certforge", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "CERTFORGE_CONFIG", default_value = "config/certforge.yaml")]
    config: PathBuf,

    /// Bind host, overrides the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the configuration file
    #[arg(short, long)]
    port: Option<u16>,
}

async fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = if args.config.exists() {
        Config::from_file(&args.config)
            .await
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        eprintln!(
            "Configuration file {} not found, using defaults",
            args.config.display()
        );
        Config::from_env()?
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate()?;
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args).await?;
    logging::init_logging(&config.logging)?;
    server::run_server(config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display with context chain, not Debug
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
