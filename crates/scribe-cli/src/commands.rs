use colored::Colorize;
use tracing_subscriber::EnvFilter;

use scribe_server::{ScribeServer, ServerConfig, StorageConfig};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(ref args) => {
            let config = effective_config(&cli, args)?;
            init_tracing(&config, cli.verbose);
            tracing::debug!(?config, "effective configuration");
            cmd_serve(config)
        }
        Command::Config(ref args) => {
            let config = effective_config(&cli, &args.overrides)?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Config file (or defaults) with command-line overrides applied.
fn effective_config(cli: &Cli, args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(path) = &args.data {
        config.storage = StorageConfig::File { path: path.clone() };
    }
    Ok(config)
}

fn init_tracing(config: &ServerConfig, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn cmd_serve(config: ServerConfig) -> anyhow::Result<()> {
    let storage = match &config.storage {
        StorageConfig::Memory => "memory".to_string(),
        StorageConfig::File { path } => path.display().to_string(),
    };
    println!(
        "{} Scribe listening on {} (storage: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        storage.cyan()
    );
    let server = ScribeServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}
