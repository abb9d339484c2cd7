use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scribe", about = "Scribe — a small blogging REST service", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server
    Serve(ServeArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,
    /// Persist entities to this JSON file instead of memory
    #[arg(long)]
    pub data: Option<PathBuf>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub overrides: ServeArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_serve_overrides() {
        let cli = Cli::parse_from([
            "scribe",
            "serve",
            "--bind",
            "0.0.0.0:9000",
            "--data",
            "scribe.json",
        ]);
        match cli.command {
            Command::Serve(args) => {
                assert_eq!(args.bind, Some("0.0.0.0:9000".parse::<std::net::SocketAddr>().unwrap()));
                assert_eq!(args.data, Some(PathBuf::from("scribe.json")));
            }
            Command::Config(_) => panic!("expected serve"),
        }
    }

    #[test]
    fn global_config_flag() {
        let cli = Cli::parse_from(["scribe", "config", "--config", "scribe.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("scribe.toml")));
        assert!(matches!(cli.command, Command::Config(_)));
    }
}
